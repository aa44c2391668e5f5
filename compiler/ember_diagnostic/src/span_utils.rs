//! Line/column lookup for byte offsets.
//!
//! Line breaks are `\n`, `\r\n`, a lone `\r`, U+2028 and U+2029, the same
//! set the lexer and the code-frame renderer use.

use ember_ir::Span;

/// Pre-computed line start offsets for O(log L) lookups.
///
/// ```
/// use ember_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "let a;\nlet b;\r\nlet c;";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 11), (2, 5));
/// assert_eq!(table.offset_to_line_col(source, 15), (3, 1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        let mut chars = source.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let next_line = match c {
                '\r' => {
                    if matches!(chars.peek(), Some((_, '\n'))) {
                        chars.next();
                        Some(i + 2)
                    } else {
                        Some(i + 1)
                    }
                }
                '\n' => Some(i + 1),
                '\u{2028}' | '\u{2029}' => Some(i + c.len_utf8()),
                _ => None,
            };
            if let Some(start) = next_line {
                offsets.push(u32::try_from(start).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column); the column counts characters.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let col = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        (line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Byte offset where 1-based `line` starts.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based (line, column) of a span's start. Builds a throwaway table.
pub fn span_start_line_col(source: &str, span: Span) -> (u32, u32) {
    LineOffsetTable::build(source).offset_to_line_col(source, span.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_line_terminators() {
        let source = "a\nb\rc\r\nd\u{2028}e\u{2029}f";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_count(), 6);
        let f_offset = u32::try_from(source.find('f').unwrap_or(0)).unwrap_or(0);
        assert_eq!(table.line_from_offset(f_offset), 6);
    }

    #[test]
    fn test_columns_count_characters() {
        let source = "x = \"é\"; y";
        let y = u32::try_from(source.find('y').unwrap_or(0)).unwrap_or(0);
        assert_eq!(span_start_line_col(source, Span::point(y)), (1, 10));
    }

    #[test]
    fn test_line_start_offset() {
        let table = LineOffsetTable::build("one\ntwo\n");
        assert_eq!(table.line_start_offset(0), None);
        assert_eq!(table.line_start_offset(2), Some(4));
        assert_eq!(table.line_start_offset(3), Some(8));
        assert_eq!(table.line_start_offset(4), None);
    }
}
