//! Byte cursor with line tracking.
//!
//! The cursor walks the source byte by byte for ASCII and char by char
//! elsewhere. Line terminators are `\n`, `\r\n`, a lone `\r`, U+2028 and
//! U+2029; every method that can step over one keeps `line` and
//! `line_start` current so token positions never need a second pass.

use ember_ir::Position;

#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: u32,
    line: u32,
    line_start: u32,
}

/// Saved cursor state.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct CursorState {
    pos: u32,
    line: u32,
    line_start: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Cursor {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    #[inline]
    pub(crate) fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub(crate) fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos as usize >= self.bytes.len()
    }

    /// Current byte, `0` at end of input.
    #[inline]
    pub(crate) fn current(&self) -> u8 {
        self.peek_at(0)
    }

    #[inline]
    pub(crate) fn peek(&self) -> u8 {
        self.peek_at(1)
    }

    #[inline]
    pub(crate) fn peek_at(&self, n: u32) -> u8 {
        self.bytes
            .get((self.pos + n) as usize)
            .copied()
            .unwrap_or(0)
    }

    /// Current character, decoding multi-byte UTF-8.
    #[inline]
    pub(crate) fn current_char(&self) -> Option<char> {
        self.source.get(self.pos as usize..)?.chars().next()
    }

    /// Advance one byte. Only valid over ASCII that is not a line
    /// terminator.
    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub(crate) fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Advance one character, counting line terminators.
    pub(crate) fn advance_char(&mut self) {
        let Some(c) = self.current_char() else {
            return;
        };
        let width = c.len_utf8() as u32;
        self.pos += width;
        match c {
            '\r' => {
                if self.current() == b'\n' {
                    self.pos += 1;
                }
                self.new_line();
            }
            '\n' | '\u{2028}' | '\u{2029}' => self.new_line(),
            _ => {}
        }
    }

    #[inline]
    fn new_line(&mut self) {
        self.line += 1;
        self.line_start = self.pos;
    }

    /// Advance to `target`, counting every line terminator in between.
    pub(crate) fn advance_to(&mut self, target: u32) {
        let end = (target as usize).min(self.bytes.len());
        let start = self.pos as usize;
        if end <= start {
            return;
        }
        let slice = &self.bytes[start..end];
        for hit in memchr::memchr3_iter(b'\n', b'\r', 0xE2, slice) {
            let abs = start + hit;
            let line_end = match self.bytes[abs] {
                b'\r' if self.bytes.get(abs + 1) == Some(&b'\n') => continue,
                b'\r' | b'\n' => abs + 1,
                _ => {
                    let tail = self.bytes.get(abs + 1..abs + 3);
                    if matches!(tail, Some([0x80, 0xA8 | 0xA9])) {
                        abs + 3
                    } else {
                        continue;
                    }
                }
            };
            self.line += 1;
            self.line_start = line_end as u32;
        }
        self.pos = end as u32;
    }

    /// Consume bytes while `pred` holds. `pred` must reject line
    /// terminators.
    #[inline]
    pub(crate) fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Offset of the next line terminator at or after the cursor, or the
    /// end of input.
    pub(crate) fn find_line_end(&self) -> u32 {
        let start = self.pos as usize;
        let rest = &self.bytes[start.min(self.bytes.len())..];
        let mut offset = 0;
        while let Some(hit) = memchr::memchr3(b'\n', b'\r', 0xE2, &rest[offset..]) {
            let at = offset + hit;
            if rest[at] != 0xE2 || matches!(rest.get(at + 1..at + 3), Some([0x80, 0xA8 | 0xA9])) {
                return (start + at) as u32;
            }
            offset = at + 1;
        }
        self.bytes.len() as u32
    }

    /// Offset of `needle` at or after the cursor.
    pub(crate) fn find(&self, needle: &[u8]) -> Option<u32> {
        let start = (self.pos as usize).min(self.bytes.len());
        memchr::memmem::find(&self.bytes[start..], needle).map(|i| (start + i) as u32)
    }

    #[inline]
    pub(crate) fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source
            .get(start as usize..end as usize)
            .unwrap_or("")
    }

    #[inline]
    pub(crate) fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    pub(crate) fn position(&self) -> Position {
        Position::new(self.pos, self.line, self.pos - self.line_start)
    }

    pub(crate) fn state(&self) -> CursorState {
        CursorState {
            pos: self.pos,
            line: self.line,
            line_start: self.line_start,
        }
    }

    pub(crate) fn restore(&mut self, state: CursorState) {
        self.pos = state.pos;
        self.line = state.line;
        self.line_start = state.line_start;
    }

    /// Move to a previously reported position.
    pub(crate) fn reset_to(&mut self, at: Position) {
        self.pos = at.offset;
        self.line = at.line;
        self.line_start = at.offset - at.column;
    }
}

/// Whether `c` terminates a line.
#[inline]
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_char_counts_crlf_once() {
        let mut cursor = Cursor::new("a\r\nb");
        cursor.advance_char();
        cursor.advance_char();
        assert_eq!(cursor.position(), Position::new(3, 2, 0));
    }

    #[test]
    fn test_advance_to_counts_all_terminators() {
        let source = "a\nb\rc\r\nd\u{2028}e";
        let mut cursor = Cursor::new(source);
        cursor.advance_to(source.len() as u32);
        let pos = cursor.position();
        assert_eq!(pos.line, 5);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_find_line_end_skips_other_e2_sequences() {
        // U+2014 (em dash) also starts with 0xE2.
        let cursor = Cursor::new("x\u{2014}y\nz");
        assert_eq!(cursor.find_line_end(), 5);
    }

    #[test]
    fn test_state_round_trip() {
        let mut cursor = Cursor::new("ab\ncd");
        let saved = cursor.state();
        cursor.advance_to(4);
        assert_eq!(cursor.position().line, 2);
        cursor.restore(saved);
        assert_eq!(cursor.position(), Position::new(0, 1, 0));
    }
}
