//! Code-frame rendering.
//!
//! Renders a window of source lines around a target line, with a gutter of
//! right-aligned line numbers, a `>` marker on the target line and an
//! optional `^` caret under the target column:
//!
//! ```text
//!   2 | let b = 2;
//! > 3 | let c = ;
//!     |         ^
//!   4 | let d = 4;
//! ```

/// ANSI sequences used when highlighting is on.
mod colors {
    pub const GUTTER: &str = "\x1b[90m"; // Grey
    pub const MARKER: &str = "\x1b[1;31m"; // Bold red
    pub const RESET: &str = "\x1b[0m";
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct CodeFrameOptions {
    /// Context lines shown above the target line.
    pub lines_above: usize,
    /// Context lines shown below the target line.
    pub lines_below: usize,
    /// Wrap the gutter and markers in ANSI colors.
    pub highlight: bool,
}

impl Default for CodeFrameOptions {
    fn default() -> Self {
        CodeFrameOptions {
            lines_above: 2,
            lines_below: 3,
            highlight: false,
        }
    }
}

impl CodeFrameOptions {
    #[must_use]
    pub fn with_context(mut self, above: usize, below: usize) -> Self {
        self.lines_above = above;
        self.lines_below = below;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}

/// Split on every line terminator the lexer recognizes.
pub fn split_lines(source: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let end = match c {
            '\r' => {
                if matches!(chars.peek(), Some((_, '\n'))) {
                    chars.next();
                    i + 2
                } else {
                    i + 1
                }
            }
            '\n' => i + 1,
            '\u{2028}' | '\u{2029}' => i + c.len_utf8(),
            _ => continue,
        };
        lines.push(&source[start..i]);
        start = end;
    }
    lines.push(&source[start..]);
    lines
}

/// Render a code frame.
///
/// `line` is 1-based; `None` (or 0) renders the whole source without a
/// marker. `column` is 1-based; `None` or a value below 1 omits the caret.
/// A target line past the end of the source renders an empty frame.
///
/// ```
/// use ember_diagnostic::{code_frame, CodeFrameOptions};
///
/// let frame = code_frame("a\nb\nc", Some(2), Some(1), &CodeFrameOptions::default());
/// assert_eq!(frame, "  1 | a\n> 2 | b\n    | ^\n  3 | c");
/// ```
pub fn code_frame(
    source: &str,
    line: Option<usize>,
    column: Option<isize>,
    options: &CodeFrameOptions,
) -> String {
    let lines = split_lines(source);
    let target = line.filter(|&l| l > 0);
    let column = column
        .and_then(|c| usize::try_from(c).ok())
        .filter(|&c| c > 0);

    let (start, end) = match target {
        Some(line) => (
            line.saturating_sub(options.lines_above + 1),
            lines.len().min(line.saturating_add(options.lines_below)),
        ),
        None => (0, lines.len()),
    };
    if start >= end {
        return String::new();
    }

    let number_width = end.to_string().len();
    let paint = |text: &str, color: &str| -> String {
        if options.highlight {
            format!("{color}{text}{}", colors::RESET)
        } else {
            text.to_owned()
        }
    };

    let mut out = Vec::with_capacity(end - start + 1);
    for (index, text) in lines[start..end].iter().enumerate() {
        let number = start + 1 + index;
        let gutter = format!(" {number:>number_width$} | ");
        if Some(number) == target {
            let mut rendered = format!(
                "{}{}{text}",
                paint(">", colors::MARKER),
                paint(&gutter, colors::GUTTER)
            );
            if let Some(column) = column {
                let blank_gutter: String = gutter
                    .chars()
                    .map(|c| if c.is_ascii_digit() { ' ' } else { c })
                    .collect();
                let spacing: String = text
                    .chars()
                    .take(column - 1)
                    .map(|c| if c == '\t' { '\t' } else { ' ' })
                    .collect();
                rendered.push_str("\n ");
                rendered.push_str(&paint(&blank_gutter, colors::GUTTER));
                rendered.push_str(&spacing);
                rendered.push_str(&paint("^", colors::MARKER));
            }
            out.push(rendered);
        } else {
            out.push(format!(" {}{text}", paint(&gutter, colors::GUTTER)));
        }
    }
    out.join("\n")
}

#[cfg(test)]
mod tests;
