//! Output buffer.
//!
//! Tracks indentation and the last character written so adjacent tokens
//! never merge into one: a word after a word, `+ +`, `- -`, `/ /` and
//! `<! --` all get a separating space, in compact mode too. A `/` after a
//! word is spaced as well so `return /re/` keeps reading as a regex.

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 2;

pub(crate) struct Printer {
    buffer: String,
    indent: usize,
    compact: bool,
    /// Indentation is written lazily so blank lines stay empty.
    at_line_start: bool,
}

impl Printer {
    pub(crate) fn new(compact: bool, capacity: usize) -> Self {
        Printer {
            buffer: String::with_capacity(capacity),
            indent: 0,
            compact,
            at_line_start: false,
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            self.at_line_start = false;
            if !self.compact {
                self.buffer
                    .extend(std::iter::repeat(' ').take(self.indent * INDENT_WIDTH));
            }
        }
    }

    /// Write `text`, separated from what precedes it when they would glue.
    pub(crate) fn token(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.write_indent();
        if self.would_glue(text) {
            self.buffer.push(' ');
        }
        self.buffer.push_str(text);
    }

    /// Write `text` verbatim. Template literal pieces go through here so
    /// their content is never spaced apart.
    pub(crate) fn raw(&mut self, text: &str) {
        self.write_indent();
        self.buffer.push_str(text);
    }

    /// Alias of [`token`](Self::token) for keywords and names.
    #[inline]
    pub(crate) fn word(&mut self, text: &str) {
        self.token(text);
    }

    fn would_glue(&self, next: &str) -> bool {
        let Some(last) = self.buffer.chars().next_back() else {
            return false;
        };
        let Some(first) = next.chars().next() else {
            return false;
        };
        if is_word_char(last) && (is_word_char(first) || first == '/') {
            return true;
        }
        match (last, first) {
            ('+', '+') | ('-', '-') | ('/', '/') => true,
            ('!', '-') => next.starts_with("--") && self.buffer.ends_with("<!"),
            _ => false,
        }
    }

    /// Optional space.
    pub(crate) fn space(&mut self) {
        if !self.compact && !self.at_line_start && !self.buffer.ends_with(' ') {
            self.buffer.push(' ');
        }
    }

    /// Optional line break.
    pub(crate) fn newline(&mut self) {
        if !self.compact && !self.buffer.is_empty() {
            self.buffer.push('\n');
            self.at_line_start = true;
        }
    }

    /// Mandatory line break, kept in compact mode (after a shebang).
    pub(crate) fn hard_newline(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }
}

/// Characters that continue an identifier, keyword or number.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '\\' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::Printer;

    fn print(compact: bool, tokens: &[&str]) -> String {
        let mut printer = Printer::new(compact, 16);
        for token in tokens {
            printer.token(token);
        }
        printer.finish()
    }

    #[test]
    fn words_are_separated() {
        assert_eq!(print(true, &["typeof", "x"]), "typeof x");
        assert_eq!(print(true, &["return", "1"]), "return 1");
        assert_eq!(print(true, &["a", "in", "b"]), "a in b");
    }

    #[test]
    fn operators_do_not_glue() {
        assert_eq!(print(true, &["a", "+", "+", "b"]), "a+ +b");
        assert_eq!(print(true, &["a", "-", "--", "b"]), "a- --b");
        assert_eq!(print(true, &["a", "/", "/x/"]), "a / /x/");
        assert_eq!(print(true, &["a", "<", "!", "--", "b"]), "a<! --b");
        assert_eq!(print(true, &["a", "+", "-", "b"]), "a+-b");
        assert_eq!(print(true, &["return", "/x/"]), "return /x/");
    }

    #[test]
    fn raw_text_is_never_spaced() {
        let mut printer = Printer::new(true, 16);
        printer.raw("`a");
        printer.raw("${");
        printer.token("b");
        printer.raw("}c`");
        assert_eq!(printer.finish(), "`a${b}c`");
    }

    #[test]
    fn indentation_is_lazy() {
        let mut printer = Printer::new(false, 16);
        printer.token("{");
        printer.indent();
        printer.newline();
        printer.token("a;");
        printer.dedent();
        printer.newline();
        printer.token("}");
        assert_eq!(printer.finish(), "{\n  a;\n}");
    }

    #[test]
    fn compact_drops_optional_whitespace() {
        let mut printer = Printer::new(true, 16);
        printer.token("a");
        printer.space();
        printer.token("=");
        printer.newline();
        printer.token("b");
        assert_eq!(printer.finish(), "a=b");
    }
}
