//! The tokenizer proper.
//!
//! Tokens are produced lazily by [`Lexer::next_token`]. The lexer has no
//! grammar context, so `/` is always a punctuator and `}` always closes a
//! brace; the parser calls [`Lexer::rescan_regex`] and
//! [`Lexer::rescan_template_continuation`] where its grammar says
//! otherwise.

mod literals;

use ember_ir::{Position, Span, Token, TokenKind, TokenValue};

use crate::cursor::{is_line_terminator, Cursor, CursorState};
use crate::{keywords, LexError, LexErrorKind};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
}

/// A comment skipped between tokens. `text` excludes the delimiters.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Comment {
    pub kind: CommentKind,
    pub text: String,
    pub span: Span,
}

/// Saved lexer state for parser backtracking.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LexerCheckpoint {
    cursor: CursorState,
    comments: usize,
}

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    hashbang: Option<&'a str>,
    comments: Vec<Comment>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer. A leading `#!` line is skipped and kept as
    /// [`Lexer::hashbang`].
    pub fn new(source: &'a str) -> Self {
        let mut cursor = Cursor::new(source);
        let mut hashbang = None;
        if source.starts_with("#!") {
            cursor.advance_n(2);
            let end = cursor.find_line_end();
            hashbang = Some(cursor.slice(2, end));
            cursor.advance_to(end);
        }
        Lexer {
            cursor,
            hashbang,
            comments: Vec::new(),
        }
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.cursor.source()
    }

    /// Text after `#!` on the first line, if any.
    #[inline]
    pub fn hashbang(&self) -> Option<&'a str> {
        self.hashbang
    }

    #[inline]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    pub fn checkpoint(&self) -> LexerCheckpoint {
        LexerCheckpoint {
            cursor: self.cursor.state(),
            comments: self.comments.len(),
        }
    }

    pub fn restore(&mut self, checkpoint: LexerCheckpoint) {
        self.cursor.restore(checkpoint.cursor);
        self.comments.truncate(checkpoint.comments);
    }

    /// Produce the next token, or `Eof` at end of input.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let newline_before = self.skip_trivia()?;
        let start = self.cursor.position();
        if self.cursor.is_eof() {
            return Ok(self.finish(TokenKind::Eof, TokenValue::None, start, newline_before));
        }
        let (kind, value) = self.scan_token(start)?;
        Ok(self.finish(kind, value, start, newline_before))
    }

    /// Re-read a `/` or `/=` token as a regular-expression literal.
    pub fn rescan_regex(&mut self, token: &Token) -> Result<Token, LexError> {
        self.rewind_to(token);
        self.cursor.advance();
        let (kind, value) = self.scan_regex_body(token.start)?;
        Ok(self.finish(kind, value, token.start, token.newline_before))
    }

    /// Re-read a `}` token as the continuation of a template literal,
    /// producing `TemplateMiddle` or `TemplateTail`.
    pub fn rescan_template_continuation(&mut self, token: &Token) -> Result<Token, LexError> {
        self.rewind_to(token);
        self.cursor.advance();
        let (kind, value) = self.scan_template_chunk(token.start, false)?;
        Ok(self.finish(kind, value, token.start, token.newline_before))
    }

    /// Re-read a token starting with `>` (`>>`, `>=`, ...) as a single
    /// `>`. Type argument lists close this way.
    pub fn rescan_gt(&mut self, token: &Token) -> Token {
        self.rewind_to(token);
        self.cursor.advance();
        self.finish(TokenKind::Gt, TokenValue::None, token.start, token.newline_before)
    }

    fn rewind_to(&mut self, token: &Token) {
        self.cursor.reset_to(token.start);
        let start = token.span.start;
        self.comments.retain(|c| c.span.start < start);
    }

    fn finish(&self, kind: TokenKind, value: TokenValue, start: Position, newline_before: bool) -> Token {
        let end = self.cursor.position();
        Token {
            kind,
            value,
            span: Span::new(start.offset, end.offset),
            start,
            end,
            newline_before,
        }
    }

    fn error(&self, kind: LexErrorKind, start: Position) -> LexError {
        LexError::new(kind, Span::new(start.offset, self.cursor.pos()), start)
    }

    /// Skip whitespace and comments. Returns whether a line terminator
    /// was crossed.
    fn skip_trivia(&mut self) -> Result<bool, LexError> {
        let mut newline = false;
        loop {
            match self.cursor.current() {
                b' ' | b'\t' | 0x0B | 0x0C => self.cursor.advance(),
                b'\n' | b'\r' => {
                    self.cursor.advance_char();
                    newline = true;
                }
                b'/' if self.cursor.peek() == b'/' => self.skip_line_comment(),
                b'/' if self.cursor.peek() == b'*' => newline |= self.skip_block_comment()?,
                b if b >= 0x80 => match self.cursor.current_char() {
                    Some(c) if is_line_terminator(c) => {
                        self.cursor.advance_char();
                        newline = true;
                    }
                    Some(c) if c == '\u{FEFF}' || c.is_whitespace() => self.cursor.advance_char(),
                    _ => return Ok(newline),
                },
                _ => return Ok(newline),
            }
        }
    }

    fn skip_line_comment(&mut self) {
        let start = self.cursor.pos();
        self.cursor.advance_n(2);
        let end = self.cursor.find_line_end();
        let text = self.cursor.slice(start + 2, end).to_owned();
        self.cursor.advance_to(end);
        self.comments.push(Comment {
            kind: CommentKind::Line,
            text,
            span: Span::new(start, end),
        });
    }

    fn skip_block_comment(&mut self) -> Result<bool, LexError> {
        let start = self.cursor.position();
        self.cursor.advance_n(2);
        let Some(close) = self.cursor.find(b"*/") else {
            self.cursor.advance_to(self.source().len() as u32);
            return Err(self.error(LexErrorKind::UnterminatedComment, start));
        };
        let text = self.cursor.slice(start.offset + 2, close);
        let line_before = self.cursor.position().line;
        self.cursor.advance_to(close + 2);
        let crossed = self.cursor.position().line != line_before;
        self.comments.push(Comment {
            kind: CommentKind::Block,
            text: text.to_owned(),
            span: Span::new(start.offset, close + 2),
        });
        Ok(crossed)
    }

    fn scan_token(&mut self, start: Position) -> Result<(TokenKind, TokenValue), LexError> {
        match self.cursor.current() {
            b'a'..=b'z' | b'A'..=b'Z' | b'$' | b'_' | b'\\' => self.scan_identifier(start),
            b'0'..=b'9' => self.scan_number(start),
            b'.' if self.cursor.peek().is_ascii_digit() => self.scan_number(start),
            quote @ (b'"' | b'\'') => self.scan_string(start, quote),
            b'`' => {
                self.cursor.advance();
                self.scan_template_chunk(start, true)
            }
            b if b >= 0x80 => match self.cursor.current_char() {
                Some(c) if is_id_start(c) => self.scan_identifier(start),
                Some(c) => {
                    self.cursor.advance_char();
                    Err(self.error(LexErrorKind::UnexpectedChar(c), start))
                }
                None => Err(self.error(LexErrorKind::UnexpectedChar('\u{FFFD}'), start)),
            },
            _ => self.scan_punctuator(start),
        }
    }

    fn scan_identifier(&mut self, start: Position) -> Result<(TokenKind, TokenValue), LexError> {
        let begin = self.cursor.pos();
        // Only allocated once an escape shows up.
        let mut cooked: Option<String> = None;
        loop {
            let b = self.cursor.current();
            if b.is_ascii_alphanumeric() || b == b'$' || b == b'_' {
                self.cursor.advance();
                if let Some(text) = cooked.as_mut() {
                    text.push(char::from(b));
                }
            } else if b == b'\\' {
                let text = cooked.get_or_insert_with(|| self.cursor.slice_from(begin).to_owned());
                self.cursor.advance();
                if self.cursor.current() != b'u' {
                    return Err(self.error(LexErrorKind::InvalidEscape, start));
                }
                self.cursor.advance();
                match self.read_unicode_escape() {
                    Some(c) if is_id_continue(c) => text.push(c),
                    _ => return Err(self.error(LexErrorKind::InvalidEscape, start)),
                }
            } else if b >= 0x80 {
                match self.cursor.current_char() {
                    Some(c) if is_id_continue(c) => {
                        self.cursor.advance_char();
                        if let Some(text) = cooked.as_mut() {
                            text.push(c);
                        }
                    }
                    _ => break,
                }
            } else {
                break;
            }
        }

        match cooked {
            Some(text) => Ok((TokenKind::Ident, TokenValue::Str(text))),
            None => {
                let kind = keywords::lookup(self.cursor.slice_from(begin)).unwrap_or(TokenKind::Ident);
                Ok((kind, TokenValue::None))
            }
        }
    }

    fn scan_punctuator(&mut self, start: Position) -> Result<(TokenKind, TokenValue), LexError> {
        use TokenKind as T;

        let p1 = self.cursor.peek();
        let p2 = self.cursor.peek_at(2);
        let p3 = self.cursor.peek_at(3);
        let (kind, len) = match self.cursor.current() {
            b'{' => (T::LBrace, 1),
            b'}' => (T::RBrace, 1),
            b'(' => (T::LParen, 1),
            b')' => (T::RParen, 1),
            b'[' => (T::LBracket, 1),
            b']' => (T::RBracket, 1),
            b';' => (T::Semi, 1),
            b',' => (T::Comma, 1),
            b'~' => (T::Tilde, 1),
            b'@' => (T::At, 1),
            b':' => (T::Colon, 1),
            b'.' => {
                if p1 == b'.' && p2 == b'.' {
                    (T::Ellipsis, 3)
                } else {
                    (T::Dot, 1)
                }
            }
            b'?' => {
                if p1 == b'?' {
                    (T::QuestionQuestion, 2)
                } else {
                    (T::Question, 1)
                }
            }
            b'<' => match (p1, p2) {
                (b'<', b'=') => (T::ShlEq, 3),
                (b'<', _) => (T::Shl, 2),
                (b'=', _) => (T::LtEq, 2),
                _ => (T::Lt, 1),
            },
            b'>' => match (p1, p2, p3) {
                (b'>', b'>', b'=') => (T::UShrEq, 4),
                (b'>', b'>', _) => (T::UShr, 3),
                (b'>', b'=', _) => (T::ShrEq, 3),
                (b'>', _, _) => (T::Shr, 2),
                (b'=', _, _) => (T::GtEq, 2),
                _ => (T::Gt, 1),
            },
            b'=' => match (p1, p2) {
                (b'=', b'=') => (T::EqEqEq, 3),
                (b'=', _) => (T::EqEq, 2),
                (b'>', _) => (T::Arrow, 2),
                _ => (T::Eq, 1),
            },
            b'!' => match (p1, p2) {
                (b'=', b'=') => (T::NotEqEq, 3),
                (b'=', _) => (T::NotEq, 2),
                _ => (T::Bang, 1),
            },
            b'+' => match p1 {
                b'+' => (T::PlusPlus, 2),
                b'=' => (T::PlusEq, 2),
                _ => (T::Plus, 1),
            },
            b'-' => match p1 {
                b'-' => (T::MinusMinus, 2),
                b'=' => (T::MinusEq, 2),
                _ => (T::Minus, 1),
            },
            b'*' => match (p1, p2) {
                (b'*', b'=') => (T::StarStarEq, 3),
                (b'*', _) => (T::StarStar, 2),
                (b'=', _) => (T::StarEq, 2),
                _ => (T::Star, 1),
            },
            b'/' => {
                if p1 == b'=' {
                    (T::SlashEq, 2)
                } else {
                    (T::Slash, 1)
                }
            }
            b'%' => {
                if p1 == b'=' {
                    (T::PercentEq, 2)
                } else {
                    (T::Percent, 1)
                }
            }
            b'&' => match p1 {
                b'&' => (T::AmpAmp, 2),
                b'=' => (T::AmpEq, 2),
                _ => (T::Amp, 1),
            },
            b'|' => match p1 {
                b'|' => (T::PipePipe, 2),
                b'=' => (T::PipeEq, 2),
                _ => (T::Pipe, 1),
            },
            b'^' => {
                if p1 == b'=' {
                    (T::CaretEq, 2)
                } else {
                    (T::Caret, 1)
                }
            }
            other => {
                self.cursor.advance();
                return Err(self.error(LexErrorKind::UnexpectedChar(char::from(other)), start));
            }
        };
        self.cursor.advance_n(len);
        Ok((kind, TokenValue::None))
    }
}

pub(crate) fn is_id_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '$' || c == '_' || (!c.is_ascii() && c.is_alphabetic())
}

pub(crate) fn is_id_continue(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '$'
        || c == '_'
        || c == '\u{200C}'
        || c == '\u{200D}'
        || (!c.is_ascii() && c.is_alphanumeric())
}

#[cfg(test)]
mod tests;
