//! String, template, number and regular-expression literals.

use ember_ir::{Position, TokenKind, TokenValue};

use super::{is_id_continue, Lexer};
use crate::cursor::is_line_terminator;
use crate::LexErrorKind;

/// One decoded escape sequence.
enum Escape {
    Char(char),
    /// Backslash followed by a line terminator; contributes nothing.
    LineContinuation,
    Invalid,
}

fn hex_value(b: u8) -> Option<u32> {
    char::from(b).to_digit(16)
}

impl Lexer<'_> {
    pub(super) fn scan_string(&mut self, start: Position, quote: u8) -> Result<(TokenKind, TokenValue), crate::LexError> {
        self.cursor.advance();
        let mut value = String::new();
        let mut chunk_start = self.cursor.pos();
        loop {
            if self.cursor.is_eof() {
                return Err(self.error(LexErrorKind::UnterminatedString, start));
            }
            match self.cursor.current() {
                b if b == quote => {
                    value.push_str(self.cursor.slice_from(chunk_start));
                    self.cursor.advance();
                    return Ok((TokenKind::Str, TokenValue::Str(value)));
                }
                b'\\' => {
                    value.push_str(self.cursor.slice_from(chunk_start));
                    self.cursor.advance();
                    match self.read_escape(false) {
                        Escape::Char(c) => value.push(c),
                        Escape::LineContinuation => {}
                        Escape::Invalid => return Err(self.error(LexErrorKind::InvalidEscape, start)),
                    }
                    chunk_start = self.cursor.pos();
                }
                b'\n' | b'\r' => return Err(self.error(LexErrorKind::UnterminatedString, start)),
                b if b < 0x80 => self.cursor.advance(),
                _ => self.cursor.advance_char(),
            }
        }
    }

    /// Scan a template chunk. The cursor sits just after the opening
    /// `` ` `` (`opening`) or the `}` closing a substitution.
    ///
    /// Invalid escapes do not fail: the chunk's cooked value becomes
    /// `None`, which only tagged templates accept.
    pub(super) fn scan_template_chunk(
        &mut self,
        start: Position,
        opening: bool,
    ) -> Result<(TokenKind, TokenValue), crate::LexError> {
        let mut raw = String::new();
        let mut cooked = Some(String::new());
        let mut chunk_start = self.cursor.pos();

        let kind = loop {
            if self.cursor.is_eof() {
                return Err(self.error(LexErrorKind::UnterminatedTemplate, start));
            }
            match self.cursor.current() {
                b'`' => {
                    push_chunk(&mut raw, &mut cooked, self.cursor.slice_from(chunk_start));
                    self.cursor.advance();
                    break if opening {
                        TokenKind::NoSubstitutionTemplate
                    } else {
                        TokenKind::TemplateTail
                    };
                }
                b'$' if self.cursor.peek() == b'{' => {
                    push_chunk(&mut raw, &mut cooked, self.cursor.slice_from(chunk_start));
                    self.cursor.advance_n(2);
                    break if opening {
                        TokenKind::TemplateHead
                    } else {
                        TokenKind::TemplateMiddle
                    };
                }
                b'\\' => {
                    push_chunk(&mut raw, &mut cooked, self.cursor.slice_from(chunk_start));
                    let escape_start = self.cursor.pos();
                    self.cursor.advance();
                    let escape = self.read_escape(true);
                    let escape_raw = self.cursor.slice_from(escape_start);
                    raw.push_str(&escape_raw.replace("\r\n", "\n").replace('\r', "\n"));
                    match escape {
                        Escape::Char(c) => {
                            if let Some(text) = cooked.as_mut() {
                                text.push(c);
                            }
                        }
                        Escape::LineContinuation => {}
                        Escape::Invalid => cooked = None,
                    }
                    chunk_start = self.cursor.pos();
                }
                b'\r' => {
                    // CR and CRLF read as LF in both raw and cooked values.
                    push_chunk(&mut raw, &mut cooked, self.cursor.slice_from(chunk_start));
                    self.cursor.advance_char();
                    push_chunk(&mut raw, &mut cooked, "\n");
                    chunk_start = self.cursor.pos();
                }
                b'\n' => self.cursor.advance_char(),
                b if b < 0x80 => self.cursor.advance(),
                _ => self.cursor.advance_char(),
            }
        };
        Ok((kind, TokenValue::Template { raw, cooked }))
    }

    /// Read an escape; the cursor sits just after the backslash.
    fn read_escape(&mut self, in_template: bool) -> Escape {
        let Some(c) = self.cursor.current_char() else {
            return Escape::Invalid;
        };
        let simple = match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{C}'),
            'v' => Some('\u{B}'),
            _ => None,
        };
        if let Some(decoded) = simple {
            self.cursor.advance();
            return Escape::Char(decoded);
        }

        match c {
            _ if is_line_terminator(c) => {
                self.cursor.advance_char();
                Escape::LineContinuation
            }
            '0' if !self.cursor.peek().is_ascii_digit() => {
                self.cursor.advance();
                Escape::Char('\0')
            }
            '0'..='9' if in_template => Escape::Invalid,
            '0'..='7' => {
                // Legacy octal: up to three digits, at most 0o377.
                let mut value: u32 = 0;
                for _ in 0..3 {
                    let d = self.cursor.current();
                    if !(b'0'..=b'7').contains(&d) {
                        break;
                    }
                    let next = value * 8 + u32::from(d - b'0');
                    if next > 0o377 {
                        break;
                    }
                    value = next;
                    self.cursor.advance();
                }
                Escape::Char(char::from_u32(value).unwrap_or('\0'))
            }
            'x' => {
                self.cursor.advance();
                match (hex_value(self.cursor.current()), hex_value(self.cursor.peek())) {
                    (Some(hi), Some(lo)) => {
                        self.cursor.advance_n(2);
                        Escape::Char(char::from_u32(hi * 16 + lo).unwrap_or('\0'))
                    }
                    _ => Escape::Invalid,
                }
            }
            'u' => {
                self.cursor.advance();
                self.read_unicode_escape().map_or(Escape::Invalid, Escape::Char)
            }
            _ => {
                self.cursor.advance_char();
                Escape::Char(c)
            }
        }
    }

    /// Read the part of a `\u` escape after the `u`. Surrogate pairs
    /// spelled as two escapes combine; a lone surrogate decodes to U+FFFD.
    pub(super) fn read_unicode_escape(&mut self) -> Option<char> {
        let code = self.read_code_point()?;
        if (0xD800..0xDC00).contains(&code) && self.cursor.current() == b'\\' && self.cursor.peek() == b'u' {
            let saved = self.cursor.state();
            self.cursor.advance_n(2);
            if let Some(low) = self.read_code_point() {
                if (0xDC00..0xE000).contains(&low) {
                    return char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
                }
            }
            self.cursor.restore(saved);
        }
        Some(char::from_u32(code).unwrap_or('\u{FFFD}'))
    }

    fn read_code_point(&mut self) -> Option<u32> {
        if self.cursor.current() == b'{' {
            self.cursor.advance();
            let mut value: u32 = 0;
            let mut digits = 0;
            while let Some(d) = hex_value(self.cursor.current()) {
                value = value * 16 + d;
                if value > 0x10_FFFF {
                    return None;
                }
                self.cursor.advance();
                digits += 1;
            }
            if digits == 0 || self.cursor.current() != b'}' {
                return None;
            }
            self.cursor.advance();
            Some(value)
        } else {
            let mut value = 0;
            for _ in 0..4 {
                value = value * 16 + hex_value(self.cursor.current())?;
                self.cursor.advance();
            }
            Some(value)
        }
    }

    pub(super) fn scan_number(&mut self, start: Position) -> Result<(TokenKind, TokenValue), crate::LexError> {
        let begin = self.cursor.pos();
        let first = self.cursor.current();
        let second = self.cursor.peek() | 0x20;
        let mut is_bigint = false;

        let value = if first == b'0' && matches!(second, b'x' | b'o' | b'b') {
            let radix = match second {
                b'x' => 16,
                b'o' => 8,
                _ => 2,
            };
            self.cursor.advance_n(2);
            let digits_start = self.cursor.pos();
            self.cursor.eat_while(|d| char::from(d).is_digit(radix));
            if self.cursor.pos() == digits_start {
                return Err(self.error(LexErrorKind::MalformedNumber, start));
            }
            let digits = self.cursor.slice_from(digits_start);
            if self.cursor.current() == b'n' {
                self.cursor.advance();
                is_bigint = true;
            }
            fold_digits(digits, radix)
        } else if first == b'0' && self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
            self.cursor.eat_while(|d| d.is_ascii_digit());
            let digits = self.cursor.slice_from(begin);
            if digits.bytes().all(|d| d < b'8') {
                fold_digits(&digits[1..], 8)
            } else {
                // `089` and friends are decimal.
                self.scan_decimal_tail(start)?;
                self.parse_decimal(begin, start)?
            }
        } else {
            self.cursor.eat_while(|d| d.is_ascii_digit());
            let is_integer = self.scan_decimal_tail(start)?;
            if is_integer && self.cursor.current() == b'n' {
                let value = self.parse_decimal(begin, start)?;
                self.cursor.advance();
                is_bigint = true;
                value
            } else {
                self.parse_decimal(begin, start)?
            }
        };

        if let Some(c) = self.cursor.current_char() {
            if is_id_continue(c) || c == '\\' {
                return Err(self.error(LexErrorKind::MalformedNumber, start));
            }
        }

        if is_bigint {
            let digits = self.cursor.slice(begin, self.cursor.pos() - 1);
            return Ok((TokenKind::BigInt, TokenValue::Str(digits.to_owned())));
        }
        Ok((TokenKind::Num, TokenValue::Number(value)))
    }

    /// Fraction and exponent after the integer digits. Returns whether the
    /// literal is still an integer.
    fn scan_decimal_tail(&mut self, start: Position) -> Result<bool, crate::LexError> {
        let mut is_integer = true;
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|d| d.is_ascii_digit());
            is_integer = false;
        }
        if self.cursor.current() | 0x20 == b'e' {
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            let digits_start = self.cursor.pos();
            self.cursor.eat_while(|d| d.is_ascii_digit());
            if self.cursor.pos() == digits_start {
                return Err(self.error(LexErrorKind::MalformedNumber, start));
            }
            is_integer = false;
        }
        Ok(is_integer)
    }

    fn parse_decimal(&self, begin: u32, start: Position) -> Result<f64, crate::LexError> {
        self.cursor
            .slice_from(begin)
            .parse::<f64>()
            .map_err(|_| self.error(LexErrorKind::MalformedNumber, start))
    }

    /// Scan a regex body and flags; the cursor sits after the opening `/`.
    pub(super) fn scan_regex_body(&mut self, start: Position) -> Result<(TokenKind, TokenValue), crate::LexError> {
        let body_start = self.cursor.pos();
        let mut in_class = false;
        loop {
            let Some(c) = self.cursor.current_char() else {
                return Err(self.error(LexErrorKind::UnterminatedRegex, start));
            };
            if is_line_terminator(c) {
                return Err(self.error(LexErrorKind::UnterminatedRegex, start));
            }
            match c {
                '\\' => {
                    self.cursor.advance();
                    match self.cursor.current_char() {
                        Some(next) if !is_line_terminator(next) => self.cursor.advance_char(),
                        _ => return Err(self.error(LexErrorKind::UnterminatedRegex, start)),
                    }
                }
                '[' => {
                    in_class = true;
                    self.cursor.advance();
                }
                ']' => {
                    in_class = false;
                    self.cursor.advance();
                }
                '/' if !in_class => break,
                _ => self.cursor.advance_char(),
            }
        }
        let pattern = self.cursor.slice_from(body_start).to_owned();
        self.cursor.advance();

        let flags_start = self.cursor.pos();
        while let Some(c) = self.cursor.current_char() {
            if !is_id_continue(c) {
                break;
            }
            self.cursor.advance_char();
        }
        let flags = self.cursor.slice_from(flags_start).to_owned();
        Ok((TokenKind::Regex, TokenValue::Regex { pattern, flags }))
    }
}

fn push_chunk(raw: &mut String, cooked: &mut Option<String>, text: &str) {
    raw.push_str(text);
    if let Some(cooked) = cooked.as_mut() {
        cooked.push_str(text);
    }
}

fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d))
}
