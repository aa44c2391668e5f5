//! Template literals.
//!
//! The lexer returns a plain `}` at the end of each substitution; the
//! parser asks it to re-read that brace as the next template chunk.

use ember_diagnostic::ErrorCode;
use ember_ir::{NodeId, NodeKind, Span, TokenKind, TokenValue};

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// A template starting at the current chunk. Invalid escapes are only
    /// accepted in tagged templates, where `cooked` is left empty.
    pub(crate) fn parse_template(&mut self, tagged: bool) -> ParseResult<NodeId> {
        let start = self.start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            let tail = matches!(self.kind(), TokenKind::NoSubstitutionTemplate | TokenKind::TemplateTail);
            quasis.push(self.parse_template_element(tagged, tail)?);
            if tail {
                break;
            }
            expressions.push(self.allow_in(Self::parse_expression)?);
            if !self.at(TokenKind::RBrace) {
                return self.unexpected();
            }
            self.rescan_template_continuation()?;
        }
        Ok(self.finish_node(NodeKind::TemplateLiteral { quasis, expressions }, start))
    }

    fn parse_template_element(&mut self, tagged: bool, tail: bool) -> ParseResult<NodeId> {
        let TokenValue::Template { raw, cooked } = &self.token.value else {
            return self.unexpected();
        };
        if cooked.is_none() && !tagged {
            return Err(self.error_at_token(ErrorCode::E0005, "Invalid escape sequence in template"));
        }
        let raw = self.ast.intern(raw);
        let cooked = cooked.as_deref().map(|text| self.ast.intern(text));

        // The element covers the text only, not the backticks or `${`/`}`.
        let span = self.token.span;
        let closing = if tail { 1 } else { 2 };
        let end = span.end.saturating_sub(closing).max(span.start + 1);
        let token_span = Span::new(span.start + 1, end);

        self.bump()?;
        Ok(self.ast.alloc(NodeKind::TemplateElement { raw, cooked, tail }, token_span))
    }
}
