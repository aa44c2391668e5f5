//! Parser state and token-level helpers.

use ember_diagnostic::ErrorCode;
use ember_ir::{Ast, Name, NodeId, NodeKind, Position, SourceType, Span, Token, TokenKind, TokenValue};
use ember_lexer::{Comment, Lexer};
use rustc_hash::FxHashSet;

use crate::context::ParseContext;
use crate::snapshot::ParserSnapshot;
use crate::{ActivePlugins, ParseError, ParseOptions, ParseResult, SyntaxError};

/// A label in scope and whether it labels a loop.
#[derive(Clone, Debug)]
pub(crate) struct Label {
    pub(crate) name: String,
    pub(crate) is_loop: bool,
}

/// Parser state for one compilation unit.
///
/// Extension handlers registered by syntax plugins receive a
/// `&mut Parser`; the public methods here are the surface they build on.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    pub(crate) source: &'a str,
    pub(crate) token: Token,
    /// End offset of the last consumed token.
    pub(crate) prev_end: u32,
    pub(crate) ast: Ast,
    pub(crate) context: ParseContext,
    pub(crate) options: &'a ParseOptions,
    pub(crate) plugins: &'a ActivePlugins,
    /// Estree literal and directive shapes.
    pub(crate) estree: bool,
    pub(crate) labels: Vec<Label>,
    /// Nodes that were wrapped in parentheses in the source.
    pub(crate) parenthesized: FxHashSet<NodeId>,
    /// A `{ a = 1 }` shorthand default seen in an object literal; an error
    /// unless the literal turns out to be an assignment pattern.
    pub(crate) shorthand_init: Option<Position>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: &'a ParseOptions, plugins: &'a ActivePlugins) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let token = lexer.next_token()?;
        let mut context = ParseContext::new();
        if options.source_type.is_module() {
            context = context.with(ParseContext::STRICT);
        }
        Ok(Parser {
            lexer,
            source,
            token,
            prev_end: 0,
            ast: Ast::new(),
            context,
            options,
            plugins,
            estree: plugins.has_plugin("estree"),
            labels: Vec::new(),
            parenthesized: FxHashSet::default(),
            shorthand_init: None,
        })
    }

    pub(crate) fn hashbang(&self) -> Option<&'a str> {
        self.lexer.hashbang()
    }

    pub(crate) fn into_parts(mut self) -> (Ast, Vec<Comment>) {
        let comments = self.lexer.take_comments();
        (self.ast, comments)
    }

    // Token access

    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    #[inline]
    pub fn at(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[inline]
    pub fn source_type(&self) -> SourceType {
        self.options.source_type
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.has_plugin(name)
    }

    /// Identifier text of `token`, with escapes resolved.
    pub fn token_text<'t>(&self, token: &'t Token) -> &'t str
    where
        'a: 't,
    {
        match &token.value {
            TokenValue::Str(text) if token.kind == TokenKind::Ident => text,
            _ => token.raw(self.source),
        }
    }

    /// Text of the current token.
    pub fn current_text(&self) -> &str {
        match &self.token.value {
            TokenValue::Str(text) if self.token.kind == TokenKind::Ident => text,
            _ => self.token.raw(self.source),
        }
    }

    /// The current token is the unescaped identifier `word`.
    pub fn is_contextual(&self, word: &str) -> bool {
        self.token.kind == TokenKind::Ident
            && matches!(self.token.value, TokenValue::None)
            && self.token.raw(self.source) == word
    }

    pub fn eat_contextual(&mut self, word: &str) -> ParseResult<bool> {
        if self.is_contextual(word) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn expect_contextual(&mut self, word: &str) -> ParseResult<()> {
        if self.eat_contextual(word)? {
            return Ok(());
        }
        Err(self.error_at_token(ErrorCode::E1001, format!("Unexpected token, expected \"{word}\"")))
    }

    /// Consume the current token, returning it.
    pub fn bump(&mut self) -> ParseResult<Token> {
        let next = self.lexer.next_token()?;
        self.prev_end = self.token.span.end;
        Ok(std::mem::replace(&mut self.token, next))
    }

    pub fn eat(&mut self, kind: TokenKind) -> ParseResult<bool> {
        if self.at(kind) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.at(kind) {
            return self.bump();
        }
        Err(self.error_at_token(
            ErrorCode::E1001,
            format!("Unexpected token, expected \"{}\"", kind.display_name()),
        ))
    }

    /// The token after the current one, without consuming anything.
    pub fn lookahead(&mut self) -> ParseResult<Token> {
        let checkpoint = self.lexer.checkpoint();
        let next = self.lexer.next_token();
        self.lexer.restore(checkpoint);
        Ok(next?)
    }

    /// Whether a semicolon may be inserted before the current token.
    pub(crate) fn can_insert_semicolon(&self) -> bool {
        self.at(TokenKind::Eof) || self.at(TokenKind::RBrace) || self.token.newline_before
    }

    /// Consume a statement-terminating semicolon, inserting one when the
    /// grammar allows.
    pub(crate) fn semicolon(&mut self) -> ParseResult<()> {
        if self.eat(TokenKind::Semi)? || self.can_insert_semicolon() {
            return Ok(());
        }
        self.unexpected()
    }

    /// The current `/` or `/=` token starts a regular expression.
    pub(crate) fn rescan_regex(&mut self) -> ParseResult<()> {
        self.token = self.lexer.rescan_regex(&self.token)?;
        Ok(())
    }

    /// The current `}` continues a template literal.
    pub(crate) fn rescan_template_continuation(&mut self) -> ParseResult<()> {
        self.token = self.lexer.rescan_template_continuation(&self.token)?;
        Ok(())
    }

    /// Split a `>`-prefixed token so a single `>` can close a type
    /// argument list.
    pub(crate) fn rescan_gt(&mut self) {
        if matches!(
            self.kind(),
            TokenKind::Shr | TokenKind::UShr | TokenKind::GtEq | TokenKind::ShrEq | TokenKind::UShrEq
        ) {
            self.token = self.lexer.rescan_gt(&self.token);
        }
    }

    // Nodes

    /// Start offset of the current token; pair with [`Parser::finish_node`].
    #[inline]
    pub fn start(&self) -> u32 {
        self.token.span.start
    }

    /// Allocate a node spanning from `start` to the end of the last
    /// consumed token.
    pub fn finish_node(&mut self, kind: NodeKind, start: u32) -> NodeId {
        let end = self.prev_end.max(start);
        self.ast.alloc(kind, Span::new(start, end))
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    #[inline]
    pub fn intern(&mut self, text: &str) -> Name {
        self.ast.intern(text)
    }

    pub(crate) fn is_parenthesized(&self, id: NodeId) -> bool {
        self.parenthesized.contains(&id)
    }

    // Speculation

    pub fn snapshot(&self) -> ParserSnapshot {
        ParserSnapshot {
            lexer: self.lexer.checkpoint(),
            token: self.token.clone(),
            prev_end: self.prev_end,
            arena_len: self.ast.len(),
            context: self.context,
            labels_len: self.labels.len(),
            shorthand_init: self.shorthand_init,
        }
    }

    pub fn restore(&mut self, snapshot: ParserSnapshot) {
        self.lexer.restore(snapshot.lexer);
        self.token = snapshot.token;
        self.prev_end = snapshot.prev_end;
        self.ast.truncate(snapshot.arena_len);
        self.parenthesized.retain(|id| id.index() < snapshot.arena_len);
        self.context = snapshot.context;
        self.labels.truncate(snapshot.labels_len);
        self.shorthand_init = snapshot.shorthand_init;
    }

    /// Run `f` with `context`, restoring the previous context afterwards.
    pub(crate) fn with_context<T>(&mut self, context: ParseContext, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    // Errors

    pub fn error_at(&self, code: ErrorCode, message: impl Into<String>, position: Position, span: Span) -> ParseError {
        ParseError::Syntax(SyntaxError {
            code,
            message: message.into(),
            position,
            span,
        })
    }

    pub fn error_at_token(&self, code: ErrorCode, message: impl Into<String>) -> ParseError {
        self.error_at(code, message, self.token.start, self.token.span)
    }

    /// Error anchored at the start of an already parsed node.
    pub(crate) fn error_at_node(&self, code: ErrorCode, message: impl Into<String>, node: NodeId) -> ParseError {
        let span = self.ast.span(node);
        self.error_at(code, message, self.position_of(span.start), span)
    }

    /// Line and column of a byte offset before the current token.
    pub(crate) fn position_of(&self, offset: u32) -> Position {
        let before = self.source.get(..offset as usize).unwrap_or("");
        let mut line = 1;
        let mut line_start = 0;
        let mut chars = before.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            let end = match c {
                '\r' if matches!(chars.peek(), Some((_, '\n'))) => continue,
                '\r' | '\n' => i + 1,
                '\u{2028}' | '\u{2029}' => i + c.len_utf8(),
                _ => continue,
            };
            line += 1;
            line_start = end;
        }
        Position::new(offset, line, offset - line_start as u32)
    }

    pub fn unexpected<T>(&self) -> ParseResult<T> {
        let message = if self.at(TokenKind::Eof) {
            "Unexpected end of input".to_owned()
        } else {
            format!("Unexpected token {}", self.describe_token())
        };
        Err(self.error_at_token(ErrorCode::E1001, message))
    }

    fn describe_token(&self) -> String {
        match self.kind() {
            TokenKind::Ident | TokenKind::Num | TokenKind::BigInt | TokenKind::Str => {
                format!("`{}`", self.token.raw(self.source))
            }
            kind => format!("`{}`", kind.display_name()),
        }
    }

    pub(crate) fn require_plugin(&self, name: &str, what: &str) -> ParseResult<()> {
        if self.has_plugin(name) {
            return Ok(());
        }
        Err(self.error_at_token(
            ErrorCode::E1007,
            format!("This experimental syntax requires enabling the parser plugin: '{name}' ({what})"),
        ))
    }
}
