//! Tokenizer for the Ember pipeline.
//!
//! [`Lexer`] turns source text into [`Token`]s on demand. Whitespace and
//! comments are skipped; comments are kept in a side list. The lexer knows
//! nothing about grammar: regex literals and template continuations are
//! produced by explicit rescans requested by the parser.
//!
//! [`tokenize`] runs the lexer to completion for tools that want a flat
//! token list, resolving the `/` ambiguity from the previous token.

mod cursor;
mod keywords;
mod lex_error;
mod lexer;

use ember_ir::{Token, TokenKind};

pub use keywords::{is_reserved_word, is_strict_bind_reserved_word, is_strict_reserved_word};
pub use lex_error::{LexError, LexErrorKind};
pub use lexer::{Comment, CommentKind, Lexer, LexerCheckpoint};

/// Tokenize a whole source text. The last token is always `Eof`.
///
/// ```
/// use ember_ir::TokenKind;
///
/// let tokens = ember_lexer::tokenize("a = /b/g;").unwrap_or_default();
/// let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Ident, TokenKind::Eq, TokenKind::Regex, TokenKind::Semi, TokenKind::Eof]
/// );
/// ```
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens: Vec<Token> = Vec::new();
    // Open-brace depth inside each active template substitution.
    let mut template_braces: Vec<u32> = Vec::new();

    loop {
        let mut token = lexer.next_token()?;
        match token.kind {
            TokenKind::Slash | TokenKind::SlashEq
                if TokenKind::slash_starts_regex(tokens.last().map(|t| t.kind)) =>
            {
                token = lexer.rescan_regex(&token)?;
            }
            TokenKind::LBrace => {
                if let Some(depth) = template_braces.last_mut() {
                    *depth += 1;
                }
            }
            TokenKind::RBrace => match template_braces.last().copied() {
                Some(0) => {
                    token = lexer.rescan_template_continuation(&token)?;
                    if token.kind == TokenKind::TemplateTail {
                        template_braces.pop();
                    }
                }
                Some(_) => {
                    if let Some(depth) = template_braces.last_mut() {
                        *depth -= 1;
                    }
                }
                None => {}
            },
            TokenKind::TemplateHead => template_braces.push(0),
            _ => {}
        }
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized");
    Ok(tokens)
}
