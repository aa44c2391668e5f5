//! Functions, methods and arrow functions.

use ember_diagnostic::ErrorCode;
use ember_ir::{Function, MethodKind, NodeId, NodeKind, TokenKind};
use ember_lexer::is_strict_bind_reserved_word;
use rustc_hash::FxHashSet;

use super::atom::MethodModifiers;
use crate::context::ParseContext;
use crate::{ParseResult, Parser};

/// Parameters, return annotation and body shared by every function form.
struct FunctionParts {
    params: Vec<NodeId>,
    return_type: Option<NodeId>,
    body: NodeId,
}

impl Parser<'_> {
    /// Function after the `function` keyword: optional `*`, name,
    /// parameters and body.
    pub(crate) fn parse_function(&mut self, is_async: bool, require_id: bool) -> ParseResult<Function> {
        if is_async && self.at(TokenKind::Star) {
            self.require_plugin("asyncGenerators", "async generators")?;
        }
        let is_generator = self.eat(TokenKind::Star)?;
        let id = if self.at(TokenKind::Ident) {
            Some(self.parse_binding_identifier()?)
        } else if require_id {
            return self.unexpected();
        } else {
            None
        };

        let context = self.context.enter_function(is_async, is_generator);
        let parts = self.parse_function_parts(context)?;
        Ok(Function {
            id,
            params: parts.params,
            return_type: parts.return_type,
            body: parts.body,
            is_async,
            is_generator,
        })
    }

    /// Object or class method after its key.
    pub(crate) fn parse_method_function(
        &mut self,
        context: ParseContext,
        modifiers: &MethodModifiers,
        start: u32,
    ) -> ParseResult<Function> {
        let parts = self.parse_function_parts(context)?;
        let message = match modifiers.kind {
            MethodKind::Get if !parts.params.is_empty() => Some("getter should have no params"),
            MethodKind::Set if parts.params.len() != 1 => Some("setter should have exactly one param"),
            MethodKind::Set
                if parts
                    .params
                    .first()
                    .is_some_and(|p| matches!(self.ast.kind(*p), NodeKind::RestElement { .. })) =>
            {
                Some("setter function argument must not be a rest parameter")
            }
            _ => None,
        };
        if let Some(message) = message {
            let position = self.position_of(start);
            return Err(self.error_at(ErrorCode::E1001, message, position, self.ast.span(parts.body)));
        }
        Ok(Function {
            id: None,
            params: parts.params,
            return_type: parts.return_type,
            body: parts.body,
            is_async: modifiers.is_async,
            is_generator: modifiers.is_generator,
        })
    }

    fn parse_function_parts(&mut self, context: ParseContext) -> ParseResult<FunctionParts> {
        let labels = std::mem::take(&mut self.labels);
        let result = self.with_context(context, |p| {
            p.expect(TokenKind::LParen)?;
            let params = p.with_context(p.context.with(ParseContext::IN_PARAMETERS), |p| {
                p.parse_binding_list(TokenKind::RParen)
            })?;
            p.expect(TokenKind::RParen)?;
            let return_type = p.maybe_type_annotation()?;
            let (body, strict) = p.parse_function_body()?;
            p.check_params(&params, strict, false)?;
            Ok(FunctionParts {
                params,
                return_type,
                body,
            })
        });
        self.labels = labels;
        result
    }

    /// `{ ... }` with a directive prologue. Returns the block and whether
    /// the body ended up strict.
    pub(crate) fn parse_function_body(&mut self) -> ParseResult<(NodeId, bool)> {
        let start = self.start();
        self.expect(TokenKind::LBrace)?;
        let (directives, body) = self.parse_block_body(true, false, TokenKind::RBrace)?;
        let strict = self.context.is_strict();
        self.expect(TokenKind::RBrace)?;
        Ok((
            self.finish_node(NodeKind::BlockStatement { directives, body }, start),
            strict,
        ))
    }

    /// Parameter names must be unique when the function is strict, an
    /// arrow, or has non-simple parameters; strict code also reserves
    /// `eval`, `arguments` and the strict-mode words.
    fn check_params(&self, params: &[NodeId], strict: bool, is_arrow: bool) -> ParseResult<()> {
        let simple = params
            .iter()
            .all(|p| matches!(self.ast.kind(*p), NodeKind::Identifier { .. }));
        let mut seen = FxHashSet::default();
        for &param in params {
            for id in self.bound_identifiers(param) {
                let Some(name) = self.ast.identifier_name(id) else {
                    continue;
                };
                if strict && is_strict_bind_reserved_word(name, self.source_type()) {
                    return Err(self.error_at_node(
                        ErrorCode::E1003,
                        format!("Binding {name} in strict mode"),
                        id,
                    ));
                }
                if !seen.insert(name) && (strict || is_arrow || !simple) {
                    return Err(self.error_at_node(ErrorCode::E1003, "Argument name clash", id));
                }
            }
        }
        Ok(())
    }

    // Arrows

    /// Speculative `( params ) [: type]` followed by `=>` on the same line.
    /// `Ok(None)` means this is not an arrow head; the caller restores.
    pub(crate) fn parse_arrow_head(&mut self) -> ParseResult<Option<(Vec<NodeId>, Option<NodeId>)>> {
        self.expect(TokenKind::LParen)?;
        let params = self.with_context(self.context.with(ParseContext::IN_PARAMETERS), |p| {
            p.parse_binding_list(TokenKind::RParen)
        })?;
        self.expect(TokenKind::RParen)?;
        let return_type = self.maybe_type_annotation()?;
        if !self.at(TokenKind::Arrow) || self.token.newline_before {
            return Ok(None);
        }
        Ok(Some((params, return_type)))
    }

    /// `async (...) =>`; `None` when the parentheses are call arguments.
    pub(crate) fn try_parse_async_arrow(&mut self, start: u32) -> ParseResult<Option<NodeId>> {
        let snapshot = self.snapshot();
        self.bump()?;
        match self.parse_arrow_head() {
            Ok(Some((params, return_type))) => self.parse_arrow_body(start, params, return_type, true).map(Some),
            Ok(None) | Err(_) => {
                self.restore(snapshot);
                Ok(None)
            }
        }
    }

    /// `=> body` once the parameters are known.
    pub(crate) fn parse_arrow_body(
        &mut self,
        start: u32,
        params: Vec<NodeId>,
        return_type: Option<NodeId>,
        is_async: bool,
    ) -> ParseResult<NodeId> {
        self.expect(TokenKind::Arrow)?;

        // Arrows see the enclosing `super`.
        let inherited = ParseContext::new()
            .set(ParseContext::ALLOW_SUPER, self.context.has(ParseContext::ALLOW_SUPER))
            .set(ParseContext::ALLOW_SUPER_CALL, self.context.has(ParseContext::ALLOW_SUPER_CALL));
        let context = self.context.enter_function(is_async, false).union(inherited);

        let labels = std::mem::take(&mut self.labels);
        let result: ParseResult<_> = self.with_context(context, |p| {
            if p.at(TokenKind::LBrace) {
                let (body, strict) = p.parse_function_body()?;
                Ok((body, false, strict))
            } else {
                let strict = p.context.is_strict();
                Ok((p.parse_maybe_assign()?, true, strict))
            }
        });
        self.labels = labels;
        let (body, expression, strict) = result?;
        self.check_params(&params, strict, true)?;

        Ok(self.finish_node(
            NodeKind::ArrowFunctionExpression {
                is_async,
                params,
                return_type,
                body,
                expression,
            },
            start,
        ))
    }
}
