//! Expressions from assignment down to unary operators.
//!
//! Binary operators use precedence climbing over one shared scale:
//! `??` binds loosest at 1, `**` tightest at 12.

use ember_diagnostic::ErrorCode;
use ember_ir::{AssignOp, BinaryOp, LogicalOp, NodeId, NodeKind, Span, TokenKind, UnaryOp, UpdateOp};
use ember_stack::ensure_sufficient_stack;

use crate::context::ParseContext;
use crate::{ParseResult, Parser};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum InfixOp {
    Binary(BinaryOp),
    Logical(LogicalOp),
}

impl InfixOp {
    fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::QuestionQuestion => InfixOp::Logical(LogicalOp::Nullish),
            TokenKind::PipePipe => InfixOp::Logical(LogicalOp::Or),
            TokenKind::AmpAmp => InfixOp::Logical(LogicalOp::And),
            TokenKind::Pipe => InfixOp::Binary(BinaryOp::BitOr),
            TokenKind::Caret => InfixOp::Binary(BinaryOp::BitXor),
            TokenKind::Amp => InfixOp::Binary(BinaryOp::BitAnd),
            TokenKind::EqEq => InfixOp::Binary(BinaryOp::Eq),
            TokenKind::NotEq => InfixOp::Binary(BinaryOp::NotEq),
            TokenKind::EqEqEq => InfixOp::Binary(BinaryOp::StrictEq),
            TokenKind::NotEqEq => InfixOp::Binary(BinaryOp::StrictNotEq),
            TokenKind::Lt => InfixOp::Binary(BinaryOp::Lt),
            TokenKind::LtEq => InfixOp::Binary(BinaryOp::LtEq),
            TokenKind::Gt => InfixOp::Binary(BinaryOp::Gt),
            TokenKind::GtEq => InfixOp::Binary(BinaryOp::GtEq),
            TokenKind::In => InfixOp::Binary(BinaryOp::In),
            TokenKind::Instanceof => InfixOp::Binary(BinaryOp::Instanceof),
            TokenKind::Shl => InfixOp::Binary(BinaryOp::Shl),
            TokenKind::Shr => InfixOp::Binary(BinaryOp::Shr),
            TokenKind::UShr => InfixOp::Binary(BinaryOp::UShr),
            TokenKind::Plus => InfixOp::Binary(BinaryOp::Add),
            TokenKind::Minus => InfixOp::Binary(BinaryOp::Sub),
            TokenKind::Star => InfixOp::Binary(BinaryOp::Mul),
            TokenKind::Slash => InfixOp::Binary(BinaryOp::Div),
            TokenKind::Percent => InfixOp::Binary(BinaryOp::Mod),
            TokenKind::StarStar => InfixOp::Binary(BinaryOp::Exp),
            _ => return None,
        };
        Some(op)
    }

    fn precedence(self) -> u8 {
        match self {
            InfixOp::Binary(op) => op.precedence(),
            InfixOp::Logical(op) => op.precedence(),
        }
    }

    fn is_right_assoc(self) -> bool {
        matches!(self, InfixOp::Binary(op) if op.is_right_assoc())
    }
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    let op = match kind {
        TokenKind::Eq => AssignOp::Assign,
        TokenKind::PlusEq => AssignOp::Add,
        TokenKind::MinusEq => AssignOp::Sub,
        TokenKind::StarEq => AssignOp::Mul,
        TokenKind::SlashEq => AssignOp::Div,
        TokenKind::PercentEq => AssignOp::Mod,
        TokenKind::StarStarEq => AssignOp::Exp,
        TokenKind::ShlEq => AssignOp::Shl,
        TokenKind::ShrEq => AssignOp::Shr,
        TokenKind::UShrEq => AssignOp::UShr,
        TokenKind::PipeEq => AssignOp::BitOr,
        TokenKind::CaretEq => AssignOp::BitXor,
        TokenKind::AmpEq => AssignOp::BitAnd,
        _ => return None,
    };
    Some(op)
}

fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    let op = match kind {
        TokenKind::Minus => UnaryOp::Minus,
        TokenKind::Plus => UnaryOp::Plus,
        TokenKind::Bang => UnaryOp::Not,
        TokenKind::Tilde => UnaryOp::BitNot,
        TokenKind::Typeof => UnaryOp::Typeof,
        TokenKind::Void => UnaryOp::Void,
        TokenKind::Delete => UnaryOp::Delete,
        _ => return None,
    };
    Some(op)
}

/// Tokens that can begin an expression; decides whether `yield` has an
/// argument.
pub(crate) fn starts_expr(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident
            | TokenKind::Num
            | TokenKind::BigInt
            | TokenKind::Str
            | TokenKind::Regex
            | TokenKind::NoSubstitutionTemplate
            | TokenKind::TemplateHead
            | TokenKind::Class
            | TokenKind::Delete
            | TokenKind::Do
            | TokenKind::False
            | TokenKind::Function
            | TokenKind::Import
            | TokenKind::New
            | TokenKind::Null
            | TokenKind::Super
            | TokenKind::This
            | TokenKind::True
            | TokenKind::Typeof
            | TokenKind::Void
            | TokenKind::LBrace
            | TokenKind::LParen
            | TokenKind::LBracket
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
            | TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Slash
            | TokenKind::SlashEq
            | TokenKind::At
            | TokenKind::Lt
    )
}

const EXPONENT_MESSAGE: &str =
    "Illegal expression. Wrap left hand side or entire exponentiation in parentheses.";

impl Parser<'_> {
    /// Parse an expression, including comma sequences.
    pub fn parse_expression(&mut self) -> ParseResult<NodeId> {
        self.parse_expression_with(false)
    }

    /// Like [`Self::parse_expression`]; with `propagate_shorthand`, a
    /// pending `{ a = 1 }` is left for the caller to resolve.
    pub(crate) fn parse_expression_with(&mut self, propagate_shorthand: bool) -> ParseResult<NodeId> {
        let start = self.start();
        let first = self.parse_maybe_assign_with(propagate_shorthand)?;
        if !self.at(TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(TokenKind::Comma)? {
            expressions.push(self.parse_maybe_assign_with(propagate_shorthand)?);
        }
        Ok(self.finish_node(NodeKind::SequenceExpression { expressions }, start))
    }

    /// Parse an assignment expression (no top-level comma).
    pub fn parse_maybe_assign(&mut self) -> ParseResult<NodeId> {
        self.parse_maybe_assign_with(false)
    }

    pub(crate) fn parse_maybe_assign_with(&mut self, propagate_shorthand: bool) -> ParseResult<NodeId> {
        ensure_sufficient_stack(|| self.parse_maybe_assign_inner(propagate_shorthand))
    }

    fn parse_maybe_assign_inner(&mut self, propagate_shorthand: bool) -> ParseResult<NodeId> {
        if self.context.in_generator() && self.is_contextual("yield") {
            return self.parse_yield();
        }

        let outer = self.shorthand_init.take();
        let start = self.start();
        let left = self.parse_conditional()?;

        if let Some(operator) = assign_op(self.kind()) {
            if operator == AssignOp::Assign {
                self.to_assignable(left)?;
                self.shorthand_init = None;
            } else {
                self.check_simple_target(left, "assignment expression")?;
            }
            self.bump()?;
            let right = self.parse_maybe_assign()?;
            self.shorthand_init = outer;
            return Ok(self.finish_node(
                NodeKind::AssignmentExpression {
                    operator,
                    left,
                    right,
                },
                start,
            ));
        }

        let pending = self.shorthand_init;
        match pending {
            Some(position) if !propagate_shorthand => {
                Err(self.error_at(ErrorCode::E1001, "Unexpected token", position, Span::point(position.offset)))
            }
            pending => {
                self.shorthand_init = outer.or(pending);
                Ok(left)
            }
        }
    }

    fn parse_conditional(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let test = self.parse_expr_ops()?;
        if !self.at(TokenKind::Question) || self.shorthand_init.is_some() {
            return Ok(test);
        }
        self.bump()?;
        let consequent = self.allow_in(Self::parse_maybe_assign)?;
        self.expect(TokenKind::Colon)?;
        let alternate = self.parse_maybe_assign()?;
        Ok(self.finish_node(
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
            start,
        ))
    }

    fn parse_expr_ops(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let left = self.parse_maybe_unary()?;
        if self.is_bare_arrow(left) || self.shorthand_init.is_some() {
            return Ok(left);
        }
        self.parse_expr_op(left, start, 0)
    }

    /// Precedence climbing: fold operators binding tighter than
    /// `min_prec` into `left`.
    fn parse_expr_op(&mut self, mut left: NodeId, left_start: u32, min_prec: u8) -> ParseResult<NodeId> {
        loop {
            let Some(op) = InfixOp::from_token(self.kind()) else {
                return Ok(left);
            };
            if op == InfixOp::Binary(BinaryOp::In) && !self.context.allows_in() {
                return Ok(left);
            }
            let prec = op.precedence();
            if prec <= min_prec {
                return Ok(left);
            }
            if op == InfixOp::Binary(BinaryOp::Exp)
                && matches!(self.ast.kind(left), NodeKind::UnaryExpression { .. })
                && !self.is_parenthesized(left)
            {
                return Err(self.error_at_node(ErrorCode::E1001, EXPONENT_MESSAGE, left));
            }

            self.bump()?;
            let right_start = self.start();
            let operand = self.parse_maybe_unary()?;
            let next_min = if op.is_right_assoc() { prec - 1 } else { prec };
            let right = self.parse_expr_op(operand, right_start, next_min)?;

            let kind = match op {
                InfixOp::Binary(operator) => NodeKind::BinaryExpression {
                    operator,
                    left,
                    right,
                },
                InfixOp::Logical(operator) => {
                    self.check_nullish_mixing(operator, left, right)?;
                    NodeKind::LogicalExpression {
                        operator,
                        left,
                        right,
                    }
                }
            };
            left = self.finish_node(kind, left_start);
        }
    }

    /// `??` may not be combined with `||` or `&&` without parentheses.
    fn check_nullish_mixing(&self, operator: LogicalOp, left: NodeId, right: NodeId) -> ParseResult<()> {
        for operand in [left, right] {
            if self.is_parenthesized(operand) {
                continue;
            }
            if let NodeKind::LogicalExpression { operator: inner, .. } = self.ast.kind(operand) {
                if (operator == LogicalOp::Nullish) != (*inner == LogicalOp::Nullish) {
                    return Err(self.error_at_node(
                        ErrorCode::E1001,
                        "Nullish coalescing operator(??) requires parens when mixing with logical operators",
                        operand,
                    ));
                }
            }
        }
        Ok(())
    }

    fn parse_maybe_unary(&mut self) -> ParseResult<NodeId> {
        ensure_sufficient_stack(|| self.parse_maybe_unary_inner())
    }

    fn parse_maybe_unary_inner(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        if self.context.in_async() && self.is_contextual("await") {
            return self.parse_await();
        }

        if let Some(operator) = unary_op(self.kind()) {
            self.bump()?;
            let argument = self.parse_maybe_unary()?;
            if operator == UnaryOp::Delete
                && self.context.is_strict()
                && matches!(self.ast.kind(argument), NodeKind::Identifier { .. })
            {
                return Err(self.error_at_node(
                    ErrorCode::E1003,
                    "Deleting local variable in strict mode",
                    argument,
                ));
            }
            let node = self.finish_node(NodeKind::UnaryExpression { operator, argument }, start);
            if self.at(TokenKind::StarStar) {
                return Err(self.error_at_token(ErrorCode::E1001, EXPONENT_MESSAGE));
            }
            return Ok(node);
        }

        if let Some(operator) = self.update_op() {
            self.bump()?;
            let argument = self.parse_maybe_unary()?;
            self.check_simple_target(argument, "prefix operation")?;
            return Ok(self.finish_node(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument,
                },
                start,
            ));
        }

        let mut expr = self.parse_expr_subscripts()?;
        while let Some(operator) = self.update_op() {
            if self.token.newline_before {
                break;
            }
            self.check_simple_target(expr, "postfix operation")?;
            self.bump()?;
            expr = self.finish_node(
                NodeKind::UpdateExpression {
                    operator,
                    prefix: false,
                    argument: expr,
                },
                start,
            );
        }
        Ok(expr)
    }

    fn update_op(&self) -> Option<UpdateOp> {
        match self.kind() {
            TokenKind::PlusPlus => Some(UpdateOp::Increment),
            TokenKind::MinusMinus => Some(UpdateOp::Decrement),
            _ => None,
        }
    }

    fn parse_await(&mut self) -> ParseResult<NodeId> {
        if self.context.has(ParseContext::IN_PARAMETERS) {
            return Err(self.error_at_token(
                ErrorCode::E1001,
                "await is not allowed in async function parameters",
            ));
        }
        let start = self.start();
        self.bump()?;
        let argument = self.parse_maybe_unary()?;
        Ok(self.finish_node(NodeKind::AwaitExpression { argument }, start))
    }

    fn parse_yield(&mut self) -> ParseResult<NodeId> {
        if self.context.has(ParseContext::IN_PARAMETERS) {
            return Err(self.error_at_token(
                ErrorCode::E1001,
                "yield is not allowed in generator parameters",
            ));
        }
        let start = self.start();
        self.bump()?;
        if self.token.newline_before
            || self.at(TokenKind::Semi)
            || (!self.at(TokenKind::Star) && !starts_expr(self.kind()))
        {
            return Ok(self.finish_node(
                NodeKind::YieldExpression {
                    delegate: false,
                    argument: None,
                },
                start,
            ));
        }
        let delegate = self.eat(TokenKind::Star)?;
        let argument = Some(self.parse_maybe_assign()?);
        Ok(self.finish_node(NodeKind::YieldExpression { delegate, argument }, start))
    }

    pub(crate) fn parse_expr_subscripts(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        let base = self.parse_expr_atom()?;
        if self.is_bare_arrow(base) {
            return Ok(base);
        }
        self.parse_subscripts(base, start, false)
    }

    /// Member accesses, calls and tagged templates following `base`.
    pub(crate) fn parse_subscripts(&mut self, mut base: NodeId, start: u32, no_calls: bool) -> ParseResult<NodeId> {
        loop {
            let kind = match self.kind() {
                TokenKind::Dot => {
                    self.bump()?;
                    let property = self.parse_identifier_name()?;
                    NodeKind::MemberExpression {
                        object: base,
                        property,
                        computed: false,
                    }
                }
                TokenKind::LBracket => {
                    self.bump()?;
                    let property = self.allow_in(Self::parse_expression)?;
                    self.expect(TokenKind::RBracket)?;
                    NodeKind::MemberExpression {
                        object: base,
                        property,
                        computed: true,
                    }
                }
                TokenKind::LParen if !no_calls => {
                    self.bump()?;
                    let arguments = self.parse_call_arguments()?;
                    NodeKind::CallExpression {
                        callee: base,
                        arguments,
                    }
                }
                TokenKind::NoSubstitutionTemplate | TokenKind::TemplateHead => {
                    let quasi = self.parse_template(true)?;
                    NodeKind::TaggedTemplateExpression { tag: base, quasi }
                }
                _ => return Ok(base),
            };
            base = self.finish_node(kind, start);
        }
    }

    /// Arguments after `(`, through the closing `)`.
    pub(crate) fn parse_call_arguments(&mut self) -> ParseResult<Vec<NodeId>> {
        self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.eat(TokenKind::RParen)? {
                let argument = if p.at(TokenKind::Ellipsis) {
                    let start = p.start();
                    p.bump()?;
                    let argument = p.parse_maybe_assign()?;
                    p.finish_node(NodeKind::SpreadElement { argument }, start)
                } else {
                    p.parse_maybe_assign()?
                };
                arguments.push(argument);
                if !p.at(TokenKind::RParen) {
                    p.expect(TokenKind::Comma)?;
                }
            }
            Ok(arguments)
        })
    }

    /// Run `f` with `in` allowed as a binary operator.
    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let context = self.context.without(ParseContext::NO_IN);
        self.with_context(context, f)
    }

    /// An arrow function not wrapped in parentheses; operators and
    /// subscripts may not follow it.
    pub(crate) fn is_bare_arrow(&self, id: NodeId) -> bool {
        matches!(self.ast.kind(id), NodeKind::ArrowFunctionExpression { .. }) && !self.is_parenthesized(id)
    }
}
