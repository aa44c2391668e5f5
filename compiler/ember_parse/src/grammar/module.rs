//! `import` and `export` declarations.

use ember_diagnostic::ErrorCode;
use ember_ir::{NodeId, NodeKind, TokenKind};
use ember_lexer::{is_reserved_word, is_strict_reserved_word};

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// Module declarations are only valid at the top level of module code
    /// unless the options relax that.
    pub(crate) fn check_module_item(&self, top_level: bool) -> ParseResult<()> {
        if self.options.allow_import_export_everywhere {
            return Ok(());
        }
        if !top_level {
            return Err(self.error_at_token(
                ErrorCode::E1005,
                "'import' and 'export' may only appear at the top level",
            ));
        }
        if !self.source_type().is_module() {
            return Err(self.error_at_token(
                ErrorCode::E1005,
                "'import' and 'export' may appear only with 'sourceType: module'",
            ));
        }
        Ok(())
    }

    pub(crate) fn parse_import(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::Import)?;

        let mut specifiers = Vec::new();
        if !self.at(TokenKind::Str) {
            if self.at(TokenKind::Ident) {
                let spec_start = self.start();
                let local = self.parse_binding_identifier()?;
                specifiers.push(self.finish_node(NodeKind::ImportDefaultSpecifier { local }, spec_start));
                if self.eat(TokenKind::Comma)? {
                    self.parse_import_clause_rest(&mut specifiers)?;
                }
            } else {
                self.parse_import_clause_rest(&mut specifiers)?;
            }
            self.expect_contextual("from")?;
        }
        let source = self.parse_module_source()?;
        self.semicolon()?;
        Ok(self.finish_node(NodeKind::ImportDeclaration { specifiers, source }, start))
    }

    /// `* as ns` or `{ a, b as c }`.
    fn parse_import_clause_rest(&mut self, specifiers: &mut Vec<NodeId>) -> ParseResult<()> {
        if self.at(TokenKind::Star) {
            let spec_start = self.start();
            self.bump()?;
            self.expect_contextual("as")?;
            let local = self.parse_binding_identifier()?;
            specifiers.push(self.finish_node(NodeKind::ImportNamespaceSpecifier { local }, spec_start));
            return Ok(());
        }

        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace)? {
            let spec_start = self.start();
            let is_keyword = self.kind().is_keyword();
            let imported = self.parse_identifier_name()?;
            let local = if self.eat_contextual("as")? {
                self.parse_binding_identifier()?
            } else {
                if is_keyword {
                    return Err(self.error_at_node(
                        ErrorCode::E1003,
                        format!(
                            "Unexpected keyword '{}'",
                            self.ast.identifier_name(imported).unwrap_or_default()
                        ),
                        imported,
                    ));
                }
                self.check_binding_name(imported)?;
                self.ast.clone_subtree(imported)
            };
            specifiers.push(self.finish_node(NodeKind::ImportSpecifier { imported, local }, spec_start));
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }
        Ok(())
    }

    fn parse_module_source(&mut self) -> ParseResult<NodeId> {
        if !self.at(TokenKind::Str) {
            return self.unexpected();
        }
        self.parse_literal()
    }

    pub(crate) fn parse_export(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        self.expect(TokenKind::Export)?;

        if self.at(TokenKind::Star) {
            return self.parse_export_star(start);
        }
        if self.eat(TokenKind::Default)? {
            let declaration = self.parse_export_default_declaration()?;
            return Ok(self.finish_node(NodeKind::ExportDefaultDeclaration { declaration }, start));
        }
        if self.at(TokenKind::LBrace) {
            let specifiers = self.parse_export_specifiers()?;
            let source = if self.eat_contextual("from")? {
                Some(self.parse_module_source()?)
            } else {
                for &specifier in &specifiers {
                    if let NodeKind::ExportSpecifier { local, .. } = *self.ast.kind(specifier) {
                        self.check_export_local(local)?;
                    }
                }
                None
            };
            self.semicolon()?;
            return Ok(self.finish_node(
                NodeKind::ExportNamedDeclaration {
                    declaration: None,
                    specifiers,
                    source,
                },
                start,
            ));
        }

        let declaration = self.parse_export_declaration()?;
        Ok(self.finish_node(
            NodeKind::ExportNamedDeclaration {
                declaration: Some(declaration),
                specifiers: Vec::new(),
                source: None,
            },
            start,
        ))
    }

    /// `export * from "m"` or `export * as ns from "m"`.
    fn parse_export_star(&mut self, start: u32) -> ParseResult<NodeId> {
        let star_start = self.start();
        self.bump()?;
        if self.is_contextual("as") {
            self.require_plugin("exportExtensions", "export * as ns")?;
            self.bump()?;
            let exported = self.parse_identifier_name()?;
            let specifier = self.finish_node(NodeKind::ExportNamespaceSpecifier { exported }, star_start);
            self.expect_contextual("from")?;
            let source = self.parse_module_source()?;
            self.semicolon()?;
            return Ok(self.finish_node(
                NodeKind::ExportNamedDeclaration {
                    declaration: None,
                    specifiers: vec![specifier],
                    source: Some(source),
                },
                start,
            ));
        }
        self.expect_contextual("from")?;
        let source = self.parse_module_source()?;
        self.semicolon()?;
        Ok(self.finish_node(NodeKind::ExportAllDeclaration { source }, start))
    }

    fn parse_export_default_declaration(&mut self) -> ParseResult<NodeId> {
        let start = self.start();
        match self.kind() {
            TokenKind::Function => return self.parse_function_statement(start, false, false),
            TokenKind::Class => return self.parse_class(start, true, false, Vec::new()),
            TokenKind::At => {
                let decorators = self.parse_decorators()?;
                return self.parse_class(start, true, false, decorators);
            }
            TokenKind::Ident if self.is_contextual("async") => {
                let next = self.lookahead()?;
                if next.kind == TokenKind::Function && !next.newline_before {
                    self.bump()?;
                    return self.parse_function_statement(start, true, false);
                }
            }
            _ => {}
        }
        let expression = self.parse_maybe_assign()?;
        self.semicolon()?;
        Ok(expression)
    }

    fn parse_export_specifiers(&mut self) -> ParseResult<Vec<NodeId>> {
        let mut specifiers = Vec::new();
        self.expect(TokenKind::LBrace)?;
        while !self.eat(TokenKind::RBrace)? {
            let spec_start = self.start();
            let local = self.parse_identifier_name()?;
            let exported = if self.eat_contextual("as")? {
                self.parse_identifier_name()?
            } else {
                self.ast.clone_subtree(local)
            };
            specifiers.push(self.finish_node(NodeKind::ExportSpecifier { local, exported }, spec_start));
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Comma)?;
            }
        }
        Ok(specifiers)
    }

    /// A local export name must be a usable reference when there is no
    /// `from` clause.
    fn check_export_local(&self, local: NodeId) -> ParseResult<()> {
        let name = self.ast.identifier_name(local).unwrap_or_default();
        let source_type = self.source_type();
        let reserved = is_reserved_word(name, source_type)
            || (self.context.is_strict() && is_strict_reserved_word(name, source_type));
        if reserved {
            return Err(self.error_at_node(ErrorCode::E1003, format!("Unexpected keyword '{name}'"), local));
        }
        Ok(())
    }

    /// `export var/let/const/function/class/type ...`
    fn parse_export_declaration(&mut self) -> ParseResult<NodeId> {
        let is_declaration = match self.kind() {
            TokenKind::Var | TokenKind::Const | TokenKind::Function | TokenKind::Class | TokenKind::At => true,
            TokenKind::Ident => {
                let next = self.lookahead()?;
                (self.is_contextual("let") && matches!(next.kind, TokenKind::Ident | TokenKind::LBracket | TokenKind::LBrace))
                    || (self.is_contextual("async") && next.kind == TokenKind::Function && !next.newline_before)
                    || (self.is_contextual("type")
                        && self.has_plugin("flow")
                        && next.kind == TokenKind::Ident
                        && !next.newline_before)
            }
            _ => false,
        };
        if !is_declaration {
            return self.unexpected();
        }
        self.parse_statement()
    }
}
