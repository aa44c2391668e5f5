//! `import` and `export` declarations.

use ember_ir::{NodeId, NodeKind};

use super::Generator;
use crate::precedence::{self, starts_ambiguously, Start};
use crate::CodegenResult;

impl Generator<'_> {
    pub(super) fn emit_import(&mut self, specifiers: &[NodeId], source: NodeId) -> CodegenResult {
        self.printer.word("import");
        self.printer.space();
        if !specifiers.is_empty() {
            let mut named = Vec::new();
            let mut leading = false;
            for &specifier in specifiers {
                match self.ast.kind(specifier) {
                    NodeKind::ImportSpecifier { .. } => named.push(specifier),
                    _ => {
                        if leading {
                            self.printer.token(",");
                            self.printer.space();
                        }
                        leading = true;
                        self.emit_node(specifier)?;
                    }
                }
            }
            if !named.is_empty() {
                if leading {
                    self.printer.token(",");
                    self.printer.space();
                }
                self.emit_specifier_group(&named)?;
            }
            self.emit_from(source)?;
        } else {
            self.emit_node(source)?;
        }
        self.printer.token(";");
        Ok(())
    }

    /// `{ a, b as c }` on one line.
    fn emit_specifier_group(&mut self, specifiers: &[NodeId]) -> CodegenResult {
        self.printer.token("{");
        if !specifiers.is_empty() {
            self.printer.space();
            for (i, &specifier) in specifiers.iter().enumerate() {
                if i > 0 {
                    self.printer.token(",");
                    self.printer.space();
                }
                self.emit_node(specifier)?;
            }
            self.printer.space();
        }
        self.printer.token("}");
        Ok(())
    }

    fn emit_from(&mut self, source: NodeId) -> CodegenResult {
        self.printer.space();
        self.printer.word("from");
        self.printer.space();
        self.emit_node(source)
    }

    /// `name` when both sides agree, `name as alias` otherwise.
    pub(super) fn emit_aliased(&mut self, name: NodeId, alias: NodeId) -> CodegenResult {
        self.emit_property_key(name, false)?;
        let same = self
            .ast
            .identifier_name(name)
            .is_some_and(|name| self.ast.identifier_name(alias) == Some(name));
        if !same {
            self.printer.word("as");
            self.emit_property_key(alias, false)?;
        }
        Ok(())
    }

    /// `* as name`.
    pub(super) fn emit_namespace(&mut self, name: NodeId) -> CodegenResult {
        self.printer.token("*");
        self.printer.space();
        self.printer.word("as");
        self.emit_node(name)
    }

    pub(super) fn emit_export_named(
        &mut self,
        declaration: Option<NodeId>,
        specifiers: &[NodeId],
        source: Option<NodeId>,
    ) -> CodegenResult {
        self.printer.word("export");
        self.printer.space();
        if let Some(declaration) = declaration {
            return self.emit_node(declaration);
        }

        let (namespace, named): (Vec<NodeId>, Vec<NodeId>) = specifiers
            .iter()
            .partition(|&&specifier| matches!(self.ast.kind(specifier), NodeKind::ExportNamespaceSpecifier { .. }));
        for (i, &specifier) in namespace.iter().enumerate() {
            if i > 0 {
                self.printer.token(",");
                self.printer.space();
            }
            self.emit_node(specifier)?;
        }
        if !named.is_empty() || namespace.is_empty() {
            if !namespace.is_empty() {
                self.printer.token(",");
                self.printer.space();
            }
            self.emit_specifier_group(&named)?;
        }
        if let Some(source) = source {
            self.emit_from(source)?;
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_export_default(&mut self, declaration: NodeId) -> CodegenResult {
        self.printer.word("export");
        self.printer.word("default");
        self.printer.space();
        if matches!(
            self.ast.kind(declaration),
            NodeKind::FunctionDeclaration(_) | NodeKind::ClassDeclaration(_)
        ) {
            return self.emit_default_declaration(declaration);
        }
        if starts_ambiguously(self.ast, declaration, Start::ExportDefault) {
            self.emit_parenthesized(declaration)?;
        } else {
            self.emit_expression(declaration, precedence::ASSIGN)?;
        }
        self.printer.token(";");
        Ok(())
    }

    pub(super) fn emit_export_all(&mut self, source: NodeId) -> CodegenResult {
        self.printer.word("export");
        self.printer.space();
        self.printer.token("*");
        self.emit_from(source)?;
        self.printer.token(";");
        Ok(())
    }
}
