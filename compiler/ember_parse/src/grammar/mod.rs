//! Grammar productions.
//!
//! Each submodule extends [`Parser`](crate::Parser) with the productions
//! for one area of the language.
//!
//! - `statement.rs`: statements, blocks, directive prologues, loops
//! - `expression.rs`: assignment down to unary, operator precedence
//! - `atom.rs`: primary expressions, literals, object and array literals
//! - `function.rs`: functions, parameters, arrows
//! - `class.rs`: classes, members, decorators
//! - `module.rs`: `import` and `export`
//! - `pattern.rs`: binding patterns and expression-to-pattern conversion
//! - `template.rs`: template literals
//! - `flow.rs`: Flow type annotations and aliases

mod atom;
mod class;
mod expression;
mod flow;
mod function;
mod module;
mod pattern;
mod statement;
mod template;
