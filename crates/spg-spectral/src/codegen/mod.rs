//! Emitted-code model: a small JavaScript/TypeScript AST, the renderer that
//! turns it into text, and the indentation-aware writer it renders into.

pub mod ast;
pub mod render;
pub mod writer;

pub use ast::{Decl, Expr, Import, Pattern, Prop, PropKey, Stmt, TemplatePart};
pub use render::{render_decl, render_expr, render_import};
pub use writer::SourceWriter;
