#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(clippy::dbg_macro, clippy::todo, clippy::unimplemented)]

mod cst;
mod error;
mod grammar;
mod lexer;
mod lower;
mod parser;
mod rule;

pub use cst::{CstNode, SyntaxNode};
pub use error::{LowerError, ParseError, SyntaxError};
pub use grammar::ElementKind;
pub use lower::{
    lower_any, lower_binop, lower_expr, lower_fn_decl, lower_fn_def, lower_import, lower_module,
    lower_name, lower_scope, lower_src_file, lower_var_assignment, lower_var_declaration,
    lower_var_definition,
};
pub use parser::{parse_cst, MAX_PRIO_DEPTH};
pub use rule::Rule;

use snel_ast::ast::SrcFile;

/// Parse and lower a whole Snel source file.
///
/// `file` only labels syntax errors; nothing is read from disk. Node spans
/// store `u32` offsets and saturate for sources over 4 GiB.
pub fn parse_str(file: &str, src: &str) -> Result<SrcFile, ParseError> {
    let cst = parse_cst(src).map_err(|e| e.with_file(file))?;
    Ok(lower_src_file(&cst)?)
}
