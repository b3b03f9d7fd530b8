//! Restricted-dialect SQL parsing.

pub mod ast;
mod display;
mod lexer;
mod parser;
pub mod token;

pub use lexer::Lexer;
pub use parser::Parser;

use crate::error::ParseError;
use crate::policy;

use ast::Batch;

/// Parse a statement batch and apply the keyword policy.
pub fn parse(source: &str) -> Result<Batch, ParseError> {
    let batch = Parser::parse(source)?;
    policy::check_batch(&batch)?;
    Ok(batch)
}
