//! Error types for parsing, validation, and naming.

use thiserror::Error;

/// Failure while lexing, parsing, or policy-checking a statement batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Unexpected token or character. `position` is a byte offset: one past
    /// the end of an unexpected token, or the offset of an unrecognized
    /// character.
    #[error("syntax error at position {position} near '{near}'")]
    Syntax { position: usize, near: String },

    /// Input held no tokens at all.
    #[error("empty string")]
    EmptyStatement,

    /// One or more deny-listed keywords were used. Keywords are reported
    /// uppercase, in an aggregate list.
    #[error("{}", format_keyword_errors(.0))]
    KeywordsNotAllowed(Vec<String>),
}

fn format_keyword_errors(keywords: &[String]) -> String {
    let mut out = if keywords.len() == 1 {
        String::from("1 error occurred:\n")
    } else {
        format!("{} errors occurred:\n", keywords.len())
    };
    for kw in keywords {
        out.push_str("\t* keyword not allowed: ");
        out.push_str(kw);
        out.push('\n');
    }
    out.push('\n');
    out
}

/// A table name that does not match the `{prefix}_{chainId}_{tableId}`
/// convention.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("table name has wrong format: {0}")]
    WrongFormat(String),

    /// Wrong-format name found while walking a parsed statement.
    #[error("walk subtree: validate: table name has wrong format: {0}")]
    WrongFormatInStatement(String),
}

/// Top-level error surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("error parsing statement: {0}")]
    Parse(#[from] ParseError),

    /// The rewritten statement failed to reparse after a table-name update.
    #[error("error parsing updated statement: {0}")]
    ParseUpdated(ParseError),

    #[error("error validating name: {0}")]
    Name(#[from] NameError),

    #[error("statement size error: larger than specified max")]
    StatementSize,

    /// Pre-1.0 wording kept for callers still matching on it.
    #[error("statement size larger than specified max")]
    StatementSizeLegacy,

    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// Pre-1.0 wording kept for callers still matching on it.
    #[error("missing required argument '{0}'")]
    MissingArgumentLegacy(&'static str),

    #[error("the query isn't a CREATE")]
    NotCreateStatement,

    #[error("the query references a table name with the wrong format")]
    CreateTableNameFormat,
}
