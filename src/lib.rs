//! Validator and normalizer for a restricted SQL dialect.
//!
//! Statements are parsed against a deliberately small grammar (CREATE TABLE,
//! SELECT, INSERT, UPDATE, DELETE, GRANT/REVOKE), checked against a keyword
//! deny list and a table-name convention, and re-rendered in a canonical
//! form: lowercase keywords, bare identifiers, single-spaced operators, and
//! comma joins spelled out as `join`.

pub mod api;
pub mod config;
pub mod error;
pub mod naming;
pub mod parser;

mod hash;
mod policy;
mod rewrite;

pub use config::{max_query_size, ValidationConfig, DEFAULT_MAX_QUERY_SIZE};
pub use error::{Error, NameError, ParseError};
pub use naming::TableName;
pub use parser::ast::BatchKind;
pub use rewrite::{update_table_names, update_table_names_with};

use parser::ast::{Batch, Statement};

/// A parsed batch rendered in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBatch {
    pub kind: BatchKind,
    pub statements: Vec<String>,
}

impl NormalizedBatch {
    fn from_batch(batch: &Batch) -> Self {
        Self {
            kind: batch.kind(),
            statements: batch.statements.iter().map(ToString::to_string).collect(),
        }
    }

    /// Canonical statements joined with `"; "`.
    pub fn joined(&self) -> String {
        self.statements.join("; ")
    }
}

/// Parse and canonicalize a batch. Table names are not checked here; use
/// [`validate_statement`] for that.
pub fn normalize(statement: &str) -> Result<NormalizedBatch, Error> {
    normalize_with(&ValidationConfig::current(), statement)
}

/// [`normalize`] with explicit limits.
pub fn normalize_with(
    config: &ValidationConfig,
    statement: &str,
) -> Result<NormalizedBatch, Error> {
    config.check_size(statement)?;
    let batch = parser::parse(statement)?;
    Ok(NormalizedBatch::from_batch(&batch))
}

/// Parse, canonicalize, and check every table reference against the naming
/// convention. CREATE statements use the create form (no table id); all other
/// statements require fully-qualified names. Returns the canonical text,
/// statements joined with `"; "`.
pub fn validate_statement(statement: &str) -> Result<String, Error> {
    validate_statement_with(&ValidationConfig::current(), statement)
}

/// [`validate_statement`] with explicit limits.
pub fn validate_statement_with(
    config: &ValidationConfig,
    statement: &str,
) -> Result<String, Error> {
    config.check_size(statement)?;
    let batch = parser::parse(statement)?;

    for stmt in &batch.statements {
        let mut bad = None;
        let create = matches!(stmt, Statement::CreateTable(_));
        stmt.visit_table_refs(&mut |ident| {
            if bad.is_some() {
                return;
            }
            let ok = if create {
                TableName::parse_create(&ident.name).is_ok()
            } else {
                TableName::parse(&ident.name).is_ok()
            };
            if !ok {
                bad = Some(ident.name.clone());
            }
        });
        if let Some(name) = bad {
            return Err(NameError::WrongFormatInStatement(name).into());
        }
    }

    Ok(NormalizedBatch::from_batch(&batch).joined())
}

/// Distinct table names referenced by the batch, in first-seen order.
/// Column qualifiers are not collected. An empty input yields an empty list.
pub fn get_unique_table_names(statement: &str) -> Result<Vec<String>, Error> {
    get_unique_table_names_with(&ValidationConfig::current(), statement)
}

/// [`get_unique_table_names`] with explicit limits.
pub fn get_unique_table_names_with(
    config: &ValidationConfig,
    statement: &str,
) -> Result<Vec<String>, Error> {
    config.check_size(statement)?;
    if statement.trim().is_empty() {
        return Ok(Vec::new());
    }
    let batch = parser::parse(statement)?;
    Ok(batch.unique_table_names())
}

/// Check a bare table name against the naming convention. `is_create` selects
/// the create form, which carries no table id.
pub fn validate_table_name(name: &str, is_create: bool) -> Result<TableName, Error> {
    let parsed = if is_create {
        TableName::parse_create(name)?
    } else {
        TableName::parse(name)?
    };
    Ok(parsed)
}

/// Structural fingerprint of a CREATE TABLE statement. The batch must consist
/// of exactly one CREATE, and its table name must match the create form of
/// the naming convention.
pub fn structure_hash(statement: &str) -> Result<String, Error> {
    structure_hash_with(&ValidationConfig::current(), statement)
}

/// [`structure_hash`] with explicit limits.
pub fn structure_hash_with(
    config: &ValidationConfig,
    statement: &str,
) -> Result<String, Error> {
    config.check_size(statement)?;
    let batch = parser::parse(statement)?;
    match batch.statements.as_slice() {
        [Statement::CreateTable(create)] => {
            if TableName::parse_create(&create.table.name).is_err() {
                return Err(Error::CreateTableNameFormat);
            }
            Ok(hash::structure_hash(create))
        }
        _ => Err(Error::NotCreateStatement),
    }
}
