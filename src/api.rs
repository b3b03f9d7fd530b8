//! Argument-checked entry points for host bindings.
//!
//! Hosts hand arguments over as optionals; a missing statement is an error in
//! its own right rather than a panic. The `v0` module keeps the pre-1.0
//! message wording for callers that still match on error strings.

use std::collections::HashMap;

use crate::error::Error;
use crate::NormalizedBatch;

pub fn normalize(statement: Option<&str>) -> Result<NormalizedBatch, Error> {
    crate::normalize(require(statement)?)
}

pub fn validate_statement(statement: Option<&str>) -> Result<String, Error> {
    crate::validate_statement(require(statement)?)
}

pub fn get_unique_table_names(statement: Option<&str>) -> Result<Vec<String>, Error> {
    crate::get_unique_table_names(require(statement)?)
}

pub fn structure_hash(statement: Option<&str>) -> Result<String, Error> {
    crate::structure_hash(require(statement)?)
}

pub fn update_table_names(
    statement: Option<&str>,
    mapping: &HashMap<String, String>,
) -> Result<String, Error> {
    crate::update_table_names(require(statement)?, mapping)
}

fn require(statement: Option<&str>) -> Result<&str, Error> {
    statement.ok_or(Error::MissingArgument("statement"))
}

/// Pre-1.0 surface: same behavior, legacy error wording.
pub mod v0 {
    use super::require;
    use crate::error::Error;
    use crate::NormalizedBatch;

    fn legacy(err: Error) -> Error {
        match err {
            Error::MissingArgument(name) => Error::MissingArgumentLegacy(name),
            Error::StatementSize => Error::StatementSizeLegacy,
            other => other,
        }
    }

    pub fn normalize(statement: Option<&str>) -> Result<NormalizedBatch, Error> {
        require(statement)
            .and_then(crate::normalize)
            .map_err(legacy)
    }

    pub fn validate_statement(statement: Option<&str>) -> Result<String, Error> {
        require(statement)
            .and_then(crate::validate_statement)
            .map_err(legacy)
    }
}
