//! Common test utilities for tableland-sqlparser tests

#![allow(dead_code)]

use tableland_sqlparser::{normalize, Error, NormalizedBatch};

/// Normalize and join the canonical statements, panicking on failure.
pub fn normalized(statement: &str) -> String {
    batch(statement).joined()
}

/// Normalize, panicking on failure.
pub fn batch(statement: &str) -> NormalizedBatch {
    normalize(statement).unwrap_or_else(|e| panic!("normalize({statement:?}) failed: {e}"))
}

/// Normalize, returning the error message.
pub fn normalize_err(statement: &str) -> String {
    match normalize(statement) {
        Ok(batch) => panic!("normalize({statement:?}) unexpectedly succeeded: {batch:?}"),
        Err(e) => e.to_string(),
    }
}

/// Error message of a failed operation.
pub fn message<T: std::fmt::Debug>(result: Result<T, Error>) -> String {
    match result {
        Ok(value) => panic!("operation unexpectedly succeeded: {value:?}"),
        Err(e) => e.to_string(),
    }
}
