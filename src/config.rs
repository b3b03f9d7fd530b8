//! Validation limits.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Error;

/// Default cap on statement length, in bytes.
pub const DEFAULT_MAX_QUERY_SIZE: usize = 35_000;

static MAX_QUERY_SIZE: AtomicUsize = AtomicUsize::new(DEFAULT_MAX_QUERY_SIZE);

/// Read or set the process-wide maximum statement size. Passing `Some(n)`
/// installs `n` and returns it; passing `None` just reads the current value.
/// A size of 0 disables the check.
pub fn max_query_size(size: Option<usize>) -> usize {
    match size {
        Some(n) => {
            MAX_QUERY_SIZE.store(n, Ordering::Relaxed);
            n
        }
        None => MAX_QUERY_SIZE.load(Ordering::Relaxed),
    }
}

/// Explicit limits for callers that don't want the process-wide value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    pub max_query_size: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_query_size: DEFAULT_MAX_QUERY_SIZE,
        }
    }
}

impl ValidationConfig {
    /// Snapshot of the process-wide setting.
    pub fn current() -> Self {
        Self {
            max_query_size: max_query_size(None),
        }
    }

    pub fn check_size(&self, statement: &str) -> Result<(), Error> {
        if self.max_query_size > 0 && statement.len() > self.max_query_size {
            return Err(Error::StatementSize);
        }
        Ok(())
    }
}
