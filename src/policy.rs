//! Deny-listed keyword policy.
//!
//! The lexer treats these words as plain identifiers so statements using
//! them still parse; the policy walk then rejects the parsed batch with an
//! aggregate error listing every occurrence.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::ParseError;
use crate::parser::ast::{Batch, ColumnConstraint, Statement};

/// Words rejected everywhere, matched case-insensitively, reported uppercase.
static DENIED_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "AUTOINCREMENT",
        "CURRENT_TIME",
        "CURRENT_DATE",
        "CURRENT_TIMESTAMP",
    ])
});

/// Check every statement in the batch for deny-listed keywords.
pub fn check_batch(batch: &Batch) -> Result<(), ParseError> {
    let mut violations = Vec::new();
    for statement in &batch.statements {
        statement.visit_idents(&mut |ident| {
            let upper = ident.name.to_ascii_uppercase();
            if DENIED_KEYWORDS.contains(upper.as_str()) {
                violations.push(upper);
            }
        });
        // AUTOINCREMENT in the primary-key slot parses into a flag rather
        // than an identifier
        if let Statement::CreateTable(create) = statement {
            for col in &create.columns {
                for constraint in &col.constraints {
                    if matches!(
                        constraint,
                        ColumnConstraint::PrimaryKey {
                            autoincrement: true,
                            ..
                        }
                    ) {
                        violations.push("AUTOINCREMENT".to_string());
                    }
                }
            }
        }
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ParseError::KeywordsNotAllowed(violations))
    }
}
