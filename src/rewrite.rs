//! Table reference rewriting.
//!
//! Replaces table names throughout a batch (targets, FROM sources, and column
//! qualifiers) and re-renders the canonical text. The rewritten text is parsed
//! again before being returned, so a mapping that introduces characters the
//! dialect cannot lex surfaces as an error pointing into the rewritten
//! statement.

use std::collections::HashMap;

use crate::config::ValidationConfig;
use crate::error::Error;
use crate::parser::{self, Parser};

/// Rewrite every reference to a key of `mapping` with its value and return
/// the canonical text, statements joined by `"; "`.
pub fn update_table_names(
    statement: &str,
    mapping: &HashMap<String, String>,
) -> Result<String, Error> {
    update_table_names_with(&ValidationConfig::current(), statement, mapping)
}

/// [`update_table_names`] with explicit limits.
pub fn update_table_names_with(
    config: &ValidationConfig,
    statement: &str,
    mapping: &HashMap<String, String>,
) -> Result<String, Error> {
    config.check_size(statement)?;
    let mut batch = parser::parse(statement)?;
    for stmt in &mut batch.statements {
        stmt.rename_tables(mapping);
    }

    let updated = batch
        .statements
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");

    // names come from the caller, so the rewritten text may no longer lex
    if let Err(err) = Parser::parse(&updated) {
        return Err(Error::ParseUpdated(err));
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use pretty_assertions::assert_eq;

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn renames_targets_and_sources() {
        assert_eq!(
            update_table_names(
                "insert into t1 values (1); update t2 set a = 2",
                &mapping(&[("t1", "table1"), ("t2", "table2")]),
            )
            .unwrap(),
            "insert into table1 values (1); update table2 set a = 2"
        );
    }

    #[test]
    fn renames_column_qualifiers() {
        assert_eq!(
            update_table_names(
                "select t1.id, t2.name from t1 join t2 on t1.id = t2.id",
                &mapping(&[("t1", "a_1_2"), ("t2", "b_1_3")]),
            )
            .unwrap(),
            "select a_1_2.id, b_1_3.name from a_1_2 join b_1_3 on a_1_2.id = b_1_3.id"
        );
    }

    #[test]
    fn renames_delimited_references() {
        assert_eq!(
            update_table_names(
                "select `t1`.id from `t1`",
                &mapping(&[("t1", "table1")]),
            )
            .unwrap(),
            "select table1.id from table1"
        );
    }

    #[test]
    fn unmapped_names_are_left_alone() {
        assert_eq!(
            update_table_names("select * from t1 join t2", &mapping(&[("t1", "table1")]))
                .unwrap(),
            "select * from table1 join t2"
        );
    }

    #[test]
    fn invalid_replacement_fails_reparse() {
        let err = update_table_names("select * from t1", &mapping(&[("t1", "table@")]))
            .unwrap_err();
        assert_eq!(
            err,
            Error::ParseUpdated(ParseError::Syntax {
                position: 19,
                near: "@".to_string()
            })
        );
        assert_eq!(
            err.to_string(),
            "error parsing updated statement: syntax error at position 19 near '@'"
        );
    }
}
