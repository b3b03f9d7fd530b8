//! Statement size limits.

use std::collections::HashMap;

use tableland_sqlparser::{
    get_unique_table_names_with, max_query_size, normalize_with, structure_hash_with,
    update_table_names_with, validate_statement_with, ValidationConfig, DEFAULT_MAX_QUERY_SIZE,
};

use crate::common::message;

#[test]
fn default_limit_is_35000() {
    assert_eq!(DEFAULT_MAX_QUERY_SIZE, 35_000);
    assert_eq!(ValidationConfig::default().max_query_size, 35_000);
}

#[test]
fn oversize_statements_are_rejected() {
    let config = ValidationConfig { max_query_size: 20 };
    assert_eq!(
        message(normalize_with(&config, "select * from a_really_long_table_name_1_2")),
        "statement size error: larger than specified max"
    );
}

#[test]
fn statements_at_the_limit_pass() {
    let statement = "select * from t_1_2";
    let config = ValidationConfig {
        max_query_size: statement.len(),
    };
    assert!(normalize_with(&config, statement).is_ok());
}

#[test]
fn zero_disables_the_limit() {
    let config = ValidationConfig { max_query_size: 0 };
    let long = format!("select * from t_1_2 where a = '{}'", "x".repeat(100_000));
    assert!(normalize_with(&config, &long).is_ok());
}

#[test]
fn size_is_checked_before_parsing() {
    // an oversize statement reports the size error even if it would not parse
    let config = ValidationConfig { max_query_size: 5 };
    assert_eq!(
        message(normalize_with(&config, "not even sql")),
        "statement size error: larger than specified max"
    );
}

#[test]
fn every_statement_entry_point_enforces_the_limit() {
    let config = ValidationConfig { max_query_size: 10 };
    let statement = "select * from some_table_1_2 where x = 1";
    let size_error = "statement size error: larger than specified max";

    assert_eq!(message(normalize_with(&config, statement)), size_error);
    assert_eq!(message(validate_statement_with(&config, statement)), size_error);
    assert_eq!(
        message(get_unique_table_names_with(&config, statement)),
        size_error
    );
    assert_eq!(
        message(structure_hash_with(&config, "create table t_1 (id int)")),
        size_error
    );

    let mapping = HashMap::from([("some_table_1_2".to_string(), "t_1_2".to_string())]);
    assert_eq!(
        message(update_table_names_with(&config, statement, &mapping)),
        size_error
    );
}

#[test]
fn explicit_config_rewrite_applies_under_the_limit() {
    let config = ValidationConfig::default();
    let mapping = HashMap::from([("t1".to_string(), "t_1_2".to_string())]);
    assert_eq!(
        update_table_names_with(&config, "select * from t1", &mapping).unwrap(),
        "select * from t_1_2"
    );
    assert_eq!(
        get_unique_table_names_with(&config, "select * from t1 join t2").unwrap(),
        vec!["t1".to_string(), "t2".to_string()]
    );
}

#[test]
fn global_limit_is_readable_and_settable() {
    // only ever raise the global here; other tests read it concurrently
    assert_eq!(max_query_size(None), DEFAULT_MAX_QUERY_SIZE);
    assert_eq!(max_query_size(Some(50_000)), 50_000);
    assert_eq!(max_query_size(None), 50_000);
    max_query_size(Some(DEFAULT_MAX_QUERY_SIZE));
}
