//! Statement validation: canonical form plus table-name checking.

use pretty_assertions::assert_eq;
use tableland_sqlparser::validate_statement;

use crate::common::message;

#[test]
fn accepts_qualified_names() {
    assert_eq!(
        validate_statement("select * from healthbot_5_1 where counter > 0").unwrap(),
        "select * from healthbot_5_1 where counter > 0"
    );
}

#[test]
fn create_statements_use_the_create_form() {
    // no table id yet, the registry assigns it later
    assert_eq!(
        validate_statement("create table healthbot_5 (counter int)").unwrap(),
        "create table healthbot_5 (counter int)"
    );
}

#[test]
fn multi_statement_batches_join_with_semicolons() {
    assert_eq!(
        validate_statement("insert into t_1_2 values (1);update t_1_2 set a = 2;").unwrap(),
        "insert into t_1_2 values (1); update t_1_2 set a = 2"
    );
}

#[test]
fn rejects_unqualified_names() {
    assert_eq!(
        message(validate_statement("select * from t2")),
        "error validating name: walk subtree: validate: table name has wrong format: t2"
    );
}

#[test]
fn rejects_create_names_with_trailing_separator() {
    assert_eq!(
        message(validate_statement("create table blah_5_ (id int)")),
        "error validating name: walk subtree: validate: table name has wrong format: blah_5_"
    );
}

#[test]
fn checks_every_statement_in_the_batch() {
    assert_eq!(
        message(validate_statement(
            "insert into t_1_2 values (1); update t2 set a = 1"
        )),
        "error validating name: walk subtree: validate: table name has wrong format: t2"
    );
}

#[test]
fn checks_subquery_sources() {
    assert_eq!(
        message(validate_statement("select * from (select * from bad)")),
        "error validating name: walk subtree: validate: table name has wrong format: bad"
    );
}

#[test]
fn column_qualifiers_are_not_name_checked() {
    // aliases qualify columns without being table references
    assert_eq!(
        validate_statement("select x.id from t_1_2 as x join u_1_3 as y on x.id = y.id").unwrap(),
        "select x.id from t_1_2 as x join u_1_3 as y on x.id = y.id"
    );
}

#[test]
fn parse_errors_still_use_the_parse_prefix() {
    assert_eq!(
        message(validate_statement("select * from")),
        "error parsing statement: syntax error at position 13 near ''"
    );
}

#[test]
fn grant_targets_are_name_checked() {
    assert!(validate_statement("grant insert on foo_1337_100 to '0xabc'").is_ok());
    assert_eq!(
        message(validate_statement("grant insert on foo to '0xabc'")),
        "error validating name: walk subtree: validate: table name has wrong format: foo"
    );
}
