//! Structural fingerprints.

use pretty_assertions::assert_eq;
use tableland_sqlparser::structure_hash;

use crate::common::message;

#[test]
fn known_digest() {
    assert_eq!(
        structure_hash("create table a_1 (counter int)").unwrap(),
        "9dc8fc6521b54e8f4606ac0e0d82a54a2b42e31bdc31dd57667b9df7016b23bf"
    );
}

#[test]
fn spelling_and_table_name_do_not_matter() {
    let a = structure_hash("create table a_1 (counter INT)").unwrap();
    let b = structure_hash("CREATE TABLE other_5 ( `counter` int );").unwrap();
    assert_eq!(a, b);
}

#[test]
fn structure_differences_change_the_digest() {
    let base = structure_hash("create table t_1 (id int, name text)").unwrap();
    let reordered = structure_hash("create table t_1 (name text, id int)").unwrap();
    let constrained = structure_hash("create table t_1 (id int primary key, name text)").unwrap();
    assert_ne!(base, reordered);
    assert_ne!(base, constrained);
}

#[test]
fn non_create_statements_are_rejected() {
    assert_eq!(
        message(structure_hash("select * from t_1_2")),
        "the query isn't a CREATE"
    );
    assert_eq!(
        message(structure_hash("insert into t_1_2 values (1)")),
        "the query isn't a CREATE"
    );
}

#[test]
fn create_table_name_must_match_the_convention() {
    assert_eq!(
        message(structure_hash("create table t (id int)")),
        "the query references a table name with the wrong format"
    );
}
