//! Table reference rewriting.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use tableland_sqlparser::update_table_names;

use crate::common::message;

fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn rewrites_references_and_qualifiers() {
    assert_eq!(
        update_table_names(
            "select t1.id, t2.name from t1 join t2 on t1.id = t2.id where t1.id > 0",
            &mapping(&[("t1", "person_1_2"), ("t2", "pet_1_3")]),
        )
        .unwrap(),
        "select person_1_2.id, pet_1_3.name from person_1_2 join pet_1_3 \
         on person_1_2.id = pet_1_3.id where person_1_2.id > 0"
    );
}

#[test]
fn rewrites_across_a_mutate_batch() {
    assert_eq!(
        update_table_names(
            "insert into t1 values (1); delete from t2 where t2.id = 1",
            &mapping(&[("t1", "a_1_2"), ("t2", "b_1_3")]),
        )
        .unwrap(),
        "insert into a_1_2 values (1); delete from b_1_3 where b_1_3.id = 1"
    );
}

#[test]
fn delimited_references_are_rewritten_bare() {
    assert_eq!(
        update_table_names("select `t1`.id from `t1`", &mapping(&[("t1", "table1")])).unwrap(),
        "select table1.id from table1"
    );
}

#[test]
fn output_is_canonical_even_without_matches() {
    assert_eq!(
        update_table_names("SELECT * FROM t_1_2 WHERE a==1;", &mapping(&[])).unwrap(),
        "select * from t_1_2 where a = 1"
    );
}

#[test]
fn invalid_replacement_is_caught_on_reparse() {
    assert_eq!(
        message(update_table_names(
            "select * from t1",
            &mapping(&[("t1", "table@")]),
        )),
        "error parsing updated statement: syntax error at position 19 near '@'"
    );
}

#[test]
fn original_parse_errors_keep_their_prefix() {
    assert_eq!(
        message(update_table_names("select * from", &mapping(&[]))),
        "error parsing statement: syntax error at position 13 near ''"
    );
}
