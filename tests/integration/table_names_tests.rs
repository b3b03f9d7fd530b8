//! Table reference collection.

use pretty_assertions::assert_eq;
use tableland_sqlparser::get_unique_table_names;

#[test]
fn collects_names_in_first_seen_order() {
    assert_eq!(
        get_unique_table_names(
            "select t1.id from t1 join t2 join (select * from t3) \
             where exists (select 1 from t4)"
        )
        .unwrap(),
        vec!["t1", "t2", "t3", "t4"]
    );
}

#[test]
fn deduplicates_references() {
    assert_eq!(
        get_unique_table_names("select * from t1 join t1 join t2"),
        Ok(vec!["t1".to_string(), "t2".to_string()])
    );
}

#[test]
fn column_qualifiers_are_not_references() {
    assert_eq!(
        get_unique_table_names("select a.id, b.name from t_1_2 as a join u_1_3 as b"),
        Ok(vec!["t_1_2".to_string(), "u_1_3".to_string()])
    );
}

#[test]
fn covers_every_statement_in_the_batch() {
    assert_eq!(
        get_unique_table_names("insert into t1 values (1); update t2 set a = 1; delete from t1"),
        Ok(vec!["t1".to_string(), "t2".to_string()])
    );
}

#[test]
fn empty_input_yields_no_names() {
    assert_eq!(get_unique_table_names(""), Ok(vec![]));
    assert_eq!(get_unique_table_names("  \n "), Ok(vec![]));
}

#[test]
fn select_without_from_yields_no_names() {
    assert_eq!(get_unique_table_names("select 1"), Ok(vec![]));
}

#[test]
fn grant_and_create_targets_count() {
    assert_eq!(
        get_unique_table_names("grant insert on foo_1337_100 to '0xabc'"),
        Ok(vec!["foo_1337_100".to_string()])
    );
    assert_eq!(
        get_unique_table_names("create table t_1 (id int)"),
        Ok(vec!["t_1".to_string()])
    );
}

#[test]
fn parse_errors_propagate() {
    let err = get_unique_table_names("select * from").unwrap_err();
    assert_eq!(
        err.to_string(),
        "error parsing statement: syntax error at position 13 near ''"
    );
}
