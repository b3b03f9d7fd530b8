//! Canonicalization behavior and parse error messages.

use pretty_assertions::assert_eq;
use tableland_sqlparser::{normalize, BatchKind};

use crate::common::{batch, normalize_err, normalized};

#[test]
fn lowercases_keywords_and_strips_terminator() {
    assert_eq!(
        normalized("SELECT * FrOM fake_table_1 WHere something='nothing';"),
        "select * from fake_table_1 where something = 'nothing'"
    );
}

#[test]
fn preserves_identifier_case_and_strips_delimiters() {
    assert_eq!(
        normalized("select `MyColumn` from \"MyTable_1_2\" where [Other] = 1"),
        "select MyColumn from MyTable_1_2 where Other = 1"
    );
}

#[test]
fn literals_are_verbatim() {
    assert_eq!(
        normalized("insert into t_1_2 values (0xFF, 1e10, X'CAFE', 'It''s')"),
        "insert into t_1_2 values (0xFF, 1e10, X'CAFE', 'It''s')"
    );
}

#[test]
fn spaces_binary_operators() {
    assert_eq!(
        normalized("select * from t_1_2 where a=1 and b>=2 or c!=3"),
        "select * from t_1_2 where a = 1 and b >= 2 or c != 3"
    );
}

#[test]
fn canonicalizes_operator_spellings() {
    assert_eq!(
        normalized("select * from t_1_2 where a==1 and b<>2"),
        "select * from t_1_2 where a = 1 and b != 2"
    );
}

#[test]
fn comma_joins_become_explicit_joins() {
    assert_eq!(
        normalized("select t1.id, t3.* from t1, t2 join t3 join (select * from t4);"),
        "select t1.id, t3.* from t1 join t2 join t3 join (select * from t4)"
    );
}

#[test]
fn aliases_always_use_as() {
    assert_eq!(
        normalized("select a total, b as half from t_1_2 x"),
        "select a as total, b as half from t_1_2 as x"
    );
}

#[test]
fn batch_kinds() {
    assert_eq!(
        batch("create table t_1 (id int)").kind,
        BatchKind::Create
    );
    assert_eq!(batch("select * from t_1_2").kind, BatchKind::Read);
    assert_eq!(batch("delete from t_1_2").kind, BatchKind::Write);
    assert_eq!(
        batch("grant insert on t_1_2 to '0xabc'").kind,
        BatchKind::Acl
    );
}

#[test]
fn write_dominates_acl_in_mixed_batches() {
    assert_eq!(
        batch("grant insert on t_1_2 to '0xabc'; insert into t_1_2 values (1)").kind,
        BatchKind::Write
    );
    assert_eq!(
        batch("insert into t_1_2 values (1); revoke update on t_1_2 from '0xabc'").kind,
        BatchKind::Write
    );
}

#[test]
fn multiple_statements_are_kept_separate() {
    let batch = batch("insert into t_1_2 values (1);  update t_1_2 set a = 2 ;");
    assert_eq!(
        batch.statements,
        vec![
            "insert into t_1_2 values (1)".to_string(),
            "update t_1_2 set a = 2".to_string(),
        ]
    );
    assert_eq!(
        batch.joined(),
        "insert into t_1_2 values (1); update t_1_2 set a = 2"
    );
}

#[test]
fn does_not_check_table_names() {
    // naming is validate_statement's job
    assert_eq!(
        normalized("update blah_5_ set description='something'"),
        "update blah_5_ set description = 'something'"
    );
}

#[test]
fn grant_privileges_are_sorted_and_deduped() {
    assert_eq!(
        normalized("grant UPDATE, insert, update, DELETE on foo_1337_100 to '0xd43c59d569'"),
        "grant delete, insert, update on foo_1337_100 to '0xd43c59d569'"
    );
}

#[test]
fn unknown_column_type_error() {
    assert_eq!(
        normalize_err("create table blah_5_ (id int, image blah, description text)"),
        "error parsing statement: syntax error at position 40 near 'blah'"
    );
}

#[test]
fn create_composed_with_select_error() {
    assert_eq!(
        normalize_err(
            "create table blah_5_ (id int, image blob, description text);select * from blah_5_;"
        ),
        "error parsing statement: syntax error at position 66 near 'select'"
    );
}

#[test]
fn select_composed_with_insert_error() {
    assert_eq!(
        normalize_err("select * from blah_5_;insert into blah_5_ values (1, 'three', 'something');"),
        "error parsing statement: syntax error at position 28 near 'insert'"
    );
}

#[test]
fn error_position_points_into_latter_statement() {
    assert_eq!(
        normalize_err(
            "\n      insert into blah_5_ values (1, 'three', 'something');\n      update syn tax err set foo;\n      "
        ),
        "error parsing statement: syntax error at position 81 near 'tax'"
    );
}

#[test]
fn unrecognized_character_error() {
    assert_eq!(
        normalize_err("select @ from t_1_2"),
        "error parsing statement: syntax error at position 7 near '@'"
    );
}

#[test]
fn truncated_input_reports_end_of_input() {
    let input = "select * from t_1_2 where";
    assert_eq!(
        normalize_err(input),
        format!(
            "error parsing statement: syntax error at position {} near ''",
            input.len()
        )
    );
}

#[test]
fn empty_statement_error() {
    assert_eq!(normalize_err(""), "error parsing statement: empty string");
    assert_eq!(normalize_err("   "), "error parsing statement: empty string");
}

#[test]
fn denied_keyword_error() {
    assert_eq!(
        normalize_err("create table t_1 (id int primary key autoincrement)"),
        "error parsing statement: 1 error occurred:\n\t* keyword not allowed: AUTOINCREMENT\n\n"
    );
}

#[test]
fn multiple_denied_keywords_aggregate() {
    assert_eq!(
        normalize_err("select current_time, current_date from t_1_2"),
        "error parsing statement: 2 errors occurred:\n\t* keyword not allowed: CURRENT_TIME\n\t* keyword not allowed: CURRENT_DATE\n\n"
    );
}

#[test]
fn normalizing_twice_is_stable() {
    let sources = [
        "select distinct t1.a, count(*) n from t1, t2 join t3 on t1.id=t3.id where a==1 group by t1.a having n > 2 order by n desc limit 5, 10",
        "create table t_1 (id int primary key, name text not null, unique (id, name))",
        "insert into t_1_2 (a, b) values (1, 'x'), (2, 'y')",
        "revoke insert, delete on t_1_2 from '0xabc'",
    ];
    for source in sources {
        let once = normalized(source);
        assert_eq!(normalized(&once), once, "not a fixed point: {source}");
    }
}

#[test]
fn comments_are_dropped() {
    assert_eq!(
        normalized("select a -- trailing\n from t_1_2 /* block */ where a = 1"),
        "select a from t_1_2 where a = 1"
    );
}

#[test]
fn expression_canonical_forms() {
    assert_eq!(
        normalized(
            "select case when a then 1 else 2 end, cast(x as int), b not in (1,2), \
             c between 1 and 5, d is not null, e||'x', not f from t_1_2"
        ),
        "select case when a then 1 else 2 end, cast(x as int), b not in (1, 2), \
         c between 1 and 5, d is not null, e || 'x', not f from t_1_2"
    );
}

#[test]
fn limit_offset_forms() {
    assert_eq!(
        normalized("select * from t_1_2 limit 10"),
        "select * from t_1_2 limit 10"
    );
    assert_eq!(
        normalized("select * from t_1_2 limit 5, 10"),
        "select * from t_1_2 limit 10 offset 5"
    );
    assert_eq!(
        normalized("select * from t_1_2 limit 10 offset 5"),
        "select * from t_1_2 limit 10 offset 5"
    );
}

#[test]
fn normalize_result_is_ok_shaped() {
    assert!(normalize("select 1").is_ok());
    assert!(normalize("bogus").is_err());
}
