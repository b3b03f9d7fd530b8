//! Table-name convention checks through the public surface.

use tableland_sqlparser::validate_table_name;
use test_case::test_case;

use crate::common::message;

#[test_case("t_1_2", "t", 1, Some(2); "short prefix")]
#[test_case("table_1_2", "table", 1, Some(2); "word prefix")]
#[test_case("_1_2", "", 1, Some(2); "empty prefix")]
#[test_case("healthbot_5_1", "healthbot", 5, Some(1); "realistic name")]
fn accepts_qualified_names(name: &str, prefix: &str, chain_id: u64, table_id: Option<u64>) {
    let parsed = validate_table_name(name, false).unwrap();
    assert_eq!(parsed.prefix(), prefix);
    assert_eq!(parsed.chain_id(), chain_id);
    assert_eq!(parsed.table_id(), table_id);
}

#[test_case("t_1", "t", 1; "short prefix")]
#[test_case("_1", "", 1; "empty prefix")]
#[test_case("healthbot_5_1", "healthbot_5", 1; "trailing run binds to the chain id")]
fn accepts_create_form_names(name: &str, prefix: &str, chain_id: u64) {
    let parsed = validate_table_name(name, true).unwrap();
    assert_eq!(parsed.prefix(), prefix);
    assert_eq!(parsed.chain_id(), chain_id);
    assert_eq!(parsed.table_id(), None);
}

#[test_case("t"; "bare word")]
#[test_case("t2"; "no separator")]
#[test_case("t_"; "trailing separator")]
#[test_case("t_2_"; "missing table id")]
#[test_case("__"; "only separators")]
#[test_case("t__"; "empty id runs")]
#[test_case("t_2__"; "empty table id")]
#[test_case("__1"; "separator prefix")]
fn rejects_malformed_names(name: &str) {
    assert_eq!(
        message(validate_table_name(name, false)),
        format!("error validating name: table name has wrong format: {name}")
    );
}

#[test]
fn create_form_requires_a_chain_id() {
    assert_eq!(
        message(validate_table_name("t", true)),
        "error validating name: table name has wrong format: t"
    );
}
