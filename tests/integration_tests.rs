//! Integration tests for tableland-sqlparser
//!
//! This file serves as the entry point for all integration tests.

#[path = "common/mod.rs"]
mod common;

#[path = "integration/normalize_tests.rs"]
mod normalize_tests;

#[path = "integration/validate_tests.rs"]
mod validate_tests;

#[path = "integration/naming_tests.rs"]
mod naming_tests;

#[path = "integration/table_names_tests.rs"]
mod table_names_tests;

#[path = "integration/rewrite_tests.rs"]
mod rewrite_tests;

#[path = "integration/hash_tests.rs"]
mod hash_tests;

#[path = "integration/size_tests.rs"]
mod size_tests;
