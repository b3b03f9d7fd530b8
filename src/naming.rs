//! Table name convention.
//!
//! Fully-qualified names look like `{prefix}_{chainId}_{tableId}`, where the
//! prefix is optional and may itself contain underscores and digits. Names in
//! CREATE statements omit the table id (`{prefix}_{chainId}`) because the id
//! is assigned after the fact. Parsing scans from the right so the prefix
//! keeps everything the id runs do not claim.

use std::fmt;

use crate::error::NameError;

/// A parsed table name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    name: String,
    prefix: String,
    chain_id: u64,
    table_id: Option<u64>,
}

impl TableName {
    /// Parse a fully-qualified name: `[prefix_]chainId_tableId`.
    pub fn parse(name: &str) -> Result<Self, NameError> {
        let wrong = || NameError::WrongFormat(name.to_string());
        let (rest, table_id) = split_trailing_id(name).ok_or_else(wrong)?;
        let (prefix, chain_id) = split_trailing_id(rest).ok_or_else(wrong)?;
        if !valid_prefix(prefix) {
            return Err(wrong());
        }
        Ok(Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            chain_id,
            table_id: Some(table_id),
        })
    }

    /// Parse a CREATE-form name: `[prefix_]chainId`, no table id yet.
    pub fn parse_create(name: &str) -> Result<Self, NameError> {
        let wrong = || NameError::WrongFormat(name.to_string());
        let (prefix, chain_id) = split_trailing_id(name).ok_or_else(wrong)?;
        if !valid_prefix(prefix) {
            return Err(wrong());
        }
        Ok(Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            chain_id,
            table_id: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// `None` for CREATE-form names.
    pub fn table_id(&self) -> Option<u64> {
        self.table_id
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Split `head_digits` into `(head, digits)`. The digit run must be
/// non-empty and fit a `u64`.
fn split_trailing_id(name: &str) -> Option<(&str, u64)> {
    let sep = name.rfind('_')?;
    let digits = &name[sep + 1..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let id = digits.parse().ok()?;
    Some((&name[..sep], id))
}

/// Empty, or a letter followed by word characters.
fn valid_prefix(prefix: &str) -> bool {
    match prefix.as_bytes().first() {
        None => true,
        Some(b) if b.is_ascii_alphabetic() => prefix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_'),
        Some(_) => false,
    }
}
