//! Structural fingerprint of a CREATE TABLE statement.
//!
//! Two tables with the same columns, types, and constraints hash identically
//! no matter how the statement was spelled. The digest is sha-256 over a
//! canonical comma-joined part list: one `name:TYPE` part per column with
//! uppercase constraint suffixes, then one part per table constraint.

use sha2::{Digest, Sha256};

use crate::parser::ast::{ColumnConstraint, CreateTableStatement, Direction, TableConstraint};

/// Hex-encoded sha-256 of the table's structure.
pub fn structure_hash(create: &CreateTableStatement) -> String {
    let mut parts = Vec::with_capacity(create.columns.len() + create.constraints.len());

    for col in &create.columns {
        let mut part = format!("{}:{}", col.name.name, col.column_type.as_str_upper());
        for constraint in &col.constraints {
            match constraint {
                ColumnConstraint::PrimaryKey {
                    direction,
                    autoincrement,
                } => {
                    part.push_str(" PRIMARY KEY");
                    match direction {
                        Some(Direction::Asc) => part.push_str(" ASC"),
                        Some(Direction::Desc) => part.push_str(" DESC"),
                        None => {}
                    }
                    if *autoincrement {
                        part.push_str(" AUTOINCREMENT");
                    }
                }
                ColumnConstraint::NotNull => part.push_str(" NOT NULL"),
                ColumnConstraint::Unique => part.push_str(" UNIQUE"),
                ColumnConstraint::Default(e) => {
                    part.push_str(" DEFAULT ");
                    part.push_str(&e.to_string());
                }
                ColumnConstraint::Check(e) => {
                    part.push_str(" CHECK(");
                    part.push_str(&e.to_string());
                    part.push(')');
                }
            }
        }
        parts.push(part);
    }

    for constraint in &create.constraints {
        parts.push(match constraint {
            TableConstraint::PrimaryKey(cols) => {
                format!("PRIMARY KEY({})", join_idents(cols))
            }
            TableConstraint::Unique(cols) => format!("UNIQUE({})", join_idents(cols)),
            TableConstraint::Check(e) => format!("CHECK({e})"),
        });
    }

    hex::encode(Sha256::digest(parts.join(",").as_bytes()))
}

fn join_idents(idents: &[crate::parser::ast::Ident]) -> String {
    idents
        .iter()
        .map(|i| i.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
