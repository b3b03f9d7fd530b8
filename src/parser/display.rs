//! Canonical rendering of the AST.
//!
//! The `Display` output is the canonical form: keywords lowercased,
//! identifiers bare with original case, literals verbatim, binary operators
//! padded with single spaces, comma joins spelled as `join`, no trailing
//! terminator. Normalizing the rendered text again yields the same string.

use std::fmt;

use super::ast::{
    ColumnConstraint, ColumnDef, CreateTableStatement, DeleteStatement, Distinctness, Expr,
    FromClause, FunctionArgs, GrantStatement, Ident, InsertSource, InsertStatement,
    JoinConstraint, Literal, OrderingTerm, ResultColumn, SelectStatement, Statement,
    TableConstraint, TableOrSubquery, UnaryOp, UpdateStatement,
};
use super::ast::Direction;

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Select(s) => s.fmt(f),
            Statement::Insert(s) => s.fmt(f),
            Statement::Update(s) => s.fmt(f),
            Statement::Delete(s) => s.fmt(f),
            Statement::CreateTable(s) => s.fmt(f),
            Statement::Grant(s) => s.fmt(f),
        }
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select")?;
        match self.distinct {
            Some(Distinctness::Distinct) => write!(f, " distinct")?,
            Some(Distinctness::All) => write!(f, " all")?,
            None => {}
        }
        for (i, col) in self.columns.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{col}")?;
        }
        if let Some(from) = &self.from {
            write!(f, " from {from}")?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " where {w}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " group by ")?;
            write_list(f, &self.group_by)?;
        }
        if let Some(h) = &self.having {
            write!(f, " having {h}")?;
        }
        if !self.order_by.is_empty() {
            write!(f, " order by ")?;
            write_list(f, &self.order_by)?;
        }
        if let Some(l) = &self.limit {
            write!(f, " limit {}", l.limit)?;
            if let Some(o) = &l.offset {
                write!(f, " offset {o}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for ResultColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultColumn::Star => write!(f, "*"),
            ResultColumn::TableStar(t) => write!(f, "{t}.*"),
            ResultColumn::Expr { expr, alias } => {
                write!(f, "{expr}")?;
                if let Some(a) = alias {
                    write!(f, " as {a}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, " join ")?;
            }
            write!(f, "{}", item.source)?;
            match &item.constraint {
                Some(JoinConstraint::On(e)) => write!(f, " on {e}")?,
                Some(JoinConstraint::Using(cols)) => {
                    write!(f, " using (")?;
                    write_list(f, cols)?;
                    write!(f, ")")?;
                }
                None => {}
            }
        }
        Ok(())
    }
}

impl fmt::Display for TableOrSubquery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableOrSubquery::Table { name, alias } => {
                write!(f, "{name}")?;
                if let Some(a) = alias {
                    write!(f, " as {a}")?;
                }
                Ok(())
            }
            TableOrSubquery::Subquery { select, alias } => {
                write!(f, "({select})")?;
                if let Some(a) = alias {
                    write!(f, " as {a}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for OrderingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.direction {
            Some(Direction::Asc) => write!(f, " asc"),
            Some(Direction::Desc) => write!(f, " desc"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "insert into {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " (")?;
            write_list(f, &self.columns)?;
            write!(f, ")")?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                write!(f, " values ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "(")?;
                    write_list(f, row)?;
                    write!(f, ")")?;
                }
                Ok(())
            }
            InsertSource::Select(sel) => write!(f, " {sel}"),
            InsertSource::DefaultValues => write!(f, " default values"),
        }
    }
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "update {} set ", self.table)?;
        for (i, a) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} = {}", a.column, a.value)?;
        }
        if let Some(w) = &self.where_clause {
            write!(f, " where {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "delete from {}", self.table)?;
        if let Some(w) = &self.where_clause {
            write!(f, " where {w}")?;
        }
        Ok(())
    }
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "create table {} (", self.table)?;
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{col}")?;
        }
        for con in &self.constraints {
            write!(f, ", {con}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.column_type.as_str())?;
        for con in &self.constraints {
            write!(f, " {con}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnConstraint::PrimaryKey {
                direction,
                autoincrement,
            } => {
                write!(f, "primary key")?;
                match direction {
                    Some(Direction::Asc) => write!(f, " asc")?,
                    Some(Direction::Desc) => write!(f, " desc")?,
                    None => {}
                }
                if *autoincrement {
                    write!(f, " autoincrement")?;
                }
                Ok(())
            }
            ColumnConstraint::NotNull => write!(f, "not null"),
            ColumnConstraint::Unique => write!(f, "unique"),
            ColumnConstraint::Default(e) => write!(f, "default {e}"),
            ColumnConstraint::Check(e) => write!(f, "check({e})"),
        }
    }
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableConstraint::PrimaryKey(cols) => {
                write!(f, "primary key (")?;
                write_list(f, cols)?;
                write!(f, ")")
            }
            TableConstraint::Unique(cols) => {
                write!(f, "unique (")?;
                write_list(f, cols)?;
                write!(f, ")")
            }
            TableConstraint::Check(e) => write!(f, "check({e})"),
        }
    }
}

impl fmt::Display for GrantStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // canonical form sorts and dedups the privilege list
        let mut privileges = self.privileges.clone();
        privileges.sort();
        privileges.dedup();

        write!(f, "{}", if self.revoke { "revoke" } else { "grant" })?;
        for (i, p) in privileges.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{}", p.as_str())?;
        }
        write!(f, " on {}", self.table)?;
        write!(f, " {} ", if self.revoke { "from" } else { "to" })?;
        for (i, r) in self.recipients.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            f.write_str(r)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(l) => l.fmt(f),
            Expr::Column { table, name } => {
                if let Some(t) = table {
                    write!(f, "{t}.")?;
                }
                write!(f, "{name}")
            }
            Expr::Unary { op, expr } => match op {
                UnaryOp::Neg => write!(f, "-{expr}"),
                UnaryOp::Pos => write!(f, "+{expr}"),
                UnaryOp::BitNot => write!(f, "~{expr}"),
                UnaryOp::Not => write!(f, "not {expr}"),
            },
            Expr::Binary { left, op, right } => {
                write!(f, "{left} {} {right}", op.as_str())
            }
            Expr::InList { expr, not, list } => {
                write!(f, "{expr} {}in (", if *not { "not " } else { "" })?;
                write_list(f, list)?;
                write!(f, ")")
            }
            Expr::InSelect { expr, not, select } => {
                write!(f, "{expr} {}in ({select})", if *not { "not " } else { "" })
            }
            Expr::Between {
                expr,
                not,
                low,
                high,
            } => write!(
                f,
                "{expr} {}between {low} and {high}",
                if *not { "not " } else { "" }
            ),
            Expr::Function { name, args } => {
                write!(f, "{name}(")?;
                match args {
                    FunctionArgs::Star => write!(f, "*")?,
                    FunctionArgs::List { distinct, args } => {
                        if *distinct {
                            write!(f, "distinct ")?;
                        }
                        write_list(f, args)?;
                    }
                }
                write!(f, ")")
            }
            Expr::Case {
                operand,
                whens,
                else_expr,
            } => {
                write!(f, "case")?;
                if let Some(o) = operand {
                    write!(f, " {o}")?;
                }
                for (when, then) in whens {
                    write!(f, " when {when} then {then}")?;
                }
                if let Some(e) = else_expr {
                    write!(f, " else {e}")?;
                }
                write!(f, " end")
            }
            Expr::Cast { expr, target } => write!(f, "cast({expr} as {})", target.as_str()),
            Expr::Exists { select } => write!(f, "exists ({select})"),
            Expr::Subquery(select) => write!(f, "({select})"),
            Expr::Grouping(expr) => write!(f, "({expr})"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(raw) | Literal::String(raw) | Literal::Blob(raw) => f.write_str(raw),
            Literal::Null => write!(f, "null"),
            Literal::True => write!(f, "true"),
            Literal::False => write!(f, "false"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
