//! AST for the restricted SQL dialect.
//!
//! Statements are immutable once parsed; the only sanctioned mutation is
//! table-reference renaming, which goes through [`Statement::rename_tables`].

use std::collections::HashMap;

/// An identifier. Delimiters of quoted identifiers are stripped at lex time;
/// the canonical form always renders the name bare, case preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub name: String,
}

impl Ident {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Statement verb, one per grammar production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Select,
    Insert,
    Update,
    Delete,
    CreateTable,
    Grant,
    Revoke,
}

/// Category assigned to a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    Read,
    Write,
    Create,
    Acl,
}

impl BatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchKind::Read => "read",
            BatchKind::Write => "write",
            BatchKind::Create => "create",
            BatchKind::Acl => "acl",
        }
    }
}

/// An ordered batch of parsed statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub statements: Vec<Statement>,
}

impl Batch {
    /// Aggregate category of the batch.
    ///
    /// The grammar only admits three shapes (one CREATE, one SELECT, or a
    /// run of mutate statements), so the only mixed case left to resolve is
    /// write+acl, where write dominates regardless of order.
    pub fn kind(&self) -> BatchKind {
        match self.statements.first().map(Statement::verb) {
            Some(Verb::CreateTable) => BatchKind::Create,
            Some(Verb::Select) => BatchKind::Read,
            _ => {
                let any_write = self.statements.iter().any(|s| {
                    matches!(s.verb(), Verb::Insert | Verb::Update | Verb::Delete)
                });
                if any_write {
                    BatchKind::Write
                } else {
                    BatchKind::Acl
                }
            }
        }
    }

    /// Distinct table references in first-seen order across the batch.
    /// Column qualifiers do not count as references.
    pub fn unique_table_names(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for stmt in &self.statements {
            stmt.visit_table_refs(&mut |ident| {
                if !seen.iter().any(|n| n == &ident.name) {
                    seen.push(ident.name.clone());
                }
            });
        }
        seen
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    CreateTable(CreateTableStatement),
    Grant(GrantStatement),
}

impl Statement {
    pub fn verb(&self) -> Verb {
        match self {
            Statement::Select(_) => Verb::Select,
            Statement::Insert(_) => Verb::Insert,
            Statement::Update(_) => Verb::Update,
            Statement::Delete(_) => Verb::Delete,
            Statement::CreateTable(_) => Verb::CreateTable,
            Statement::Grant(g) => {
                if g.revoke {
                    Verb::Revoke
                } else {
                    Verb::Grant
                }
            }
        }
    }

    /// Visit every table reference (FROM items, statement targets, subquery
    /// sources) in source order.
    pub fn visit_table_refs(&self, f: &mut impl FnMut(&Ident)) {
        match self {
            Statement::Select(s) => s.visit_table_refs(f),
            Statement::Insert(s) => {
                f(&s.table);
                if let InsertSource::Select(sel) = &s.source {
                    sel.visit_table_refs(f);
                }
            }
            Statement::Update(s) => {
                f(&s.table);
                if let Some(w) = &s.where_clause {
                    w.visit_table_refs(f);
                }
            }
            Statement::Delete(s) => {
                f(&s.table);
                if let Some(w) = &s.where_clause {
                    w.visit_table_refs(f);
                }
            }
            Statement::CreateTable(s) => f(&s.table),
            Statement::Grant(s) => f(&s.table),
        }
    }

    /// Visit every identifier in the statement: table references, column
    /// names and qualifiers, aliases, function names. Used by the keyword
    /// policy walker.
    pub fn visit_idents(&self, f: &mut impl FnMut(&Ident)) {
        match self {
            Statement::Select(s) => s.visit_idents(f),
            Statement::Insert(s) => {
                f(&s.table);
                for c in &s.columns {
                    f(c);
                }
                match &s.source {
                    InsertSource::Values(rows) => {
                        for row in rows {
                            for e in row {
                                e.visit_idents(f);
                            }
                        }
                    }
                    InsertSource::Select(sel) => sel.visit_idents(f),
                    InsertSource::DefaultValues => {}
                }
            }
            Statement::Update(s) => {
                f(&s.table);
                for a in &s.assignments {
                    f(&a.column);
                    a.value.visit_idents(f);
                }
                if let Some(w) = &s.where_clause {
                    w.visit_idents(f);
                }
            }
            Statement::Delete(s) => {
                f(&s.table);
                if let Some(w) = &s.where_clause {
                    w.visit_idents(f);
                }
            }
            Statement::CreateTable(s) => {
                f(&s.table);
                for col in &s.columns {
                    f(&col.name);
                    for con in &col.constraints {
                        match con {
                            ColumnConstraint::Default(e) | ColumnConstraint::Check(e) => {
                                e.visit_idents(f)
                            }
                            _ => {}
                        }
                    }
                }
                for con in &s.constraints {
                    match con {
                        TableConstraint::PrimaryKey(cols) | TableConstraint::Unique(cols) => {
                            for c in cols {
                                f(c);
                            }
                        }
                        TableConstraint::Check(e) => e.visit_idents(f),
                    }
                }
            }
            Statement::Grant(s) => f(&s.table),
        }
    }

    /// Substitute table names per `mapping`. Applies to table references and
    /// to column qualifiers (`old.x` becomes `new.x`); names absent from the
    /// mapping pass through unchanged.
    pub fn rename_tables(&mut self, mapping: &HashMap<String, String>) {
        let rename = |ident: &mut Ident| {
            if let Some(new) = mapping.get(&ident.name) {
                ident.name = new.clone();
            }
        };
        match self {
            Statement::Select(s) => s.rename_tables(&rename),
            Statement::Insert(s) => {
                rename(&mut s.table);
                if let InsertSource::Select(sel) = &mut s.source {
                    sel.rename_tables(&rename);
                }
                if let InsertSource::Values(rows) = &mut s.source {
                    for row in rows {
                        for e in row {
                            e.rename_qualifiers(&rename);
                        }
                    }
                }
            }
            Statement::Update(s) => {
                rename(&mut s.table);
                for a in &mut s.assignments {
                    a.value.rename_qualifiers(&rename);
                }
                if let Some(w) = &mut s.where_clause {
                    w.rename_qualifiers(&rename);
                }
            }
            Statement::Delete(s) => {
                rename(&mut s.table);
                if let Some(w) = &mut s.where_clause {
                    w.rename_qualifiers(&rename);
                }
            }
            Statement::CreateTable(s) => rename(&mut s.table),
            Statement::Grant(s) => rename(&mut s.table),
        }
    }
}

// === SELECT ===

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distinctness {
    Distinct,
    All,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    pub distinct: Option<Distinctness>,
    pub columns: Vec<ResultColumn>,
    pub from: Option<FromClause>,
    pub where_clause: Option<Expr>,
    pub group_by: Vec<Expr>,
    pub having: Option<Expr>,
    pub order_by: Vec<OrderingTerm>,
    pub limit: Option<LimitClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultColumn {
    /// `*`
    Star,
    /// `table.*`
    TableStar(Ident),
    /// expression with optional alias
    Expr { expr: Expr, alias: Option<Ident> },
}

/// Flat join list. Comma joins and explicit `JOIN` both append an item, which
/// is what lets the normalizer render every separator as `join`.
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause {
    pub items: Vec<FromItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FromItem {
    pub source: TableOrSubquery,
    /// `None` for the first item and for plain comma joins.
    pub constraint: Option<JoinConstraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableOrSubquery {
    Table {
        name: Ident,
        alias: Option<Ident>,
    },
    Subquery {
        select: Box<SelectStatement>,
        alias: Option<Ident>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    On(Expr),
    Using(Vec<Ident>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderingTerm {
    pub expr: Expr,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    pub limit: Expr,
    pub offset: Option<Expr>,
}

impl SelectStatement {
    fn visit_table_refs(&self, f: &mut impl FnMut(&Ident)) {
        for rc in &self.columns {
            if let ResultColumn::Expr { expr, .. } = rc {
                expr.visit_table_refs(f);
            }
        }
        if let Some(from) = &self.from {
            for item in &from.items {
                match &item.source {
                    TableOrSubquery::Table { name, .. } => f(name),
                    TableOrSubquery::Subquery { select, .. } => select.visit_table_refs(f),
                }
                if let Some(JoinConstraint::On(e)) = &item.constraint {
                    e.visit_table_refs(f);
                }
            }
        }
        if let Some(e) = &self.where_clause {
            e.visit_table_refs(f);
        }
        for e in &self.group_by {
            e.visit_table_refs(f);
        }
        if let Some(e) = &self.having {
            e.visit_table_refs(f);
        }
        for t in &self.order_by {
            t.expr.visit_table_refs(f);
        }
    }

    fn visit_idents(&self, f: &mut impl FnMut(&Ident)) {
        for rc in &self.columns {
            match rc {
                ResultColumn::Star => {}
                ResultColumn::TableStar(t) => f(t),
                ResultColumn::Expr { expr, alias } => {
                    expr.visit_idents(f);
                    if let Some(a) = alias {
                        f(a);
                    }
                }
            }
        }
        if let Some(from) = &self.from {
            for item in &from.items {
                match &item.source {
                    TableOrSubquery::Table { name, alias } => {
                        f(name);
                        if let Some(a) = alias {
                            f(a);
                        }
                    }
                    TableOrSubquery::Subquery { select, alias } => {
                        select.visit_idents(f);
                        if let Some(a) = alias {
                            f(a);
                        }
                    }
                }
                match &item.constraint {
                    Some(JoinConstraint::On(e)) => e.visit_idents(f),
                    Some(JoinConstraint::Using(cols)) => {
                        for c in cols {
                            f(c);
                        }
                    }
                    None => {}
                }
            }
        }
        if let Some(e) = &self.where_clause {
            e.visit_idents(f);
        }
        for e in &self.group_by {
            e.visit_idents(f);
        }
        if let Some(e) = &self.having {
            e.visit_idents(f);
        }
        for t in &self.order_by {
            t.expr.visit_idents(f);
        }
        if let Some(l) = &self.limit {
            l.limit.visit_idents(f);
            if let Some(o) = &l.offset {
                o.visit_idents(f);
            }
        }
    }

    fn rename_tables(&mut self, rename: &impl Fn(&mut Ident)) {
        for rc in &mut self.columns {
            match rc {
                ResultColumn::TableStar(t) => rename(t),
                ResultColumn::Expr { expr, .. } => expr.rename_qualifiers(rename),
                ResultColumn::Star => {}
            }
        }
        if let Some(from) = &mut self.from {
            for item in &mut from.items {
                match &mut item.source {
                    TableOrSubquery::Table { name, .. } => rename(name),
                    TableOrSubquery::Subquery { select, .. } => select.rename_tables(rename),
                }
                if let Some(JoinConstraint::On(e)) = &mut item.constraint {
                    e.rename_qualifiers(rename);
                }
            }
        }
        if let Some(e) = &mut self.where_clause {
            e.rename_qualifiers(rename);
        }
        for e in &mut self.group_by {
            e.rename_qualifiers(rename);
        }
        if let Some(e) = &mut self.having {
            e.rename_qualifiers(rename);
        }
        for t in &mut self.order_by {
            t.expr.rename_qualifiers(rename);
        }
    }
}

// === INSERT / UPDATE / DELETE ===

#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub table: Ident,
    pub columns: Vec<Ident>,
    pub source: InsertSource,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Select(Box<SelectStatement>),
    DefaultValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: Ident,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub table: Ident,
    pub assignments: Vec<Assignment>,
    pub where_clause: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    pub table: Ident,
    pub where_clause: Option<Expr>,
}

// === CREATE TABLE ===

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    pub table: Ident,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Integer,
    Text,
    Blob,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Integer => "integer",
            ColumnType::Text => "text",
            ColumnType::Blob => "blob",
        }
    }

    pub fn as_str_upper(&self) -> &'static str {
        match self {
            ColumnType::Int => "INT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "int" => Some(ColumnType::Int),
            "integer" => Some(ColumnType::Integer),
            "text" => Some(ColumnType::Text),
            "blob" => Some(ColumnType::Blob),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: Ident,
    pub column_type: ColumnType,
    pub constraints: Vec<ColumnConstraint>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    PrimaryKey {
        direction: Option<Direction>,
        /// Parses so the policy walker can reject it with a proper
        /// diagnostic instead of a bare syntax error.
        autoincrement: bool,
    },
    NotNull,
    Unique,
    Default(Expr),
    Check(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    PrimaryKey(Vec<Ident>),
    Unique(Vec<Ident>),
    Check(Expr),
}

// === GRANT / REVOKE ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Privilege {
    Delete,
    Insert,
    Update,
}

impl Privilege {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privilege::Delete => "delete",
            Privilege::Insert => "insert",
            Privilege::Update => "update",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantStatement {
    pub revoke: bool,
    pub privileges: Vec<Privilege>,
    pub table: Ident,
    /// Raw string literals, quotes included, in source order.
    pub recipients: Vec<String>,
}

// === Expressions ===

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Raw numeric lexeme, rendered verbatim.
    Number(String),
    /// Raw string lexeme including quotes, rendered verbatim.
    String(String),
    /// Raw blob lexeme, rendered verbatim.
    Blob(String),
    Null,
    True,
    False,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    BitNot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Concat,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Is,
    IsNot,
    Like,
    NotLike,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Concat => "||",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Is => "is",
            BinaryOp::IsNot => "is not",
            BinaryOp::Like => "like",
            BinaryOp::NotLike => "not like",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgs {
    /// `count(*)`
    Star,
    List {
        distinct: bool,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Column {
        table: Option<Ident>,
        name: Ident,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    InList {
        expr: Box<Expr>,
        not: bool,
        list: Vec<Expr>,
    },
    InSelect {
        expr: Box<Expr>,
        not: bool,
        select: Box<SelectStatement>,
    },
    Between {
        expr: Box<Expr>,
        not: bool,
        low: Box<Expr>,
        high: Box<Expr>,
    },
    Function {
        name: Ident,
        args: FunctionArgs,
    },
    Case {
        operand: Option<Box<Expr>>,
        whens: Vec<(Expr, Expr)>,
        else_expr: Option<Box<Expr>>,
    },
    Cast {
        expr: Box<Expr>,
        target: ColumnType,
    },
    Exists {
        select: Box<SelectStatement>,
    },
    Subquery(Box<SelectStatement>),
    /// Parenthesized expression, parens preserved for round-trip stability.
    Grouping(Box<Expr>),
}

impl Expr {
    fn visit_table_refs(&self, f: &mut impl FnMut(&Ident)) {
        self.walk(&mut |e| match e {
            Expr::InSelect { select, .. } | Expr::Exists { select } | Expr::Subquery(select) => {
                select.visit_table_refs(f)
            }
            _ => {}
        });
    }

    fn visit_idents(&self, f: &mut impl FnMut(&Ident)) {
        self.walk(&mut |e| match e {
            Expr::Column { table, name } => {
                if let Some(t) = table {
                    f(t);
                }
                f(name);
            }
            Expr::Function { name, .. } => f(name),
            Expr::InSelect { select, .. } | Expr::Exists { select } | Expr::Subquery(select) => {
                select.visit_idents(f)
            }
            _ => {}
        });
    }

    fn rename_qualifiers(&mut self, rename: &impl Fn(&mut Ident)) {
        self.walk_mut(&mut |e| match e {
            Expr::Column {
                table: Some(t), ..
            } => rename(t),
            Expr::InSelect { select, .. } | Expr::Exists { select } | Expr::Subquery(select) => {
                select.rename_tables(rename)
            }
            _ => {}
        });
    }

    /// Pre-order traversal over this expression tree. Does not descend into
    /// subselects; callers handle those in the visitor.
    fn walk(&self, f: &mut impl FnMut(&Expr)) {
        f(self);
        match self {
            Expr::Unary { expr, .. } | Expr::Grouping(expr) => expr.walk(f),
            Expr::Binary { left, right, .. } => {
                left.walk(f);
                right.walk(f);
            }
            Expr::InList { expr, list, .. } => {
                expr.walk(f);
                for e in list {
                    e.walk(f);
                }
            }
            Expr::InSelect { expr, .. } => expr.walk(f),
            Expr::Between {
                expr, low, high, ..
            } => {
                expr.walk(f);
                low.walk(f);
                high.walk(f);
            }
            Expr::Function { args, .. } => {
                if let FunctionArgs::List { args, .. } = args {
                    for e in args {
                        e.walk(f);
                    }
                }
            }
            Expr::Case {
                operand,
                whens,
                else_expr,
            } => {
                if let Some(o) = operand {
                    o.walk(f);
                }
                for (w, t) in whens {
                    w.walk(f);
                    t.walk(f);
                }
                if let Some(e) = else_expr {
                    e.walk(f);
                }
            }
            Expr::Cast { expr, .. } => expr.walk(f),
            Expr::Literal(_) | Expr::Column { .. } | Expr::Exists { .. } | Expr::Subquery(_) => {}
        }
    }

    fn walk_mut(&mut self, f: &mut impl FnMut(&mut Expr)) {
        f(self);
        match self {
            Expr::Unary { expr, .. } | Expr::Grouping(expr) => expr.walk_mut(f),
            Expr::Binary { left, right, .. } => {
                left.walk_mut(f);
                right.walk_mut(f);
            }
            Expr::InList { expr, list, .. } => {
                expr.walk_mut(f);
                for e in list {
                    e.walk_mut(f);
                }
            }
            Expr::InSelect { expr, .. } => expr.walk_mut(f),
            Expr::Between {
                expr, low, high, ..
            } => {
                expr.walk_mut(f);
                low.walk_mut(f);
                high.walk_mut(f);
            }
            Expr::Function { args, .. } => {
                if let FunctionArgs::List { args, .. } = args {
                    for e in args {
                        e.walk_mut(f);
                    }
                }
            }
            Expr::Case {
                operand,
                whens,
                else_expr,
            } => {
                if let Some(o) = operand {
                    o.walk_mut(f);
                }
                for (w, t) in whens {
                    w.walk_mut(f);
                    t.walk_mut(f);
                }
                if let Some(e) = else_expr {
                    e.walk_mut(f);
                }
            }
            Expr::Cast { expr, .. } => expr.walk_mut(f),
            Expr::Literal(_) | Expr::Column { .. } | Expr::Exists { .. } | Expr::Subquery(_) => {}
        }
    }
}
