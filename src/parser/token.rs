//! Token types for the restricted SQL dialect.
//!
//! Every token carries a byte-offset span into the original source; error
//! positions are derived from those spans, so they must stay byte-exact.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Byte-offset range of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Offset of the first byte of the token.
    pub start: usize,
    /// Offset one past the last byte of the token.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A single token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Token discriminant.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Numeric literal, raw lexeme (`42`, `3.14`, `0xFF`, `1e10`).
    Number(String),
    /// String literal, raw lexeme including the surrounding quotes.
    String(String),
    /// Blob literal, raw lexeme (`X'CAFE'`).
    Blob(String),
    /// Bare identifier, original case preserved.
    Ident(String),
    /// Delimited identifier (`` `x` ``, `"x"`, `[x]`) with delimiters stripped.
    QuotedIdent(String),
    /// Grammar keyword.
    Keyword(Keyword),

    Comma,
    Semicolon,
    LParen,
    RParen,
    Dot,
    Star,
    Plus,
    Minus,
    Slash,
    Percent,
    Tilde,
    Eq,   // `=`
    EqEq, // `==`
    Ne,   // `!=`
    LtGt, // `<>`
    Lt,
    Le,
    Gt,
    Ge,
    Concat, // `||`

    Eof,
}

/// Keywords of the restricted grammar.
///
/// Deliberately excludes the deny-listed words (`AUTOINCREMENT`,
/// `CURRENT_TIME`, ...): those lex as plain identifiers so the keyword
/// policy walker can report them instead of the parser choking first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Distinct,
    All,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Asc,
    Desc,
    Limit,
    Offset,
    Join,
    On,
    Using,
    As,
    And,
    Or,
    Not,
    In,
    Like,
    Between,
    Is,
    Null,
    Isnull,
    Notnull,
    Exists,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Insert,
    Into,
    Values,
    Default,
    Update,
    Set,
    Delete,
    Create,
    Table,
    Primary,
    Key,
    Unique,
    Check,
    Grant,
    Revoke,
    To,
    True,
    False,
}

impl Keyword {
    /// Canonical lowercase spelling used by the normalizer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Select => "select",
            Keyword::Distinct => "distinct",
            Keyword::All => "all",
            Keyword::From => "from",
            Keyword::Where => "where",
            Keyword::Group => "group",
            Keyword::By => "by",
            Keyword::Having => "having",
            Keyword::Order => "order",
            Keyword::Asc => "asc",
            Keyword::Desc => "desc",
            Keyword::Limit => "limit",
            Keyword::Offset => "offset",
            Keyword::Join => "join",
            Keyword::On => "on",
            Keyword::Using => "using",
            Keyword::As => "as",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Not => "not",
            Keyword::In => "in",
            Keyword::Like => "like",
            Keyword::Between => "between",
            Keyword::Is => "is",
            Keyword::Null => "null",
            Keyword::Isnull => "isnull",
            Keyword::Notnull => "notnull",
            Keyword::Exists => "exists",
            Keyword::Case => "case",
            Keyword::When => "when",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::End => "end",
            Keyword::Cast => "cast",
            Keyword::Insert => "insert",
            Keyword::Into => "into",
            Keyword::Values => "values",
            Keyword::Default => "default",
            Keyword::Update => "update",
            Keyword::Set => "set",
            Keyword::Delete => "delete",
            Keyword::Create => "create",
            Keyword::Table => "table",
            Keyword::Primary => "primary",
            Keyword::Key => "key",
            Keyword::Unique => "unique",
            Keyword::Check => "check",
            Keyword::Grant => "grant",
            Keyword::Revoke => "revoke",
            Keyword::To => "to",
            Keyword::True => "true",
            Keyword::False => "false",
        }
    }
}

static KEYWORDS: Lazy<HashMap<&'static str, Keyword>> = Lazy::new(|| {
    let mut m = HashMap::new();
    for kw in [
        Keyword::Select,
        Keyword::Distinct,
        Keyword::All,
        Keyword::From,
        Keyword::Where,
        Keyword::Group,
        Keyword::By,
        Keyword::Having,
        Keyword::Order,
        Keyword::Asc,
        Keyword::Desc,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Join,
        Keyword::On,
        Keyword::Using,
        Keyword::As,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::In,
        Keyword::Like,
        Keyword::Between,
        Keyword::Is,
        Keyword::Null,
        Keyword::Isnull,
        Keyword::Notnull,
        Keyword::Exists,
        Keyword::Case,
        Keyword::When,
        Keyword::Then,
        Keyword::Else,
        Keyword::End,
        Keyword::Cast,
        Keyword::Insert,
        Keyword::Into,
        Keyword::Values,
        Keyword::Default,
        Keyword::Update,
        Keyword::Set,
        Keyword::Delete,
        Keyword::Create,
        Keyword::Table,
        Keyword::Primary,
        Keyword::Key,
        Keyword::Unique,
        Keyword::Check,
        Keyword::Grant,
        Keyword::Revoke,
        Keyword::To,
        Keyword::True,
        Keyword::False,
    ] {
        m.insert(kw.as_str(), kw);
    }
    m
});

/// Look up a word as a grammar keyword (case-insensitive).
pub fn lookup_keyword(word: &str) -> Option<Keyword> {
    let lowered = word.to_ascii_lowercase();
    KEYWORDS.get(lowered.as_str()).copied()
}
