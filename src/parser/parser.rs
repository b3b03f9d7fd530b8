//! Recursive-descent parser for the restricted grammar.
//!
//! A batch is one CREATE TABLE, one SELECT, or one-or-more mutate statements
//! (insert/update/delete/grant/revoke) separated by semicolons. Any other
//! composition is a syntax error at the first token of the offending
//! statement.
//!
//! Error positions follow the historical contract: an unexpected token is
//! reported at the byte offset one past its end, with the raw token text as
//! the near-token.

use crate::error::ParseError;

use super::ast::{
    Assignment, Batch, BinaryOp, ColumnConstraint, ColumnDef, ColumnType, CreateTableStatement,
    DeleteStatement, Direction, Distinctness, Expr, FromClause, FromItem, FunctionArgs,
    GrantStatement, Ident, InsertSource, InsertStatement, JoinConstraint, Literal, LimitClause,
    OrderingTerm, Privilege, ResultColumn, SelectStatement, Statement, TableConstraint,
    TableOrSubquery, UnaryOp, UpdateStatement,
};
use super::lexer::Lexer;
use super::token::{Keyword, Token, TokenKind};

pub struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Parse a statement batch. Purely syntactic; the keyword policy walk
    /// happens in [`super::parse`].
    pub fn parse(source: &'a str) -> Result<Batch, ParseError> {
        let tokens = Lexer::tokenize(source)?;
        // a lone Eof token means there was nothing to parse
        if tokens.len() == 1 {
            return Err(ParseError::EmptyStatement);
        }
        let mut parser = Self {
            src: source,
            tokens,
            pos: 0,
        };
        parser.parse_batch()
    }

    // === token cursor ===

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        &self.tokens[(self.pos + offset).min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek().kind == *kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek().kind, TokenKind::Keyword(k) if k == kw)
    }

    fn eat_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Syntax error at the current lookahead token.
    fn unexpected(&self) -> ParseError {
        let tok = self.peek();
        ParseError::Syntax {
            position: tok.span.end,
            near: self.src[tok.span.start..tok.span.end].to_string(),
        }
    }

    // === batch ===

    fn parse_batch(&mut self) -> Result<Batch, ParseError> {
        let first = self.parse_statement()?;
        // CREATE and SELECT may not be composed with anything else
        let closed = matches!(first, Statement::CreateTable(_) | Statement::Select(_));
        let mut statements = vec![first];

        loop {
            let mut separated = false;
            while self.eat(&TokenKind::Semicolon) {
                separated = true;
            }
            if self.at_eof() {
                break;
            }
            if closed || !separated || !self.at_mutate_verb() {
                return Err(self.unexpected());
            }
            statements.push(self.parse_statement()?);
        }
        Ok(Batch { statements })
    }

    fn at_mutate_verb(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(
                Keyword::Insert
                    | Keyword::Update
                    | Keyword::Delete
                    | Keyword::Grant
                    | Keyword::Revoke
            )
        )
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.peek().kind {
            TokenKind::Keyword(Keyword::Select) => {
                Ok(Statement::Select(self.parse_select()?))
            }
            TokenKind::Keyword(Keyword::Insert) => self.parse_insert(),
            TokenKind::Keyword(Keyword::Update) => self.parse_update(),
            TokenKind::Keyword(Keyword::Delete) => self.parse_delete(),
            TokenKind::Keyword(Keyword::Create) => self.parse_create_table(),
            TokenKind::Keyword(Keyword::Grant) => self.parse_grant(false),
            TokenKind::Keyword(Keyword::Revoke) => self.parse_grant(true),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        match &self.peek().kind {
            TokenKind::Ident(name) | TokenKind::QuotedIdent(name) => {
                let ident = Ident::new(name.clone());
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn at_ident(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Ident(_) | TokenKind::QuotedIdent(_)
        )
    }

    /// Optional `[AS] alias`.
    fn parse_alias(&mut self) -> Result<Option<Ident>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            Ok(Some(self.parse_ident()?))
        } else if self.at_ident() {
            Ok(Some(self.parse_ident()?))
        } else {
            Ok(None)
        }
    }

    // === SELECT ===

    fn parse_select(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let distinct = if self.eat_keyword(Keyword::Distinct) {
            Some(Distinctness::Distinct)
        } else if self.eat_keyword(Keyword::All) {
            Some(Distinctness::All)
        } else {
            None
        };

        let mut columns = vec![self.parse_result_column()?];
        while self.eat(&TokenKind::Comma) {
            columns.push(self.parse_result_column()?);
        }

        let from = if self.eat_keyword(Keyword::From) {
            Some(self.parse_from()?)
        } else {
            None
        };

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let mut group_by = Vec::new();
        if self.eat_keyword(Keyword::Group) {
            self.expect_keyword(Keyword::By)?;
            group_by.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma) {
                group_by.push(self.parse_expr()?);
            }
        }

        let having = if self.eat_keyword(Keyword::Having) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let mut order_by = Vec::new();
        if self.eat_keyword(Keyword::Order) {
            self.expect_keyword(Keyword::By)?;
            order_by.push(self.parse_ordering_term()?);
            while self.eat(&TokenKind::Comma) {
                order_by.push(self.parse_ordering_term()?);
            }
        }

        let limit = if self.eat_keyword(Keyword::Limit) {
            let first = self.parse_expr()?;
            if self.eat_keyword(Keyword::Offset) {
                Some(LimitClause {
                    limit: first,
                    offset: Some(self.parse_expr()?),
                })
            } else if self.eat(&TokenKind::Comma) {
                // `limit a, b` means offset a, limit b
                let second = self.parse_expr()?;
                Some(LimitClause {
                    limit: second,
                    offset: Some(first),
                })
            } else {
                Some(LimitClause {
                    limit: first,
                    offset: None,
                })
            }
        } else {
            None
        };

        Ok(SelectStatement {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            order_by,
            limit,
        })
    }

    fn parse_result_column(&mut self) -> Result<ResultColumn, ParseError> {
        if self.eat(&TokenKind::Star) {
            return Ok(ResultColumn::Star);
        }
        // `table.*`
        if self.at_ident()
            && self.peek_at(1).kind == TokenKind::Dot
            && self.peek_at(2).kind == TokenKind::Star
        {
            let table = self.parse_ident()?;
            self.advance(); // dot
            self.advance(); // star
            return Ok(ResultColumn::TableStar(table));
        }
        let expr = self.parse_expr()?;
        let alias = self.parse_alias()?;
        Ok(ResultColumn::Expr { expr, alias })
    }

    fn parse_ordering_term(&mut self) -> Result<OrderingTerm, ParseError> {
        let expr = self.parse_expr()?;
        let direction = if self.eat_keyword(Keyword::Asc) {
            Some(Direction::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(Direction::Desc)
        } else {
            None
        };
        Ok(OrderingTerm { expr, direction })
    }

    fn parse_from(&mut self) -> Result<FromClause, ParseError> {
        let mut items = vec![FromItem {
            source: self.parse_table_or_subquery()?,
            constraint: None,
        }];
        loop {
            if self.eat(&TokenKind::Comma) {
                items.push(FromItem {
                    source: self.parse_table_or_subquery()?,
                    constraint: None,
                });
            } else if self.eat_keyword(Keyword::Join) {
                let source = self.parse_table_or_subquery()?;
                let constraint = if self.eat_keyword(Keyword::On) {
                    Some(JoinConstraint::On(self.parse_expr()?))
                } else if self.eat_keyword(Keyword::Using) {
                    self.expect(&TokenKind::LParen)?;
                    let mut cols = vec![self.parse_ident()?];
                    while self.eat(&TokenKind::Comma) {
                        cols.push(self.parse_ident()?);
                    }
                    self.expect(&TokenKind::RParen)?;
                    Some(JoinConstraint::Using(cols))
                } else {
                    None
                };
                items.push(FromItem { source, constraint });
            } else {
                break;
            }
        }
        Ok(FromClause { items })
    }

    fn parse_table_or_subquery(&mut self) -> Result<TableOrSubquery, ParseError> {
        if self.eat(&TokenKind::LParen) {
            let select = self.parse_select()?;
            self.expect(&TokenKind::RParen)?;
            let alias = self.parse_alias()?;
            return Ok(TableOrSubquery::Subquery {
                select: Box::new(select),
                alias,
            });
        }
        let name = self.parse_ident()?;
        let alias = self.parse_alias()?;
        Ok(TableOrSubquery::Table { name, alias })
    }

    // === INSERT / UPDATE / DELETE ===

    fn parse_insert(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Into)?;
        let table = self.parse_ident()?;

        let mut columns = Vec::new();
        if self.eat(&TokenKind::LParen) {
            columns.push(self.parse_ident()?);
            while self.eat(&TokenKind::Comma) {
                columns.push(self.parse_ident()?);
            }
            self.expect(&TokenKind::RParen)?;
        }

        let source = if self.eat_keyword(Keyword::Values) {
            let mut rows = vec![self.parse_values_row()?];
            while self.eat(&TokenKind::Comma) {
                rows.push(self.parse_values_row()?);
            }
            InsertSource::Values(rows)
        } else if self.check_keyword(Keyword::Select) {
            InsertSource::Select(Box::new(self.parse_select()?))
        } else if self.eat_keyword(Keyword::Default) {
            self.expect_keyword(Keyword::Values)?;
            InsertSource::DefaultValues
        } else {
            return Err(self.unexpected());
        };

        Ok(Statement::Insert(InsertStatement {
            table,
            columns,
            source,
        }))
    }

    fn parse_values_row(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut row = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            row.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(row)
    }

    fn parse_update(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let table = self.parse_ident()?;
        self.expect_keyword(Keyword::Set)?;

        let mut assignments = vec![self.parse_assignment()?];
        while self.eat(&TokenKind::Comma) {
            assignments.push(self.parse_assignment()?);
        }

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Statement::Update(UpdateStatement {
            table,
            assignments,
            where_clause,
        }))
    }

    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let column = self.parse_ident()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Assignment { column, value })
    }

    fn parse_delete(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Delete)?;
        self.expect_keyword(Keyword::From)?;
        let table = self.parse_ident()?;
        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::Delete(DeleteStatement {
            table,
            where_clause,
        }))
    }

    // === CREATE TABLE ===

    fn parse_create_table(&mut self) -> Result<Statement, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        self.expect_keyword(Keyword::Table)?;
        let table = self.parse_ident()?;
        self.expect(&TokenKind::LParen)?;

        let mut columns = vec![self.parse_column_def()?];
        let mut constraints = Vec::new();
        while self.eat(&TokenKind::Comma) {
            if self.at_table_constraint() {
                constraints.push(self.parse_table_constraint()?);
                while self.eat(&TokenKind::Comma) {
                    constraints.push(self.parse_table_constraint()?);
                }
                break;
            }
            columns.push(self.parse_column_def()?);
        }
        self.expect(&TokenKind::RParen)?;

        Ok(Statement::CreateTable(CreateTableStatement {
            table,
            columns,
            constraints,
        }))
    }

    fn at_table_constraint(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(Keyword::Primary | Keyword::Unique | Keyword::Check)
        )
    }

    fn parse_column_def(&mut self) -> Result<ColumnDef, ParseError> {
        let name = self.parse_ident()?;
        let column_type = match &self.peek().kind {
            TokenKind::Ident(word) => match ColumnType::from_word(word) {
                Some(t) => {
                    self.advance();
                    t
                }
                None => return Err(self.unexpected()),
            },
            _ => return Err(self.unexpected()),
        };

        let mut constraints = Vec::new();
        loop {
            if self.eat_keyword(Keyword::Primary) {
                self.expect_keyword(Keyword::Key)?;
                let direction = if self.eat_keyword(Keyword::Asc) {
                    Some(Direction::Asc)
                } else if self.eat_keyword(Keyword::Desc) {
                    Some(Direction::Desc)
                } else {
                    None
                };
                // parses so the policy walk can reject it by name
                let autoincrement = match &self.peek().kind {
                    TokenKind::Ident(w) if w.eq_ignore_ascii_case("autoincrement") => {
                        self.advance();
                        true
                    }
                    _ => false,
                };
                constraints.push(ColumnConstraint::PrimaryKey {
                    direction,
                    autoincrement,
                });
            } else if self.eat_keyword(Keyword::Not) {
                self.expect_keyword(Keyword::Null)?;
                constraints.push(ColumnConstraint::NotNull);
            } else if self.eat_keyword(Keyword::Unique) {
                constraints.push(ColumnConstraint::Unique);
            } else if self.eat_keyword(Keyword::Default) {
                constraints.push(ColumnConstraint::Default(self.parse_unary()?));
            } else if self.eat_keyword(Keyword::Check) {
                self.expect(&TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                constraints.push(ColumnConstraint::Check(expr));
            } else {
                break;
            }
        }

        Ok(ColumnDef {
            name,
            column_type,
            constraints,
        })
    }

    fn parse_table_constraint(&mut self) -> Result<TableConstraint, ParseError> {
        if self.eat_keyword(Keyword::Primary) {
            self.expect_keyword(Keyword::Key)?;
            Ok(TableConstraint::PrimaryKey(self.parse_column_name_list()?))
        } else if self.eat_keyword(Keyword::Unique) {
            Ok(TableConstraint::Unique(self.parse_column_name_list()?))
        } else if self.eat_keyword(Keyword::Check) {
            self.expect(&TokenKind::LParen)?;
            let expr = self.parse_expr()?;
            self.expect(&TokenKind::RParen)?;
            Ok(TableConstraint::Check(expr))
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_column_name_list(&mut self) -> Result<Vec<Ident>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let mut cols = vec![self.parse_ident()?];
        while self.eat(&TokenKind::Comma) {
            cols.push(self.parse_ident()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(cols)
    }

    // === GRANT / REVOKE ===

    fn parse_grant(&mut self, revoke: bool) -> Result<Statement, ParseError> {
        if revoke {
            self.expect_keyword(Keyword::Revoke)?;
        } else {
            self.expect_keyword(Keyword::Grant)?;
        }

        let mut privileges = vec![self.parse_privilege()?];
        while self.eat(&TokenKind::Comma) {
            privileges.push(self.parse_privilege()?);
        }

        self.expect_keyword(Keyword::On)?;
        let table = self.parse_ident()?;

        if revoke {
            self.expect_keyword(Keyword::From)?;
        } else {
            self.expect_keyword(Keyword::To)?;
        }

        let mut recipients = vec![self.parse_recipient()?];
        while self.eat(&TokenKind::Comma) {
            recipients.push(self.parse_recipient()?);
        }

        Ok(Statement::Grant(GrantStatement {
            revoke,
            privileges,
            table,
            recipients,
        }))
    }

    fn parse_privilege(&mut self) -> Result<Privilege, ParseError> {
        let privilege = match self.peek().kind {
            TokenKind::Keyword(Keyword::Insert) => Privilege::Insert,
            TokenKind::Keyword(Keyword::Update) => Privilege::Update,
            TokenKind::Keyword(Keyword::Delete) => Privilege::Delete,
            _ => return Err(self.unexpected()),
        };
        self.advance();
        Ok(privilege)
    }

    fn parse_recipient(&mut self) -> Result<String, ParseError> {
        match &self.peek().kind {
            TokenKind::String(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(raw)
            }
            _ => Err(self.unexpected()),
        }
    }

    // === expressions ===

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_and()?;
        while self.eat_keyword(Keyword::Or) {
            let right = self.parse_and()?;
            left = binary(left, BinaryOp::Or, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_not()?;
        while self.eat_keyword(Keyword::And) {
            let right = self.parse_not()?;
            left = binary(left, BinaryOp::And, right);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, ParseError> {
        // `NOT IN`/`NOT LIKE`/`NOT BETWEEN` belong to the comparison level
        if self.check_keyword(Keyword::Not)
            && !matches!(
                self.peek_at(1).kind,
                TokenKind::Keyword(Keyword::In | Keyword::Like | Keyword::Between)
            )
        {
            self.advance();
            let expr = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                expr: Box::new(expr),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;
        loop {
            match self.peek().kind {
                TokenKind::Eq | TokenKind::EqEq => {
                    self.advance();
                    let right = self.parse_relational()?;
                    left = binary(left, BinaryOp::Eq, right);
                }
                TokenKind::Ne | TokenKind::LtGt => {
                    self.advance();
                    let right = self.parse_relational()?;
                    left = binary(left, BinaryOp::Ne, right);
                }
                TokenKind::Keyword(Keyword::Is) => {
                    self.advance();
                    let op = if self.eat_keyword(Keyword::Not) {
                        BinaryOp::IsNot
                    } else {
                        BinaryOp::Is
                    };
                    let right = self.parse_relational()?;
                    left = binary(left, op, right);
                }
                TokenKind::Keyword(Keyword::Isnull) => {
                    self.advance();
                    left = binary(left, BinaryOp::Is, Expr::Literal(Literal::Null));
                }
                TokenKind::Keyword(Keyword::Notnull) => {
                    self.advance();
                    left = binary(left, BinaryOp::IsNot, Expr::Literal(Literal::Null));
                }
                TokenKind::Keyword(Keyword::Like) => {
                    self.advance();
                    let right = self.parse_relational()?;
                    left = binary(left, BinaryOp::Like, right);
                }
                TokenKind::Keyword(Keyword::In) => {
                    self.advance();
                    left = self.parse_in_rhs(left, false)?;
                }
                TokenKind::Keyword(Keyword::Between) => {
                    self.advance();
                    left = self.parse_between_rhs(left, false)?;
                }
                TokenKind::Keyword(Keyword::Not) => {
                    match self.peek_at(1).kind {
                        TokenKind::Keyword(Keyword::In) => {
                            self.advance();
                            self.advance();
                            left = self.parse_in_rhs(left, true)?;
                        }
                        TokenKind::Keyword(Keyword::Like) => {
                            self.advance();
                            self.advance();
                            let right = self.parse_relational()?;
                            left = binary(left, BinaryOp::NotLike, right);
                        }
                        TokenKind::Keyword(Keyword::Between) => {
                            self.advance();
                            self.advance();
                            left = self.parse_between_rhs(left, true)?;
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_in_rhs(&mut self, left: Expr, not: bool) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        if self.check_keyword(Keyword::Select) {
            let select = self.parse_select()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(Expr::InSelect {
                expr: Box::new(left),
                not,
                select: Box::new(select),
            });
        }
        let mut list = Vec::new();
        if !self.check(&TokenKind::RParen) {
            list.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma) {
                list.push(self.parse_expr()?);
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(Expr::InList {
            expr: Box::new(left),
            not,
            list,
        })
    }

    fn parse_between_rhs(&mut self, left: Expr, not: bool) -> Result<Expr, ParseError> {
        let low = self.parse_relational()?;
        self.expect_keyword(Keyword::And)?;
        let high = self.parse_relational()?;
        Ok(Expr::Between {
            expr: Box::new(left),
            not,
            low: Box::new(low),
            high: Box::new(high),
        })
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::Le => BinaryOp::Le,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::Ge => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_concat()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_concat()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    fn parse_concat(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while self.eat(&TokenKind::Concat) {
            let right = self.parse_unary()?;
            left = binary(left, BinaryOp::Concat, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Pos),
            TokenKind::Tilde => Some(UnaryOp::BitNot),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let expr = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                expr: Box::new(expr),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match &self.peek().kind {
            TokenKind::Number(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(Expr::Literal(Literal::Number(raw)))
            }
            TokenKind::String(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(Expr::Literal(Literal::String(raw)))
            }
            TokenKind::Blob(raw) => {
                let raw = raw.clone();
                self.advance();
                Ok(Expr::Literal(Literal::Blob(raw)))
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.advance();
                Ok(Expr::Literal(Literal::Null))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Ok(Expr::Literal(Literal::True))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Ok(Expr::Literal(Literal::False))
            }
            TokenKind::Keyword(Keyword::Exists) => {
                self.advance();
                self.expect(&TokenKind::LParen)?;
                let select = self.parse_select()?;
                self.expect(&TokenKind::RParen)?;
                Ok(Expr::Exists {
                    select: Box::new(select),
                })
            }
            TokenKind::Keyword(Keyword::Case) => self.parse_case(),
            TokenKind::Keyword(Keyword::Cast) => self.parse_cast(),
            TokenKind::Ident(_) | TokenKind::QuotedIdent(_) => {
                let first = self.parse_ident()?;
                if self.check(&TokenKind::LParen) {
                    return self.parse_function(first);
                }
                if self.eat(&TokenKind::Dot) {
                    let name = self.parse_ident()?;
                    return Ok(Expr::Column {
                        table: Some(first),
                        name,
                    });
                }
                Ok(Expr::Column {
                    table: None,
                    name: first,
                })
            }
            TokenKind::LParen => {
                self.advance();
                if self.check_keyword(Keyword::Select) {
                    let select = self.parse_select()?;
                    self.expect(&TokenKind::RParen)?;
                    return Ok(Expr::Subquery(Box::new(select)));
                }
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(Expr::Grouping(Box::new(expr)))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_function(&mut self, name: Ident) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        if self.eat(&TokenKind::Star) {
            self.expect(&TokenKind::RParen)?;
            return Ok(Expr::Function {
                name,
                args: FunctionArgs::Star,
            });
        }
        if self.eat(&TokenKind::RParen) {
            return Ok(Expr::Function {
                name,
                args: FunctionArgs::List {
                    distinct: false,
                    args: Vec::new(),
                },
            });
        }
        let distinct = self.eat_keyword(Keyword::Distinct);
        let mut args = vec![self.parse_expr()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(Expr::Function {
            name,
            args: FunctionArgs::List { distinct, args },
        })
    }

    fn parse_case(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Case)?;
        let operand = if self.check_keyword(Keyword::When) {
            None
        } else {
            Some(Box::new(self.parse_expr()?))
        };

        let mut whens = Vec::new();
        self.expect_keyword(Keyword::When)?;
        loop {
            let when = self.parse_expr()?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.parse_expr()?;
            whens.push((when, then));
            if !self.eat_keyword(Keyword::When) {
                break;
            }
        }

        let else_expr = if self.eat_keyword(Keyword::Else) {
            Some(Box::new(self.parse_expr()?))
        } else {
            None
        };
        self.expect_keyword(Keyword::End)?;

        Ok(Expr::Case {
            operand,
            whens,
            else_expr,
        })
    }

    fn parse_cast(&mut self) -> Result<Expr, ParseError> {
        self.expect_keyword(Keyword::Cast)?;
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expr()?;
        self.expect_keyword(Keyword::As)?;
        let target = match &self.peek().kind {
            TokenKind::Ident(word) => match ColumnType::from_word(word) {
                Some(t) => {
                    self.advance();
                    t
                }
                None => return Err(self.unexpected()),
            },
            _ => return Err(self.unexpected()),
        };
        self.expect(&TokenKind::RParen)?;
        Ok(Expr::Cast {
            expr: Box::new(expr),
            target,
        })
    }
}

fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}
