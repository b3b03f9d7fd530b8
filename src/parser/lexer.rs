//! Hand-written lexer for the restricted SQL dialect.
//!
//! Operates on raw bytes and records byte-offset spans for every token. An
//! unrecognized character is reported at its own offset; every other failure
//! mode surfaces later in the parser with the offending token's end offset.

use crate::error::ParseError;

use super::token::{lookup_keyword, Span, Token, TokenKind};

pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
        }
    }

    /// Tokenize the entire input, appending a final `Eof` token.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, ParseError> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_at(0) {
                Some(b' ' | b'\t' | b'\r' | b'\n') => self.advance(),
                // line comment
                Some(b'-') if self.peek_at(1) == Some(b'-') => {
                    while let Some(c) = self.peek_at(0) {
                        self.advance();
                        if c == b'\n' {
                            break;
                        }
                    }
                }
                // block comment, unterminated runs to end of input
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    self.advance();
                    self.advance();
                    while let Some(c) = self.peek_at(0) {
                        if c == b'*' && self.peek_at(1) == Some(b'/') {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => return,
            }
        }
    }

    fn text(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.src[start..self.pos]).into_owned()
    }

    /// Report an unrecognized character at its starting offset.
    fn unexpected_char(&self, start: usize) -> ParseError {
        let end = next_char_boundary(self.src, start);
        ParseError::Syntax {
            position: start,
            near: String::from_utf8_lossy(&self.src[start..end]).into_owned(),
        }
    }

    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_whitespace_and_comments();

        let start = self.pos;
        let Some(ch) = self.peek_at(0) else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::new(start, start),
            });
        };

        let kind = match ch {
            b'\'' => self.lex_string(start)?,
            b'`' => self.lex_delimited(start, b'`')?,
            b'"' => self.lex_delimited(start, b'"')?,
            b'[' => self.lex_delimited(start, b']')?,
            b'x' | b'X' if self.peek_at(1) == Some(b'\'') => self.lex_blob(start)?,
            b'0'..=b'9' => self.lex_number(start),
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_word(start),
            b',' => self.single(TokenKind::Comma),
            b';' => self.single(TokenKind::Semicolon),
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'.' => self.single(TokenKind::Dot),
            b'*' => self.single(TokenKind::Star),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'/' => self.single(TokenKind::Slash),
            b'%' => self.single(TokenKind::Percent),
            b'~' => self.single(TokenKind::Tilde),
            b'=' => {
                self.advance();
                if self.peek_at(0) == Some(b'=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            b'!' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance();
                    self.advance();
                    TokenKind::Ne
                } else {
                    return Err(self.unexpected_char(start));
                }
            }
            b'<' => {
                self.advance();
                match self.peek_at(0) {
                    Some(b'=') => {
                        self.advance();
                        TokenKind::Le
                    }
                    Some(b'>') => {
                        self.advance();
                        TokenKind::LtGt
                    }
                    _ => TokenKind::Lt,
                }
            }
            b'>' => {
                self.advance();
                if self.peek_at(0) == Some(b'=') {
                    self.advance();
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            b'|' => {
                if self.peek_at(1) == Some(b'|') {
                    self.advance();
                    self.advance();
                    TokenKind::Concat
                } else {
                    return Err(self.unexpected_char(start));
                }
            }
            _ => return Err(self.unexpected_char(start)),
        };

        Ok(Token {
            kind,
            span: Span::new(start, self.pos),
        })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn lex_word(&mut self, start: usize) -> TokenKind {
        while self
            .peek_at(0)
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.advance();
        }
        let word = self.text(start);
        match lookup_keyword(&word) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(word),
        }
    }

    fn lex_number(&mut self, start: usize) -> TokenKind {
        // hex literal
        if self.peek_at(0) == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.advance();
            self.advance();
            while self.peek_at(0).is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            return TokenKind::Number(self.text(start));
        }

        while self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek_at(0) == Some(b'.') {
            self.advance();
            while self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        if matches!(self.peek_at(0), Some(b'e' | b'E')) {
            let mut lookahead = 1;
            if matches!(self.peek_at(1), Some(b'+' | b'-')) {
                lookahead = 2;
            }
            if self.peek_at(lookahead).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..=lookahead {
                    self.advance();
                }
                while self.peek_at(0).is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
        TokenKind::Number(self.text(start))
    }

    fn lex_string(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        self.advance(); // opening quote
        loop {
            match self.peek_at(0) {
                Some(b'\'') => {
                    self.advance();
                    // doubled quote is an escaped quote inside the literal
                    if self.peek_at(0) == Some(b'\'') {
                        self.advance();
                    } else {
                        return Ok(TokenKind::String(self.text(start)));
                    }
                }
                Some(_) => self.advance(),
                None => return Err(self.unexpected_char(start)),
            }
        }
    }

    fn lex_blob(&mut self, start: usize) -> Result<TokenKind, ParseError> {
        self.advance(); // x
        self.advance(); // opening quote
        loop {
            match self.peek_at(0) {
                Some(b'\'') => {
                    self.advance();
                    return Ok(TokenKind::Blob(self.text(start)));
                }
                Some(c) if c.is_ascii_hexdigit() => self.advance(),
                _ => return Err(self.unexpected_char(start)),
            }
        }
    }

    fn lex_delimited(&mut self, start: usize, close: u8) -> Result<TokenKind, ParseError> {
        self.advance(); // opening delimiter
        let body_start = self.pos;
        loop {
            match self.peek_at(0) {
                Some(c) if c == close => {
                    let body = String::from_utf8_lossy(&self.src[body_start..self.pos]).into_owned();
                    self.advance();
                    return Ok(TokenKind::QuotedIdent(body));
                }
                Some(_) => self.advance(),
                None => return Err(self.unexpected_char(start)),
            }
        }
    }
}

/// Next UTF-8 boundary at or after `start + 1`, so multibyte characters are
/// reported whole.
fn next_char_boundary(src: &[u8], start: usize) -> usize {
    let mut end = start + 1;
    while end < src.len() && (src[end] & 0xC0) == 0x80 {
        end += 1;
    }
    end.min(src.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::Keyword;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        assert_eq!(
            kinds("select foo"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Ident("foo".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_byte_spans() {
        let tokens = Lexer::tokenize("select *").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 8));
        assert_eq!(tokens[2].span, Span::new(8, 8));
    }

    #[test]
    fn lexes_string_with_escaped_quote() {
        assert_eq!(
            kinds("'it''s'"),
            vec![TokenKind::String("'it''s'".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_delimited_identifiers() {
        assert_eq!(
            kinds("`t1` \"t2\" [t3]"),
            vec![
                TokenKind::QuotedIdent("t1".to_string()),
                TokenKind::QuotedIdent("t2".to_string()),
                TokenKind::QuotedIdent("t3".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_numbers() {
        assert_eq!(
            kinds("1 2.5 0xFF 1e10 .5"),
            vec![
                TokenKind::Number("1".to_string()),
                TokenKind::Number("2.5".to_string()),
                TokenKind::Number("0xFF".to_string()),
                TokenKind::Number("1e10".to_string()),
                TokenKind::Number(".5".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_blob_literal() {
        assert_eq!(
            kinds("X'CAFE'"),
            vec![TokenKind::Blob("X'CAFE'".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn skips_comments() {
        assert_eq!(
            kinds("select -- comment\n 1 /* block */ + 2"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Number("1".to_string()),
                TokenKind::Plus,
                TokenKind::Number("2".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unexpected_char_reports_its_own_offset() {
        let err = Lexer::tokenize("select @").unwrap_err();
        assert_eq!(
            err,
            ParseError::Syntax {
                position: 7,
                near: "@".to_string()
            }
        );
    }

    #[test]
    fn two_char_operators() {
        assert_eq!(
            kinds("== != <> <= >= ||"),
            vec![
                TokenKind::EqEq,
                TokenKind::Ne,
                TokenKind::LtGt,
                TokenKind::Le,
                TokenKind::Ge,
                TokenKind::Concat,
                TokenKind::Eof,
            ]
        );
    }
}
