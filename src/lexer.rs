use crate::error::{Result, SolverError};
use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
    Eof,
}

/// A lexical unit together with its byte offset in the source text.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(v) => write!(f, "{}", v),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Caret => f.write_str("^"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

pub(crate) struct Lexer<'a> {
    src: &'a [u8],
    i: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(s: &'a str) -> Self {
        Self {
            src: s.as_bytes(),
            i: 0,
        }
    }
    fn peek(&self) -> Option<u8> {
        self.src.get(self.i).copied()
    }
    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() {
                self.i += 1;
            } else {
                break;
            }
        }
    }
    fn single(&mut self, kind: TokenKind) -> Result<Token> {
        let pos = self.i;
        self.i += 1;
        Ok(Token { kind, pos })
    }
    pub(crate) fn next_token(&mut self) -> Result<Token> {
        self.skip_ws();
        let c = match self.peek() {
            Some(c) => c,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    pos: self.i,
                });
            }
        };
        match c {
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'^' => self.single(TokenKind::Caret),
            b',' => self.single(TokenKind::Comma),
            c if c.is_ascii_digit() => self.lex_number(),
            c if c.is_ascii_alphabetic() || c == b'_' => Ok(self.lex_ident()),
            _ => Err(self.unexpected()),
        }
    }
    fn unexpected(&self) -> SolverError {
        // Report the whole (possibly multi-byte) character, not the raw byte.
        let rest = String::from_utf8_lossy(&self.src[self.i..]);
        let ch = rest.chars().next().unwrap_or('?');
        SolverError::syntax_at(format!("unexpected character '{}'", ch), self.i)
    }
    fn eat_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.i += 1;
            } else {
                break;
            }
        }
    }
    fn lex_number(&mut self) -> Result<Token> {
        let start = self.i;
        self.eat_digits();
        if self.peek() == Some(b'.') {
            // A fraction needs at least one digit after the dot.
            match self.src.get(self.i + 1) {
                Some(d) if d.is_ascii_digit() => {
                    self.i += 1;
                    self.eat_digits();
                }
                _ => return Err(self.unexpected()),
            }
        }
        let s = String::from_utf8_lossy(&self.src[start..self.i]);
        let v: f64 = s
            .parse()
            .map_err(|e| SolverError::syntax_at(format!("invalid number '{}': {}", s, e), start))?;
        Ok(Token {
            kind: TokenKind::Number(v),
            pos: start,
        })
    }
    fn lex_ident(&mut self) -> Token {
        let start = self.i;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == b'_' {
                self.i += 1;
            } else {
                break;
            }
        }
        let s = String::from_utf8_lossy(&self.src[start..self.i]).into_owned();
        Token {
            kind: TokenKind::Ident(s),
            pos: start,
        }
    }
}

/// Splits `text` into tokens. The returned vector always ends with `Eof`.
pub fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut lex = Lexer::new(text);
    let mut out = Vec::new();
    loop {
        let tok = lex.next_token()?;
        let done = tok.kind == TokenKind::Eof;
        out.push(tok);
        if done {
            return Ok(out);
        }
    }
}

/// True when `name` matches `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(c) if c.is_ascii_alphabetic() || c == b'_' => {}
        _ => return false,
    }
    bytes.all(|c| c.is_ascii_alphanumeric() || c == b'_')
}
