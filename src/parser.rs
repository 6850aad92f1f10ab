use crate::ast::Ast;
use crate::error::{Result, SolverError};
use crate::lexer::{Token, TokenKind};
use crate::ops::{BinOp, PREC_ADD, PREC_POW};

/// Precedence-climbing parser producing an [`Ast`].
pub(crate) struct Parser<'a> {
    toks: &'a [Token],
    i: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(toks: &'a [Token]) -> Self {
        Self { toks, i: 0 }
    }
    fn look(&self) -> &TokenKind {
        self.toks.get(self.i).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }
    fn pos(&self) -> usize {
        match self.toks.get(self.i) {
            Some(t) => t.pos,
            None => self.toks.last().map(|t| t.pos).unwrap_or(0),
        }
    }
    fn bump(&mut self) {
        self.i += 1;
    }
    fn expect(&mut self, t: &TokenKind) -> Result<()> {
        if std::mem::discriminant(self.look()) == std::mem::discriminant(t) {
            self.bump();
            Ok(())
        } else {
            Err(SolverError::syntax_at(
                format!("expected '{}', found '{}'", t, self.look()),
                self.pos(),
            ))
        }
    }
    pub(crate) fn parse(mut self) -> Result<Ast> {
        let expr = self.expression(PREC_ADD)?;
        if !matches!(self.look(), TokenKind::Eof) {
            return Err(SolverError::syntax_at(
                format!("unexpected token '{}'", self.look()),
                self.pos(),
            ));
        }
        Ok(expr)
    }

    /// The operator at the cursor, and whether it is an implied `*`
    /// (a number directly followed by an identifier or `(`).
    fn peek_binop(&self) -> Option<(BinOp, bool)> {
        if let Some(op) = BinOp::from_token(self.look()) {
            return Some((op, false));
        }
        let after_number = self.i > 0
            && matches!(
                self.toks.get(self.i - 1).map(|t| &t.kind),
                Some(TokenKind::Number(_))
            );
        if after_number && matches!(self.look(), TokenKind::Ident(_) | TokenKind::LParen) {
            return Some((BinOp::Mul, true));
        }
        None
    }

    fn expression(&mut self, min: u8) -> Result<Ast> {
        let lhs = self.unary()?;
        self.climb(lhs, min)
    }

    fn climb(&mut self, mut lhs: Ast, min: u8) -> Result<Ast> {
        while let Some((op, implicit)) = self.peek_binop() {
            let prec = op.precedence();
            if prec < min {
                break;
            }
            if !implicit {
                self.bump();
            }
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let rhs = self.expression(next_min)?;
            lhs = Ast::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    // Unary minus sits between `^` and `* /`: it wraps a whole power chain.
    fn unary(&mut self) -> Result<Ast> {
        if matches!(self.look(), TokenKind::Minus) {
            self.bump();
            return Ok(Ast::Neg(Box::new(self.unary()?)));
        }
        let base = self.primary()?;
        self.climb(base, PREC_POW)
    }

    fn primary(&mut self) -> Result<Ast> {
        match self.look().clone() {
            TokenKind::Number(v) => {
                self.bump();
                Ok(Ast::Num(v))
            }
            TokenKind::Ident(name) => {
                self.bump();
                if !matches!(self.look(), TokenKind::LParen) {
                    return Ok(Ast::Var(name));
                }
                self.bump();
                let mut args = Vec::new();
                if !matches!(self.look(), TokenKind::RParen) {
                    loop {
                        args.push(self.expression(PREC_ADD)?);
                        if matches!(self.look(), TokenKind::Comma) {
                            self.bump();
                            continue;
                        }
                        break;
                    }
                }
                self.expect(&TokenKind::RParen)?;
                Ok(Ast::Call { name, args })
            }
            TokenKind::LParen => {
                self.bump();
                let e = self.expression(PREC_ADD)?;
                self.expect(&TokenKind::RParen)?;
                Ok(e)
            }
            TokenKind::Eof => Err(SolverError::syntax_at("unexpected end of input", self.pos())),
            other => Err(SolverError::syntax_at(
                format!("expected number, identifier, or '(' but found '{}'", other),
                self.pos(),
            )),
        }
    }
}

/// Builds an expression tree from a token stream.
pub fn parse_expression(tokens: &[Token]) -> Result<Ast> {
    Parser::new(tokens).parse()
}
