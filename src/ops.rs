use crate::error::{Result, SolverError};
use crate::lexer::TokenKind;
use std::fmt;

pub(crate) const PREC_ADD: u8 = 2;
pub(crate) const PREC_MUL: u8 = 3;
pub(crate) const PREC_POW: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    pub(crate) fn from_token(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Caret => Some(BinOp::Pow),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => PREC_ADD,
            BinOp::Mul | BinOp::Div => PREC_MUL,
            BinOp::Pow => PREC_POW,
        }
    }

    pub fn is_right_assoc(self) -> bool {
        matches!(self, BinOp::Pow)
    }

    /// Checked arithmetic shared by both evaluators.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64> {
        match self {
            BinOp::Add => Ok(lhs + rhs),
            BinOp::Sub => Ok(lhs - rhs),
            BinOp::Mul => Ok(lhs * rhs),
            BinOp::Div => {
                if rhs == 0.0 {
                    Err(SolverError::DivisionByZero)
                } else {
                    Ok(lhs / rhs)
                }
            }
            BinOp::Pow => {
                let v = lhs.powf(rhs);
                if v.is_nan() && !lhs.is_nan() && !rhs.is_nan() {
                    Err(SolverError::Domain(format!("{} ^ {} is not a real number", lhs, rhs)))
                } else {
                    Ok(v)
                }
            }
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        })
    }
}
