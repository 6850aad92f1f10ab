use crate::error::{Result, SolverError};
use crate::lexer::{Token, TokenKind};
use crate::ops::{BinOp, PREC_POW};
use std::fmt;

/// One element of a postfix (reverse Polish) sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum PostfixToken {
    Num(f64),
    Var(String),
    Binary(BinOp),
    Neg,
    Call { name: String, arity: usize },
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixToken::Num(v) => write!(f, "{}", v),
            PostfixToken::Var(s) => f.write_str(s),
            PostfixToken::Binary(op) => write!(f, "{}", op),
            PostfixToken::Neg => f.write_str("neg"),
            PostfixToken::Call { name, arity } => write!(f, "{}/{}", name, arity),
        }
    }
}

enum Frame {
    Op(BinOp),
    Neg,
    Group,
    Call { name: String, argc: usize },
}

struct Converter {
    out: Vec<PostfixToken>,
    ops: Vec<Frame>,
}

impl Converter {
    fn push_binop(&mut self, op: BinOp) {
        while let Some(top) = self.ops.last() {
            let pop = match top {
                // prefix minus yields to `^` only
                Frame::Neg => op.precedence() < PREC_POW,
                Frame::Op(t) => {
                    t.precedence() > op.precedence()
                        || (t.precedence() == op.precedence() && !op.is_right_assoc())
                }
                Frame::Group | Frame::Call { .. } => false,
            };
            if !pop {
                break;
            }
            self.pop_to_output();
        }
        self.ops.push(Frame::Op(op));
    }

    fn pop_to_output(&mut self) {
        match self.ops.pop() {
            Some(Frame::Op(op)) => self.out.push(PostfixToken::Binary(op)),
            Some(Frame::Neg) => self.out.push(PostfixToken::Neg),
            Some(other) => self.ops.push(other),
            None => {}
        }
    }

    /// Moves operators to the output until the innermost group or call frame.
    fn unwind(&mut self) {
        while matches!(self.ops.last(), Some(Frame::Op(_) | Frame::Neg)) {
            self.pop_to_output();
        }
    }
}

/// Converts infix tokens into a postfix sequence (shunting-yard).
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<PostfixToken>> {
    let mut cv = Converter {
        out: Vec::with_capacity(tokens.len()),
        ops: Vec::new(),
    };
    let mut expect_operand = true;
    let mut i = 0;
    let mut end = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        let next = tokens.get(i + 1).map(|t| &t.kind);
        end = tok.pos;
        match &tok.kind {
            TokenKind::Eof => break,
            TokenKind::Number(v) => {
                if !expect_operand {
                    return Err(unexpected(tok));
                }
                cv.out.push(PostfixToken::Num(*v));
                expect_operand = false;
                if matches!(next, Some(TokenKind::Ident(_) | TokenKind::LParen)) {
                    cv.push_binop(BinOp::Mul);
                    expect_operand = true;
                }
            }
            TokenKind::Ident(name) => {
                if !expect_operand {
                    return Err(unexpected(tok));
                }
                if matches!(next, Some(TokenKind::LParen)) {
                    cv.ops.push(Frame::Call {
                        name: name.clone(),
                        argc: 0,
                    });
                    i += 1;
                    expect_operand = true;
                } else {
                    cv.out.push(PostfixToken::Var(name.clone()));
                    expect_operand = false;
                }
            }
            TokenKind::LParen => {
                if !expect_operand {
                    return Err(unexpected(tok));
                }
                cv.ops.push(Frame::Group);
            }
            TokenKind::RParen => {
                if expect_operand {
                    // `name()` is the only place a `)` may follow an opening.
                    let just_opened = i > 0 && matches!(tokens[i - 1].kind, TokenKind::LParen);
                    match cv.ops.last() {
                        Some(Frame::Call { argc: 0, .. }) if just_opened => {}
                        _ => return Err(unexpected(tok)),
                    }
                    if let Some(Frame::Call { name, .. }) = cv.ops.pop() {
                        cv.out.push(PostfixToken::Call { name, arity: 0 });
                    }
                } else {
                    cv.unwind();
                    match cv.ops.pop() {
                        Some(Frame::Group) => {}
                        Some(Frame::Call { name, argc }) => cv.out.push(PostfixToken::Call {
                            name,
                            arity: argc + 1,
                        }),
                        _ => return Err(SolverError::syntax_at("mismatched parentheses", tok.pos)),
                    }
                }
                expect_operand = false;
            }
            TokenKind::Comma => {
                if expect_operand {
                    return Err(unexpected(tok));
                }
                cv.unwind();
                match cv.ops.last_mut() {
                    Some(Frame::Call { argc, .. }) => *argc += 1,
                    _ => {
                        return Err(SolverError::syntax_at(
                            "',' outside of a function call",
                            tok.pos,
                        ));
                    }
                }
                expect_operand = true;
            }
            kind => {
                let op = match BinOp::from_token(kind) {
                    Some(op) => op,
                    None => return Err(unexpected(tok)),
                };
                if expect_operand {
                    if op != BinOp::Sub {
                        return Err(unexpected(tok));
                    }
                    cv.ops.push(Frame::Neg);
                } else {
                    cv.push_binop(op);
                    expect_operand = true;
                }
            }
        }
        i += 1;
    }
    if expect_operand {
        return Err(SolverError::syntax_at("unexpected end of input", end));
    }
    while let Some(frame) = cv.ops.pop() {
        match frame {
            Frame::Op(op) => cv.out.push(PostfixToken::Binary(op)),
            Frame::Neg => cv.out.push(PostfixToken::Neg),
            Frame::Group | Frame::Call { .. } => {
                return Err(SolverError::syntax_at("mismatched parentheses", end));
            }
        }
    }
    Ok(cv.out)
}

fn unexpected(tok: &Token) -> SolverError {
    SolverError::syntax_at(format!("unexpected token '{}'", tok.kind), tok.pos)
}
