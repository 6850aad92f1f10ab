use crate::error::{Result, SolverError};
use crate::resolver::SymbolResolver;
use crate::rpn::PostfixToken;

/// Evaluates a postfix sequence with an operand stack.
pub fn eval_postfix<R: SymbolResolver + ?Sized>(seq: &[PostfixToken], r: &R) -> Result<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(seq.len());
    for tok in seq {
        match tok {
            PostfixToken::Num(v) => stack.push(*v),
            PostfixToken::Var(name) => stack.push(r.resolve(name)?),
            PostfixToken::Binary(op) => {
                let rhs = pop(&mut stack)?;
                let lhs = pop(&mut stack)?;
                stack.push(op.apply(lhs, rhs)?);
            }
            PostfixToken::Neg => {
                let v = pop(&mut stack)?;
                stack.push(-v);
            }
            PostfixToken::Call { name, arity } => {
                if stack.len() < *arity {
                    return Err(mismatch());
                }
                // arguments were pushed left to right
                let args = stack.split_off(stack.len() - arity);
                stack.push(r.call(name, &args)?);
            }
        }
    }
    match stack.as_slice() {
        [v] => Ok(*v),
        _ => Err(mismatch()),
    }
}

fn pop(stack: &mut Vec<f64>) -> Result<f64> {
    stack.pop().ok_or_else(mismatch)
}

fn mismatch() -> SolverError {
    SolverError::Syntax("operand/operator count mismatch".into())
}
