use crate::ast::Ast;
use crate::error::Result;
use crate::resolver::SymbolResolver;

/// Evaluates an expression tree in post-order.
pub fn eval_tree<R: SymbolResolver + ?Sized>(ast: &Ast, r: &R) -> Result<f64> {
    match ast {
        Ast::Num(v) => Ok(*v),
        Ast::Var(name) => r.resolve(name),
        Ast::Neg(x) => Ok(-eval_tree(x, r)?),
        Ast::Binary(op, a, b) => {
            let lhs = eval_tree(a, r)?;
            let rhs = eval_tree(b, r)?;
            op.apply(lhs, rhs)
        }
        Ast::Call { name, args } => {
            let vals = args
                .iter()
                .map(|a| eval_tree(a, r))
                .collect::<Result<Vec<f64>>>()?;
            r.call(name, &vals)
        }
    }
}
