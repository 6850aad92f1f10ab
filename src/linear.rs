use crate::ast::Ast;
use crate::engine::{Pipeline, Solver};
use crate::error::{Result, SolverError};
use crate::lexer::tokenize;
use crate::ops::BinOp;
use crate::parser::parse_expression;
use crate::resolver::{SymbolResolver, TopFrame};
use log::debug;

/// `a * unknown + b`. `dep` records whether the term mentions the unknown at
/// all, so `0 * x` still counts as dependent.
#[derive(Clone, Copy, Debug)]
struct Affine {
    a: f64,
    b: f64,
    dep: bool,
}

impl Affine {
    fn constant(b: f64) -> Self {
        Self { a: 0.0, b, dep: false }
    }
}

fn not_linear(what: &str) -> SolverError {
    SolverError::Domain(format!("equation is not linear: {}", what))
}

struct Walker<'a> {
    frame: TopFrame<'a>,
    unknown: &'a str,
}

impl Walker<'_> {
    fn walk(&self, ast: &Ast) -> Result<Affine> {
        match ast {
            Ast::Num(v) => Ok(Affine::constant(*v)),
            Ast::Var(name) if name == self.unknown => Ok(Affine {
                a: 1.0,
                b: 0.0,
                dep: true,
            }),
            Ast::Var(name) => Ok(Affine::constant(self.frame.resolve(name)?)),
            Ast::Neg(x) => {
                let t = self.walk(x)?;
                Ok(Affine {
                    a: -t.a,
                    b: -t.b,
                    dep: t.dep,
                })
            }
            Ast::Binary(op, l, r) => {
                let l = self.walk(l)?;
                let r = self.walk(r)?;
                self.combine(*op, l, r)
            }
            Ast::Call { name, args } => {
                let mut vals = Vec::with_capacity(args.len());
                for arg in args {
                    let t = self.walk(arg)?;
                    if t.dep {
                        return Err(not_linear(&format!("unknown inside {}()", name)));
                    }
                    vals.push(t.b);
                }
                Ok(Affine::constant(self.frame.call(name, &vals)?))
            }
        }
    }

    fn combine(&self, op: BinOp, l: Affine, r: Affine) -> Result<Affine> {
        let dep = l.dep || r.dep;
        match op {
            BinOp::Add => Ok(Affine {
                a: l.a + r.a,
                b: l.b + r.b,
                dep,
            }),
            BinOp::Sub => Ok(Affine {
                a: l.a - r.a,
                b: l.b - r.b,
                dep,
            }),
            BinOp::Mul => {
                if l.dep && r.dep {
                    return Err(not_linear("product of terms in the unknown"));
                }
                Ok(Affine {
                    a: l.a * r.b + r.a * l.b,
                    b: l.b * r.b,
                    dep,
                })
            }
            BinOp::Div => {
                if r.dep {
                    return Err(not_linear("division by a term in the unknown"));
                }
                if r.b == 0.0 {
                    return Err(SolverError::DivisionByZero);
                }
                Ok(Affine {
                    a: l.a / r.b,
                    b: l.b / r.b,
                    dep: l.dep,
                })
            }
            BinOp::Pow => {
                if r.dep {
                    return Err(not_linear("unknown in an exponent"));
                }
                if !l.dep {
                    return Ok(Affine::constant(BinOp::Pow.apply(l.b, r.b)?));
                }
                if r.b == 1.0 {
                    Ok(l)
                } else if r.b == 0.0 {
                    Ok(Affine::constant(1.0))
                } else {
                    Err(not_linear("unknown raised to a power"))
                }
            }
        }
    }
}

fn collect_unknowns<'t>(ast: &'t Ast, frame: &TopFrame<'_>, out: &mut Vec<&'t str>) {
    match ast {
        Ast::Num(_) => {}
        Ast::Var(name) => {
            if frame.resolve(name).is_err() && !out.contains(&name.as_str()) {
                out.push(name);
            }
        }
        Ast::Neg(x) => collect_unknowns(x, frame, out),
        Ast::Binary(_, l, r) => {
            collect_unknowns(l, frame, out);
            collect_unknowns(r, frame, out);
        }
        Ast::Call { args, .. } => {
            for a in args {
                collect_unknowns(a, frame, out);
            }
        }
    }
}

pub(crate) fn solve(solver: &Solver, text: &str) -> Result<f64> {
    let sides: Vec<&str> = text.split('=').collect();
    if sides.len() != 2 {
        return Err(SolverError::Syntax(format!(
            "expected exactly one '=' in equation, found {}",
            sides.len() - 1
        )));
    }
    let lhs = parse_expression(&tokenize(sides[0])?)?;
    let rhs = parse_expression(&tokenize(sides[1])?)?;

    let frame = TopFrame {
        solver,
        pipeline: Pipeline::Ast,
        sweep: &[],
    };
    let mut unknowns = Vec::new();
    collect_unknowns(&lhs, &frame, &mut unknowns);
    collect_unknowns(&rhs, &frame, &mut unknowns);
    let unknown = match unknowns.as_slice() {
        [one] => *one,
        [] => return Err(SolverError::Domain("equation has no unknown".into())),
        many => {
            return Err(SolverError::Domain(format!(
                "equation has {} unknowns: {}",
                many.len(),
                many.join(", ")
            )));
        }
    };

    let walker = Walker { frame, unknown };
    let l = walker.walk(&lhs)?;
    let r = walker.walk(&rhs)?;
    let a = l.a - r.a;
    let b = l.b - r.b;
    if a == 0.0 {
        let kind = if b == 0.0 { "tautology" } else { "contradiction" };
        return Err(SolverError::Domain(format!("equation is a {}", kind)));
    }
    let value = -b / a;
    debug!("solved {:?}: {} = {}", text, unknown, value);
    Ok(value)
}
