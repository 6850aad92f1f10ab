use crate::engine::{Pipeline, Solver};
use crate::error::{Result, SolverError};

/// Supplies values for identifiers and results for function calls while an
/// expression is being evaluated.
///
/// Both evaluators are written against this trait, so a parsed expression can
/// be run against any symbol source, not only a [`Solver`].
pub trait SymbolResolver {
    /// Returns the value bound to a bare identifier.
    fn resolve(&self, ident: &str) -> Result<f64>;

    /// Invokes `name` with already evaluated arguments.
    fn call(&self, name: &str, args: &[f64]) -> Result<f64>;
}

/// Lookup frame for top-level evaluation: sweep bindings, then local
/// variables, then global variables, then constants.
pub(crate) struct TopFrame<'a> {
    pub(crate) solver: &'a Solver,
    pub(crate) pipeline: Pipeline,
    pub(crate) sweep: &'a [(&'a str, f64)],
}

impl SymbolResolver for TopFrame<'_> {
    fn resolve(&self, ident: &str) -> Result<f64> {
        if let Some(&(_, v)) = self.sweep.iter().rev().find(|(n, _)| *n == ident) {
            return Ok(v);
        }
        let env = self.solver.env();
        env.local(ident)
            .or_else(|| env.global(ident))
            .or_else(|| env.constant(ident))
            .ok_or_else(|| SolverError::UndefinedSymbol(ident.to_string()))
    }

    fn call(&self, name: &str, args: &[f64]) -> Result<f64> {
        self.solver.invoke(name, args, self.pipeline)
    }
}

/// Lookup frame for a user function body: parameters, then global variables,
/// then constants. The caller's locals are not visible here.
pub(crate) struct CallFrame<'a> {
    pub(crate) solver: &'a Solver,
    pub(crate) pipeline: Pipeline,
    pub(crate) params: &'a [String],
    pub(crate) args: &'a [f64],
}

impl SymbolResolver for CallFrame<'_> {
    fn resolve(&self, ident: &str) -> Result<f64> {
        if let Some(i) = self.params.iter().position(|p| p == ident) {
            return Ok(self.args[i]);
        }
        let env = self.solver.env();
        env.global(ident)
            .or_else(|| env.constant(ident))
            .ok_or_else(|| SolverError::UndefinedSymbol(ident.to_string()))
    }

    fn call(&self, name: &str, args: &[f64]) -> Result<f64> {
        self.solver.invoke(name, args, self.pipeline)
    }
}
