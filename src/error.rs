use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),
    #[error("undefined function: {0}")]
    UndefinedFunction(String),
    #[error("function {name} expects {expected} argument(s), got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("function already defined: {0}")]
    Redefinition(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("domain error: {0}")]
    Domain(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;

impl SolverError {
    pub(crate) fn syntax_at(msg: impl std::fmt::Display, pos: usize) -> Self {
        SolverError::Syntax(format!("{} at position {}", msg, pos))
    }
}
