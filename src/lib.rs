mod ast;
mod builtins;
mod cache;
mod engine;
mod env;
mod error;
mod lexer;
mod linear;
mod ops;
mod parser;
mod resolver;
mod rpn;
mod stack_eval;
mod sweep;
mod tree_eval;

pub use ast::Ast;
pub use builtins::{BUILTIN_FUNCTIONS, NativeFn};
pub use engine::{Pipeline, Solver, SolverConfig};
pub use env::FunctionInfo;
pub use error::{Result, SolverError};
pub use lexer::{Token, TokenKind, tokenize};
pub use ops::BinOp;
pub use parser::parse_expression;
pub use resolver::SymbolResolver;
pub use rpn::{PostfixToken, to_postfix};
pub use stack_eval::eval_postfix;
pub use sweep::{ContourData, linspace};
pub use tree_eval::eval_tree;
