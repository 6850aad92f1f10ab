use crate::builtins::NativeFn;
use crate::cache::{ParseCache, Parsed, normalize};
use crate::env::{Environment, Function, FunctionInfo};
use crate::error::{Result, SolverError};
use crate::lexer::tokenize;
use crate::linear;
use crate::parser::parse_expression;
use crate::resolver::{CallFrame, SymbolResolver, TopFrame};
use crate::rpn::to_postfix;
use crate::stack_eval::eval_postfix;
use crate::sweep::{ContourData, Odometer, linspace};
use crate::tree_eval::eval_tree;
use log::{debug, info, trace};
use std::sync::Arc;

/// Which evaluation pipeline an expression goes through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Shunting-yard conversion to postfix, evaluated on an operand stack.
    #[default]
    Postfix,
    /// Precedence-climbing parse to a tree, evaluated recursively.
    Ast,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    pub use_cache: bool,
    pub cache_capacity: usize,
    /// Pipeline used by the range and plotting helpers.
    pub pipeline: Pipeline,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            use_cache: true,
            cache_capacity: 100,
            pipeline: Pipeline::Postfix,
        }
    }
}

/// Expression engine owning its symbol environment and parse cache.
///
/// Declarations need `&mut self`; evaluation only needs `&self`, so a fully
/// declared `Solver` can be shared between threads behind an `Arc`.
pub struct Solver {
    env: Environment,
    cache: ParseCache,
    config: SolverConfig,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    /// Creates a solver with the builtin functions and the constants `pi`
    /// and `e` predeclared.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            env: Environment::new(),
            cache: ParseCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub(crate) fn env(&self) -> &Environment {
        &self.env
    }

    pub fn declare_constant(&mut self, name: &str, value: f64) -> Result<()> {
        self.env.declare_constant(name, value)
    }

    /// Declares a global variable (visible inside function bodies) or a local
    /// one (visible to top-level expressions only). Redeclaring overwrites.
    pub fn declare_variable(&mut self, name: &str, value: f64, global: bool) -> Result<()> {
        self.env.declare_variable(name, value, global)
    }

    /// Declares `name(params..) = body`. Fails with
    /// [`SolverError::Redefinition`] if `name` is already a function.
    pub fn declare_function(&mut self, name: &str, params: &[&str], body: &str) -> Result<()> {
        self.env.declare_function(name, params, body)
    }

    pub fn register_native(&mut self, name: &str, arity: usize, func: NativeFn) -> Result<()> {
        self.env.register_native(name, arity, func)
    }

    pub fn clear_variables(&mut self) {
        self.env.clear_variables();
    }

    pub fn list_constants(&self) -> Vec<(String, f64)> {
        self.env.list_constants()
    }

    /// Returns `(globals, locals)`, each sorted by name.
    pub fn list_variables(&self) -> (Vec<(String, f64)>, Vec<(String, f64)>) {
        self.env.list_variables()
    }

    pub fn list_functions(&self) -> Vec<FunctionInfo> {
        self.env.list_functions()
    }

    pub fn set_use_cache(&mut self, enabled: bool) {
        self.config.use_cache = enabled;
        if !enabled {
            self.cache.clear();
        }
    }

    pub fn set_default_pipeline(&mut self, pipeline: Pipeline) {
        self.config.pipeline = pipeline;
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    fn parse(&self, text: &str, pipeline: Pipeline) -> Result<Parsed> {
        let key = if self.config.use_cache {
            let key = normalize(text);
            if let Some(parsed) = self.cache.get(&key, pipeline) {
                return Ok(parsed);
            }
            Some(key)
        } else {
            None
        };
        let tokens = tokenize(text)?;
        let parsed = match pipeline {
            Pipeline::Postfix => Parsed::Postfix(Arc::new(to_postfix(&tokens)?)),
            Pipeline::Ast => Parsed::Tree(Arc::new(parse_expression(&tokens)?)),
        };
        debug!("parsed {:?} [{:?}]", text, pipeline);
        if let Some(key) = key {
            self.cache.insert(key, pipeline, parsed.clone());
        }
        Ok(parsed)
    }

    fn run<R: SymbolResolver>(parsed: &Parsed, r: &R) -> Result<f64> {
        match parsed {
            Parsed::Postfix(seq) => eval_postfix(seq, r),
            Parsed::Tree(ast) => eval_tree(ast, r),
        }
    }

    /// Calls a declared function with evaluated arguments. User function
    /// bodies are parsed for the same pipeline as their caller.
    pub(crate) fn invoke(&self, name: &str, args: &[f64], pipeline: Pipeline) -> Result<f64> {
        let func = self
            .env
            .function(name)
            .ok_or_else(|| SolverError::UndefinedFunction(name.to_string()))?;
        if func.arity() != args.len() {
            return Err(SolverError::Arity {
                name: name.to_string(),
                expected: func.arity(),
                got: args.len(),
            });
        }
        trace!("call {}{:?}", name, args);
        match func {
            Function::Native { func, .. } => func(args),
            Function::User { params, body } => {
                let parsed = self.parse(body, pipeline)?;
                let frame = CallFrame {
                    solver: self,
                    pipeline,
                    params,
                    args,
                };
                Self::run(&parsed, &frame)
            }
        }
    }

    pub fn evaluate(&self, text: &str, pipeline: Pipeline) -> Result<f64> {
        self.evaluate_with(text, pipeline, false)
    }

    /// Like [`evaluate`](Self::evaluate); with `debug` set, the token stream
    /// and the parsed form are logged at info level.
    pub fn evaluate_with(&self, text: &str, pipeline: Pipeline, debug: bool) -> Result<f64> {
        if debug {
            let tokens = tokenize(text)?;
            let shown: Vec<String> = tokens.iter().map(|t| t.kind.to_string()).collect();
            info!("tokens: [{}]", shown.join(", "));
        }
        let parsed = self.parse(text, pipeline)?;
        if debug {
            info!("{:?}: {}", pipeline, parsed);
        }
        let frame = TopFrame {
            solver: self,
            pipeline,
            sweep: &[],
        };
        let value = Self::run(&parsed, &frame)?;
        if debug {
            info!("result: {}", value);
        }
        Ok(value)
    }

    /// Evaluates `text` once per value with `name` bound to that value.
    /// The environment is left untouched and the first error is returned.
    pub fn evaluate_range(&self, name: &str, values: &[f64], text: &str) -> Result<Vec<f64>> {
        self.evaluate_range_with(name, values, text, self.config.pipeline)
    }

    pub fn evaluate_range_with(
        &self,
        name: &str,
        values: &[f64],
        text: &str,
        pipeline: Pipeline,
    ) -> Result<Vec<f64>> {
        let parsed = self.parse(text, pipeline)?;
        values
            .iter()
            .map(|&v| {
                let binding = [(name, v)];
                let frame = TopFrame {
                    solver: self,
                    pipeline,
                    sweep: &binding,
                };
                Self::run(&parsed, &frame)
            })
            .collect()
    }

    /// Evaluates `text` over the cartesian product of `lists`, the last
    /// variable varying fastest. The result is flat, in row-major order.
    pub fn evaluate_ranges(&self, names: &[&str], lists: &[Vec<f64>], text: &str) -> Result<Vec<f64>> {
        if names.len() != lists.len() {
            return Err(SolverError::Syntax(format!(
                "{} variable name(s) but {} value list(s)",
                names.len(),
                lists.len()
            )));
        }
        let pipeline = self.config.pipeline;
        let parsed = self.parse(text, pipeline)?;
        let mut odo = Odometer::new(lists);
        let mut out = Vec::with_capacity(odo.total());
        let mut point = vec![0.0; names.len()];
        while odo.next_into(&mut point) {
            let binding: Vec<(&str, f64)> = names.iter().copied().zip(point.iter().copied()).collect();
            let frame = TopFrame {
                solver: self,
                pipeline,
                sweep: &binding,
            };
            out.push(Self::run(&parsed, &frame)?);
        }
        Ok(out)
    }

    /// Samples `text` over `frames` evenly spaced values of `var` in
    /// `[start, end]`, returning `(xs, ys)`.
    pub fn animation_data(
        &self,
        text: &str,
        var: &str,
        start: f64,
        end: f64,
        frames: usize,
    ) -> Result<(Vec<f64>, Vec<f64>)> {
        let xs = linspace(start, end, frames);
        let ys = self.evaluate_range(var, &xs, text)?;
        Ok((xs, ys))
    }

    /// Samples `text` on an evenly spaced grid. Each range is
    /// `(start, end, count)`.
    pub fn contour_data(
        &self,
        text: &str,
        x: &str,
        x_range: (f64, f64, usize),
        y: &str,
        y_range: (f64, f64, usize),
    ) -> Result<ContourData> {
        let xs = linspace(x_range.0, x_range.1, x_range.2);
        let ys = linspace(y_range.0, y_range.1, y_range.2);
        let lists = [xs, ys];
        let flat = self.evaluate_ranges(&[x, y], &lists, text)?;
        let [xs, ys] = lists;
        let z = if ys.is_empty() {
            vec![Vec::new(); xs.len()]
        } else {
            flat.chunks(ys.len()).map(|row| row.to_vec()).collect()
        };
        Ok(ContourData { x: xs, y: ys, z })
    }

    /// Solves a linear equation in one unknown, e.g. `2*x + 3 = 7`.
    pub fn solve_linear_equation(&self, text: &str) -> Result<f64> {
        linear::solve(self, text)
    }
}
