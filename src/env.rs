use crate::builtins::{BUILTIN_TABLE, NativeFn};
use crate::error::{Result, SolverError};
use crate::lexer::{is_identifier, tokenize};
use crate::parser::parse_expression;
use foldhash::{HashMap, HashMapExt};
use log::debug;

#[derive(Clone)]
pub(crate) enum Function {
    Native { arity: usize, func: NativeFn },
    User { params: Vec<String>, body: String },
}

impl Function {
    pub(crate) fn arity(&self) -> usize {
        match self {
            Function::Native { arity, .. } => *arity,
            Function::User { params, .. } => params.len(),
        }
    }
}

/// Public description of a declared function.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionInfo {
    pub name: String,
    pub arity: usize,
    /// Parameter names; empty for native functions.
    pub params: Vec<String>,
    /// Body text; `None` for native functions.
    pub body: Option<String>,
}

impl FunctionInfo {
    pub fn is_native(&self) -> bool {
        self.body.is_none()
    }
}

pub(crate) struct Environment {
    constants: HashMap<String, f64>,
    globals: HashMap<String, f64>,
    locals: HashMap<String, f64>,
    functions: HashMap<String, Function>,
}

impl Environment {
    pub(crate) fn new() -> Self {
        let mut functions = HashMap::with_capacity(BUILTIN_TABLE.len());
        for def in BUILTIN_TABLE {
            functions.insert(
                def.name.to_string(),
                Function::Native {
                    arity: def.arity,
                    func: def.func,
                },
            );
        }
        let mut constants = HashMap::new();
        constants.insert("pi".to_string(), std::f64::consts::PI);
        constants.insert("e".to_string(), std::f64::consts::E);
        Self {
            constants,
            globals: HashMap::new(),
            locals: HashMap::new(),
            functions,
        }
    }

    pub(crate) fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }
    pub(crate) fn global(&self, name: &str) -> Option<f64> {
        self.globals.get(name).copied()
    }
    pub(crate) fn local(&self, name: &str) -> Option<f64> {
        self.locals.get(name).copied()
    }
    pub(crate) fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    pub(crate) fn declare_constant(&mut self, name: &str, value: f64) -> Result<()> {
        check_name(name)?;
        debug!("constant {} = {}", name, value);
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn declare_variable(&mut self, name: &str, value: f64, global: bool) -> Result<()> {
        check_name(name)?;
        debug!("{} variable {} = {}", if global { "global" } else { "local" }, name, value);
        let scope = if global {
            &mut self.globals
        } else {
            &mut self.locals
        };
        scope.insert(name.to_string(), value);
        Ok(())
    }

    pub(crate) fn clear_variables(&mut self) {
        self.globals.clear();
        self.locals.clear();
    }

    pub(crate) fn declare_function(&mut self, name: &str, params: &[&str], body: &str) -> Result<()> {
        check_name(name)?;
        if self.functions.contains_key(name) {
            return Err(SolverError::Redefinition(name.to_string()));
        }
        for (i, p) in params.iter().enumerate() {
            if !is_identifier(p) {
                return Err(SolverError::Syntax(format!(
                    "invalid parameter name '{}' in function {}",
                    p, name
                )));
            }
            if params[..i].contains(p) {
                return Err(SolverError::Syntax(format!(
                    "duplicate parameter '{}' in function {}",
                    p, name
                )));
            }
        }
        // Only the grammar is checked here; names resolve at call time.
        parse_expression(&tokenize(body)?)?;
        debug!("function {}({}) = {}", name, params.join(", "), body);
        self.functions.insert(
            name.to_string(),
            Function::User {
                params: params.iter().map(|p| p.to_string()).collect(),
                body: body.to_string(),
            },
        );
        Ok(())
    }

    pub(crate) fn register_native(&mut self, name: &str, arity: usize, func: NativeFn) -> Result<()> {
        check_name(name)?;
        if self.functions.contains_key(name) {
            return Err(SolverError::Redefinition(name.to_string()));
        }
        debug!("native function {}/{}", name, arity);
        self.functions
            .insert(name.to_string(), Function::Native { arity, func });
        Ok(())
    }

    pub(crate) fn list_constants(&self) -> Vec<(String, f64)> {
        sorted(&self.constants)
    }

    /// Returns `(globals, locals)`.
    pub(crate) fn list_variables(&self) -> (Vec<(String, f64)>, Vec<(String, f64)>) {
        (sorted(&self.globals), sorted(&self.locals))
    }

    pub(crate) fn list_functions(&self) -> Vec<FunctionInfo> {
        let mut out: Vec<FunctionInfo> = self
            .functions
            .iter()
            .map(|(name, f)| match f {
                Function::Native { arity, .. } => FunctionInfo {
                    name: name.clone(),
                    arity: *arity,
                    params: Vec::new(),
                    body: None,
                },
                Function::User { params, body } => FunctionInfo {
                    name: name.clone(),
                    arity: params.len(),
                    params: params.clone(),
                    body: Some(body.clone()),
                },
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

fn check_name(name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(SolverError::Syntax(format!("invalid identifier '{}'", name)))
    }
}

fn sorted(map: &HashMap<String, f64>) -> Vec<(String, f64)> {
    let mut v: Vec<(String, f64)> = map.iter().map(|(k, v)| (k.clone(), *v)).collect();
    v.sort_by(|a, b| a.0.cmp(&b.0));
    v
}
