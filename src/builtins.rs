use crate::error::{Result, SolverError};

/// Signature of a native function. The slice length always equals the
/// arity the function was registered with.
pub type NativeFn = fn(&[f64]) -> Result<f64>;

pub(crate) struct BuiltinDef {
    pub(crate) name: &'static str,
    pub(crate) arity: usize,
    pub(crate) func: NativeFn,
}

macro_rules! builtin_functions {
    ( $( $name:literal => { arity: $arity:expr, func: $func:expr $(,)? } ),* $(,)? ) => {
        pub(crate) static BUILTIN_TABLE: &[BuiltinDef] = &[
            $( BuiltinDef { name: $name, arity: $arity, func: $func }, )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[ $( $name, )* ];
    };
}

builtin_functions! {
    "sin"  => { arity: 1, func: sin },
    "cos"  => { arity: 1, func: cos },
    "tan"  => { arity: 1, func: tan },
    "exp"  => { arity: 1, func: exp },
    "ln"   => { arity: 1, func: ln },
    "log"  => { arity: 2, func: log },
    "sqrt" => { arity: 1, func: sqrt },
    "abs"  => { arity: 1, func: abs },
    "max"  => { arity: 2, func: max },
    "min"  => { arity: 2, func: min },
}

fn sin(args: &[f64]) -> Result<f64> {
    Ok(args[0].sin())
}

fn cos(args: &[f64]) -> Result<f64> {
    Ok(args[0].cos())
}

fn tan(args: &[f64]) -> Result<f64> {
    Ok(args[0].tan())
}

fn exp(args: &[f64]) -> Result<f64> {
    Ok(args[0].exp())
}

fn abs(args: &[f64]) -> Result<f64> {
    Ok(args[0].abs())
}

fn max(args: &[f64]) -> Result<f64> {
    Ok(args[0].max(args[1]))
}

fn min(args: &[f64]) -> Result<f64> {
    Ok(args[0].min(args[1]))
}

fn ln(args: &[f64]) -> Result<f64> {
    let x = args[0];
    if x <= 0.0 {
        return Err(SolverError::Domain(format!("ln({}) is undefined", x)));
    }
    Ok(x.ln())
}

/// `log(x, base)`
fn log(args: &[f64]) -> Result<f64> {
    let (x, base) = (args[0], args[1]);
    if x <= 0.0 {
        return Err(SolverError::Domain(format!("log of non-positive value {}", x)));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(SolverError::Domain(format!("invalid logarithm base {}", base)));
    }
    Ok(x.ln() / base.ln())
}

fn sqrt(args: &[f64]) -> Result<f64> {
    let x = args[0];
    if x < 0.0 {
        return Err(SolverError::Domain(format!("sqrt({}) is undefined", x)));
    }
    Ok(x.sqrt())
}
