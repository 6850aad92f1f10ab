use solver::{Pipeline, Solver, SolverError};

const PIPELINES: [Pipeline; 2] = [Pipeline::Postfix, Pipeline::Ast];

fn assert_syntax(s: &Solver, expr: &str) {
    for p in PIPELINES {
        match s.evaluate(expr, p) {
            Err(SolverError::Syntax(_)) => {}
            other => panic!("{:?} on {:?}: expected syntax error, got {:?}", p, expr, other),
        }
    }
}

#[test]
fn division_by_zero_through_variables() {
    let mut s = Solver::new();
    s.declare_variable("x", 5.0, false).unwrap();
    s.declare_variable("y", 10.0, false).unwrap();
    for p in PIPELINES {
        match s.evaluate("x / (y - 10)", p).unwrap_err() {
            SolverError::DivisionByZero => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }
    assert_eq!(SolverError::DivisionByZero.to_string(), "division by zero");
}

#[test]
fn unknown_function_error() {
    let s = Solver::new();
    for p in PIPELINES {
        match s.evaluate("undefinedFunc(5)", p).unwrap_err() {
            SolverError::UndefinedFunction(name) => assert_eq!(name, "undefinedFunc"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn unknown_symbol_error() {
    let s = Solver::new();
    for p in PIPELINES {
        match s.evaluate("1 + nope", p).unwrap_err() {
            SolverError::UndefinedSymbol(name) => assert_eq!(name, "nope"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn arity_error_on_user_function() {
    let mut s = Solver::new();
    s.declare_function("f", &["x"], "x^2 + 2*x + 1").unwrap();
    for p in PIPELINES {
        match s.evaluate("f(1, 2)", p).unwrap_err() {
            SolverError::Arity {
                name,
                expected,
                got,
            } => {
                assert_eq!(name, "f");
                assert_eq!(expected, 1);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn undefined_symbol_inside_function_body() {
    let mut s = Solver::new();
    // declaring is fine; `z` is only looked up when n is called
    s.declare_function("n", &["x"], "x + z").unwrap();
    for p in PIPELINES {
        match s.evaluate("n(1)", p).unwrap_err() {
            SolverError::UndefinedSymbol(name) => assert_eq!(name, "z"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn malformed_expressions_are_syntax_errors() {
    let s = Solver::new();
    for expr in [
        "", "   ", "1 +", "(1 + 2", "1 + 2)", "()", "* 3", "+3", "1 2", "1,2", "max(1,)",
        "max(,1)", "(1)(2)", "2 3 +", "f(", "sin 2", "1..2",
    ] {
        assert_syntax(&s, expr);
    }
}

#[test]
fn unexpected_character_reports_position() {
    let s = Solver::new();
    for p in PIPELINES {
        match s.evaluate("2 $ 3", p).unwrap_err() {
            SolverError::Syntax(msg) => {
                assert!(msg.contains("unexpected character '$'"), "{}", msg);
                assert!(msg.contains("position 2"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

#[test]
fn function_redefinition_is_rejected() {
    let mut s = Solver::new();
    s.declare_function("f", &["x"], "x + 1").unwrap();
    match s.declare_function("f", &["y"], "y").unwrap_err() {
        SolverError::Redefinition(name) => assert_eq!(name, "f"),
        other => panic!("unexpected error: {:?}", other),
    }
    // builtins are functions too
    match s.declare_function("sin", &["x"], "x").unwrap_err() {
        SolverError::Redefinition(name) => assert_eq!(name, "sin"),
        other => panic!("unexpected error: {:?}", other),
    }
    // the original definition survives
    assert_eq!(s.evaluate("f(1)", Pipeline::Ast).unwrap(), 2.0);
}

#[test]
fn invalid_declarations_are_syntax_errors() {
    let mut s = Solver::new();
    let bad = [
        s.declare_variable("2x", 1.0, false),
        s.declare_variable("a b", 1.0, true),
        s.declare_constant("", 1.0),
        s.declare_function("g", &["x", "x"], "x"),
        s.declare_function("g", &["1a"], "1"),
        s.declare_function("g", &["x"], "x +"),
        s.declare_function("g(", &["x"], "x"),
    ];
    for r in bad {
        match r {
            Err(SolverError::Syntax(_)) => {}
            other => panic!("expected syntax error, got {:?}", other),
        }
    }
    // nothing was declared
    assert!(s.list_functions().iter().all(|f| f.name != "g"));
}

#[test]
fn domain_errors_from_builtins() {
    let s = Solver::new();
    for expr in ["ln(0)", "ln(-1)", "sqrt(-1)", "log(8, 1)", "log(-8, 2)", "log(8, 0)"] {
        for p in PIPELINES {
            match s.evaluate(expr, p) {
                Err(SolverError::Domain(_)) => {}
                other => panic!("{}: unexpected result {:?}", expr, other),
            }
        }
    }
}
