use rand::Rng;
use rand::rngs::ThreadRng;
use solver::{Pipeline, Solver, SolverError};

fn same_outcome(expr: &str, a: &Result<f64, SolverError>, b: &Result<f64, SolverError>) {
    match (a, b) {
        (Ok(x), Ok(y)) => {
            if x.is_nan() && y.is_nan() {
                return;
            }
            if x == y {
                return;
            }
            let diff = (x - y).abs();
            assert!(
                diff <= 1e-6 * x.abs().max(1.0),
                "expr='{}' postfix={} ast={} diff={}",
                expr,
                x,
                y,
                diff
            );
        }
        (Err(x), Err(y)) => assert_eq!(
            std::mem::discriminant(x),
            std::mem::discriminant(y),
            "expr='{}' postfix={:?} ast={:?}",
            expr,
            x,
            y
        ),
        _ => panic!("expr='{}' postfix={:?} ast={:?}", expr, a, b),
    }
}

fn random_expr(rng: &mut ThreadRng, depth: u32) -> String {
    if depth == 0 || rng.gen_range(0..4) == 0 {
        return match rng.gen_range(0..5) {
            0 => "a".to_string(),
            1 => "b".to_string(),
            2 => "pi".to_string(),
            3 => format!("{}", rng.gen_range(0..20)),
            _ => format!("{}.{}", rng.gen_range(0..10), rng.gen_range(0..100)),
        };
    }
    let sub = |rng: &mut ThreadRng| random_expr(rng, depth - 1);
    match rng.gen_range(0..11) {
        0 => format!("{} + {}", sub(rng), sub(rng)),
        1 => format!("{} - {}", sub(rng), sub(rng)),
        2 => format!("{} * {}", sub(rng), sub(rng)),
        3 => format!("{} / {}", sub(rng), sub(rng)),
        4 => format!("{} ^ {}", sub(rng), rng.gen_range(0..4)),
        5 => format!("-{}", sub(rng)),
        6 => format!("({})", sub(rng)),
        7 => format!("max({}, {})", sub(rng), sub(rng)),
        8 => format!("abs({})", sub(rng)),
        9 => format!("f({})", sub(rng)),
        _ => format!("{}a", rng.gen_range(1..5)),
    }
}

#[test]
fn pipelines_agree_on_random_expressions() {
    let mut s = Solver::new();
    s.declare_function("f", &["x"], "x^2 + 2*x + 1").unwrap();
    let mut rng = rand::thread_rng();
    for _ in 0..300 {
        let expr = random_expr(&mut rng, 4);
        s.declare_variable("a", rng.gen_range(-10.0..10.0), false).unwrap();
        s.declare_variable("b", rng.gen_range(-10.0..10.0), true).unwrap();
        let x = s.evaluate(&expr, Pipeline::Postfix);
        let y = s.evaluate(&expr, Pipeline::Ast);
        same_outcome(&expr, &x, &y);
    }
}

#[test]
fn pipelines_agree_on_fixed_expressions() {
    let mut s = Solver::new();
    s.declare_variable("x", 2.5, false).unwrap();
    s.declare_function("g", &["x", "y"], "x*y + x + y").unwrap();
    let exprs = [
        "3 + 4 * 2 / (1 - 5) ^ 2 ^ 3",
        "-x^2 + -2^-x",
        "g(x, -x) / g(1, 1)",
        "2x^2 - 3(x - 1)",
        "---x * --x",
        "x / (x - 2.5)",
        "ln(x - 10)",
        "g(1)",
        "missing + 1",
        "nofunc(x)",
        "(-8) ^ (1 / 3)",
        "max(x, ",
        "x x",
    ];
    for expr in exprs {
        let a = s.evaluate(expr, Pipeline::Postfix);
        let b = s.evaluate(expr, Pipeline::Ast);
        same_outcome(expr, &a, &b);
    }
}

#[test]
fn repeated_evaluation_is_deterministic() {
    let mut s = Solver::new();
    s.declare_variable("x", 0.3, true).unwrap();
    let first = s.evaluate("sin(x) ^ 2 + cos(x) ^ 2 + x / 7", Pipeline::Ast).unwrap();
    for _ in 0..50 {
        assert_eq!(
            s.evaluate("sin(x) ^ 2 + cos(x) ^ 2 + x / 7", Pipeline::Ast).unwrap(),
            first
        );
        assert_eq!(
            s.evaluate("sin(x) ^ 2 + cos(x) ^ 2 + x / 7", Pipeline::Postfix).unwrap(),
            first
        );
    }
}
