use std::sync::Arc;
use std::thread;
use solver::{Pipeline, Solver, SolverError};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn solver_is_send_and_sync() {
    assert_send_sync::<Solver>();
    assert_send_sync::<SolverError>();
}

#[test]
fn shared_solver_evaluates_in_parallel() -> Result<(), SolverError> {
    let mut solver = Solver::new();
    solver.declare_variable("offset", 0.5, true)?;
    solver.declare_function("f", &["x"], "x^2 + 2*x + 1")?;

    // Declarations are done; share it read-only.
    let shared = Arc::new(solver);

    let mut handles = vec![];

    for i in 0..8 {
        let s = Arc::clone(&shared);

        let handle = thread::spawn(move || {
            // Each thread sweeps its own slice of values.
            let xs: Vec<f64> = (0..50).map(|k| (i * 50 + k) as f64).collect();
            let pipeline = if i % 2 == 0 {
                Pipeline::Postfix
            } else {
                Pipeline::Ast
            };
            for _ in 0..20 {
                let ys = s
                    .evaluate_range_with("x", &xs, "f(x) + offset", pipeline)
                    .unwrap();
                for (x, y) in xs.iter().zip(&ys) {
                    assert_eq!(*y, (x + 1.0) * (x + 1.0) + 0.5);
                }
                assert_eq!(s.evaluate("f(2)", pipeline).unwrap(), 9.0);
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().unwrap();
    }

    Ok(())
}

#[test]
fn concurrent_cache_churn_stays_bounded() {
    let shared = Arc::new(Solver::with_config(solver::SolverConfig {
        cache_capacity: 8,
        ..Default::default()
    }));
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let s = Arc::clone(&shared);
            thread::spawn(move || {
                for k in 0..200 {
                    let expr = format!("{} * {}", t, k % 16);
                    let want = (t * (k % 16)) as f64;
                    assert_eq!(s.evaluate(&expr, Pipeline::Postfix).unwrap(), want);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert!(shared.cached_len() <= 8);
}
