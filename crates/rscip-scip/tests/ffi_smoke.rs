use rscip_core::VarType;
use rscip_scip::{ObjectiveSense, ScipModel, ScipStatus, scip_version};

#[test]
fn test_minimize_simple() {
    // Initialize tracing for diagnostics
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // minimize x subject to x >= 1
    let mut model = ScipModel::new("smoke").expect("failed to create SCIP");
    let x = model
        .add_variable(1.0, f64::INFINITY, 1.0, VarType::Continuous)
        .expect("failed to add variable");
    model
        .set_objective_sense(ObjectiveSense::Minimize)
        .expect("failed to set sense");
    model
        .set_int_param("display/verblevel", 0)
        .expect("failed to silence SCIP");

    assert_eq!(model.num_variables(), 1);
    model.solve(false).expect("solve failed");

    assert_eq!(ScipStatus::from_raw(model.status()), ScipStatus::Optimal);
    let values = model.best_solution_values().expect("missing solution");
    assert!(
        (values[x] - 1.0).abs() < 1e-6,
        "Expected x ~1.0, got {}",
        values[x]
    );
    assert!((model.primal_bound() - 1.0).abs() < 1e-6);
    assert!(model.n_solutions() >= 1);
}

#[test]
fn test_integer_variable_is_enforced() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let mut model = ScipModel::new("integer").expect("failed to create SCIP");
    let x = model
        .add_variable(0.0, 10.0, 1.0, VarType::Integer)
        .expect("failed to add variable");
    let infinity = model.infinity();
    model
        .add_linear_constraint("0", &[x], &[1.0], -infinity, 1.5)
        .expect("failed to add constraint");
    model
        .set_objective_sense(ObjectiveSense::Maximize)
        .expect("failed to set sense");
    model
        .set_int_param("display/verblevel", 0)
        .expect("failed to silence SCIP");

    model.solve(false).expect("solve failed");

    let values = model.best_solution_values().expect("missing solution");
    assert!(
        (values[x] - 1.0).abs() < 1e-6,
        "Expected integer x = 1.0, got {}",
        values[x]
    );
}

#[test]
fn test_concurrent_request_always_solves() {
    // maximize x + y subject to x + y <= 3, x, y integer in [0, 2]
    let mut model = ScipModel::new("concurrent").expect("failed to create SCIP");
    let x = model
        .add_variable(0.0, 2.0, 1.0, VarType::Integer)
        .expect("failed to add variable");
    let y = model
        .add_variable(0.0, 2.0, 1.0, VarType::Integer)
        .expect("failed to add variable");
    let infinity = model.infinity();
    model
        .add_linear_constraint("0", &[x, y], &[1.0, 1.0], -infinity, 3.0)
        .expect("failed to add constraint");
    model
        .set_objective_sense(ObjectiveSense::Maximize)
        .expect("failed to set sense");
    model
        .set_int_param("display/verblevel", 0)
        .expect("failed to silence SCIP");
    model
        .set_int_param("parallel/maxnthreads", 2)
        .expect("failed to set thread count");
    assert!(!model.is_solved());

    model.solve(true).expect("solve failed");

    assert!(model.is_solved());
    assert_eq!(ScipStatus::from_raw(model.status()), ScipStatus::Optimal);
    let values = model.best_solution_values().expect("missing solution");
    assert!((values[x] + values[y] - 3.0).abs() < 1e-6);
}

#[test]
fn test_unknown_parameter_reports_retcode() {
    let mut model = ScipModel::new("params").expect("failed to create SCIP");
    let err = model
        .set_int_param("presolving/does_not_exist/maxrounds", 0)
        .unwrap_err();
    assert_eq!(err.code(), "SCIP_CALL_FAILED");
    assert!(err.to_string().contains("SCIP_PARAMETERUNKNOWN"));
}

#[test]
fn test_infinite_bounds_are_clamped() {
    let mut model = ScipModel::new("bounds").expect("failed to create SCIP");
    assert!(model.infinity() > 0.0 && model.infinity().is_finite());
    model
        .add_variable(f64::NEG_INFINITY, f64::INFINITY, 0.0, VarType::Continuous)
        .expect("infinite bounds should be accepted");
}

#[test]
fn test_version_format_is_stable() {
    let version = scip_version();
    let parts: Vec<&str> = version.split('.').collect();
    assert_eq!(parts.len(), 3, "unexpected version {}", version);
    assert!(
        parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
    );
    assert_eq!(version, scip_version());
}
