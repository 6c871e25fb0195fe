//! Reference scenarios exercised through the public engine surface.

use picsy_core::config::{EngineConfig, EngineConfigBuilder};
use picsy_core::types::{Participant, SolverStatus};
use picsy_engine::{Engine, LikeOutcome};
use picsy_tests::helpers::*;

#[test]
fn like_then_recovery_reference_walkthrough() {
    let mut engine = abc_engine();

    // like(A, B) moves the default alpha of 0.05: row A becomes
    // [0.95, 0.05, 0.0].
    assert!(engine.like("a", "b").unwrap().is_transferred());
    assert_eq!(engine.matrix().row(0), &[0.95, 0.05, 0.0]);
    assert_row_stochastic(&engine);
    assert!(engine.solver_status().is_converged());

    // like(A, A) is a defined no-op: nothing moves, nothing is logged.
    let outcome = engine.like("a", "a").unwrap();
    assert_eq!(outcome, LikeOutcome::SelfLike);
    assert_eq!(engine.matrix().row(0), &[0.95, 0.05, 0.0]);
    assert_eq!(engine.like_log(10).len(), 1);

    // naturalRecovery(0.1) shrinks A's outbound weight 0.05 → 0.045 and
    // restores the diagonal 0.95 → 0.955.
    engine.natural_recovery_at(0.1).unwrap();
    assert!((engine.matrix().get(0, 1) - 0.045).abs() < 1e-12);
    assert!((engine.budget_of("a").unwrap() - 0.955).abs() < 1e-12);
    assert_row_stochastic(&engine);
}

#[test]
fn contribution_sums_to_n_after_converged_solves() {
    let mut engine = abc_engine();
    engine.like("a", "b").unwrap();
    engine.like("b", "c").unwrap();
    engine.natural_recovery().unwrap();

    assert!(engine.solver_status().is_converged());
    let sum: f64 = engine.status().iter().map(|r| r.contribution.unwrap()).sum();
    assert!((sum - 3.0).abs() < 1e-4, "contribution sum {sum}");
}

#[test]
fn insufficient_budget_leaves_no_trace() {
    let mut engine = abc_engine();

    // Drain Alice to a budget of ~0.02 with seven likes of 0.14 each.
    engine.set_alpha_like("a", 0.14).unwrap();
    for _ in 0..7 {
        assert!(engine.like("a", "b").unwrap().is_transferred());
    }
    assert!((engine.budget_of("a").unwrap() - 0.02).abs() < 1e-9);

    // An 0.05 like no longer fits.
    engine.set_alpha_like("a", 0.05).unwrap();
    let matrix_before = engine.matrix().clone();
    let log_before = engine.like_log(100).len();

    let outcome = engine.like("a", "c").unwrap();
    assert!(matches!(outcome, LikeOutcome::InsufficientBudget { required, .. }
        if required == 0.05));
    assert_eq!(engine.matrix(), &matrix_before, "matrix unchanged");
    assert_eq!(engine.like_log(100).len(), log_before, "no log entry");
}

#[test]
fn iteration_cap_is_flagged_not_fatal() {
    let config = EngineConfigBuilder::new()
        .max_iterations(1)
        .tolerance(1e-12)
        .build()
        .unwrap();
    let mut engine = Engine::new(
        vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob"),
            Participant::new("c", "Charlie"),
        ],
        config,
    )
    .unwrap();

    engine.like("a", "b").unwrap();
    match engine.solver_status() {
        SolverStatus::MaxIterations { residual } => assert!(residual > 0.0),
        other => panic!("expected MaxIterations, got {other:?}"),
    }
    // The flagged vector is still readable.
    assert!(engine.contribution_of("b").unwrap().is_some());
}

#[test]
fn single_participant_holds_full_contribution() {
    let engine = Engine::new(
        vec![Participant::new("solo", "Solo")],
        EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(engine.contribution_of("solo").unwrap(), Some(1.0));
    assert_eq!(engine.recompute_count(), 0, "no solve for n = 1");
    assert!(engine.matrix().computation_matrix().is_none());
}

#[test]
fn reinitialize_is_full_replacement() {
    let mut engine = abc_engine();
    engine.like("a", "b").unwrap();
    engine.natural_recovery().unwrap();

    let carried = engine.config().to_builder().gamma_rate(0.2).build().unwrap();
    engine.reinitialize(roster(5), carried).unwrap();

    assert_eq!(engine.participants().len(), 5);
    assert_eq!(engine.config().gamma_rate, 0.2);
    assert_eq!(
        engine.config().alpha_like_default,
        EngineConfig::default().alpha_like_default,
        "unspecified fields carry over"
    );
    assert!(engine.like_log(10).is_empty());
    for row in engine.status() {
        assert_eq!(row.budget, 1.0);
        assert!((row.contribution.unwrap() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn purchasing_power_is_budget_times_contribution() {
    let mut engine = abc_engine();
    engine.like("a", "b").unwrap();

    for row in engine.status() {
        let expected = row.budget * row.contribution.unwrap();
        assert_eq!(row.purchasing_power.unwrap(), expected);
    }
    let direct = engine.purchasing_power_of("a").unwrap().unwrap();
    let budget = engine.budget_of("a").unwrap();
    let contribution = engine.contribution_of("a").unwrap().unwrap();
    assert!((direct - budget * contribution).abs() < 1e-12);
}

#[test]
fn status_rows_serialize_for_hosts() {
    let mut engine = abc_engine();
    engine.like("a", "b").unwrap();

    let json = serde_json::to_string(&engine.status()).unwrap();
    assert!(json.contains("\"id\":\"a\""));
    assert!(json.contains("purchasing_power"));

    let log_json = serde_json::to_string(&engine.like_log(1)).unwrap();
    assert!(log_json.contains("\"liker_id\":\"a\""));
}
