//! Shared test helpers for the integration suites.

use picsy_core::config::EngineConfig;
use picsy_core::types::Participant;
use picsy_engine::Engine;

/// Participant with a generated label (`P0`, `P1`, …).
pub fn participant(index: usize) -> Participant {
    Participant::new(format!("u-{index}"), format!("P{index}"))
}

/// Roster of `n` generated participants.
pub fn roster(n: usize) -> Vec<Participant> {
    (0..n).map(participant).collect()
}

/// The reference three-participant engine: Alice, Bob, Charlie, identity
/// matrix, default configuration.
pub fn abc_engine() -> Engine {
    Engine::new(
        vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob"),
            Participant::new("c", "Charlie"),
        ],
        EngineConfig::default(),
    )
    .unwrap()
}

/// Assert every evaluation-matrix row of `engine` sums to 1 within the
/// observable tolerance.
pub fn assert_row_stochastic(engine: &Engine) {
    assert!(
        engine.matrix().is_row_stochastic(),
        "row-stochastic invariant violated"
    );
}
