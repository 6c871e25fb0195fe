//! Trait interfaces between the PICSY crates.
//!
//! [`ContributionSolver`] is the seam between the foundation crate and the
//! solver crate: the engine composes any implementation, the production
//! power-iteration solver lives in picsy-solver.

use crate::matrix::ComputationMatrix;
use crate::types::SolverOutcome;

/// Pure computation of the contribution vector from a computation matrix.
///
/// Implementations must be deterministic for fixed inputs and must never
/// panic on a well-formed matrix: degenerate inputs and iteration-cap
/// exhaustion are reported through [`SolverOutcome::status`]. The engine
/// handles n ≤ 1 itself, so `matrix.n() ≥ 2` always holds here.
pub trait ContributionSolver: Send + Sync {
    /// Compute the left fixed point of `c · E′`, normalized to `Σc = n`.
    fn solve(&self, matrix: &ComputationMatrix, max_iterations: u32, tolerance: f64)
    -> SolverOutcome;
}
