//! Power-iteration solver implementing the [`ContributionSolver`] trait.

use tracing::{debug, warn};

use picsy_core::constants::DEGENERATE_SUM_EPS;
use picsy_core::matrix::ComputationMatrix;
use picsy_core::traits::ContributionSolver;
use picsy_core::types::{SolverOutcome, SolverStatus};

/// The production contribution solver.
///
/// Starts from the uniform vector `c₀ = (1, …, 1)`, which already sits at
/// the target normalization `Σc = n`, and iterates `c · E′`, rescaling the
/// result to `Σc = n` each pass. Deterministic for fixed inputs; progress
/// is emitted as structured `tracing` events rather than returned.
#[derive(Debug, Clone, Default)]
pub struct PowerIteration;

impl PowerIteration {
    /// Create a new PowerIteration solver.
    pub fn new() -> Self {
        Self
    }
}

impl ContributionSolver for PowerIteration {
    fn solve(
        &self,
        matrix: &ComputationMatrix,
        max_iterations: u32,
        tolerance: f64,
    ) -> SolverOutcome {
        let n = matrix.n();
        let target_sum = n as f64;
        let mut c = vec![1.0; n];
        let mut residual = f64::INFINITY;

        for iteration in 1..=max_iterations {
            let unnormalized = matrix.propagate(&c);
            let sum: f64 = unnormalized.iter().sum();
            if sum.abs() <= DEGENERATE_SUM_EPS {
                warn!(iteration, sum, "iterate sum collapsed, aborting as degenerate");
                return SolverOutcome::degenerate(iteration);
            }

            let scale = target_sum / sum;
            residual = 0.0;
            for (cell, raw) in c.iter_mut().zip(&unnormalized) {
                let next = raw * scale;
                residual += (next - *cell).abs();
                *cell = next;
            }
            debug!(iteration, residual, "power iteration step");

            if residual < tolerance {
                debug!(iterations = iteration, residual, "contribution solve converged");
                return SolverOutcome {
                    values: c,
                    status: SolverStatus::Converged { iterations: iteration, residual },
                };
            }
        }

        warn!(max_iterations, residual, "iteration cap reached without convergence");
        SolverOutcome { values: c, status: SolverStatus::MaxIterations { residual } }
    }
}
