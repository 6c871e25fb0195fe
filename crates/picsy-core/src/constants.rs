//! Engine constants. All evaluation weights are dimensionless reals in [0, 1].

/// Default evaluation weight transferred by a single like.
pub const DEFAULT_ALPHA_LIKE: f64 = 0.05;

/// System-wide ceiling on the per-like transfer amount.
///
/// Per-liker overrides are clamped to this value at use time, and the
/// configured default must not exceed it.
pub const DEFAULT_ALPHA_LIKE_MAX: f64 = 0.3;

/// Default natural-recovery rate: the fraction of every outbound evaluation
/// weight returned to the liker's own budget per recovery pass.
pub const DEFAULT_GAMMA_RATE: f64 = 0.1;

/// Default iteration cap for the contribution fixed-point computation.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default convergence tolerance: L1 distance between successive iterates.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Absolute tolerance for the row-stochastic invariant. Every row of the
/// evaluation matrix must sum to 1.0 within this bound at all observable
/// points.
pub const ROW_SUM_TOLERANCE: f64 = 1e-6;

/// Below this absolute value, the un-normalized iterate sum is treated as
/// zero and the solve aborts as degenerate.
pub const DEGENERATE_SUM_EPS: f64 = 1e-8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_mutually_consistent() {
        assert!(DEFAULT_ALPHA_LIKE > 0.0);
        assert!(DEFAULT_ALPHA_LIKE <= DEFAULT_ALPHA_LIKE_MAX);
        assert!(DEFAULT_ALPHA_LIKE_MAX < 1.0);
        assert!((0.0..1.0).contains(&DEFAULT_GAMMA_RATE));
    }

    #[test]
    fn tolerances_ordered() {
        // The solver tolerance is tighter than the invariant tolerance, so a
        // converged vector always satisfies the observable bounds.
        assert!(DEFAULT_TOLERANCE < ROW_SUM_TOLERANCE);
        assert!(DEGENERATE_SUM_EPS < ROW_SUM_TOLERANCE);
    }
}
