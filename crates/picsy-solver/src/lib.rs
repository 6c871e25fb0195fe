//! # picsy-solver — Power-iteration contribution solver.
//!
//! Pure computation, no storage, no IO. Implements the
//! [`picsy_core::traits::ContributionSolver`] trait:
//! - **Fixed-point iteration**: repeated left multiplication `c · E′` with
//!   renormalization to `Σc = n` after every step.
//! - **L1 convergence test**: the solve terminates when the absolute
//!   difference between successive iterates drops below tolerance.
//! - **Bounded failure**: a collapsed iterate sum aborts as degenerate, and
//!   exhausting the iteration cap returns the last iterate flagged as
//!   non-converged. Neither is an error.

pub mod power;

pub use power::PowerIteration;
