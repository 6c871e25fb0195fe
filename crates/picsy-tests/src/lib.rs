//! Integration test suite for the PICSY engine.
//!
//! The tests in `tests/` exercise the whole stack (roster, matrix, solver,
//! facade) through the public engine surface, including the concrete
//! reference scenarios and property-based invariant checks.

pub mod helpers;
