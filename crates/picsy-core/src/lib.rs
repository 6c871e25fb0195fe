//! # picsy-core
//! Foundation types for the PICSY contribution engine: the row-stochastic
//! evaluation matrix, the solver trait, the error taxonomy, and the engine
//! configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod matrix;
pub mod traits;
pub mod types;
