//! # picsy-engine — Engine facade for the PICSY contribution system.
//!
//! The [`Engine`] composes the participant roster, the row-stochastic
//! evaluation matrix, the like log, and a contribution solver into one unit
//! of mutable state: every mutation (like, natural recovery, reinitialize)
//! runs to completion and refreshes the cached contribution vector before
//! returning. [`SharedEngine`] wraps an engine for multi-threaded hosts.

pub mod engine;
pub mod roster;
pub mod shared;

pub use engine::{Engine, LikeOutcome};
pub use roster::Roster;
pub use shared::SharedEngine;
