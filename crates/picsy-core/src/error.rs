//! Error types for the PICSY engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("participant id is empty")] EmptyId,
    #[error("participant '{0}' has an empty label")] EmptyLabel(String),
    #[error("duplicate participant id: {0}")] DuplicateId(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("index out of range: {index} >= {len}")] IndexOutOfRange { index: usize, len: usize },
    #[error("self transfer at index {0}")] SelfTransfer(usize),
    #[error("transfer amount must be positive, got {0}")] NonPositiveAmount(f64),
    #[error("insufficient budget: have {have}, need {need}")] InsufficientBudget { have: f64, need: f64 },
    #[error("decay rate must be in [0, 1), got {0}")] InvalidRate(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("alpha_like_default {value} outside (0, {max}]")] AlphaDefaultOutOfRange { value: f64, max: f64 },
    #[error("alpha_like_max {0} outside (0, 1)")] AlphaMaxOutOfRange(f64),
    #[error("gamma_rate {0} outside [0, 1)")] GammaOutOfRange(f64),
    #[error("max_iterations must be at least 1")] ZeroMaxIterations,
    #[error("tolerance must be positive, got {0}")] NonPositiveTolerance(f64),
    #[error("per-liker alpha {value} outside (0, {max}]")] AlphaOverrideOutOfRange { value: f64, max: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("unknown participant: {0}")] UnknownParticipant(String),
    #[error(transparent)] Roster(#[from] RosterError),
    #[error(transparent)] Matrix(#[from] MatrixError),
    #[error(transparent)] Config(#[from] ConfigError),
}
