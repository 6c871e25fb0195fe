//! Domain types: participants, like records, solver outcomes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A participant in the mutual-evaluation economy.
///
/// Identity is the opaque `id` string; `label` is display-only. Both are
/// immutable once the participant is registered; the roster can only change
/// through a full engine reinitialization.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Participant {
    /// Unique, non-empty identifier.
    pub id: String,
    /// Human-readable display name.
    pub label: String,
}

impl Participant {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into() }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.id)
    }
}

/// An immutable record of a successful like, kept for observability only.
/// The contribution computation never reads the log.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LikeRecord {
    /// When the transfer was applied.
    pub timestamp: DateTime<Utc>,
    pub liker_id: String,
    pub liker_label: String,
    pub target_id: String,
    pub target_label: String,
    /// Evaluation weight actually moved (after clamping).
    pub amount: f64,
}

/// Host-facing snapshot row for one participant.
///
/// `contribution` and `purchasing_power` are `None` while the cached
/// contribution vector is degenerate.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParticipantStatus {
    pub id: String,
    pub label: String,
    pub contribution: Option<f64>,
    /// Self-retained evaluation weight (the diagonal cell).
    pub budget: f64,
    /// `budget * contribution`, a derived display metric.
    pub purchasing_power: Option<f64>,
}

/// Terminal state of a contribution solve.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum SolverStatus {
    /// The L1 difference between successive iterates fell below tolerance.
    Converged {
        /// Iterations performed (1-based count of multiply-normalize passes).
        iterations: u32,
        /// Final L1 difference.
        residual: f64,
    },
    /// The iteration cap was reached first. The last iterate is still
    /// usable; callers decide whether to trust it.
    MaxIterations { residual: f64 },
    /// The un-normalized iterate sum collapsed to ~0; no meaningful
    /// stationary distribution exists for the current matrix.
    Degenerate {
        /// Iteration at which the collapse was detected (1-based).
        iteration: u32,
    },
}

impl SolverStatus {
    /// Whether the accompanying vector holds finite, normalized values.
    pub fn is_usable(&self) -> bool {
        !matches!(self, SolverStatus::Degenerate { .. })
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, SolverStatus::Converged { .. })
    }
}

/// Result of one contribution solve: the vector and how it terminated.
///
/// On `Degenerate` the vector is empty: there is no partial result worth
/// keeping once the iterate sum has collapsed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SolverOutcome {
    pub values: Vec<f64>,
    pub status: SolverStatus,
}

impl SolverOutcome {
    /// A degenerate outcome detected at the given iteration.
    pub fn degenerate(iteration: u32) -> Self {
        Self { values: Vec::new(), status: SolverStatus::Degenerate { iteration } }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_display() {
        let p = Participant::new("u-1", "Alice");
        assert_eq!(p.to_string(), "Alice (u-1)");
    }

    #[test]
    fn status_usability() {
        assert!(SolverStatus::Converged { iterations: 3, residual: 1e-9 }.is_usable());
        assert!(SolverStatus::MaxIterations { residual: 0.5 }.is_usable());
        assert!(!SolverStatus::Degenerate { iteration: 1 }.is_usable());
    }

    #[test]
    fn only_converged_reports_converged() {
        assert!(SolverStatus::Converged { iterations: 1, residual: 0.0 }.is_converged());
        assert!(!SolverStatus::MaxIterations { residual: 0.1 }.is_converged());
        assert!(!SolverStatus::Degenerate { iteration: 2 }.is_converged());
    }

    #[test]
    fn like_record_round_trips_through_json() {
        let record = LikeRecord {
            timestamp: Utc::now(),
            liker_id: "a".into(),
            liker_label: "Alice".into(),
            target_id: "b".into(),
            target_label: "Bob".into(),
            amount: 0.05,
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: LikeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
