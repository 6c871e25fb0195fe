//! The engine facade: roster, matrix, log, and solver composed into one
//! unit of mutable state.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use picsy_core::config::EngineConfig;
use picsy_core::error::{ConfigError, EngineError, MatrixError};
use picsy_core::matrix::EvaluationMatrix;
use picsy_core::traits::ContributionSolver;
use picsy_core::types::{
    LikeRecord, Participant, ParticipantStatus, SolverOutcome, SolverStatus,
};
use picsy_solver::PowerIteration;
use std::collections::HashMap;

use crate::roster::Roster;

/// Result of a like attempt. The two rejection variants are defined
/// no-op outcomes, not errors: state, log, and cached contribution are
/// untouched when they occur.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum LikeOutcome {
    /// Evaluation weight was moved and contributions recomputed.
    Transferred {
        /// The amount actually moved (after clamping to the system max).
        amount: f64,
    },
    /// Liker and target are the same participant.
    SelfLike,
    /// The liker's self-retained budget does not cover the transfer.
    InsufficientBudget { budget: f64, required: f64 },
}

impl LikeOutcome {
    /// The boolean caller surface: did evaluation weight move?
    pub fn is_transferred(&self) -> bool {
        matches!(self, LikeOutcome::Transferred { .. })
    }
}

/// The PICSY engine.
///
/// Owns the roster-to-index mapping, the evaluation matrix, the append-only
/// like log, and the cached contribution vector. Every public mutation runs
/// to completion without suspension; the engine requires exclusive access
/// per operation (see [`crate::SharedEngine`] for a locked handle).
///
/// # Examples
///
/// ```
/// use picsy_core::config::EngineConfig;
/// use picsy_core::types::Participant;
/// use picsy_engine::Engine;
///
/// let roster = vec![
///     Participant::new("a", "Alice"),
///     Participant::new("b", "Bob"),
///     Participant::new("c", "Charlie"),
/// ];
/// let mut engine = Engine::new(roster, EngineConfig::default()).unwrap();
///
/// assert!(engine.like("a", "b").unwrap().is_transferred());
/// assert!(engine.contribution_of("b").unwrap().unwrap() > 1.0);
/// ```
pub struct Engine {
    roster: Roster,
    config: EngineConfig,
    matrix: EvaluationMatrix,
    solver: Box<dyn ContributionSolver>,
    alpha_overrides: HashMap<String, f64>,
    like_log: Vec<LikeRecord>,
    contribution: SolverOutcome,
    recompute_count: u64,
    recovery_epoch: u64,
}

impl Engine {
    /// Build an engine with the production power-iteration solver.
    ///
    /// Validates the roster and the configuration, initializes the matrix
    /// to the identity, and computes the initial contribution vector.
    pub fn new(participants: Vec<Participant>, config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_solver(participants, config, Box::new(PowerIteration::new()))
    }

    /// Build an engine with a caller-supplied solver.
    pub fn with_solver(
        participants: Vec<Participant>,
        config: EngineConfig,
        solver: Box<dyn ContributionSolver>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let roster = Roster::new(participants)?;
        let matrix = EvaluationMatrix::identity(roster.len());
        let mut engine = Self {
            roster,
            config,
            matrix,
            solver,
            alpha_overrides: HashMap::new(),
            like_log: Vec::new(),
            contribution: SolverOutcome {
                values: Vec::new(),
                status: SolverStatus::Converged { iterations: 0, residual: 0.0 },
            },
            recompute_count: 0,
            recovery_epoch: 0,
        };
        engine.recompute();
        info!(participants = engine.roster.len(), "engine initialized");
        Ok(engine)
    }

    fn resolve(&self, id: &str) -> Result<usize, EngineError> {
        self.roster
            .index_of(id)
            .ok_or_else(|| EngineError::UnknownParticipant(id.to_owned()))
    }

    /// Per-like transfer amount for a liker: their override if set,
    /// otherwise the configured default, clamped to the system maximum.
    fn effective_alpha(&self, liker_id: &str) -> f64 {
        let alpha = self
            .alpha_overrides
            .get(liker_id)
            .copied()
            .unwrap_or(self.config.alpha_like_default);
        alpha.min(self.config.alpha_like_max)
    }

    /// Refresh the cached contribution vector from the current matrix.
    ///
    /// For n ≤ 1 the matrix transform is skipped entirely: a single
    /// participant trivially holds the full contribution of 1.0.
    fn recompute(&mut self) {
        let n = self.roster.len();
        if n <= 1 {
            self.contribution = SolverOutcome {
                values: vec![1.0; n],
                status: SolverStatus::Converged { iterations: 0, residual: 0.0 },
            };
            return;
        }
        let computation = self
            .matrix
            .computation_matrix()
            .expect("computation matrix exists for n > 1");
        self.contribution =
            self.solver
                .solve(&computation, self.config.max_iterations, self.config.tolerance);
        self.recompute_count += 1;
    }

    // --- mutations ---

    /// Transfer evaluation weight from `liker_id` to `target_id`.
    ///
    /// Unknown ids fail with [`EngineError::UnknownParticipant`]. Self-likes
    /// and insufficient budget are reported as [`LikeOutcome`] values with
    /// no state change. On success the like is logged and the contribution
    /// vector recomputed (the recompute is skipped when n ≤ 1).
    pub fn like(&mut self, liker_id: &str, target_id: &str) -> Result<LikeOutcome, EngineError> {
        let liker = self.resolve(liker_id)?;
        let target = self.resolve(target_id)?;
        if liker == target {
            debug!(id = %liker_id, "self-like rejected");
            return Ok(LikeOutcome::SelfLike);
        }

        let amount = self.effective_alpha(liker_id);
        match self.matrix.transfer(liker, target, amount) {
            Ok(()) => {
                self.like_log.push(LikeRecord {
                    timestamp: Utc::now(),
                    liker_id: liker_id.to_owned(),
                    liker_label: self.roster.get(liker).label.clone(),
                    target_id: target_id.to_owned(),
                    target_label: self.roster.get(target).label.clone(),
                    amount,
                });
                info!(liker = %liker_id, target = %target_id, amount, "like transferred");
                self.recompute();
                Ok(LikeOutcome::Transferred { amount })
            }
            Err(MatrixError::InsufficientBudget { have, need }) => {
                debug!(liker = %liker_id, budget = have, required = need, "like rejected");
                Ok(LikeOutcome::InsufficientBudget { budget: have, required: need })
            }
            // Unreachable with correct id resolution.
            Err(other) => Err(other.into()),
        }
    }

    /// Apply natural recovery at the configured gamma rate.
    pub fn natural_recovery(&mut self) -> Result<(), EngineError> {
        self.natural_recovery_at(self.config.gamma_rate)
    }

    /// Apply natural recovery at an explicit rate in `[0, 1)`: every
    /// outbound evaluation weight shrinks by the rate and the released
    /// weight returns to the owner's budget. Recomputes contributions.
    pub fn natural_recovery_at(&mut self, rate: f64) -> Result<(), EngineError> {
        self.matrix.decay(rate)?;
        self.recovery_epoch += 1;
        info!(rate, epoch = self.recovery_epoch, "natural recovery applied");
        self.recompute();
        Ok(())
    }

    /// Replace roster, matrix, log, per-liker overrides, and configuration
    /// in one step, equivalent to destroying and reconstructing the
    /// engine. On any validation failure the current state is untouched.
    ///
    /// Callers express partial reconfiguration by building the new config
    /// from the previous one: `engine.config().to_builder()…build()?`.
    pub fn reinitialize(
        &mut self,
        participants: Vec<Participant>,
        config: EngineConfig,
    ) -> Result<(), EngineError> {
        config.validate()?;
        let roster = Roster::new(participants)?;
        info!(participants = roster.len(), "engine reinitialized");
        self.matrix = EvaluationMatrix::identity(roster.len());
        self.roster = roster;
        self.config = config;
        self.alpha_overrides.clear();
        self.like_log.clear();
        self.recompute_count = 0;
        self.recovery_epoch = 0;
        self.recompute();
        Ok(())
    }

    /// Set a per-liker transfer amount, validated against the system
    /// maximum at write time (and clamped again at use time, should the
    /// maximum shrink later).
    pub fn set_alpha_like(&mut self, liker_id: &str, alpha: f64) -> Result<(), EngineError> {
        self.resolve(liker_id)?;
        if !(0.0 < alpha && alpha <= self.config.alpha_like_max) {
            return Err(ConfigError::AlphaOverrideOutOfRange {
                value: alpha,
                max: self.config.alpha_like_max,
            }
            .into());
        }
        self.alpha_overrides.insert(liker_id.to_owned(), alpha);
        Ok(())
    }

    /// Change the natural-recovery rate, keeping every other parameter.
    /// All-or-nothing: an out-of-range rate leaves the configuration as is.
    pub fn set_gamma_rate(&mut self, rate: f64) -> Result<(), EngineError> {
        self.config = self.config.to_builder().gamma_rate(rate).build()?;
        Ok(())
    }

    // --- queries ---

    /// Current contribution score for a participant, `None` while the
    /// cached vector is degenerate.
    pub fn contribution_of(&self, id: &str) -> Result<Option<f64>, EngineError> {
        let index = self.resolve(id)?;
        Ok(self.contribution_value(index))
    }

    /// Self-retained evaluation weight (the diagonal cell).
    pub fn budget_of(&self, id: &str) -> Result<f64, EngineError> {
        let index = self.resolve(id)?;
        Ok(self.matrix.budget_of(index))
    }

    /// `budget × contribution`, `None` while the contribution is degenerate.
    pub fn purchasing_power_of(&self, id: &str) -> Result<Option<f64>, EngineError> {
        let index = self.resolve(id)?;
        Ok(self
            .contribution_value(index)
            .map(|c| c * self.matrix.budget_of(index)))
    }

    fn contribution_value(&self, index: usize) -> Option<f64> {
        if self.contribution.status.is_usable() {
            self.contribution.values.get(index).copied()
        } else {
            None
        }
    }

    /// Snapshot rows for every participant, in matrix order.
    pub fn status(&self) -> Vec<ParticipantStatus> {
        self.roster
            .participants()
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let contribution = self.contribution_value(index);
                let budget = self.matrix.budget_of(index);
                ParticipantStatus {
                    id: p.id.clone(),
                    label: p.label.clone(),
                    contribution,
                    budget,
                    purchasing_power: contribution.map(|c| c * budget),
                }
            })
            .collect()
    }

    /// The most recent `limit` like records, newest first.
    pub fn like_log(&self, limit: usize) -> Vec<LikeRecord> {
        self.like_log.iter().rev().take(limit).cloned().collect()
    }

    /// How the latest contribution solve terminated.
    pub fn solver_status(&self) -> SolverStatus {
        self.contribution.status
    }

    /// Number of contribution solves performed (trivial n ≤ 1 refreshes
    /// are not counted).
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Number of natural-recovery passes applied since (re)initialization.
    pub fn recovery_epoch(&self) -> u64 {
        self.recovery_epoch
    }

    pub fn participants(&self) -> &[Participant] {
        self.roster.participants()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read-only view of the evaluation matrix.
    pub fn matrix(&self) -> &EvaluationMatrix {
        &self.matrix
    }
}
