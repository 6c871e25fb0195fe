//! Cloneable locked handle for concurrent hosts.

use std::sync::Arc;

use parking_lot::RwLock;

use picsy_core::config::EngineConfig;
use picsy_core::error::EngineError;
use picsy_core::types::{LikeRecord, Participant, ParticipantStatus, SolverStatus};

use crate::engine::{Engine, LikeOutcome};

/// `Arc<RwLock<Engine>>` adapter.
///
/// Mutating calls take the write lock, so a host serving multiple threads
/// gets the per-operation exclusivity the engine requires; snapshot queries
/// take the read lock and may run concurrently. Queries observe the
/// last-completed mutation, never a torn matrix.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self { inner: Arc::new(RwLock::new(engine)) }
    }

    // --- mutations (write lock) ---

    pub fn like(&self, liker_id: &str, target_id: &str) -> Result<LikeOutcome, EngineError> {
        self.inner.write().like(liker_id, target_id)
    }

    pub fn natural_recovery(&self) -> Result<(), EngineError> {
        self.inner.write().natural_recovery()
    }

    pub fn natural_recovery_at(&self, rate: f64) -> Result<(), EngineError> {
        self.inner.write().natural_recovery_at(rate)
    }

    pub fn reinitialize(
        &self,
        participants: Vec<Participant>,
        config: EngineConfig,
    ) -> Result<(), EngineError> {
        self.inner.write().reinitialize(participants, config)
    }

    pub fn set_alpha_like(&self, liker_id: &str, alpha: f64) -> Result<(), EngineError> {
        self.inner.write().set_alpha_like(liker_id, alpha)
    }

    pub fn set_gamma_rate(&self, rate: f64) -> Result<(), EngineError> {
        self.inner.write().set_gamma_rate(rate)
    }

    // --- queries (read lock) ---

    pub fn contribution_of(&self, id: &str) -> Result<Option<f64>, EngineError> {
        self.inner.read().contribution_of(id)
    }

    pub fn budget_of(&self, id: &str) -> Result<f64, EngineError> {
        self.inner.read().budget_of(id)
    }

    pub fn purchasing_power_of(&self, id: &str) -> Result<Option<f64>, EngineError> {
        self.inner.read().purchasing_power_of(id)
    }

    pub fn status(&self) -> Vec<ParticipantStatus> {
        self.inner.read().status()
    }

    pub fn like_log(&self, limit: usize) -> Vec<LikeRecord> {
        self.inner.read().like_log(limit)
    }

    pub fn solver_status(&self) -> SolverStatus {
        self.inner.read().solver_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> SharedEngine {
        let roster = vec![
            Participant::new("a", "Alice"),
            Participant::new("b", "Bob"),
            Participant::new("c", "Charlie"),
        ];
        SharedEngine::new(Engine::new(roster, EngineConfig::default()).unwrap())
    }

    #[test]
    fn clones_share_state() {
        let handle = shared();
        let other = handle.clone();
        assert!(handle.like("a", "b").unwrap().is_transferred());
        assert_eq!(other.budget_of("a").unwrap(), 0.95);
    }

    #[test]
    fn concurrent_likes_serialize() {
        let handle = shared();
        let threads: Vec<_> = [("a", "b"), ("b", "c"), ("c", "a")]
            .into_iter()
            .map(|(liker, target)| {
                let handle = handle.clone();
                std::thread::spawn(move || handle.like(liker, target).unwrap())
            })
            .collect();
        for t in threads {
            assert!(t.join().unwrap().is_transferred());
        }
        assert_eq!(handle.like_log(10).len(), 3);
        let sum: f64 = handle.status().iter().filter_map(|r| r.contribution).sum();
        assert!((sum - 3.0).abs() < 1e-4);
    }
}
