//! RunLedger: sealed runs awaiting (or past) feedback.
//!
//! Bounded: once `capacity` runs are retained the oldest is evicted, and
//! feedback for it becomes `UnknownRun`. Each run moves through
//! `Open → Claimed → Applied` at most once; a claim that fails to apply is
//! released back to `Open`.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use helios_core::errors::{HeliosError, HeliosResult};
use helios_core::models::{EvaluationRun, RunId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackState {
    Open,
    Claimed,
    Applied,
}

#[derive(Debug)]
struct LedgerEntry {
    run: Arc<EvaluationRun>,
    feedback: FeedbackState,
}

#[derive(Debug)]
pub struct RunLedger {
    runs: DashMap<RunId, LedgerEntry>,
    order: Mutex<VecDeque<RunId>>,
    capacity: usize,
}

impl RunLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            runs: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Retain a sealed run. Returns the ids evicted to make room.
    pub fn insert(&self, run: Arc<EvaluationRun>) -> HeliosResult<Vec<RunId>> {
        let id = run.id();
        let mut order = self
            .order
            .lock()
            .map_err(|e| HeliosError::ConcurrencyError(e.to_string()))?;

        match self.runs.entry(id) {
            Entry::Occupied(_) => {
                return Err(HeliosError::InvalidState {
                    from: "sealed".to_string(),
                    to: "sealed".to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(LedgerEntry {
                    run,
                    feedback: FeedbackState::Open,
                });
            }
        }
        order.push_back(id);

        let mut evicted = Vec::new();
        while order.len() > self.capacity {
            if let Some(old) = order.pop_front() {
                self.runs.remove(&old);
                debug!(run_id = %old, "evicted run from ledger");
                evicted.push(old);
            }
        }
        Ok(evicted)
    }

    pub fn get(&self, id: &RunId) -> Option<Arc<EvaluationRun>> {
        self.runs.get(id).map(|e| Arc::clone(&e.run))
    }

    pub fn contains(&self, id: &RunId) -> bool {
        self.runs.contains_key(id)
    }

    pub fn feedback_state(&self, id: &RunId) -> Option<FeedbackState> {
        self.runs.get(id).map(|e| e.feedback)
    }

    /// Take the exclusive right to recalibrate `id`.
    pub fn claim_for_feedback(&self, id: RunId) -> HeliosResult<Arc<EvaluationRun>> {
        let mut entry = self
            .runs
            .get_mut(&id)
            .ok_or(HeliosError::UnknownRun { run_id: id })?;
        let state = entry.feedback;
        match state {
            FeedbackState::Open => {
                entry.feedback = FeedbackState::Claimed;
                Ok(Arc::clone(&entry.run))
            }
            FeedbackState::Claimed | FeedbackState::Applied => {
                Err(HeliosError::StaleFeedback { run_id: id })
            }
        }
    }

    /// Mark a claimed run as recalibrated.
    pub fn complete(&self, id: RunId) -> HeliosResult<()> {
        self.transition(id, FeedbackState::Claimed, FeedbackState::Applied)
    }

    /// Hand a claim back after a failed recalibration.
    pub fn release(&self, id: RunId) -> HeliosResult<()> {
        self.transition(id, FeedbackState::Claimed, FeedbackState::Open)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Retained ids, oldest first.
    pub fn ids(&self) -> HeliosResult<Vec<RunId>> {
        let order = self
            .order
            .lock()
            .map_err(|e| HeliosError::ConcurrencyError(e.to_string()))?;
        Ok(order.iter().copied().collect())
    }

    fn transition(&self, id: RunId, from: FeedbackState, to: FeedbackState) -> HeliosResult<()> {
        let mut entry = self
            .runs
            .get_mut(&id)
            .ok_or(HeliosError::UnknownRun { run_id: id })?;
        let current = entry.feedback;
        if current != from {
            return Err(HeliosError::InvalidState {
                from: format!("{current:?}").to_lowercase(),
                to: format!("{to:?}").to_lowercase(),
            });
        }
        entry.feedback = to;
        Ok(())
    }
}
