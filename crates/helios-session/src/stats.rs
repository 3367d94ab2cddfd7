//! Session counters.
//!
//! Run and feedback totals are plain atomics. Per-detector counters live in
//! a `DashMap` so concurrent runs never contend on a single lock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use dashmap::DashMap;

use helios_core::errors::{HeliosError, HeliosResult};
use helios_core::models::DetectorId;

#[derive(Debug, Default)]
struct DetectorCounters {
    successes: u64,
    failures: u64,
}

#[derive(Debug)]
pub struct SessionStats {
    sealed_runs: AtomicU64,
    failed_runs: AtomicU64,
    feedback_applied: AtomicU64,
    feedback_rejected: AtomicU64,
    verdicts_correct: AtomicU64,
    recent_confidences: Mutex<VecDeque<f64>>,
    window: usize,
    detectors: DashMap<DetectorId, DetectorCounters>,
}

impl SessionStats {
    pub fn new(window: usize) -> Self {
        Self {
            sealed_runs: AtomicU64::new(0),
            failed_runs: AtomicU64::new(0),
            feedback_applied: AtomicU64::new(0),
            feedback_rejected: AtomicU64::new(0),
            verdicts_correct: AtomicU64::new(0),
            recent_confidences: Mutex::new(VecDeque::with_capacity(window)),
            window,
            detectors: DashMap::new(),
        }
    }

    pub fn record_sealed(&self, confidence: f64) -> HeliosResult<()> {
        self.sealed_runs.fetch_add(1, Ordering::Relaxed);
        if self.window == 0 {
            return Ok(());
        }
        let mut recent = self
            .recent_confidences
            .lock()
            .map_err(|e| HeliosError::ConcurrencyError(e.to_string()))?;
        if recent.len() == self.window {
            recent.pop_front();
        }
        recent.push_back(confidence);
        Ok(())
    }

    pub fn record_run_failure(&self) {
        self.failed_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_detector_success(&self, id: &DetectorId) {
        self.detectors.entry(id.clone()).or_default().successes += 1;
    }

    pub fn record_detector_failure(&self, id: &DetectorId) {
        self.detectors.entry(id.clone()).or_default().failures += 1;
    }

    pub fn record_feedback(&self, verdict_correct: bool) {
        self.feedback_applied.fetch_add(1, Ordering::Relaxed);
        if verdict_correct {
            self.verdicts_correct.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_rejection(&self) {
        self.feedback_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn sealed_runs(&self) -> u64 {
        self.sealed_runs.load(Ordering::Relaxed)
    }

    pub fn failed_runs(&self) -> u64 {
        self.failed_runs.load(Ordering::Relaxed)
    }

    pub fn feedback_applied(&self) -> u64 {
        self.feedback_applied.load(Ordering::Relaxed)
    }

    pub fn feedback_rejected(&self) -> u64 {
        self.feedback_rejected.load(Ordering::Relaxed)
    }

    /// Share of applied feedback whose label matched the verdict direction.
    pub fn system_accuracy(&self) -> Option<f64> {
        let applied = self.feedback_applied();
        (applied > 0).then(|| self.verdicts_correct.load(Ordering::Relaxed) as f64 / applied as f64)
    }

    /// Oldest first.
    pub fn recent_confidences(&self) -> HeliosResult<Vec<f64>> {
        let recent = self
            .recent_confidences
            .lock()
            .map_err(|e| HeliosError::ConcurrencyError(e.to_string()))?;
        Ok(recent.iter().copied().collect())
    }

    /// `(successes, failures)` for one detector.
    pub fn detector_counts(&self, id: &DetectorId) -> (u64, u64) {
        self.detectors
            .get(id)
            .map(|c| (c.successes, c.failures))
            .unwrap_or((0, 0))
    }
}
