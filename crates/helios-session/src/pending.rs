//! A run before it is sealed.
//!
//! `PendingRun` owns everything collected so far. Dropping it discards the
//! partial run; nothing outside it has been touched yet.

use chrono::{DateTime, Utc};

use helios_core::errors::{HeliosError, HeliosResult};
use helios_core::models::{
    DetectorFailure, DetectorVerdict, EvaluationRun, Observation, RunId, RunSeal, RunState,
    Verdict, WeightSnapshot,
};

#[derive(Debug)]
pub struct PendingRun {
    id: RunId,
    state: RunState,
    observation: Observation,
    observation_fingerprint: String,
    weights: WeightSnapshot,
    predictions: Vec<DetectorVerdict>,
    failures: Vec<DetectorFailure>,
    started_at: DateTime<Utc>,
}

impl PendingRun {
    /// Start collecting against a fixed weight snapshot.
    pub fn begin(observation: Observation, observation_fingerprint: String, weights: WeightSnapshot) -> Self {
        Self {
            id: RunId::new(),
            state: RunState::Collecting,
            observation,
            observation_fingerprint,
            weights,
            predictions: Vec::new(),
            failures: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn weights(&self) -> &WeightSnapshot {
        &self.weights
    }

    pub fn predictions(&self) -> &[DetectorVerdict] {
        &self.predictions
    }

    pub fn failures(&self) -> &[DetectorFailure] {
        &self.failures
    }

    pub fn record_success(&mut self, verdict: DetectorVerdict) -> HeliosResult<()> {
        self.expect_state(RunState::Collecting, RunState::Collecting)?;
        self.predictions.push(verdict);
        Ok(())
    }

    pub fn record_failure(&mut self, failure: DetectorFailure) -> HeliosResult<()> {
        self.expect_state(RunState::Collecting, RunState::Collecting)?;
        self.failures.push(failure);
        Ok(())
    }

    /// `Collecting → Aggregating`. Outcomes are put in detector-id order.
    pub fn begin_aggregation(&mut self) -> HeliosResult<()> {
        self.expect_state(RunState::Collecting, RunState::Aggregating)?;
        self.predictions.sort_by(|a, b| a.detector_id.cmp(&b.detector_id));
        self.failures.sort_by(|a, b| a.detector_id.cmp(&b.detector_id));
        self.state = RunState::Aggregating;
        Ok(())
    }

    /// `Aggregating → Sealed`.
    pub fn seal(self, verdict: Verdict) -> HeliosResult<EvaluationRun> {
        self.expect_state(RunState::Aggregating, RunState::Sealed)?;
        Ok(EvaluationRun::seal(RunSeal {
            id: self.id,
            observation: self.observation,
            observation_fingerprint: self.observation_fingerprint,
            weights: self.weights,
            predictions: self.predictions,
            failures: self.failures,
            verdict,
            started_at: self.started_at,
        }))
    }

    fn expect_state(&self, required: RunState, to: RunState) -> HeliosResult<()> {
        if self.state == required {
            Ok(())
        } else {
            Err(HeliosError::InvalidState {
                from: self.state.to_string(),
                to: to.to_string(),
            })
        }
    }
}
