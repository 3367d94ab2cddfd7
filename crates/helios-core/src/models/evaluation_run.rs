//! Sealed evaluation runs.
//!
//! An [`EvaluationRun`] only exists in the `Sealed` state: it is built in one
//! step from a [`RunSeal`] and exposes read-only accessors afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AggregatedExplanation, DetectorId, Explanation, Observation, WeightSnapshot};

/// UUID-based run identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new run ID with a random UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RunId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lifecycle of one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Collecting,
    Aggregating,
    Sealed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Collecting => "collecting",
            Self::Aggregating => "aggregating",
            Self::Sealed => "sealed",
        };
        f.write_str(s)
    }
}

/// A successful detector contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorVerdict {
    pub detector_id: DetectorId,
    pub prediction: f64,
    pub explanation: Explanation,
    pub latency_ms: u64,
}

/// A detector excluded from the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorFailure {
    pub detector_id: DetectorId,
    /// Machine-readable kind (see `DetectorError::kind`).
    pub kind: String,
    pub message: String,
    pub latency_ms: u64,
}

/// Coarse label attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateClass {
    StrongCandidate,
    LikelyPlanet,
    PossiblePlanet,
    WeakSignal,
    NotAPlanet,
}

impl CandidateClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::StrongCandidate => "Strong Exoplanet Candidate",
            Self::LikelyPlanet => "Likely Exoplanet",
            Self::PossiblePlanet => "Possible Exoplanet - Requires Validation",
            Self::WeakSignal => "Weak Signal - Likely False Positive",
            Self::NotAPlanet => "Not an Exoplanet",
        }
    }
}

/// The aggregated outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// `p̄ = Σ(wᵢ·pᵢ) / Σ(wᵢ)`.
    pub aggregated_prediction: f64,
    /// `1 − min(1, penalty·variance)`.
    pub confidence: f64,
    /// Weighted variance of the predictions around `p̄`.
    pub variance: f64,
    /// `Σ(wᵢ)` over the detectors that predicted.
    pub total_weight: f64,
    /// Share of the total weight on the same side of 0.5 as `p̄`.
    pub agreement: f64,
    pub classification: CandidateClass,
    pub explanation: AggregatedExplanation,
}

/// Everything needed to seal a run.
#[derive(Debug, Clone)]
pub struct RunSeal {
    pub id: RunId,
    pub observation: Observation,
    pub observation_fingerprint: String,
    pub weights: WeightSnapshot,
    pub predictions: Vec<DetectorVerdict>,
    pub failures: Vec<DetectorFailure>,
    pub verdict: Verdict,
    pub started_at: DateTime<Utc>,
}

/// Immutable record of one sealed aggregation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRun {
    id: RunId,
    observation: Observation,
    observation_fingerprint: String,
    weights: WeightSnapshot,
    predictions: Vec<DetectorVerdict>,
    failures: Vec<DetectorFailure>,
    verdict: Verdict,
    started_at: DateTime<Utc>,
    sealed_at: DateTime<Utc>,
}

impl EvaluationRun {
    /// Seal a run. This is the only constructor.
    pub fn seal(seal: RunSeal) -> Self {
        Self {
            id: seal.id,
            observation: seal.observation,
            observation_fingerprint: seal.observation_fingerprint,
            weights: seal.weights,
            predictions: seal.predictions,
            failures: seal.failures,
            verdict: seal.verdict,
            started_at: seal.started_at,
            sealed_at: Utc::now(),
        }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn state(&self) -> RunState {
        RunState::Sealed
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn observation_fingerprint(&self) -> &str {
        &self.observation_fingerprint
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

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn sealed_at(&self) -> DateTime<Utc> {
        self.sealed_at
    }

    /// The prediction a given detector contributed, if it succeeded.
    pub fn prediction_of(&self, id: &DetectorId) -> Option<f64> {
        self.predictions
            .iter()
            .find(|p| &p.detector_id == id)
            .map(|p| p.prediction)
    }
}
