//! Error taxonomy.
//!
//! Per-detector failures ([`DetectorError`]) are absorbed by the coordinator.
//! Run-level and feedback-level failures surface to the caller as
//! [`HeliosError`] values.

mod detector_error;

pub use detector_error::DetectorError;

use crate::models::RunId;

/// Result alias used across the workspace.
pub type HeliosResult<T> = Result<T, HeliosError>;

/// Top-level error for all Helios operations.
#[derive(Debug, thiserror::Error)]
pub enum HeliosError {
    /// Malformed input, caught before any detector is dispatched.
    #[error("invalid observation field {field}: {reason}")]
    InvalidObservation { field: String, reason: String },

    /// Every detector failed (or none was registered); nothing was sealed.
    #[error("no detectors available: {attempted} attempted, all failed")]
    NoDetectorsAvailable {
        attempted: usize,
        failures: Vec<String>,
    },

    /// Feedback for a run that has already been recalibrated.
    #[error("stale feedback for run {run_id}: already recalibrated")]
    StaleFeedback { run_id: RunId },

    /// Feedback for a run that was never sealed or is no longer retained.
    #[error("unknown run: {run_id}")]
    UnknownRun { run_id: RunId },

    #[error("detector already registered: {id}")]
    DuplicateDetector { id: String },

    #[error("invalid weights: {reason}")]
    InvalidWeights { reason: String },

    #[error("invalid run state transition: {from} -> {to}")]
    InvalidState { from: String, to: String },

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("concurrency error: {0}")]
    ConcurrencyError(String),

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    Detector(#[from] DetectorError),
}

impl HeliosError {
    pub fn invalid_observation(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidObservation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the two feedback rejections callers are expected to handle.
    pub fn is_feedback_rejection(&self) -> bool {
        matches!(self, Self::StaleFeedback { .. } | Self::UnknownRun { .. })
    }
}

impl From<serde_json::Error> for HeliosError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}
