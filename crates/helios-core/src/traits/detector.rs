use crate::errors::DetectorError;
use crate::models::{DetectorId, DetectorOutput, Observation};

/// A pluggable estimator.
///
/// Implementations must be pure with respect to shared state: two detectors
/// never read each other's output and may run concurrently. Returning an
/// error excludes the detector from the current run only.
pub trait Detector: Send + Sync {
    /// Stable identifier, used as the trust registry key.
    fn id(&self) -> &DetectorId;

    /// Produce a prediction in `[0, 1]` and an explanation for `observation`.
    fn evaluate(&self, observation: &Observation) -> Result<DetectorOutput, DetectorError>;
}
