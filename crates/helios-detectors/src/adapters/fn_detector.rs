use std::fmt;

use helios_core::errors::DetectorError;
use helios_core::models::{DetectorId, DetectorOutput, Observation};
use helios_core::traits::Detector;

type EvaluateFn = dyn Fn(&Observation) -> Result<DetectorOutput, DetectorError> + Send + Sync;

/// A detector backed by a closure.
///
/// For imaging, atmospheric, or model-backed estimators that live outside
/// this crate.
///
/// ```
/// use helios_core::models::DetectorOutput;
/// use helios_core::traits::Detector;
/// use helios_detectors::FnDetector;
///
/// let imaging = FnDetector::new("imaging", |_obs| Ok(DetectorOutput::bare(0.4)));
/// assert_eq!(imaging.id().as_str(), "imaging");
/// ```
pub struct FnDetector {
    id: DetectorId,
    evaluate: Box<EvaluateFn>,
}

impl FnDetector {
    pub fn new<F>(id: impl Into<DetectorId>, evaluate: F) -> Self
    where
        F: Fn(&Observation) -> Result<DetectorOutput, DetectorError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            evaluate: Box::new(evaluate),
        }
    }

    /// A detector that always returns `prediction` with no explanation.
    pub fn constant(id: impl Into<DetectorId>, prediction: f64) -> Self {
        Self::new(id, move |_| Ok(DetectorOutput::bare(prediction)))
    }
}

impl Detector for FnDetector {
    fn id(&self) -> &DetectorId {
        &self.id
    }

    fn evaluate(&self, observation: &Observation) -> Result<DetectorOutput, DetectorError> {
        (self.evaluate)(observation)
    }
}

impl fmt::Debug for FnDetector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnDetector").field("id", &self.id).finish()
    }
}
