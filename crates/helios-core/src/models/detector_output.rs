use serde::{Deserialize, Serialize};

use super::Explanation;

/// What a detector returns for one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorOutput {
    /// Probability-like score in `[0, 1]`.
    pub prediction: f64,
    pub explanation: Explanation,
}

impl DetectorOutput {
    pub fn new(prediction: f64, explanation: Explanation) -> Self {
        Self {
            prediction,
            explanation,
        }
    }

    /// A prediction with no explanation payload.
    pub fn bare(prediction: f64) -> Self {
        Self::new(prediction, Explanation::None)
    }
}
