use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback-driven recalibration configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecalibrationConfig {
    /// Learning rate η. Default: 0.1.
    pub learning_rate: f64,
    /// Predictions are clamped to `[prediction_floor, prediction_ceiling]` before the log.
    pub prediction_floor: f64,
    pub prediction_ceiling: f64,
    /// Magnitude of the directional sign factor. Default: 0.01.
    pub nudge: f64,
    /// A prediction at or above this value counts as a positive call. Default: 0.5.
    pub decision_threshold: f64,
}

impl Default for RecalibrationConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            prediction_floor: defaults::DEFAULT_PREDICTION_FLOOR,
            prediction_ceiling: defaults::DEFAULT_PREDICTION_CEILING,
            nudge: defaults::DEFAULT_NUDGE,
            decision_threshold: defaults::DEFAULT_DECISION_THRESHOLD,
        }
    }
}
