use serde::{Deserialize, Serialize};

use super::defaults;

/// Aggregator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Multiplier applied to the weighted variance before subtracting from 1.
    /// `confidence = 1 - min(1, variance_penalty * variance)`.
    pub variance_penalty: f64,
    /// Weight used for a predicting detector that is absent from the weight map.
    pub fallback_weight: f64,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            variance_penalty: defaults::DEFAULT_VARIANCE_PENALTY,
            fallback_weight: defaults::DEFAULT_TRUST_WEIGHT,
        }
    }
}
