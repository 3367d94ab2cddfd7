//! Configuration for the trust registry.
//!
//! # Examples
//!
//! ```
//! use helios_core::config::TrustConfig;
//!
//! let config = TrustConfig::default();
//! assert_eq!(config.clamp(5.0), 2.0);
//! assert_eq!(config.clamp(0.0), 0.1);
//! ```

use serde::{Deserialize, Serialize};

use super::defaults;

/// Weight bounds and defaults for per-detector trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustConfig {
    /// Weight assigned to a detector the registry has never seen. Default: 1.0.
    pub default_weight: f64,
    /// Lower clamp bound. Must be strictly positive. Default: 0.1.
    pub min_weight: f64,
    /// Upper clamp bound. Default: 2.0.
    pub max_weight: f64,
    /// Weight changes retained per detector. Default: 256.
    pub history_limit: usize,
}

impl TrustConfig {
    /// Clamp a raw weight into `[min_weight, max_weight]`.
    ///
    /// NaN collapses to the lower bound so a bad update can never poison
    /// the sum of weights.
    pub fn clamp(&self, weight: f64) -> f64 {
        if weight.is_nan() {
            return self.min_weight;
        }
        weight.clamp(self.min_weight, self.max_weight)
    }
}

impl Default for TrustConfig {
    fn default() -> Self {
        Self {
            default_weight: defaults::DEFAULT_TRUST_WEIGHT,
            min_weight: defaults::DEFAULT_MIN_TRUST_WEIGHT,
            max_weight: defaults::DEFAULT_MAX_TRUST_WEIGHT,
            history_limit: defaults::DEFAULT_TRUST_HISTORY_LIMIT,
        }
    }
}
