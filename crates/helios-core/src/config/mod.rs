//! Configuration for every Helios subsystem.
//!
//! All sections use `#[serde(default)]`, so an empty TOML document yields
//! the full default configuration and partial documents override only the
//! keys they name.
//!
//! # Examples
//!
//! ```
//! use helios_core::config::HeliosConfig;
//!
//! let config = HeliosConfig::from_toml("[trust]\nmax_weight = 3.0\n").unwrap();
//! assert_eq!(config.trust.max_weight, 3.0);
//! assert_eq!(config.trust.min_weight, 0.1);
//! ```

pub mod aggregation_config;
pub mod defaults;
pub mod detector_config;
pub mod observability_config;
pub mod recalibration_config;
pub mod session_config;
pub mod trust_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use aggregation_config::AggregationConfig;
pub use detector_config::DetectorConfig;
pub use observability_config::ObservabilityConfig;
pub use recalibration_config::RecalibrationConfig;
pub use session_config::SessionConfig;
pub use trust_config::TrustConfig;

use crate::errors::{HeliosError, HeliosResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeliosConfig {
    pub trust: TrustConfig,
    pub aggregation: AggregationConfig,
    pub recalibration: RecalibrationConfig,
    pub session: SessionConfig,
    pub detectors: DetectorConfig,
    pub observability: ObservabilityConfig,
}

impl HeliosConfig {
    /// Parse a TOML document. Missing sections and keys take their defaults.
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> HeliosResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| HeliosError::ConfigError(format!("{}: {e}", path.display())))?;
        let config =
            Self::from_toml(&raw).map_err(|e| HeliosError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would break the weight or confidence invariants.
    pub fn validate(&self) -> HeliosResult<()> {
        let t = &self.trust;
        if !(t.min_weight > 0.0) {
            return Err(config_error(format!(
                "trust.min_weight must be > 0, got {}",
                t.min_weight
            )));
        }
        if !(t.min_weight <= t.default_weight && t.default_weight <= t.max_weight) {
            return Err(config_error(format!(
                "trust bounds must satisfy min <= default <= max, got {} <= {} <= {}",
                t.min_weight, t.default_weight, t.max_weight
            )));
        }

        let r = &self.recalibration;
        if !(r.learning_rate >= 0.0) {
            return Err(config_error(format!(
                "recalibration.learning_rate must be >= 0, got {}",
                r.learning_rate
            )));
        }
        if !(0.0 < r.prediction_floor
            && r.prediction_floor < r.prediction_ceiling
            && r.prediction_ceiling < 1.0)
        {
            return Err(config_error(format!(
                "prediction clamp must satisfy 0 < floor < ceiling < 1, got [{}, {}]",
                r.prediction_floor, r.prediction_ceiling
            )));
        }
        if !(0.0..=1.0).contains(&r.decision_threshold) {
            return Err(config_error(format!(
                "recalibration.decision_threshold must be in [0, 1], got {}",
                r.decision_threshold
            )));
        }

        if !(self.aggregation.variance_penalty >= 0.0) {
            return Err(config_error(format!(
                "aggregation.variance_penalty must be >= 0, got {}",
                self.aggregation.variance_penalty
            )));
        }
        if !(self.aggregation.fallback_weight > 0.0) {
            return Err(config_error(format!(
                "aggregation.fallback_weight must be > 0, got {}",
                self.aggregation.fallback_weight
            )));
        }

        if self.session.detector_timeout_ms == 0 {
            return Err(config_error("session.detector_timeout_ms must be > 0"));
        }
        if self.session.max_retained_runs == 0 {
            return Err(config_error("session.max_retained_runs must be > 0"));
        }

        let d = &self.detectors;
        if !(d.transit_depth_threshold > 0.0 && d.doppler_shift_threshold > 0.0) {
            return Err(config_error("detector saturation thresholds must be > 0"));
        }
        if !(d.orbital_tolerance > 0.0) {
            return Err(config_error("detectors.orbital_tolerance must be > 0"));
        }
        if !(0.0..=1.0).contains(&d.default_albedo) {
            return Err(config_error(format!(
                "detectors.default_albedo must be in [0, 1], got {}",
                d.default_albedo
            )));
        }

        Ok(())
    }
}

fn config_error(msg: impl Into<String>) -> HeliosError {
    HeliosError::ConfigError(msg.into())
}
