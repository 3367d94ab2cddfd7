use serde::{Deserialize, Serialize};

use super::defaults;

/// Tuning for the built-in detectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Transit depth (fraction) at which the transit prediction saturates at 1.0.
    pub transit_depth_threshold: f64,
    /// Fractional Doppler shift at which the radial-velocity prediction saturates.
    pub doppler_shift_threshold: f64,
    /// Reference wavelength for Doppler shifts (m).
    pub rest_wavelength_m: f64,
    /// Relative disagreement between observed and Keplerian distance that drives
    /// the orbital-dynamics prediction to zero.
    pub orbital_tolerance: f64,
    /// Bond albedo used when an observation does not supply one.
    pub default_albedo: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            transit_depth_threshold: defaults::DEFAULT_TRANSIT_DEPTH_THRESHOLD,
            doppler_shift_threshold: defaults::DEFAULT_DOPPLER_SHIFT_THRESHOLD,
            rest_wavelength_m: defaults::DEFAULT_REST_WAVELENGTH_M,
            orbital_tolerance: defaults::DEFAULT_ORBITAL_TOLERANCE,
            default_albedo: defaults::DEFAULT_ALBEDO,
        }
    }
}
