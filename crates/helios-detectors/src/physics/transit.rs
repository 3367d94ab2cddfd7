use helios_core::constants::{EARTH_RADIUS, SOLAR_RADIUS};
use serde::{Deserialize, Serialize};

/// Fractional flux drop `ΔF/F = (Rp/Rs)²` in its usual forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitDepth {
    pub radius_ratio: f64,
    pub depth: f64,
    pub depth_ppm: f64,
    pub depth_percent: f64,
}

impl TransitDepth {
    pub fn from_depth(depth: f64) -> Self {
        Self {
            radius_ratio: depth.sqrt(),
            depth,
            depth_ppm: depth * 1e6,
            depth_percent: depth * 100.0,
        }
    }
}

/// Transit depth for a planet of `planet_radius` (R⊕) crossing a star of
/// `stellar_radius` (R☉).
pub fn transit_depth(planet_radius: f64, stellar_radius: f64) -> TransitDepth {
    let ratio = (planet_radius * EARTH_RADIUS) / (stellar_radius * SOLAR_RADIUS);
    TransitDepth {
        radius_ratio: ratio,
        ..TransitDepth::from_depth(ratio * ratio)
    }
}

/// Inverse of [`transit_depth`]: planet radius in R⊕ from a measured depth.
pub fn planet_radius_from_depth(depth: f64, stellar_radius: f64) -> f64 {
    depth.sqrt() * stellar_radius * (SOLAR_RADIUS / EARTH_RADIUS)
}
