//! Built-in detectors and the closure-backed detector.

mod fn_detector;
mod habitability;
mod orbital;
mod radial_velocity;
mod transit;

pub use fn_detector::FnDetector;
pub use habitability::HabitabilityDetector;
pub use orbital::OrbitalDynamicsDetector;
pub use radial_velocity::RadialVelocityDetector;
pub use transit::TransitDetector;

use helios_core::errors::DetectorError;

/// Saturating map of a non-negative signal onto `[0, 1]`.
pub(crate) fn saturate(signal: f64, threshold: f64) -> f64 {
    (signal / threshold).clamp(0.0, 1.0)
}

pub(crate) fn required(value: Option<f64>, field: &str) -> Result<f64, DetectorError> {
    value.ok_or_else(|| DetectorError::missing(field))
}

pub(crate) fn require_positive(value: Option<f64>, field: &str) -> Result<f64, DetectorError> {
    let v = required(value, field)?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(DetectorError::out_of_domain(field, v, "must be a positive finite number"))
    }
}
