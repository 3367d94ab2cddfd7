use helios_core::config::DetectorConfig;
use helios_core::constants::RADIAL_VELOCITY_DETECTOR;
use helios_core::errors::DetectorError;
use helios_core::models::{DetectorId, DetectorOutput, Explanation, Observation};
use helios_core::traits::Detector;

use super::{require_positive, saturate};
use crate::physics::{doppler_shift, rv_semi_amplitude};

/// Doppler spectroscopy: `min(1, |v/c| / threshold)`.
///
/// Uses the measured velocity when present, otherwise the semi-amplitude
/// implied by planet mass, stellar mass, and period.
pub struct RadialVelocityDetector {
    id: DetectorId,
    shift_threshold: f64,
    rest_wavelength_m: f64,
}

impl RadialVelocityDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            id: DetectorId::from(RADIAL_VELOCITY_DETECTOR),
            shift_threshold: config.doppler_shift_threshold,
            rest_wavelength_m: config.rest_wavelength_m,
        }
    }

    fn velocity(&self, obs: &Observation) -> Result<f64, DetectorError> {
        if let Some(v) = obs.radial_velocity {
            if !v.is_finite() {
                return Err(DetectorError::out_of_domain("radial_velocity", v, "must be finite"));
            }
            return Ok(v);
        }
        if obs.planet_mass.is_none() {
            return Err(DetectorError::missing("radial_velocity"));
        }
        let mp = require_positive(obs.planet_mass, "planet_mass")?;
        let ms = require_positive(obs.stellar_mass, "stellar_mass")?;
        let p = require_positive(obs.orbital_period, "orbital_period")?;
        if !(0.0..1.0).contains(&obs.eccentricity) {
            return Err(DetectorError::out_of_domain(
                "eccentricity",
                obs.eccentricity,
                "must be in [0, 1)",
            ));
        }
        Ok(rv_semi_amplitude(mp, ms, p, obs.orbital_inclination, obs.eccentricity))
    }
}

impl Detector for RadialVelocityDetector {
    fn id(&self) -> &DetectorId {
        &self.id
    }

    fn evaluate(&self, observation: &Observation) -> Result<DetectorOutput, DetectorError> {
        let v = self.velocity(observation)?;
        let shift = doppler_shift(v, self.rest_wavelength_m);
        let prediction = saturate(shift.shift_ratio.abs(), self.shift_threshold);
        Ok(DetectorOutput::new(
            prediction,
            Explanation::features([
                ("velocity_ms", v),
                ("shift_ratio", shift.shift_ratio),
                ("wavelength_shift_m", shift.wavelength_shift_m),
            ]),
        ))
    }
}
