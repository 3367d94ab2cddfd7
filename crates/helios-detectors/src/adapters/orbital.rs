use helios_core::config::DetectorConfig;
use helios_core::constants::ORBITAL_DYNAMICS_DETECTOR;
use helios_core::errors::DetectorError;
use helios_core::models::{DetectorId, DetectorOutput, Explanation, Observation};
use helios_core::traits::Detector;

use super::require_positive;
use crate::physics::orbital_distance_au;

/// Prediction when there is no observed distance to check the orbit against.
const UNCONSTRAINED_PREDICTION: f64 = 0.5;

/// Orbital consistency: does the observed semi-major axis agree with the one
/// Kepler's third law predicts from the period and masses?
///
/// `prediction = clamp(1 − |a_obs − a_kepler| / (a_kepler · tolerance), 0, 1)`.
pub struct OrbitalDynamicsDetector {
    id: DetectorId,
    tolerance: f64,
}

impl OrbitalDynamicsDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            id: DetectorId::from(ORBITAL_DYNAMICS_DETECTOR),
            tolerance: config.orbital_tolerance,
        }
    }
}

impl Detector for OrbitalDynamicsDetector {
    fn id(&self) -> &DetectorId {
        &self.id
    }

    fn evaluate(&self, obs: &Observation) -> Result<DetectorOutput, DetectorError> {
        let ms = require_positive(obs.stellar_mass, "stellar_mass")?;
        let period = require_positive(obs.orbital_period, "orbital_period")?;
        let mp = match obs.planet_mass {
            Some(_) => require_positive(obs.planet_mass, "planet_mass")?,
            None => 0.0,
        };
        let predicted = orbital_distance_au(ms, mp, period);

        let Some(observed) = obs.orbital_distance else {
            return Ok(DetectorOutput::new(
                UNCONSTRAINED_PREDICTION,
                Explanation::features([("kepler_distance_au", predicted)]),
            ));
        };
        let observed = require_positive(Some(observed), "orbital_distance")?;

        let relative_error = (observed - predicted).abs() / predicted;
        let prediction = (1.0 - relative_error / self.tolerance).clamp(0.0, 1.0);
        Ok(DetectorOutput::new(
            prediction,
            Explanation::features([
                ("kepler_distance_au", predicted),
                ("observed_distance_au", observed),
                ("relative_error", relative_error),
            ]),
        ))
    }
}
