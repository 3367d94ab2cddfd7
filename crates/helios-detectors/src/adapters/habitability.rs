use helios_core::config::DetectorConfig;
use helios_core::constants::HABITABLE_ZONE_DETECTOR;
use helios_core::errors::DetectorError;
use helios_core::models::{DetectorId, DetectorOutput, Explanation, Observation};
use helios_core::traits::Detector;

use super::require_positive;
use crate::physics::{
    equilibrium_temperature, orbital_distance_au, stefan_boltzmann, HabitabilityClass,
    HabitableZone,
};

const CONSERVATIVE_PREDICTION: f64 = 1.0;
const OPTIMISTIC_PREDICTION: f64 = 0.7;
const OUTSIDE_PREDICTION: f64 = 0.2;

/// Scores where the orbit sits relative to the star's habitable zone.
pub struct HabitabilityDetector {
    id: DetectorId,
    default_albedo: f64,
}

impl HabitabilityDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            id: DetectorId::from(HABITABLE_ZONE_DETECTOR),
            default_albedo: config.default_albedo,
        }
    }

    fn luminosity(obs: &Observation) -> Result<f64, DetectorError> {
        if let Some(l) = obs.stellar_luminosity {
            return require_positive(Some(l), "stellar_luminosity");
        }
        if obs.stellar_radius.is_none() && obs.stellar_temperature.is_none() {
            return Err(DetectorError::missing("stellar_luminosity"));
        }
        let r = require_positive(obs.stellar_radius, "stellar_radius")?;
        let t = require_positive(obs.stellar_temperature, "stellar_temperature")?;
        Ok(stefan_boltzmann(r, t).solar)
    }

    fn distance(obs: &Observation) -> Result<f64, DetectorError> {
        if let Some(a) = obs.orbital_distance {
            return require_positive(Some(a), "orbital_distance");
        }
        if obs.orbital_period.is_none() {
            return Err(DetectorError::missing("orbital_distance"));
        }
        let ms = require_positive(obs.stellar_mass, "stellar_mass")?;
        let p = require_positive(obs.orbital_period, "orbital_period")?;
        Ok(orbital_distance_au(ms, obs.planet_mass.unwrap_or(0.0), p))
    }
}

impl Detector for HabitabilityDetector {
    fn id(&self) -> &DetectorId {
        &self.id
    }

    fn evaluate(&self, obs: &Observation) -> Result<DetectorOutput, DetectorError> {
        let luminosity = Self::luminosity(obs)?;
        let distance = Self::distance(obs)?;
        let albedo = obs.albedo.unwrap_or(self.default_albedo);
        if !(0.0..=1.0).contains(&albedo) {
            return Err(DetectorError::out_of_domain("albedo", albedo, "must be in [0, 1]"));
        }

        let hz = HabitableZone::for_luminosity(luminosity);
        let prediction = match hz.classify(distance) {
            HabitabilityClass::Conservative => CONSERVATIVE_PREDICTION,
            HabitabilityClass::Optimistic => OPTIMISTIC_PREDICTION,
            HabitabilityClass::Outside => OUTSIDE_PREDICTION,
        };
        let temperature = equilibrium_temperature(luminosity, distance, albedo);

        Ok(DetectorOutput::new(
            prediction,
            Explanation::features([
                ("distance_au", distance),
                ("inner_au", hz.conservative_inner_au),
                ("outer_au", hz.conservative_outer_au),
                ("equilibrium_temperature_k", temperature.kelvin),
            ]),
        ))
    }
}
