use helios_core::config::DetectorConfig;
use helios_core::constants::TRANSIT_DETECTOR;
use helios_core::errors::DetectorError;
use helios_core::models::{DetectorId, DetectorOutput, Explanation, Observation};
use helios_core::traits::Detector;

use super::{require_positive, saturate};
use crate::physics::{transit_depth, TransitDepth};

/// Transit photometry: `min(1, depth / threshold)`.
///
/// Uses the measured depth when present, otherwise `(Rp/Rs)²` from the
/// planet and stellar radii.
pub struct TransitDetector {
    id: DetectorId,
    depth_threshold: f64,
}

impl TransitDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            id: DetectorId::from(TRANSIT_DETECTOR),
            depth_threshold: config.transit_depth_threshold,
        }
    }

    fn depth(&self, obs: &Observation) -> Result<TransitDepth, DetectorError> {
        if let Some(depth) = obs.transit_depth {
            if !(0.0..=1.0).contains(&depth) {
                return Err(DetectorError::out_of_domain(
                    "transit_depth",
                    depth,
                    "must be a fraction in [0, 1]",
                ));
            }
            return Ok(TransitDepth::from_depth(depth));
        }
        if obs.planet_radius.is_none() && obs.stellar_radius.is_none() {
            return Err(DetectorError::missing("transit_depth"));
        }
        let rp = require_positive(obs.planet_radius, "planet_radius")?;
        let rs = require_positive(obs.stellar_radius, "stellar_radius")?;
        Ok(transit_depth(rp, rs))
    }
}

impl Detector for TransitDetector {
    fn id(&self) -> &DetectorId {
        &self.id
    }

    fn evaluate(&self, observation: &Observation) -> Result<DetectorOutput, DetectorError> {
        let t = self.depth(observation)?;
        let prediction = saturate(t.depth, self.depth_threshold);
        Ok(DetectorOutput::new(
            prediction,
            Explanation::features([
                ("depth", t.depth),
                ("depth_ppm", t.depth_ppm),
                ("radius_ratio", t.radius_ratio),
            ]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> TransitDetector {
        TransitDetector::new(&DetectorConfig::default())
    }

    #[test]
    fn measured_depth_below_threshold_scales_linearly() {
        let obs = Observation {
            transit_depth: Some(0.005),
            ..Default::default()
        };
        let out = detector().evaluate(&obs).unwrap();
        assert!((out.prediction - 0.5).abs() < 1e-12);
        assert_eq!(out.explanation.feature("depth_ppm"), Some(5000.0));
    }

    #[test]
    fn deep_transit_saturates() {
        let obs = Observation {
            planet_radius: Some(11.0),
            stellar_radius: Some(1.0),
            ..Default::default()
        };
        assert_eq!(detector().evaluate(&obs).unwrap().prediction, 1.0);
    }

    #[test]
    fn missing_inputs_are_reported() {
        let err = detector().evaluate(&Observation::default()).unwrap_err();
        assert_eq!(err, DetectorError::missing("transit_depth"));

        let obs = Observation {
            planet_radius: Some(1.0),
            ..Default::default()
        };
        assert_eq!(
            detector().evaluate(&obs).unwrap_err(),
            DetectorError::missing("stellar_radius")
        );
    }

    #[test]
    fn negative_radius_is_out_of_domain() {
        let obs = Observation {
            planet_radius: Some(-2.0),
            stellar_radius: Some(1.0),
            ..Default::default()
        };
        assert_eq!(detector().evaluate(&obs).unwrap_err().kind(), "out_of_domain");
    }
}
