//! Candidate classification and directional agreement.

use helios_core::models::CandidateClass;

const STRONG_PREDICTION: f64 = 0.8;
const STRONG_CONFIDENCE: f64 = 0.7;
const LIKELY_PREDICTION: f64 = 0.6;
const LIKELY_CONFIDENCE: f64 = 0.5;
const POSSIBLE_PREDICTION: f64 = 0.4;
const WEAK_PREDICTION: f64 = 0.2;

/// The midpoint separating a positive call from a negative one.
pub const DIRECTION_MIDPOINT: f64 = 0.5;

/// Tier a verdict by aggregated prediction and confidence. Bounds are strict.
pub fn classify(prediction: f64, confidence: f64) -> CandidateClass {
    if prediction > STRONG_PREDICTION && confidence > STRONG_CONFIDENCE {
        CandidateClass::StrongCandidate
    } else if prediction > LIKELY_PREDICTION && confidence > LIKELY_CONFIDENCE {
        CandidateClass::LikelyPlanet
    } else if prediction > POSSIBLE_PREDICTION {
        CandidateClass::PossiblePlanet
    } else if prediction > WEAK_PREDICTION {
        CandidateClass::WeakSignal
    } else {
        CandidateClass::NotAPlanet
    }
}

/// Share of the total weight whose prediction lies on the same side of
/// [`DIRECTION_MIDPOINT`] as `mean`. A prediction exactly at the midpoint
/// counts as positive.
pub fn agreement(samples: &[(f64, f64)], mean: f64) -> f64 {
    let total: f64 = samples.iter().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let positive = mean >= DIRECTION_MIDPOINT;
    let agreeing: f64 = samples
        .iter()
        .filter(|(p, _)| (*p >= DIRECTION_MIDPOINT) == positive)
        .map(|(_, w)| w)
        .sum();
    (agreeing / total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers() {
        assert_eq!(classify(0.9, 0.9), CandidateClass::StrongCandidate);
        assert_eq!(classify(0.9, 0.6), CandidateClass::LikelyPlanet);
        assert_eq!(classify(0.9, 0.2), CandidateClass::PossiblePlanet);
        assert_eq!(classify(0.5, 1.0), CandidateClass::PossiblePlanet);
        assert_eq!(classify(0.3, 1.0), CandidateClass::WeakSignal);
        assert_eq!(classify(0.2, 1.0), CandidateClass::NotAPlanet);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify(0.8, 0.9), CandidateClass::LikelyPlanet);
        assert_eq!(classify(0.6, 0.9), CandidateClass::PossiblePlanet);
    }

    #[test]
    fn agreement_weighs_by_trust() {
        let samples = [(0.9, 2.0), (0.7, 1.0), (0.1, 1.0)];
        assert!((agreement(&samples, 0.65) - 0.75).abs() < 1e-12);
        assert!((agreement(&samples, 0.2) - 0.25).abs() < 1e-12);
    }
}
