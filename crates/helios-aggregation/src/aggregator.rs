//! Aggregator: one verdict from one run's predictions and weight snapshot.
//!
//! `p̄ = Σ(wᵢ·pᵢ) / Σ(wᵢ)` over the detectors that produced a prediction.
//! Failed detectors are absent from both sums and weights are not
//! renormalized beyond that restriction.
//!
//! `confidence = 1 − min(1, penalty · Σ(wᵢ·(pᵢ − p̄)²) / Σ(wᵢ))`.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use helios_core::config::AggregationConfig;
use helios_core::errors::{DetectorError, HeliosError, HeliosResult};
use helios_core::models::{DetectorId, DetectorVerdict, Explanation, Verdict};

use crate::classification::{agreement, classify};
use crate::explanation::aggregate_explanations;
use crate::weighted::WeightedStats;

/// One detector's input to an aggregation.
#[derive(Debug, Clone, Copy)]
pub struct Contribution<'a> {
    pub detector_id: &'a DetectorId,
    pub prediction: f64,
    pub weight: f64,
    pub explanation: Option<&'a Explanation>,
}

impl<'a> Contribution<'a> {
    pub fn new(
        detector_id: &'a DetectorId,
        prediction: f64,
        weight: f64,
        explanation: Option<&'a Explanation>,
    ) -> Self {
        Self {
            detector_id,
            prediction,
            weight,
            explanation,
        }
    }
}

/// Stateless consensus engine.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregationConfig,
}

impl Aggregator {
    pub fn new(config: &AggregationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &AggregationConfig {
        &self.config
    }

    /// Aggregate bare predictions. The explanation carries weight shares only.
    pub fn aggregate(
        &self,
        predictions: &BTreeMap<DetectorId, f64>,
        weights: &BTreeMap<DetectorId, f64>,
    ) -> HeliosResult<Verdict> {
        let mut contributions = Vec::with_capacity(predictions.len());
        for (id, p) in predictions {
            contributions.push(Contribution::new(id, *p, self.weight_for(id, weights)?, None));
        }
        self.aggregate_contributions(&contributions)
    }

    /// Aggregate a run's successful detector verdicts, explanations included.
    pub fn aggregate_verdicts(
        &self,
        verdicts: &[DetectorVerdict],
        weights: &BTreeMap<DetectorId, f64>,
    ) -> HeliosResult<Verdict> {
        let mut contributions = Vec::with_capacity(verdicts.len());
        for v in verdicts {
            let weight = self.weight_for(&v.detector_id, weights)?;
            contributions.push(Contribution::new(
                &v.detector_id,
                v.prediction,
                weight,
                Some(&v.explanation),
            ));
        }
        contributions.sort_by(|a, b| a.detector_id.cmp(b.detector_id));
        self.aggregate_contributions(&contributions)
    }

    /// Core aggregation over contributions sorted by detector id.
    pub fn aggregate_contributions(&self, contributions: &[Contribution<'_>]) -> HeliosResult<Verdict> {
        if contributions.is_empty() {
            return Err(HeliosError::NoDetectorsAvailable {
                attempted: 0,
                failures: Vec::new(),
            });
        }
        for c in contributions {
            if !(c.prediction.is_finite() && (0.0..=1.0).contains(&c.prediction)) {
                return Err(DetectorError::InvalidPrediction {
                    detector_id: c.detector_id.to_string(),
                    value: c.prediction,
                }
                .into());
            }
        }

        let samples: Vec<(f64, f64)> = contributions.iter().map(|c| (c.prediction, c.weight)).collect();
        let stats = WeightedStats::compute(&samples).ok_or_else(|| HeliosError::InvalidWeights {
            reason: "sum of weights is zero".into(),
        })?;

        let aggregated_prediction = stats.mean.clamp(0.0, 1.0);
        let penalty = self.config.variance_penalty * stats.variance;
        let confidence = (1.0 - penalty.min(1.0)).clamp(0.0, 1.0);
        let agreement = agreement(&samples, aggregated_prediction);
        let classification = classify(aggregated_prediction, confidence);

        debug!(
            detectors = contributions.len(),
            aggregated_prediction,
            confidence,
            variance = stats.variance,
            agreement,
            "aggregated predictions"
        );

        Ok(Verdict {
            aggregated_prediction,
            confidence,
            variance: stats.variance,
            total_weight: stats.total_weight,
            agreement,
            classification,
            explanation: aggregate_explanations(contributions),
        })
    }

    fn weight_for(&self, id: &DetectorId, weights: &BTreeMap<DetectorId, f64>) -> HeliosResult<f64> {
        let w = match weights.get(id) {
            Some(w) => *w,
            None => {
                warn!(detector = %id, fallback = self.config.fallback_weight, "no weight for detector, using fallback");
                self.config.fallback_weight
            }
        };
        if !(w.is_finite() && w > 0.0) {
            return Err(HeliosError::InvalidWeights {
                reason: format!("weight for {id} must be positive and finite, got {w}"),
            });
        }
        Ok(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios_core::models::CandidateClass;

    fn map(pairs: &[(&str, f64)]) -> BTreeMap<DetectorId, f64> {
        pairs.iter().map(|(k, v)| (DetectorId::from(*k), *v)).collect()
    }

    #[test]
    fn transit_and_rv_disagreement() {
        let verdict = Aggregator::default()
            .aggregate(
                &map(&[("transit", 0.9), ("radial_velocity", 0.3)]),
                &map(&[("transit", 1.0), ("radial_velocity", 1.0)]),
            )
            .unwrap();
        assert!((verdict.aggregated_prediction - 0.6).abs() < 1e-12);
        assert!((verdict.variance - 0.09).abs() < 1e-12);
        assert!((verdict.confidence - 0.82).abs() < 1e-12);
        assert_eq!(verdict.total_weight, 2.0);
        assert_eq!(verdict.classification, CandidateClass::PossiblePlanet);
    }

    #[test]
    fn empty_predictions_fail() {
        let err = Aggregator::default()
            .aggregate(&BTreeMap::new(), &map(&[("transit", 1.0)]))
            .unwrap_err();
        assert!(matches!(err, HeliosError::NoDetectorsAvailable { .. }));
    }

    #[test]
    fn absent_weight_uses_fallback() {
        let verdict = Aggregator::default()
            .aggregate(&map(&[("a", 0.2), ("b", 0.8)]), &map(&[("a", 1.0)]))
            .unwrap();
        assert!((verdict.aggregated_prediction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn weights_for_absent_detectors_are_ignored() {
        let verdict = Aggregator::default()
            .aggregate(&map(&[("a", 0.4)]), &map(&[("a", 0.5), ("failed", 2.0)]))
            .unwrap();
        assert_eq!(verdict.total_weight, 0.5);
        assert_eq!(verdict.confidence, 1.0);
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        let err = Aggregator::default()
            .aggregate(&map(&[("a", 0.4)]), &map(&[("a", 0.0)]))
            .unwrap_err();
        assert!(matches!(err, HeliosError::InvalidWeights { .. }));
    }

    #[test]
    fn out_of_range_prediction_is_rejected() {
        let err = Aggregator::default()
            .aggregate(&map(&[("a", 1.4)]), &map(&[("a", 1.0)]))
            .unwrap_err();
        assert!(matches!(
            err,
            HeliosError::Detector(DetectorError::InvalidPrediction { .. })
        ));
    }

    #[test]
    fn penalty_is_configurable() {
        let aggregator = Aggregator::new(&AggregationConfig {
            variance_penalty: 4.0,
            ..Default::default()
        });
        let verdict = aggregator
            .aggregate(&map(&[("a", 0.0), ("b", 1.0)]), &map(&[("a", 1.0), ("b", 1.0)]))
            .unwrap();
        assert_eq!(verdict.confidence, 0.0);
    }

    #[test]
    fn verdicts_carry_explanations() {
        let verdicts = vec![
            DetectorVerdict {
                detector_id: DetectorId::from("b"),
                prediction: 0.6,
                explanation: Explanation::Scalar(10.0),
                latency_ms: 3,
            },
            DetectorVerdict {
                detector_id: DetectorId::from("a"),
                prediction: 0.8,
                explanation: Explanation::Scalar(20.0),
                latency_ms: 1,
            },
        ];
        let verdict = Aggregator::default()
            .aggregate_verdicts(&verdicts, &map(&[("a", 1.0), ("b", 1.0)]))
            .unwrap();
        assert_eq!(verdict.explanation.value, Some(Explanation::Scalar(15.0)));
        assert_eq!(
            verdict.explanation.contributors,
            vec![DetectorId::from("a"), DetectorId::from("b")]
        );
    }
}
