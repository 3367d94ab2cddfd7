//! Recalibrator: bounded, directional trust updates from feedback.
//!
//! For each detector that predicted in the run:
//!
//! ```text
//! P  = clamp(prediction, floor, ceiling)
//! L  = −h·ln(P) − (1−h)·ln(1−P)
//! g  = −h/P + (1−h)/(1−P)
//! Δw = η · g · (+nudge if correct else −nudge)
//! w' = clamp(w − Δw, min_weight, max_weight)
//! ```
//!
//! A detector is correct when its own call (`P ≥ decision_threshold`) equals
//! the label. The nudge keeps each step small; the raw gradient is never
//! applied to the weight directly.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use helios_core::config::RecalibrationConfig;
use helios_core::errors::{HeliosError, HeliosResult};
use helios_core::models::{DetectorId, EvaluationRun, FeedbackEvent, FeedbackOutcome, RunId};
use helios_trust::TrustRegistry;

use crate::loss::{binary_cross_entropy, clamp_prediction, loss_gradient};

/// The computed update for one detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightAdjustment {
    pub detector_id: DetectorId,
    pub prediction: f64,
    pub clamped_prediction: f64,
    pub correct: bool,
    pub loss: f64,
    pub gradient: f64,
    /// `η · g · sign_factor`.
    pub delta: f64,
    pub previous_weight: f64,
    /// `previous_weight − delta`, before clamping.
    pub requested_weight: f64,
    /// Weight stored in the registry after clamping.
    pub new_weight: f64,
}

impl WeightAdjustment {
    pub fn was_clamped(&self) -> bool {
        self.requested_weight != self.new_weight
    }
}

/// Everything one feedback event changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationOutcome {
    pub run_id: RunId,
    /// Resolved ground-truth label `h`.
    pub label: bool,
    /// Direction of the run's sealed verdict.
    pub verdict_positive: bool,
    pub learning_rate: f64,
    pub adjustments: Vec<WeightAdjustment>,
}

impl RecalibrationOutcome {
    /// Whether the sealed verdict pointed the same way as the label.
    pub fn verdict_correct(&self) -> bool {
        self.verdict_positive == self.label
    }

    pub fn mean_loss(&self) -> f64 {
        if self.adjustments.is_empty() {
            return 0.0;
        }
        self.adjustments.iter().map(|a| a.loss).sum::<f64>() / self.adjustments.len() as f64
    }
}

#[derive(Debug, Clone, Default)]
pub struct Recalibrator {
    config: RecalibrationConfig,
}

impl Recalibrator {
    pub fn new(config: &RecalibrationConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &RecalibrationConfig {
        &self.config
    }

    /// Resolve a feedback outcome against a run's verdict.
    pub fn resolve_label(&self, run: &EvaluationRun, outcome: &FeedbackOutcome) -> bool {
        outcome.label(self.verdict_positive(run))
    }

    pub fn verdict_positive(&self, run: &EvaluationRun) -> bool {
        run.verdict().aggregated_prediction >= self.config.decision_threshold
    }

    /// Compute one detector's update without touching any registry.
    ///
    /// `requested_weight` and `new_weight` are equal here; clamping is the
    /// registry's job.
    pub fn adjust(
        &self,
        detector_id: &DetectorId,
        weight: f64,
        prediction: f64,
        label: bool,
        learning_rate: f64,
    ) -> WeightAdjustment {
        let c = &self.config;
        let clamped = clamp_prediction(prediction, c.prediction_floor, c.prediction_ceiling);
        let correct = (prediction >= c.decision_threshold) == label;
        let loss = binary_cross_entropy(clamped, label);
        let gradient = loss_gradient(clamped, label);
        let sign_factor = if correct { c.nudge } else { -c.nudge };
        let delta = learning_rate * gradient * sign_factor;
        let requested = weight - delta;
        WeightAdjustment {
            detector_id: detector_id.clone(),
            prediction,
            clamped_prediction: clamped,
            correct,
            loss,
            gradient,
            delta,
            previous_weight: weight,
            requested_weight: requested,
            new_weight: requested,
        }
    }

    /// Recalibrate with the configured learning rate.
    pub fn recalibrate(
        &self,
        run: &EvaluationRun,
        feedback: &FeedbackEvent,
        registry: &TrustRegistry,
    ) -> HeliosResult<RecalibrationOutcome> {
        self.recalibrate_with_rate(run, feedback, registry, self.config.learning_rate)
    }

    /// Apply one feedback event to the registry as a single atomic batch.
    ///
    /// Each update reads the detector's current weight, not the weight in
    /// the run's snapshot. The run itself is never modified.
    pub fn recalibrate_with_rate(
        &self,
        run: &EvaluationRun,
        feedback: &FeedbackEvent,
        registry: &TrustRegistry,
        learning_rate: f64,
    ) -> HeliosResult<RecalibrationOutcome> {
        if feedback.run_id != run.id() {
            return Err(HeliosError::UnknownRun {
                run_id: feedback.run_id,
            });
        }
        if !(learning_rate.is_finite() && learning_rate >= 0.0) {
            return Err(HeliosError::ConfigError(format!(
                "learning rate must be finite and >= 0, got {learning_rate}"
            )));
        }

        let verdict_positive = self.verdict_positive(run);
        let label = feedback.outcome.label(verdict_positive);

        let mut adjustments = Vec::with_capacity(run.predictions().len());
        let changes = registry.apply_batch(|current| {
            for p in run.predictions() {
                let weight = current.get(&p.detector_id);
                adjustments.push(self.adjust(
                    &p.detector_id,
                    weight,
                    p.prediction,
                    label,
                    learning_rate,
                ));
            }
            Ok(adjustments
                .iter()
                .map(|a| (a.detector_id.clone(), a.requested_weight))
                .collect())
        })?;

        for (adjustment, change) in adjustments.iter_mut().zip(&changes) {
            adjustment.new_weight = change.applied;
            debug!(
                detector = %adjustment.detector_id,
                prediction = adjustment.prediction,
                correct = adjustment.correct,
                loss = adjustment.loss,
                delta = adjustment.delta,
                previous = adjustment.previous_weight,
                new = adjustment.new_weight,
                "detector recalibrated"
            );
        }

        let outcome = RecalibrationOutcome {
            run_id: run.id(),
            label,
            verdict_positive,
            learning_rate,
            adjustments,
        };
        info!(
            run_id = %outcome.run_id,
            label,
            verdict_correct = outcome.verdict_correct(),
            detectors = outcome.adjustments.len(),
            mean_loss = outcome.mean_loss(),
            "recalibration applied"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> DetectorId {
        DetectorId::from(s)
    }

    #[test]
    fn correct_confident_detector_gains_trust() {
        let r = Recalibrator::default();
        let a = r.adjust(&id("transit"), 1.0, 0.9, true, 0.1);
        assert!(a.correct);
        assert!((a.loss - 0.105360515657826).abs() < 1e-12);
        assert!((a.gradient + 1.111111111111111).abs() < 1e-12);
        assert!((a.delta + 0.001111111111111).abs() < 1e-12);
        assert!((a.requested_weight - 1.001111111111111).abs() < 1e-12);
    }

    #[test]
    fn wrong_detector_on_positive_label_loses_trust() {
        let r = Recalibrator::default();
        let a = r.adjust(&id("rv"), 1.0, 0.2, true, 0.1);
        assert!(!a.correct);
        assert!((a.delta - 0.005).abs() < 1e-12);
        assert!((a.requested_weight - 0.995).abs() < 1e-12);
    }

    #[test]
    fn zero_learning_rate_changes_nothing() {
        let r = Recalibrator::default();
        let a = r.adjust(&id("x"), 1.3, 0.7, false, 0.0);
        assert_eq!(a.delta, 0.0);
        assert_eq!(a.requested_weight, 1.3);
    }

    #[test]
    fn prediction_exactly_at_threshold_counts_as_positive_call() {
        let r = Recalibrator::default();
        assert!(r.adjust(&id("x"), 1.0, 0.5, true, 0.1).correct);
        assert!(!r.adjust(&id("x"), 1.0, 0.5, false, 0.1).correct);
    }
}
