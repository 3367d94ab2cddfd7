use chrono::Utc;
use helios_core::config::TrustConfig;
use helios_core::models::*;
use helios_learning::Recalibrator;
use helios_trust::TrustRegistry;
use proptest::prelude::*;
use test_fixtures::{f64_field, load_fixture_value};

fn verdict(p: f64) -> Verdict {
    Verdict {
        aggregated_prediction: p,
        confidence: 1.0,
        variance: 0.0,
        total_weight: 1.0,
        agreement: 1.0,
        classification: CandidateClass::LikelyPlanet,
        explanation: AggregatedExplanation::default(),
    }
}

fn sealed(predictions: &[(&str, f64)], aggregated: f64) -> EvaluationRun {
    EvaluationRun::seal(RunSeal {
        id: RunId::new(),
        observation: Observation::default(),
        observation_fingerprint: String::new(),
        weights: predictions.iter().map(|(id, _)| (DetectorId::from(*id), 1.0)).collect(),
        predictions: predictions
            .iter()
            .map(|(id, p)| DetectorVerdict {
                detector_id: DetectorId::from(*id),
                prediction: *p,
                explanation: Explanation::None,
                latency_ms: 0,
            })
            .collect(),
        failures: Vec::new(),
        verdict: verdict(aggregated),
        started_at: Utc::now(),
    })
}

#[test]
fn recalibration_golden_cases() {
    let fixture = load_fixture_value("golden/recalibration/updates.json");
    let lr = f64_field(&fixture, "learning_rate");
    let tol = f64_field(&fixture, "tolerance");
    let recalibrator = Recalibrator::default();

    for case in fixture["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let registry = TrustRegistry::default();
        let id = DetectorId::from("detector");
        registry.apply_update(&id, f64_field(case, "weight")).unwrap();

        let prediction = f64_field(case, "prediction");
        let run = sealed(&[("detector", prediction)], prediction);
        let label = case["label"].as_bool().unwrap();
        let event = FeedbackEvent::new(run.id(), FeedbackOutcome::GroundTruth { positive: label });

        let outcome = recalibrator.recalibrate_with_rate(&run, &event, &registry, lr).unwrap();
        let adj = &outcome.adjustments[0];
        let expected = &case["expected"];

        assert_eq!(adj.correct, expected["correct"].as_bool().unwrap(), "{name}");
        for (field, actual) in [
            ("loss", adj.loss),
            ("gradient", adj.gradient),
            ("delta", adj.delta),
            ("new_weight", adj.new_weight),
        ] {
            let want = f64_field(expected, field);
            assert!((actual - want).abs() <= tol, "{name}: {field} expected {want}, got {actual}");
        }
        assert_eq!(registry.peek(&id).unwrap(), Some(adj.new_weight), "{name}");
    }
}

#[test]
fn transit_scenario_from_the_design() {
    let registry = TrustRegistry::default();
    let run = sealed(&[("transit", 0.9), ("radial_velocity", 0.3)], 0.6);
    registry.register_all(run.weights().as_map().keys()).unwrap();

    let event = FeedbackEvent::new(run.id(), FeedbackOutcome::GroundTruth { positive: true });
    let outcome = Recalibrator::default().recalibrate(&run, &event, &registry).unwrap();

    let transit = registry.peek(&DetectorId::from("transit")).unwrap().unwrap();
    let rv = registry.peek(&DetectorId::from("radial_velocity")).unwrap().unwrap();
    assert!((transit - 1.00111).abs() < 1e-5, "transit = {transit}");
    assert!(rv < 1.0, "rv = {rv}");
    assert!(outcome.verdict_correct());
    // The sealed verdict is untouched.
    assert_eq!(run.verdict().aggregated_prediction, 0.6);
}

#[test]
fn human_correction_flips_the_label_when_verdict_was_wrong() {
    let registry = TrustRegistry::default();
    let run = sealed(&[("transit", 0.9)], 0.9);
    let event = FeedbackEvent::new(run.id(), FeedbackOutcome::HumanCorrection { correct: false });
    let outcome = Recalibrator::default().recalibrate(&run, &event, &registry).unwrap();
    assert!(!outcome.label);
    assert!(!outcome.verdict_correct());
    assert!(!outcome.adjustments[0].correct);
}

#[test]
fn feedback_for_another_run_is_unknown() {
    let registry = TrustRegistry::default();
    let run = sealed(&[("transit", 0.9)], 0.9);
    let event = FeedbackEvent::new(RunId::new(), FeedbackOutcome::GroundTruth { positive: true });
    let err = Recalibrator::default().recalibrate(&run, &event, &registry).unwrap_err();
    assert!(matches!(err, helios_core::HeliosError::UnknownRun { .. }));
    assert_eq!(registry.total_updates().unwrap(), 0);
}

#[test]
fn repeated_correct_feedback_converges_to_the_ceiling() {
    let registry = TrustRegistry::new(&TrustConfig::default());
    let recalibrator = Recalibrator::default();
    let id = DetectorId::from("transit");
    registry.apply_update(&id, 1.99).unwrap();

    let mut previous_step = f64::INFINITY;
    for _ in 0..20 {
        let run = sealed(&[("transit", 0.9)], 0.9);
        let event = FeedbackEvent::new(run.id(), FeedbackOutcome::GroundTruth { positive: true });
        let outcome = recalibrator.recalibrate(&run, &event, &registry).unwrap();
        let adj = &outcome.adjustments[0];
        let step = (adj.new_weight - adj.previous_weight).abs();
        assert!(step <= previous_step + 1e-12, "step grew: {step} > {previous_step}");
        assert!((0.1..=2.0).contains(&adj.new_weight));
        previous_step = step;
    }
    assert_eq!(registry.peek(&id).unwrap(), Some(2.0));
    assert_eq!(previous_step, 0.0);
}

proptest! {
    #[test]
    fn weights_stay_bounded_under_arbitrary_feedback(
        events in proptest::collection::vec((0.0f64..=1.0, any::<bool>(), 0.0f64..5.0), 1..40)
    ) {
        let registry = TrustRegistry::default();
        let recalibrator = Recalibrator::default();
        for (p, label, lr) in events {
            let run = sealed(&[("d", p)], p);
            let event = FeedbackEvent::new(run.id(), FeedbackOutcome::GroundTruth { positive: label });
            let outcome = recalibrator.recalibrate_with_rate(&run, &event, &registry, lr).unwrap();
            prop_assert!((0.1..=2.0).contains(&outcome.adjustments[0].new_weight));
        }
    }
}
