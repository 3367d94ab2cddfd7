use helios_core::config::DetectorConfig;
use helios_core::models::Observation;
use helios_detectors::{analyze_system, DetectorCatalog};
use proptest::prelude::*;
use test_fixtures::load_fixture;

#[derive(serde::Deserialize)]
struct Scenario {
    observation: Observation,
}

#[test]
fn kepler_452b_runs_through_every_builtin() {
    let scenario: Scenario = load_fixture("scenarios/kepler_452b.json");
    scenario.observation.validate().unwrap();

    let catalog = DetectorCatalog::standard(&DetectorConfig::default());
    let mut succeeded = Vec::new();
    let mut failed = Vec::new();
    for adapter in catalog.adapters() {
        match adapter.evaluate(&scenario.observation) {
            Ok(out) => {
                assert!((0.0..=1.0).contains(&out.prediction));
                succeeded.push(adapter.id().to_string());
            }
            Err(e) => failed.push((adapter.id().to_string(), e.kind())),
        }
    }

    // No measured velocity and no planet mass: the RV detector cannot run.
    assert_eq!(failed, vec![("radial_velocity".to_string(), "missing_field")]);
    assert_eq!(succeeded.len(), 3);
}

#[test]
fn analysis_matches_scenario() {
    let scenario: Scenario = load_fixture("scenarios/kepler_452b.json");
    let analysis = analyze_system(&scenario.observation, &DetectorConfig::default());
    let transit = analysis.transit.unwrap();
    let expected = (1.63_f64 * 6.371e6 / (1.11 * 6.96e8)).powi(2);
    assert!((transit.depth - expected).abs() < 1e-12);
    assert!(analysis.equilibrium_temperature.is_some());
}

fn any_observation() -> impl Strategy<Value = Observation> {
    (
        proptest::option::of(0.05f64..50.0),
        proptest::option::of(0.05f64..50.0),
        proptest::option::of(2000.0f64..40000.0),
        proptest::option::of(0.01f64..5000.0),
        proptest::option::of(0.3f64..30.0),
        proptest::option::of(0.1f64..5000.0),
        proptest::option::of(0.01f64..50.0),
        proptest::option::of(0.0f64..1.0),
        proptest::option::of(-500.0f64..500.0),
    )
        .prop_map(|(ms, rs, t, mp, rp, p, a, depth, rv)| Observation {
            stellar_mass: ms,
            stellar_radius: rs,
            stellar_temperature: t,
            planet_mass: mp,
            planet_radius: rp,
            orbital_period: p,
            orbital_distance: a,
            transit_depth: depth,
            radial_velocity: rv,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn builtin_predictions_stay_in_unit_interval(obs in any_observation()) {
        let catalog = DetectorCatalog::standard(&DetectorConfig::default());
        for adapter in catalog.adapters() {
            if let Ok(out) = adapter.evaluate(&obs) {
                prop_assert!(out.prediction.is_finite());
                prop_assert!((0.0..=1.0).contains(&out.prediction));
            }
        }
    }
}
