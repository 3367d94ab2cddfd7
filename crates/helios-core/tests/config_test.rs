use std::io::Write;

use helios_core::config::{defaults, HeliosConfig};
use helios_core::HeliosError;

#[test]
fn empty_document_yields_defaults() {
    let config = HeliosConfig::from_toml("").unwrap();
    assert_eq!(config, HeliosConfig::default());
    assert_eq!(config.trust.default_weight, defaults::DEFAULT_TRUST_WEIGHT);
    assert_eq!(config.recalibration.learning_rate, 0.1);
    assert_eq!(config.aggregation.variance_penalty, 2.0);
    assert!(config.validate().is_ok());
}

#[test]
fn partial_sections_override_only_named_keys() {
    let config = HeliosConfig::from_toml(
        r#"
        [recalibration]
        learning_rate = 0.05

        [session]
        detector_timeout_ms = 250
        "#,
    )
    .unwrap();
    assert_eq!(config.recalibration.learning_rate, 0.05);
    assert_eq!(config.recalibration.nudge, defaults::DEFAULT_NUDGE);
    assert_eq!(config.session.detector_timeout().as_millis(), 250);
    assert_eq!(config.session.max_retained_runs, defaults::DEFAULT_MAX_RETAINED_RUNS);
}

#[test]
fn validate_rejects_inverted_trust_bounds() {
    let mut config = HeliosConfig::default();
    config.trust.min_weight = 3.0;
    assert!(matches!(config.validate(), Err(HeliosError::ConfigError(_))));
}

#[test]
fn validate_rejects_zero_min_weight() {
    let mut config = HeliosConfig::default();
    config.trust.min_weight = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_bad_prediction_clamp() {
    let mut config = HeliosConfig::default();
    config.recalibration.prediction_floor = 0.0;
    assert!(config.validate().is_err());

    let mut config = HeliosConfig::default();
    config.recalibration.prediction_ceiling = 1.0;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_nan_learning_rate() {
    let mut config = HeliosConfig::default();
    config.recalibration.learning_rate = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn validate_rejects_zero_timeout_and_retention() {
    let mut config = HeliosConfig::default();
    config.session.detector_timeout_ms = 0;
    assert!(config.validate().is_err());

    let mut config = HeliosConfig::default();
    config.session.max_retained_runs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn load_reads_and_validates_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[trust]\nmax_weight = 4.0").unwrap();
    let config = HeliosConfig::load(file.path()).unwrap();
    assert_eq!(config.trust.max_weight, 4.0);
}

#[test]
fn load_surfaces_invalid_values_as_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[trust]\ndefault_weight = 9.0").unwrap();
    let err = HeliosConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, HeliosError::ConfigError(_)));
}

#[test]
fn load_missing_file_is_config_error() {
    let err = HeliosConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, HeliosError::ConfigError(_)));
}

#[test]
fn trust_clamp_maps_nan_to_floor() {
    let config = HeliosConfig::default();
    assert_eq!(config.trust.clamp(f64::NAN), config.trust.min_weight);
    assert_eq!(config.trust.clamp(1.5), 1.5);
}
