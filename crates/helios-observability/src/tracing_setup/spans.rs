//! Span definitions for evaluation runs and recalibration.

/// Create an evaluation span.
#[macro_export]
macro_rules! evaluation_span {
    ($run_id:expr, $detectors:expr) => {
        tracing::info_span!("helios.evaluation", run_id = %$run_id, detectors = $detectors)
    };
}

/// Create a recalibration span.
#[macro_export]
macro_rules! recalibration_span {
    ($run_id:expr) => {
        tracing::info_span!("helios.recalibration", run_id = %$run_id)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const EVALUATION: &str = "helios.evaluation";
    pub const RECALIBRATION: &str = "helios.recalibration";
}
