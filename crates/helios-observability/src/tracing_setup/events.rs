//! Structured log events for key system operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

/// A run reached `Sealed`.
pub fn run_sealed(run_id: &str, detectors: usize, failures: usize, prediction: f64, confidence: f64) {
    tracing::info!(
        event = "run_sealed",
        run_id = %run_id,
        detectors = detectors,
        failures = failures,
        prediction = prediction,
        confidence = confidence,
        "run sealed"
    );
}

/// A run failed before sealing.
pub fn run_failed(attempted: usize, reason: &str) {
    tracing::warn!(
        event = "run_failed",
        attempted = attempted,
        reason = %reason,
        "run failed"
    );
}

/// One detector was excluded from a run.
pub fn detector_failed(detector: &str, kind: &str, message: &str) {
    tracing::warn!(
        event = "detector_failed",
        detector = %detector,
        kind = %kind,
        message = %message,
        "detector failed"
    );
}

/// A feedback event updated the trust registry.
pub fn weights_recalibrated(run_id: &str, detectors: usize, label: bool, verdict_correct: bool) {
    tracing::info!(
        event = "weights_recalibrated",
        run_id = %run_id,
        detectors = detectors,
        label = label,
        verdict_correct = verdict_correct,
        "weights recalibrated"
    );
}

/// A feedback event was rejected.
pub fn feedback_rejected(run_id: &str, reason: &str) {
    tracing::warn!(
        event = "feedback_rejected",
        run_id = %run_id,
        reason = %reason,
        "feedback rejected"
    );
}

/// A component entered degraded mode.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// A degraded component is healthy again.
pub fn degradation_recovered(component: &str) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        "degradation recovered"
    );
}
