//! Point-in-time status of a coordinator.

use serde::{Deserialize, Serialize};

use crate::health::HealthReport;

/// Per-detector counters and current trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorStatistics {
    pub detector_id: String,
    pub weight: f64,
    /// Weight updates applied by recalibration.
    pub update_count: u64,
    pub successes: u64,
    pub failures: u64,
    pub degraded: bool,
}

impl DetectorStatistics {
    /// Fraction of runs this detector contributed to, if it was ever dispatched.
    pub fn success_rate(&self) -> Option<f64> {
        let total = self.successes + self.failures;
        (total > 0).then(|| self.successes as f64 / total as f64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub sealed_runs: u64,
    pub failed_runs: u64,
    pub retained_runs: usize,
    pub feedback_applied: u64,
    pub feedback_rejected: u64,
    /// Share of recalibrated runs whose verdict matched the label.
    pub system_accuracy: Option<f64>,
    pub recent_confidences: Vec<f64>,
    pub detectors: Vec<DetectorStatistics>,
    pub health: HealthReport,
}

impl SystemStatus {
    pub fn mean_recent_confidence(&self) -> Option<f64> {
        if self.recent_confidences.is_empty() {
            return None;
        }
        Some(self.recent_confidences.iter().sum::<f64>() / self.recent_confidences.len() as f64)
    }
}
