//! Aggregate health report generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::degradation::DegradationTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Inputs for one health report.
#[derive(Debug, Clone, Default)]
pub struct HealthSnapshot {
    /// Every registered detector id.
    pub detectors: Vec<String>,
    /// Detectors whose most recent run failed.
    pub degraded: Vec<String>,
    pub total_runs: u64,
    pub failed_runs: u64,
}

impl HealthSnapshot {
    /// Build a snapshot from the detector list and a tracker.
    pub fn from_tracker(
        detectors: Vec<String>,
        tracker: &DegradationTracker,
        total_runs: u64,
        failed_runs: u64,
    ) -> Self {
        Self {
            detectors,
            degraded: tracker.degraded_components(),
            total_runs,
            failed_runs,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub total_detectors: usize,
    pub degraded_detectors: Vec<String>,
    pub total_runs: u64,
    pub failed_runs: u64,
    pub generated_at: DateTime<Utc>,
}

/// Builds a [`HealthReport`] from a [`HealthSnapshot`].
pub struct HealthReporter;

impl HealthReporter {
    pub fn build(snapshot: &HealthSnapshot) -> HealthReport {
        HealthReport {
            status: Self::derive_overall(snapshot),
            total_detectors: snapshot.detectors.len(),
            degraded_detectors: snapshot.degraded.clone(),
            total_runs: snapshot.total_runs,
            failed_runs: snapshot.failed_runs,
            generated_at: Utc::now(),
        }
    }

    /// Unhealthy when no detector is registered or every registered detector
    /// is degraded. Degraded when any detector is. Healthy otherwise.
    fn derive_overall(snapshot: &HealthSnapshot) -> HealthStatus {
        if snapshot.detectors.is_empty() {
            return HealthStatus::Unhealthy;
        }
        let degraded_registered = snapshot
            .detectors
            .iter()
            .filter(|d| snapshot.degraded.contains(d))
            .count();
        if degraded_registered == snapshot.detectors.len() {
            return HealthStatus::Unhealthy;
        }
        if degraded_registered > 0 {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(detectors: &[&str], degraded: &[&str]) -> HealthSnapshot {
        HealthSnapshot {
            detectors: detectors.iter().map(|s| s.to_string()).collect(),
            degraded: degraded.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn no_detectors_is_unhealthy() {
        let report = HealthReporter::build(&snapshot(&[], &[]));
        assert_eq!(report.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn partial_degradation() {
        let report = HealthReporter::build(&snapshot(&["a", "b"], &["a"]));
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.degraded_detectors, vec!["a".to_string()]);
    }

    #[test]
    fn all_degraded_is_unhealthy() {
        let report = HealthReporter::build(&snapshot(&["a", "b"], &["a", "b"]));
        assert_eq!(report.status, HealthStatus::Unhealthy);
    }

    #[test]
    fn unregistered_degraded_ids_are_ignored() {
        let report = HealthReporter::build(&snapshot(&["a"], &["ghost"]));
        assert_eq!(report.status, HealthStatus::Healthy);
    }
}
