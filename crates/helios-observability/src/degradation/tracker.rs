//! Degradation tracker: records detectors dropping out of runs and their recovery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

/// Oldest events beyond this many are discarded, recovered ones first.
pub const DEFAULT_EVENT_LIMIT: usize = 1024;

/// One detector failure that excluded it from a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    /// Detector id.
    pub component: String,
    /// Failure kind, e.g. `timeout` or `missing_field`.
    pub failure: String,
    /// What the run did instead.
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

/// Tracks degradation events with a bounded history.
#[derive(Debug)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
    limit: usize,
}

impl Default for DegradationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_EVENT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
        self.enforce_limit();
    }

    /// Mark every active degradation for `component` as recovered.
    /// Returns how many were closed.
    pub fn mark_recovered(&mut self, component: &str) -> usize {
        let now = Utc::now();
        let mut closed = 0;
        for tracked in self.events.iter_mut() {
            if tracked.event.component == component
                && tracked.recovery_status == RecoveryStatus::Active
            {
                tracked.recovery_status = RecoveryStatus::Recovered;
                tracked.recovered_at = Some(now);
                closed += 1;
            }
        }
        if closed > 0 {
            events::degradation_recovered(component);
        }
        closed
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|e| e.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Whether `component` has at least one unrecovered degradation.
    pub fn is_degraded(&self, component: &str) -> bool {
        self.events.iter().any(|e| {
            e.event.component == component && e.recovery_status == RecoveryStatus::Active
        })
    }

    /// Components with active degradations, sorted and deduplicated.
    pub fn degraded_components(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .active_degradations()
            .into_iter()
            .map(|t| t.event.component.clone())
            .collect();
        out.sort();
        out.dedup();
        out
    }

    fn enforce_limit(&mut self) {
        while self.events.len() > self.limit {
            let victim = self
                .events
                .iter()
                .position(|e| e.recovery_status == RecoveryStatus::Recovered)
                .unwrap_or(0);
            self.events.remove(victim);
        }
    }
}
