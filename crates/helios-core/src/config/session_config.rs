use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Run coordinator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Per-detector timeout in milliseconds when the caller supplies none.
    pub detector_timeout_ms: u64,
    /// Sealed runs kept for feedback. Oldest are evicted first.
    pub max_retained_runs: usize,
    /// Number of recent confidences kept for status reporting.
    pub recent_window: usize,
}

impl SessionConfig {
    pub fn detector_timeout(&self) -> Duration {
        Duration::from_millis(self.detector_timeout_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            detector_timeout_ms: defaults::DEFAULT_DETECTOR_TIMEOUT_MS,
            max_retained_runs: defaults::DEFAULT_MAX_RETAINED_RUNS,
            recent_window: defaults::DEFAULT_RECENT_WINDOW,
        }
    }
}
