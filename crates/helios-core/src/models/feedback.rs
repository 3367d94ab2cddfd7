use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RunId;

/// What the outside world says about a sealed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedbackOutcome {
    /// Confirmed label: `positive = true` means a real planet (h = 1).
    GroundTruth { positive: bool },
    /// A reviewer judged the run's verdict correct or incorrect.
    HumanCorrection { correct: bool },
}

impl FeedbackOutcome {
    /// Resolve to the ground-truth label `h`, given the direction of the verdict.
    ///
    /// ```
    /// use helios_core::models::FeedbackOutcome;
    ///
    /// let wrong = FeedbackOutcome::HumanCorrection { correct: false };
    /// assert!(!wrong.label(true));
    /// assert!(FeedbackOutcome::GroundTruth { positive: true }.label(false));
    /// ```
    pub fn label(&self, verdict_positive: bool) -> bool {
        match *self {
            Self::GroundTruth { positive } => positive,
            Self::HumanCorrection { correct } => verdict_positive == correct,
        }
    }
}

/// A feedback event. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub run_id: RunId,
    pub outcome: FeedbackOutcome,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
}

impl FeedbackEvent {
    pub fn new(run_id: RunId, outcome: FeedbackOutcome) -> Self {
        Self {
            run_id,
            outcome,
            timestamp: Utc::now(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
