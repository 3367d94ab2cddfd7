/// Failure of a single detector for a single run.
///
/// Recoverable: the coordinator excludes the detector from that run's
/// aggregation and carries on with the rest.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectorError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("field {field} out of domain ({value}): {reason}")]
    OutOfDomain {
        field: String,
        value: f64,
        reason: String,
    },

    #[error("detector {detector_id} produced an invalid prediction: {value}")]
    InvalidPrediction { detector_id: String, value: f64 },

    #[error("detector {detector_id} timed out after {timeout_ms}ms")]
    TimedOut { detector_id: String, timeout_ms: u64 },

    /// An earlier call to this detector timed out and has not returned yet.
    #[error("detector {detector_id} is busy with {stalled} timed-out call(s)")]
    Busy { detector_id: String, stalled: usize },

    #[error("detector {detector_id} panicked: {message}")]
    Panicked {
        detector_id: String,
        message: String,
    },

    #[error("detector internal error: {reason}")]
    Internal { reason: String },
}

impl DetectorError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn out_of_domain(field: &str, value: f64, reason: impl Into<String>) -> Self {
        Self::OutOfDomain {
            field: field.to_string(),
            value,
            reason: reason.into(),
        }
    }

    /// Short machine-readable kind, used in failure records and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::OutOfDomain { .. } => "out_of_domain",
            Self::InvalidPrediction { .. } => "invalid_prediction",
            Self::TimedOut { .. } => "timed_out",
            Self::Busy { .. } => "busy",
            Self::Panicked { .. } => "panicked",
            Self::Internal { .. } => "internal",
        }
    }
}
