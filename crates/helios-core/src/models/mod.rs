pub mod detector_id;
pub mod detector_output;
pub mod evaluation_run;
pub mod explanation;
pub mod feedback;
pub mod observation;
pub mod weights;

pub use detector_id::DetectorId;
pub use detector_output::DetectorOutput;
pub use evaluation_run::{
    CandidateClass, DetectorFailure, DetectorVerdict, EvaluationRun, RunId, RunSeal, RunState,
    Verdict,
};
pub use explanation::{AggregatedExplanation, Explanation, ExplanationShape, WeightShare};
pub use feedback::{FeedbackEvent, FeedbackOutcome};
pub use observation::Observation;
pub use weights::{WeightChange, WeightSnapshot};
