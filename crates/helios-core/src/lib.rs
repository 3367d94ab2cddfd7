//! # helios-core
//!
//! Foundation crate for the Helios detector-consensus system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::HeliosConfig;
pub use errors::{DetectorError, HeliosError, HeliosResult};
pub use models::{
    DetectorId, DetectorOutput, EvaluationRun, Explanation, FeedbackEvent, FeedbackOutcome,
    Observation, RunId, WeightSnapshot,
};
pub use traits::Detector;
