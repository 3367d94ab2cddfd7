//! # helios-learning
//!
//! Turns one feedback event into one atomic batch of trust-weight updates.
//! Loss is computed per detector against that detector's own prediction,
//! never the aggregate.

pub mod loss;
pub mod recalibrator;

pub use loss::{binary_cross_entropy, clamp_prediction, loss_gradient};
pub use recalibrator::{RecalibrationOutcome, Recalibrator, WeightAdjustment};
