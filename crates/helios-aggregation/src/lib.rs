//! # helios-aggregation
//!
//! Combines one run's detector predictions under a fixed weight snapshot:
//! weighted-mean prediction, weighted variance, confidence, agreement,
//! classification, and the weighted-mean explanation.

pub mod aggregator;
pub mod classification;
pub mod explanation;
pub mod weighted;

pub use aggregator::{Aggregator, Contribution};
pub use classification::{agreement, classify};
pub use weighted::{weighted_mean, weighted_variance, WeightedStats};
