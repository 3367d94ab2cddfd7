//! # helios-trust
//!
//! The trust registry is the only mutable state shared across runs. Readers
//! take whole-registry snapshots; writers are serialized behind one lock and
//! always read the current weight before replacing it.

pub mod history;
pub mod registry;

pub use history::TrustHistory;
pub use registry::{CurrentWeights, TrustRegistry};
