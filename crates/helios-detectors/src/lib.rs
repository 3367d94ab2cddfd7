//! # helios-detectors
//!
//! Everything on the producing side of a run: closed-form astrophysics,
//! the built-in detectors that turn it into predictions, the adapter that
//! normalizes any detector's output, and the catalog detectors are
//! registered in at startup.

pub mod adapter;
pub mod adapters;
pub mod catalog;
pub mod physics;

pub use adapter::{CallTicket, DetectorAdapter};
pub use adapters::{
    FnDetector, HabitabilityDetector, OrbitalDynamicsDetector, RadialVelocityDetector,
    TransitDetector,
};
pub use catalog::DetectorCatalog;
pub use physics::{analyze_system, SystemAnalysis};
