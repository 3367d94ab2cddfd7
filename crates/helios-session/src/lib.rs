//! # helios-session
//!
//! Drives one evaluation cycle from observation to sealed run, and routes
//! feedback for sealed runs into the trust registry.
//!
//! ## Modules
//!
//! - `pending`: the `Collecting → Aggregating → Sealed` state machine
//! - `ledger`: bounded store of sealed runs, feedback claims via `DashMap`
//! - `stats`: lock-free session counters and recent confidences
//! - `coordinator`: `Coordinator`, the entry point for observations and feedback

pub mod coordinator;
pub mod ledger;
pub mod pending;
pub mod stats;

pub use coordinator::Coordinator;
pub use ledger::{FeedbackState, RunLedger};
pub use pending::PendingRun;
pub use stats::SessionStats;
