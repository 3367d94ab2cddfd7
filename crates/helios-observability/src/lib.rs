//! # helios-observability
//!
//! Structured logging setup, named events and spans, per-detector
//! degradation tracking, and the system health report.

pub mod degradation;
pub mod health;
pub mod status;
pub mod tracing_setup;

pub use degradation::{DegradationEvent, DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use health::{HealthReport, HealthReporter, HealthSnapshot, HealthStatus};
pub use status::{DetectorStatistics, SystemStatus};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
