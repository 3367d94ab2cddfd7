// Single source of truth for all default values.

// --- Trust ---
pub const DEFAULT_TRUST_WEIGHT: f64 = 1.0;
pub const DEFAULT_MIN_TRUST_WEIGHT: f64 = 0.1;
pub const DEFAULT_MAX_TRUST_WEIGHT: f64 = 2.0;
pub const DEFAULT_TRUST_HISTORY_LIMIT: usize = 256;

// --- Aggregation ---
pub const DEFAULT_VARIANCE_PENALTY: f64 = 2.0;

// --- Recalibration ---
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_PREDICTION_FLOOR: f64 = 0.001;
pub const DEFAULT_PREDICTION_CEILING: f64 = 0.999;
pub const DEFAULT_NUDGE: f64 = 0.01;
pub const DEFAULT_DECISION_THRESHOLD: f64 = 0.5;

// --- Session ---
pub const DEFAULT_DETECTOR_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_RETAINED_RUNS: usize = 10_000;
pub const DEFAULT_RECENT_WINDOW: usize = 100;

// --- Detectors ---
pub const DEFAULT_TRANSIT_DEPTH_THRESHOLD: f64 = 0.01; // 1% flux drop saturates
pub const DEFAULT_DOPPLER_SHIFT_THRESHOLD: f64 = 1e-7; // ~30 m/s
pub const DEFAULT_REST_WAVELENGTH_M: f64 = 550e-9;
pub const DEFAULT_ORBITAL_TOLERANCE: f64 = 0.25;
pub const DEFAULT_ALBEDO: f64 = 0.3;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
