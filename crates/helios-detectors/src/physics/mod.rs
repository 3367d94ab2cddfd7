//! Closed-form astrophysics in SI units.
//!
//! Inputs use observational units (solar/Earth units, days, AU); every
//! function converts to SI internally. None of these functions validate
//! their inputs: callers pass values that already went through
//! `Observation::validate`.

pub mod doppler;
pub mod habitability;
pub mod kepler;
pub mod luminosity;
pub mod system;
pub mod transit;

pub use doppler::{doppler_shift, rv_semi_amplitude, DopplerShift};
pub use habitability::{equilibrium_temperature, EquilibriumTemperature, HabitabilityClass, HabitableZone};
pub use kepler::{orbital_distance_au, orbital_period_days};
pub use luminosity::{stefan_boltzmann, Luminosity};
pub use system::{analyze_system, SystemAnalysis};
pub use transit::{planet_radius_from_depth, transit_depth, TransitDepth};
