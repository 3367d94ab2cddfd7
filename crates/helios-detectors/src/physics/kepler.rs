//! Kepler's third law, `P² = 4π²a³ / G(M* + Mp)`.

use std::f64::consts::PI;

use helios_core::constants::{AU, EARTH_MASS, SECONDS_PER_DAY, SOLAR_MASS, G};

fn total_mass_kg(stellar_mass: f64, planet_mass: f64) -> f64 {
    stellar_mass * SOLAR_MASS + planet_mass * EARTH_MASS
}

/// Semi-major axis in AU for a period in days. `planet_mass` may be 0.
pub fn orbital_distance_au(stellar_mass: f64, planet_mass: f64, period_days: f64) -> f64 {
    let period = period_days * SECONDS_PER_DAY;
    let a = (G * total_mass_kg(stellar_mass, planet_mass) * period * period / (4.0 * PI * PI)).cbrt();
    a / AU
}

/// Orbital period in days for a semi-major axis in AU.
pub fn orbital_period_days(stellar_mass: f64, planet_mass: f64, distance_au: f64) -> f64 {
    let a = distance_au * AU;
    let period = (4.0 * PI * PI * a.powi(3) / (G * total_mass_kg(stellar_mass, planet_mass))).sqrt();
    period / SECONDS_PER_DAY
}
