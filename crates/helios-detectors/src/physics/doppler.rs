use helios_core::constants::{EARTH_MASS, SECONDS_PER_DAY, SOLAR_MASS, SPEED_OF_LIGHT, G};
use serde::{Deserialize, Serialize};

/// `Δλ/λ = v/c` for a given rest wavelength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DopplerShift {
    pub velocity_ms: f64,
    pub shift_ratio: f64,
    pub wavelength_shift_m: f64,
    pub rest_wavelength_m: f64,
    pub observed_wavelength_m: f64,
}

/// Doppler shift for a radial velocity (m/s, positive = receding).
pub fn doppler_shift(velocity_ms: f64, rest_wavelength_m: f64) -> DopplerShift {
    let shift_ratio = velocity_ms / SPEED_OF_LIGHT;
    let wavelength_shift_m = shift_ratio * rest_wavelength_m;
    DopplerShift {
        velocity_ms,
        shift_ratio,
        wavelength_shift_m,
        rest_wavelength_m,
        observed_wavelength_m: rest_wavelength_m + wavelength_shift_m,
    }
}

/// Radial-velocity semi-amplitude K in m/s.
///
/// `K = (2πG/P)^(1/3) · Mp·sin(i) / (Ms+Mp)^(2/3) · 1/√(1−e²)`
///
/// Masses in M⊕ / M☉, period in days, inclination in degrees.
pub fn rv_semi_amplitude(
    planet_mass: f64,
    stellar_mass: f64,
    period_days: f64,
    inclination_deg: f64,
    eccentricity: f64,
) -> f64 {
    let mp = planet_mass * EARTH_MASS;
    let ms = stellar_mass * SOLAR_MASS;
    let period = period_days * SECONDS_PER_DAY;

    let orbital = (2.0 * std::f64::consts::PI * G / period).cbrt();
    let mass = mp * inclination_deg.to_radians().sin() / (ms + mp).powf(2.0 / 3.0);
    let shape = if eccentricity < 1.0 {
        1.0 / (1.0 - eccentricity * eccentricity).sqrt()
    } else {
        1.0
    };
    orbital * mass * shape
}
