use std::f64::consts::PI;

use helios_core::constants::{SOLAR_LUMINOSITY, SOLAR_RADIUS, STEFAN_BOLTZMANN};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Luminosity {
    pub watts: f64,
    pub solar: f64,
    pub surface_area_m2: f64,
}

/// `L = 4πR²σT⁴`, radius in R☉, temperature in K.
pub fn stefan_boltzmann(stellar_radius: f64, temperature_k: f64) -> Luminosity {
    let r = stellar_radius * SOLAR_RADIUS;
    let surface_area_m2 = 4.0 * PI * r * r;
    let watts = surface_area_m2 * STEFAN_BOLTZMANN * temperature_k.powi(4);
    Luminosity {
        watts,
        solar: watts / SOLAR_LUMINOSITY,
        surface_area_m2,
    }
}
