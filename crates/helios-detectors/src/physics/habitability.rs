use std::f64::consts::PI;

use helios_core::constants::{AU, KELVIN_OFFSET, SOLAR_LUMINOSITY, STEFAN_BOLTZMANN};
use serde::{Deserialize, Serialize};

const CONSERVATIVE_INNER: f64 = 0.95;
const CONSERVATIVE_OUTER: f64 = 1.37;
const OPTIMISTIC_INNER: f64 = 0.75;
const OPTIMISTIC_OUTER: f64 = 1.77;

/// Habitable-zone bounds in AU, scaled by `√L`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitableZone {
    pub conservative_inner_au: f64,
    pub conservative_outer_au: f64,
    pub optimistic_inner_au: f64,
    pub optimistic_outer_au: f64,
}

/// Where an orbit falls relative to the habitable zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitabilityClass {
    Conservative,
    Optimistic,
    Outside,
}

impl HabitableZone {
    /// Bounds for a star of `luminosity` L☉.
    pub fn for_luminosity(luminosity: f64) -> Self {
        let root = luminosity.sqrt();
        Self {
            conservative_inner_au: CONSERVATIVE_INNER * root,
            conservative_outer_au: CONSERVATIVE_OUTER * root,
            optimistic_inner_au: OPTIMISTIC_INNER * root,
            optimistic_outer_au: OPTIMISTIC_OUTER * root,
        }
    }

    pub fn width_au(&self) -> f64 {
        self.conservative_outer_au - self.conservative_inner_au
    }

    /// Bounds are inclusive on both ends.
    pub fn classify(&self, distance_au: f64) -> HabitabilityClass {
        if (self.conservative_inner_au..=self.conservative_outer_au).contains(&distance_au) {
            HabitabilityClass::Conservative
        } else if (self.optimistic_inner_au..=self.optimistic_outer_au).contains(&distance_au) {
            HabitabilityClass::Optimistic
        } else {
            HabitabilityClass::Outside
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumTemperature {
    pub kelvin: f64,
    pub celsius: f64,
    pub flux_w_m2: f64,
    pub albedo: f64,
}

/// `T_eq = [(L/(4πa²))·(1−A) / (4σ)]^(1/4)`, luminosity in L☉, distance in AU.
pub fn equilibrium_temperature(luminosity: f64, distance_au: f64, albedo: f64) -> EquilibriumTemperature {
    let watts = luminosity * SOLAR_LUMINOSITY;
    let a = distance_au * AU;
    let flux_w_m2 = watts / (4.0 * PI * a * a);
    let kelvin = (flux_w_m2 * (1.0 - albedo) / (4.0 * STEFAN_BOLTZMANN)).powf(0.25);
    EquilibriumTemperature {
        kelvin,
        celsius: kelvin - KELVIN_OFFSET,
        flux_w_m2,
        albedo,
    }
}
