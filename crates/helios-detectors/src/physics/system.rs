//! Whole-system analysis: every quantity derivable from an observation.

use std::collections::BTreeMap;

use helios_core::config::DetectorConfig;
use helios_core::Observation;
use serde::{Deserialize, Serialize};

use super::{
    doppler_shift, equilibrium_temperature, orbital_distance_au, orbital_period_days,
    planet_radius_from_depth, rv_semi_amplitude, stefan_boltzmann, transit_depth, DopplerShift,
    EquilibriumTemperature, HabitabilityClass, HabitableZone, TransitDepth,
};

/// Derived quantities for one observation. Fields are `None` when the
/// observation lacks the inputs they need.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemAnalysis {
    /// Stellar luminosity in L☉, computed from radius and temperature when
    /// both are present, otherwise the observed value.
    pub stellar_luminosity: Option<f64>,
    pub orbital_distance_au: Option<f64>,
    pub orbital_period_days: Option<f64>,
    pub transit: Option<TransitDepth>,
    /// Planet radius in R⊕, observed or inferred from the transit depth.
    pub planet_radius: Option<f64>,
    pub rv_semi_amplitude_ms: Option<f64>,
    pub doppler: Option<DopplerShift>,
    pub habitable_zone: Option<HabitableZone>,
    pub habitability: Option<HabitabilityClass>,
    pub equilibrium_temperature: Option<EquilibriumTemperature>,
}

/// Assemble every derivable quantity for `observation`.
pub fn analyze_system(observation: &Observation, config: &DetectorConfig) -> SystemAnalysis {
    let mut analysis = SystemAnalysis::default();
    let obs = observation;

    analysis.stellar_luminosity = match (obs.stellar_radius, obs.stellar_temperature) {
        (Some(r), Some(t)) => Some(stefan_boltzmann(r, t).solar),
        _ => obs.stellar_luminosity,
    };

    let planet_mass = obs.planet_mass.unwrap_or(0.0);
    match (obs.stellar_mass, obs.orbital_period, obs.orbital_distance) {
        (Some(m), Some(p), _) => {
            analysis.orbital_period_days = Some(p);
            analysis.orbital_distance_au = Some(orbital_distance_au(m, planet_mass, p));
        }
        (Some(m), None, Some(a)) => {
            analysis.orbital_distance_au = Some(a);
            analysis.orbital_period_days = Some(orbital_period_days(m, planet_mass, a));
        }
        (None, p, a) => {
            analysis.orbital_period_days = p;
            analysis.orbital_distance_au = a;
        }
        (Some(_), None, None) => {}
    }

    match (obs.planet_radius, obs.stellar_radius, obs.transit_depth) {
        (Some(rp), Some(rs), _) => {
            analysis.transit = Some(transit_depth(rp, rs));
            analysis.planet_radius = Some(rp);
        }
        (None, Some(rs), Some(depth)) => {
            analysis.transit = Some(TransitDepth::from_depth(depth));
            analysis.planet_radius = Some(planet_radius_from_depth(depth, rs));
        }
        (rp, _, depth) => {
            analysis.transit = depth.map(TransitDepth::from_depth);
            analysis.planet_radius = rp;
        }
    }

    if let (Some(mp), Some(ms), Some(p)) = (obs.planet_mass, obs.stellar_mass, obs.orbital_period) {
        analysis.rv_semi_amplitude_ms = Some(rv_semi_amplitude(
            mp,
            ms,
            p,
            obs.orbital_inclination,
            obs.eccentricity,
        ));
    }
    if let Some(v) = obs.radial_velocity.or(analysis.rv_semi_amplitude_ms) {
        analysis.doppler = Some(doppler_shift(v, config.rest_wavelength_m));
    }

    if let Some(l) = analysis.stellar_luminosity {
        let hz = HabitableZone::for_luminosity(l);
        analysis.habitable_zone = Some(hz);
        if let Some(a) = analysis.orbital_distance_au {
            analysis.habitability = Some(hz.classify(a));
            let albedo = obs.albedo.unwrap_or(config.default_albedo);
            analysis.equilibrium_temperature = Some(equilibrium_temperature(l, a, albedo));
        }
    }

    analysis
}

impl SystemAnalysis {
    /// Short human-readable lines keyed by topic.
    pub fn summary(&self) -> BTreeMap<&'static str, String> {
        let mut out = BTreeMap::new();
        if let Some(l) = self.stellar_luminosity {
            out.insert("star", format!("Star: {l:.2} solar luminosities"));
        }
        if let (Some(p), Some(a)) = (self.orbital_period_days, self.orbital_distance_au) {
            out.insert("orbit", format!("Orbit: {p:.1} days, {a:.2} AU from star"));
        }
        if let Some(zone) = self.habitability {
            let line = match zone {
                HabitabilityClass::Conservative => "Planet is in the conservative habitable zone",
                HabitabilityClass::Optimistic => "Planet is in the optimistic habitable zone",
                HabitabilityClass::Outside => "Planet is outside the habitable zone",
            };
            out.insert("habitability", line.to_string());
        }
        if let Some(t) = self.equilibrium_temperature {
            out.insert(
                "temperature",
                format!("Equilibrium temperature: {:.0}°C", t.celsius),
            );
        }
        if let Some(t) = self.transit {
            out.insert("transit", format!("Transit depth: {:.0} ppm", t.depth_ppm));
        }
        if let Some(k) = self.rv_semi_amplitude_ms {
            out.insert("radial_velocity", format!("RV amplitude: {k:.2} m/s"));
        }
        out
    }
}
