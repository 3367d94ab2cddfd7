//! Raw observation parameters fed to every detector.
//!
//! Units follow observational convention: solar units for the star, Earth
//! units for the planet, days for periods, AU for distances.

use serde::{Deserialize, Serialize};

use crate::errors::{HeliosError, HeliosResult};

/// One candidate system as observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    /// Catalog identifier of the host star, if known.
    pub target_id: Option<String>,

    /// Stellar mass in solar masses.
    pub stellar_mass: Option<f64>,
    /// Stellar radius in solar radii.
    pub stellar_radius: Option<f64>,
    /// Effective temperature in Kelvin.
    pub stellar_temperature: Option<f64>,
    /// Stellar luminosity in solar luminosities.
    pub stellar_luminosity: Option<f64>,

    /// Planet mass in Earth masses.
    pub planet_mass: Option<f64>,
    /// Planet radius in Earth radii.
    pub planet_radius: Option<f64>,
    /// Orbital period in days.
    pub orbital_period: Option<f64>,
    /// Semi-major axis in AU.
    pub orbital_distance: Option<f64>,
    /// Inclination in degrees (90 = edge-on).
    pub orbital_inclination: f64,
    pub eccentricity: f64,

    /// Fractional flux decrease during transit.
    pub transit_depth: Option<f64>,
    /// Transit duration in hours.
    pub transit_duration: Option<f64>,
    /// Measured stellar radial velocity in m/s.
    pub radial_velocity: Option<f64>,

    /// Bond albedo of the planet.
    pub albedo: Option<f64>,
    /// Photometric noise level.
    pub noise: Option<f64>,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            target_id: None,
            stellar_mass: None,
            stellar_radius: None,
            stellar_temperature: None,
            stellar_luminosity: None,
            planet_mass: None,
            planet_radius: None,
            orbital_period: None,
            orbital_distance: None,
            orbital_inclination: 90.0,
            eccentricity: 0.0,
            transit_depth: None,
            transit_duration: None,
            radial_velocity: None,
            albedo: None,
            noise: None,
        }
    }
}

impl Observation {
    /// Structural validation performed before any detector is dispatched.
    ///
    /// Rejects non-finite numbers and physically impossible values. Whether a
    /// given detector has *enough* fields to run is that detector's concern.
    pub fn validate(&self) -> HeliosResult<()> {
        let positive = [
            ("stellar_mass", self.stellar_mass),
            ("stellar_radius", self.stellar_radius),
            ("stellar_temperature", self.stellar_temperature),
            ("stellar_luminosity", self.stellar_luminosity),
            ("planet_mass", self.planet_mass),
            ("planet_radius", self.planet_radius),
            ("orbital_period", self.orbital_period),
            ("orbital_distance", self.orbital_distance),
            ("transit_duration", self.transit_duration),
        ];
        for (field, value) in positive {
            if let Some(v) = value {
                require_finite(field, v)?;
                if v <= 0.0 {
                    return Err(HeliosError::invalid_observation(
                        field,
                        format!("must be > 0, got {v}"),
                    ));
                }
            }
        }

        if let Some(v) = self.radial_velocity {
            require_finite("radial_velocity", v)?;
        }
        if let Some(v) = self.noise {
            require_finite("noise", v)?;
            if v < 0.0 {
                return Err(HeliosError::invalid_observation(
                    "noise",
                    format!("must be >= 0, got {v}"),
                ));
            }
        }
        if let Some(v) = self.transit_depth {
            require_unit_interval("transit_depth", v)?;
        }
        if let Some(v) = self.albedo {
            require_unit_interval("albedo", v)?;
        }

        require_finite("orbital_inclination", self.orbital_inclination)?;
        if !(0.0..=180.0).contains(&self.orbital_inclination) {
            return Err(HeliosError::invalid_observation(
                "orbital_inclination",
                format!("must be in [0, 180] degrees, got {}", self.orbital_inclination),
            ));
        }
        require_finite("eccentricity", self.eccentricity)?;
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(HeliosError::invalid_observation(
                "eccentricity",
                format!("must be in [0, 1), got {}", self.eccentricity),
            ));
        }

        Ok(())
    }

    /// blake3 digest of the canonical JSON form.
    pub fn fingerprint(&self) -> HeliosResult<String> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

fn require_finite(field: &str, value: f64) -> HeliosResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(HeliosError::invalid_observation(
            field,
            format!("must be finite, got {value}"),
        ))
    }
}

fn require_unit_interval(field: &str, value: f64) -> HeliosResult<()> {
    require_finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(HeliosError::invalid_observation(
            field,
            format!("must be in [0, 1], got {value}"),
        ))
    }
}
