/// Helios system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Physical constants (SI) ---

/// Gravitational constant (m³ kg⁻¹ s⁻²).
pub const G: f64 = 6.67430e-11;
/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 2.99792458e8;
/// Stefan–Boltzmann constant (W m⁻² K⁻⁴).
pub const STEFAN_BOLTZMANN: f64 = 5.670374419e-8;
/// Astronomical unit (m).
pub const AU: f64 = 1.495978707e11;
/// Solar radius (m).
pub const SOLAR_RADIUS: f64 = 6.96e8;
/// Solar mass (kg).
pub const SOLAR_MASS: f64 = 1.989e30;
/// Solar luminosity (W).
pub const SOLAR_LUMINOSITY: f64 = 3.828e26;
/// Earth radius (m).
pub const EARTH_RADIUS: f64 = 6.371e6;
/// Earth mass (kg).
pub const EARTH_MASS: f64 = 5.972e24;
/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;
/// Kelvin offset for Celsius conversion.
pub const KELVIN_OFFSET: f64 = 273.15;

// --- Built-in detector ids ---

pub const TRANSIT_DETECTOR: &str = "transit";
pub const RADIAL_VELOCITY_DETECTOR: &str = "radial_velocity";
pub const ORBITAL_DYNAMICS_DETECTOR: &str = "orbital_dynamics";
pub const HABITABLE_ZONE_DETECTOR: &str = "habitable_zone";
