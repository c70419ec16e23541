use std::f64::consts::PI;

/// Mean Earth radius used by the navigation model (kilometers)
pub const EARTH_RADIUS_KM: f64 = 6300.0;

/// Earth rotation about its own axis (rad.min⁻¹): one turn per day
pub const EARTH_SELF_ROTATION_RAD_MIN: f64 = 2.0 * PI / 1440.0;

/// Earth mean motion around the Sun (rad.min⁻¹): one turn per 365 days
pub const EARTH_ORBITAL_RATE_RAD_MIN: f64 = 2.0 * PI / (365.0 * 1440.0);

/// Day of year of the vernal equinox, as counted by the epoch clock
pub const VERNAL_EQUINOX_DAY: i64 = 81;

/// Transit-type inclination (rad)
pub const TRANSIT_INCLINATION_RAD: f64 = PI / 2.0;

/// Transit-type orbital radius (km)
pub const TRANSIT_RADIUS_KM: f64 = 7500.0;

/// Transit-type angular rate: 3°/min
pub const TRANSIT_RATE_RAD_MIN: f64 = 3.0 * PI / 180.0;

/// GPS-type inclination (rad)
pub const GPS_INCLINATION_RAD: f64 = PI / 3.0;

/// GPS-type orbital radius (km)
pub const GPS_RADIUS_KM: f64 = 15000.0;

/// GPS-type angular rate: 2°/min
pub const GPS_RATE_RAD_MIN: f64 = 2.0 * PI / 180.0;

/// Normalized determinant below which a linear system is considered singular
pub(crate) const SINGULARITY_THRESHOLD: f64 = 1.0E-12;
