use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{EARTH_ORBITAL_RATE_RAD_MIN, EARTH_RADIUS_KM, EARTH_SELF_ROTATION_RAD_MIN},
    error::Error as SolverError,
    frame::RotationConvention,
    prelude::Vector3,
    visibility::Horizon,
};

use std::f64::consts::TAU;

/// Configuration Error
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown rotation convention \"{0}\"")]
    UnknownConvention(String),
    #[error("unknown horizon model \"{0}\"")]
    UnknownHorizon(String),
}

const fn default_max_iterations() -> usize {
    10
}

const fn default_tolerance() -> f64 {
    1.0E-6
}

const fn default_receiver_velocity() -> (f64, f64, f64) {
    (0.0, 0.0, 0.0)
}

const fn default_trace() -> bool {
    false
}

const fn default_earth_radius() -> f64 {
    EARTH_RADIUS_KM
}

const fn default_self_rotation() -> f64 {
    EARTH_SELF_ROTATION_RAD_MIN
}

const fn default_orbital_rate() -> f64 {
    EARTH_ORBITAL_RATE_RAD_MIN
}

/// Spherical Earth model
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EarthModel {
    /// Radius (km), also the receiver altitude of surface fixes
    #[cfg_attr(feature = "serde", serde(default = "default_earth_radius"))]
    pub radius_km: f64,
    /// Rotation about its own axis (rad.min⁻¹)
    #[cfg_attr(feature = "serde", serde(default = "default_self_rotation"))]
    pub self_rotation_rad_min: f64,
    /// Rotation around the Sun (rad.min⁻¹)
    #[cfg_attr(feature = "serde", serde(default = "default_orbital_rate"))]
    pub orbital_rate_rad_min: f64,
}

impl Default for EarthModel {
    fn default() -> Self {
        Self {
            radius_km: default_earth_radius(),
            self_rotation_rad_min: default_self_rotation(),
            orbital_rate_rad_min: default_orbital_rate(),
        }
    }
}

impl EarthModel {
    /// Rate of the sidereal angle (rad.min⁻¹)
    pub fn sidereal_rate_rad_min(&self) -> f64 {
        self.orbital_rate_rad_min + self.self_rotation_rad_min
    }

    /// Verifies radius and rates are finite and strictly positive.
    pub fn validate(&self) -> Result<(), SolverError> {
        let values = [
            self.radius_km,
            self.self_rotation_rad_min,
            self.orbital_rate_rad_min,
        ];
        if values.iter().all(|v| v.is_finite() && *v > 0.0) {
            Ok(())
        } else {
            Err(SolverError::InvalidEarthModel)
        }
    }

    /// Sidereal angle γ(t) in [0, 2π[, `t` in minutes since vernal equinox.
    pub fn sidereal_angle(&self, minutes: f64) -> f64 {
        (self.sidereal_rate_rad_min() * minutes).rem_euclid(TAU)
    }
}

/// [Solver] parametrization.
///
/// [Solver]: crate::prelude::Solver
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Newton-Raphson iteration budget
    #[cfg_attr(feature = "serde", serde(default = "default_max_iterations"))]
    pub max_iterations: usize,
    /// Convergence is declared once the correction norm drops below this value
    #[cfg_attr(feature = "serde", serde(default = "default_tolerance"))]
    pub tolerance: f64,
    /// Sign convention of the Greenwich rotation
    #[cfg_attr(feature = "serde", serde(default))]
    pub convention: RotationConvention,
    /// Horizon model used by the visibility predicate
    #[cfg_attr(feature = "serde", serde(default))]
    pub horizon: Horizon,
    /// Earth model
    #[cfg_attr(feature = "serde", serde(default))]
    pub earth: EarthModel,
    /// Receiver velocity (km.min⁻¹, Earth fixed) assumed by Doppler fixes.
    /// Null for a stationary ground receiver.
    #[cfg_attr(feature = "serde", serde(default = "default_receiver_velocity"))]
    pub receiver_velocity_km_min: (f64, f64, f64),
    /// Record every Newton iteration in the returned solution
    #[cfg_attr(feature = "serde", serde(default = "default_trace"))]
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            convention: RotationConvention::default(),
            horizon: Horizon::default(),
            earth: EarthModel::default(),
            receiver_velocity_km_min: default_receiver_velocity(),
            trace: default_trace(),
        }
    }
}

impl Config {
    /// Copies and returns [Config] with updated iteration budget
    pub fn with_max_iterations(&self, max_iterations: usize) -> Self {
        let mut s = self.clone();
        s.max_iterations = max_iterations;
        s
    }

    /// Copies and returns [Config] with updated convergence tolerance
    pub fn with_tolerance(&self, tolerance: f64) -> Self {
        let mut s = self.clone();
        s.tolerance = tolerance;
        s
    }

    /// Copies and returns [Config] with updated [RotationConvention]
    pub fn with_convention(&self, convention: RotationConvention) -> Self {
        let mut s = self.clone();
        s.convention = convention;
        s
    }

    /// Copies and returns [Config] with updated [Horizon] model
    pub fn with_horizon(&self, horizon: Horizon) -> Self {
        let mut s = self.clone();
        s.horizon = horizon;
        s
    }

    /// Copies and returns [Config] with updated [EarthModel]
    pub fn with_earth_model(&self, earth: EarthModel) -> Self {
        let mut s = self.clone();
        s.earth = earth;
        s
    }

    /// Copies and returns [Config] with a moving receiver (km.min⁻¹)
    pub fn with_receiver_velocity(&self, velocity_km_min: (f64, f64, f64)) -> Self {
        let mut s = self.clone();
        s.receiver_velocity_km_min = velocity_km_min;
        s
    }

    /// Copies and returns [Config] with iteration tracing enabled
    pub fn with_trace(&self) -> Self {
        let mut s = self.clone();
        s.trace = true;
        s
    }

    pub(crate) fn receiver_velocity(&self) -> Vector3<f64> {
        let (vx, vy, vz) = self.receiver_velocity_km_min;
        Vector3::new(vx, vy, vz)
    }

    /// Verifies this [Config] is physically sound.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.max_iterations == 0 {
            return Err(SolverError::InvalidMaxIterations);
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SolverError::InvalidTolerance);
        }
        self.earth.validate()?;

        let (vx, vy, vz) = self.receiver_velocity_km_min;
        if ![vx, vy, vz].iter().all(|v| v.is_finite()) {
            return Err(SolverError::InvalidReceiverVelocity);
        }
        Ok(())
    }
}
