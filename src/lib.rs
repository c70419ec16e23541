#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

// private modules
mod cfg;
mod constants;
mod error;
mod frame;
mod navigation;
mod orbit;
mod position;
mod satellite;
mod solver;
mod time;
mod visibility;

#[cfg(test)]
mod tests;

// prelude
pub mod prelude {
    pub use crate::cfg::{Config, EarthModel, Error as ConfigError};
    pub use crate::constants::{
        EARTH_ORBITAL_RATE_RAD_MIN, EARTH_RADIUS_KM, EARTH_SELF_ROTATION_RAD_MIN,
    };
    pub use crate::error::Error;
    pub use crate::frame::{
        gamma_rotation, rectangular_to_spherical, rotate_by_gamma, spherical_to_rectangular,
        Direction, Frame, RotationConvention, Spherical,
    };
    pub use crate::navigation::{
        doppler::range_rate, range::range, DopplerObservation, IterationRecord,
        RangeObservation, SolveResult, TransitionEstimate,
    };
    pub use crate::orbit::{OrbitalState, Propagator};
    pub use crate::position::Position;
    pub use crate::satellite::{OrbitalElements, Satellite};
    pub use crate::solver::Solver;
    pub use crate::time::minutes_since_equinox;
    pub use crate::visibility::{curved_visible, is_visible, planar_visible, Horizon};
    // re-export
    pub use hifitime::{Duration, Epoch, TimeScale};
    pub use nalgebra::{DMatrix, DVector, Matrix2, Vector2, Vector3};
}

// pub export
pub use error::Error;
