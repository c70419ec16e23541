//! Circular orbit propagation
use nalgebra::Rotation3;

use crate::{
    cfg::{Config, EarthModel},
    frame::{gamma_rotation, gamma_rotation_rate, Direction, Frame, RotationConvention},
    prelude::{Satellite, Vector3},
};

/// Satellite [OrbitalState] at a given epoch
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrbitalState {
    /// [Frame] this state is expressed in
    pub frame: Frame,
    /// Position (km)
    pub position_km: Vector3<f64>,
    /// Velocity (km.min⁻¹)
    pub velocity_km_min: Vector3<f64>,
}

/// [Propagator] derives [Satellite] states from their elements.
/// States are a pure function of time and never stored.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Propagator {
    earth: EarthModel,
    convention: RotationConvention,
}

impl Propagator {
    /// Builds new [Propagator] from [Config] preset
    pub fn new(cfg: &Config) -> Self {
        Self {
            earth: cfg.earth,
            convention: cfg.convention,
        }
    }

    /// Argument of latitude u = ω (t - τ), not reduced modulo 2π.
    pub fn argument_of_latitude(&self, satellite: &Satellite, minutes: f64) -> f64 {
        let elements = satellite.elements();
        elements.rate_rad_min * (minutes - elements.epoch_offset_min)
    }

    /// Orbital plane to equatorial frame rotation:
    /// inclination about the line of nodes, then ascending node about the polar axis.
    fn plane_rotation(satellite: &Satellite) -> Rotation3<f64> {
        let elements = satellite.elements();
        let node = Rotation3::from_axis_angle(&Vector3::z_axis(), elements.ascending_node_rad);
        let inclination = Rotation3::from_axis_angle(&Vector3::x_axis(), elements.inclination_rad);
        node * inclination
    }

    /// [Satellite] position (km) at `minutes` since vernal equinox,
    /// expressed in desired [Frame].
    pub fn position(&self, satellite: &Satellite, minutes: f64, frame: Frame) -> Vector3<f64> {
        self.state(satellite, minutes, frame).position_km
    }

    /// [Satellite] velocity (km.min⁻¹) at `minutes` since vernal equinox,
    /// expressed in desired [Frame]. In the Earth fixed frame, this includes
    /// the frame rotation and is the exact time derivative of the position.
    pub fn velocity(&self, satellite: &Satellite, minutes: f64, frame: Frame) -> Vector3<f64> {
        self.state(satellite, minutes, frame).velocity_km_min
    }

    /// [Satellite] [OrbitalState] at `minutes` since vernal equinox
    pub fn state(&self, satellite: &Satellite, minutes: f64, frame: Frame) -> OrbitalState {
        let elements = satellite.elements();
        let u = self.argument_of_latitude(satellite, minutes);
        let (sin_u, cos_u) = u.sin_cos();

        let r = elements.radius_km;
        let r_w = r * elements.rate_rad_min;

        let position_km = Vector3::new(r * cos_u, r * sin_u, 0.0);
        let velocity_km_min = Vector3::new(-r_w * sin_u, r_w * cos_u, 0.0);

        if frame == Frame::Orbital {
            return OrbitalState {
                frame,
                position_km,
                velocity_km_min,
            };
        }

        let plane = Self::plane_rotation(satellite);
        let position_km = plane * position_km;
        let velocity_km_min = plane * velocity_km_min;

        if frame == Frame::Equatorial {
            return OrbitalState {
                frame,
                position_km,
                velocity_km_min,
            };
        }

        let gamma = self.earth.sidereal_angle(minutes);
        let gamma_dot = self.earth.sidereal_rate_rad_min();
        let direction = Direction::EquatorialToEarthFixed;

        let rotation = gamma_rotation(gamma, direction, self.convention);
        let rotation_rate = gamma_rotation_rate(gamma, gamma_dot, direction, self.convention);

        OrbitalState {
            frame,
            position_km: rotation * position_km,
            velocity_km_min: rotation * velocity_km_min + rotation_rate * position_km,
        }
    }
}
