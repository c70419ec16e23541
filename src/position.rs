//! 3D Position coordinates
use crate::{
    frame::{rectangular_to_spherical, spherical_to_rectangular, Frame, Spherical},
    prelude::Vector3,
};

/// [Position] of a receiver or satellite, tagged with its [Frame].
/// Both representations are always available and consistent.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Position {
    /// [Frame] this [Position] is expressed in
    pub(crate) frame: Frame,
    /// Rectangular coordinates in kilometers
    pub(crate) rectangular: Vector3<f64>,
    /// Spherical coordinates
    pub(crate) spherical: Spherical,
}

impl Position {
    /// Builds new [Position] from rectangular coordinates expressed in kilometers.
    pub fn from_rectangular(frame: Frame, rectangular: Vector3<f64>) -> Self {
        Self {
            frame,
            rectangular,
            spherical: rectangular_to_spherical(&rectangular),
        }
    }

    /// Builds new [Position] from [Spherical] coordinates
    pub fn from_spherical(frame: Frame, spherical: Spherical) -> Self {
        Self {
            frame,
            spherical,
            rectangular: spherical_to_rectangular(&spherical),
        }
    }

    /// Builds new Earth fixed [Position] at the surface of a sphere
    /// - radius_km: sphere radius
    /// - latitude [rad]
    /// - longitude [rad]
    pub fn from_surface(radius_km: f64, latitude_rad: f64, longitude_rad: f64) -> Self {
        Self::from_spherical(
            Frame::EarthFixed,
            Spherical::new(radius_km, latitude_rad, longitude_rad),
        )
    }

    /// Returns [Frame] this [Position] is expressed in
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Returns rectangular coordinates (km)
    pub fn rectangular(&self) -> Vector3<f64> {
        self.rectangular
    }

    /// Returns [Spherical] coordinates
    pub fn spherical(&self) -> Spherical {
        self.spherical
    }

    /// Returns distance to Earth center (km)
    pub fn radius_km(&self) -> f64 {
        self.spherical.radius_km
    }
}

#[cfg(test)]
mod test {
    use super::Position;
    use crate::prelude::{Frame, Spherical, Vector3};

    #[test]
    fn position_consistency() {
        let pos = Position::from_rectangular(Frame::Equatorial, Vector3::new(3.0, 4.0, 12.0));
        assert_eq!(pos.frame(), Frame::Equatorial);
        assert_eq!(pos.radius_km(), 13.0);
        assert_eq!(pos.rectangular(), Vector3::new(3.0, 4.0, 12.0));

        let pos = Position::from_surface(6300.0, 85.0_f64.to_radians(), 20.0_f64.to_radians());
        assert_eq!(pos.frame(), Frame::EarthFixed);
        assert!((pos.rectangular().norm() - 6300.0).abs() < 1.0E-9);

        let back = Position::from_rectangular(Frame::EarthFixed, pos.rectangular());
        let Spherical {
            radius_km,
            latitude_rad,
            longitude_rad,
        } = back.spherical();
        assert!((radius_km - 6300.0).abs() < 1.0E-9);
        assert!((latitude_rad - 85.0_f64.to_radians()).abs() < 1.0E-12);
        assert!((longitude_rad - 20.0_f64.to_radians()).abs() < 1.0E-12);
    }
}
