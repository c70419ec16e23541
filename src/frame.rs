//! Reference frames and transforms
use nalgebra::{Matrix3, Rotation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cfg::Error;

/// Reference frame coordinates are expressed in
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Frame {
    /// Satellite orbital plane, x axis pointing to the ascending node
    Orbital,
    /// Inertial equatorial frame, x axis pointing to the vernal equinox
    Equatorial,
    /// Earth fixed (Greenwich) frame, rotating with the Earth
    #[default]
    EarthFixed,
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Orbital => write!(f, "Orbital"),
            Self::Equatorial => write!(f, "Equatorial"),
            Self::EarthFixed => write!(f, "Earth-Fixed"),
        }
    }
}

/// Sign convention of the rotation between the equatorial
/// and the Earth fixed frames. The Earth fixed frame lags behind
/// the equatorial frame by the sidereal angle γ: [RotationConvention]
/// names the direction in which equatorial vectors are rotated
/// (seen from the north pole) to be expressed in the Earth fixed frame.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RotationConvention {
    /// Equatorial vectors are rotated by -γ.
    #[default]
    Clockwise,
    /// Equatorial vectors are rotated by +γ.
    Counterclockwise,
}

impl RotationConvention {
    fn sign(&self) -> f64 {
        match self {
            Self::Clockwise => -1.0,
            Self::Counterclockwise => 1.0,
        }
    }
}

impl std::str::FromStr for RotationConvention {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cw" | "clockwise" => Ok(Self::Clockwise),
            "ccw" | "counterclockwise" => Ok(Self::Counterclockwise),
            _ => Err(Error::UnknownConvention(s.to_string())),
        }
    }
}

impl std::fmt::Display for RotationConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clockwise => write!(f, "clockwise"),
            Self::Counterclockwise => write!(f, "counterclockwise"),
        }
    }
}

/// Direction of the Greenwich rotation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    EquatorialToEarthFixed,
    EarthFixedToEquatorial,
}

impl Direction {
    fn sign(&self) -> f64 {
        match self {
            Self::EquatorialToEarthFixed => 1.0,
            Self::EarthFixedToEquatorial => -1.0,
        }
    }
}

/// Spherical coordinates
#[derive(Default, Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spherical {
    /// Distance to Earth center (km)
    pub radius_km: f64,
    /// Latitude (rad)
    pub latitude_rad: f64,
    /// Longitude (rad)
    pub longitude_rad: f64,
}

impl Spherical {
    pub fn new(radius_km: f64, latitude_rad: f64, longitude_rad: f64) -> Self {
        Self {
            radius_km,
            latitude_rad,
            longitude_rad,
        }
    }
}

/// Converts [Spherical] coordinates to rectangular coordinates (km).
pub fn spherical_to_rectangular(spherical: &Spherical) -> Vector3<f64> {
    let (r, psi, lambda) = (
        spherical.radius_km,
        spherical.latitude_rad,
        spherical.longitude_rad,
    );
    r * Vector3::new(
        psi.cos() * lambda.cos(),
        psi.cos() * lambda.sin(),
        psi.sin(),
    )
}

/// Converts rectangular coordinates (km) to [Spherical] coordinates.
/// Both angles are recovered with atan2, latitude in [-π/2, π/2]
/// and longitude in ]-π, π].
pub fn rectangular_to_spherical(rectangular: &Vector3<f64>) -> Spherical {
    let (x, y, z) = (rectangular[0], rectangular[1], rectangular[2]);
    Spherical {
        radius_km: rectangular.norm(),
        latitude_rad: z.atan2((x.powi(2) + y.powi(2)).sqrt()),
        longitude_rad: y.atan2(x),
    }
}

/// Greenwich rotation (about the polar axis) for sidereal angle `gamma`.
pub fn gamma_rotation(
    gamma: f64,
    direction: Direction,
    convention: RotationConvention,
) -> Rotation3<f64> {
    let angle = direction.sign() * convention.sign() * gamma;
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Time derivative of [gamma_rotation], for a sidereal rate `gamma_dot`.
pub fn gamma_rotation_rate(
    gamma: f64,
    gamma_dot: f64,
    direction: Direction,
    convention: RotationConvention,
) -> Matrix3<f64> {
    let sign = direction.sign() * convention.sign();
    let (sin, cos) = (sign * gamma).sin_cos();
    sign * gamma_dot * Matrix3::new(-sin, -cos, 0.0, cos, -sin, 0.0, 0.0, 0.0, 0.0)
}

/// Rotates `vector` by sidereal angle `gamma`, in desired [Direction].
/// The rotation is orthogonal: vector norm is preserved.
pub fn rotate_by_gamma(
    vector: &Vector3<f64>,
    gamma: f64,
    direction: Direction,
    convention: RotationConvention,
) -> Vector3<f64> {
    gamma_rotation(gamma, direction, convention) * vector
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use rstest::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[rstest]
    #[case(6300.0, 0.0, 0.0, 6300.0, 0.0, 0.0)]
    #[case(6300.0, FRAC_PI_2, 0.0, 0.0, 0.0, 6300.0)]
    #[case(1.0, 0.0, FRAC_PI_2, 0.0, 1.0, 0.0)]
    #[case(2.0, 0.0, PI, -2.0, 0.0, 0.0)]
    fn spherical_to_rectangular_axes(
        #[case] r: f64,
        #[case] lat: f64,
        #[case] lon: f64,
        #[case] x: f64,
        #[case] y: f64,
        #[case] z: f64,
    ) {
        let rect = spherical_to_rectangular(&Spherical::new(r, lat, lon));
        assert!((rect - Vector3::new(x, y, z)).norm() < 1.0E-9, "{}", rect);
    }

    #[test]
    fn spherical_round_trip() {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..1000 {
            let spherical = Spherical::new(
                rng.random_range(1.0..50000.0),
                rng.random_range(-1.5..1.5),
                rng.random_range(-3.1..3.1),
            );
            let rect = spherical_to_rectangular(&spherical);
            assert!((rect.norm() - spherical.radius_km).abs() < 1.0E-9);

            let back = rectangular_to_spherical(&rect);
            assert!((back.radius_km - spherical.radius_km).abs() < 1.0E-9);
            assert!((back.latitude_rad - spherical.latitude_rad).abs() < 1.0E-9);
            assert!((back.longitude_rad - spherical.longitude_rad).abs() < 1.0E-9);
        }
    }

    #[test]
    fn rectangular_to_spherical_quadrants() {
        let sph = rectangular_to_spherical(&Vector3::new(-1.0, -1.0, 0.0));
        assert!((sph.longitude_rad + 3.0 * PI / 4.0).abs() < 1.0E-12);

        let sph = rectangular_to_spherical(&Vector3::new(0.0, 0.0, -5.0));
        assert_eq!(sph.radius_km, 5.0);
        assert!((sph.latitude_rad + FRAC_PI_2).abs() < 1.0E-12);
    }

    #[rstest]
    #[case(RotationConvention::Clockwise)]
    #[case(RotationConvention::Counterclockwise)]
    fn rotation_preserves_norm(#[case] convention: RotationConvention) {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let v = Vector3::new(
                rng.random_range(-20000.0..20000.0),
                rng.random_range(-20000.0..20000.0),
                rng.random_range(-20000.0..20000.0),
            );
            let gamma = rng.random_range(-100.0..100.0);

            for direction in [
                Direction::EquatorialToEarthFixed,
                Direction::EarthFixedToEquatorial,
            ] {
                let rotated = rotate_by_gamma(&v, gamma, direction, convention);
                assert!((rotated.norm() - v.norm()).abs() < 1.0E-9);
                assert!(
                    (rotated[2] - v[2]).abs() < 1.0E-9,
                    "polar component must be preserved"
                );
            }

            let there = rotate_by_gamma(&v, gamma, Direction::EquatorialToEarthFixed, convention);
            let back = rotate_by_gamma(
                &there,
                gamma,
                Direction::EarthFixedToEquatorial,
                convention,
            );
            assert!((back - v).norm() < 1.0E-9);
        }
    }

    #[test]
    fn clockwise_convention() {
        let gamma = FRAC_PI_2;
        let x = Vector3::new(1.0, 0.0, 0.0);

        let rotated = rotate_by_gamma(
            &x,
            gamma,
            Direction::EquatorialToEarthFixed,
            RotationConvention::Clockwise,
        );
        assert!((rotated - Vector3::new(0.0, -1.0, 0.0)).norm() < 1.0E-12);

        let rotated = rotate_by_gamma(
            &x,
            gamma,
            Direction::EquatorialToEarthFixed,
            RotationConvention::Counterclockwise,
        );
        assert!((rotated - Vector3::new(0.0, 1.0, 0.0)).norm() < 1.0E-12);
    }

    #[rstest]
    #[case(RotationConvention::Clockwise)]
    #[case(RotationConvention::Counterclockwise)]
    fn rotation_rate_matches_finite_difference(#[case] convention: RotationConvention) {
        let (gamma, gamma_dot, dt) = (1.234, 0.0044, 1.0E-3);
        let direction = Direction::EquatorialToEarthFixed;

        let before = gamma_rotation(gamma - gamma_dot * dt, direction, convention);
        let after = gamma_rotation(gamma + gamma_dot * dt, direction, convention);
        let numerical = (after.matrix() - before.matrix()) / (2.0 * dt);

        let analytical = gamma_rotation_rate(gamma, gamma_dot, direction, convention);
        assert!((numerical - analytical).norm() < 1.0E-9);
    }

    #[test]
    fn convention_parsing() {
        for (desc, expected) in [
            ("cw", RotationConvention::Clockwise),
            ("Clockwise", RotationConvention::Clockwise),
            (" ccw ", RotationConvention::Counterclockwise),
            ("counterclockwise", RotationConvention::Counterclockwise),
        ] {
            let convention = desc.parse::<RotationConvention>().unwrap();
            assert_eq!(convention, expected);
        }
        assert!("north".parse::<RotationConvention>().is_err());
    }
}
