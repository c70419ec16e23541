//! Line of sight visibility
use crate::{cfg::Error, prelude::Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizon model of the visibility predicate
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Horizon {
    /// Local horizon plane through the observer
    Planar,
    /// Earth curvature corrected horizon: an observer above the
    /// surface sees slightly past its local horizon plane.
    #[default]
    Curved,
}

impl std::str::FromStr for Horizon {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planar" | "plane" => Ok(Self::Planar),
            "curved" => Ok(Self::Curved),
            _ => Err(Error::UnknownHorizon(s.to_string())),
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Planar => write!(f, "planar"),
            Self::Curved => write!(f, "curved"),
        }
    }
}

/// True if satellite is not behind the horizon plane through the observer.
/// An observer at the Earth center has no horizon and sees nothing.
pub fn planar_visible(observer: &Vector3<f64>, satellite: &Vector3<f64>) -> bool {
    let line_of_sight = satellite - observer;
    if observer.norm() == 0.0 || line_of_sight.norm() == 0.0 {
        return false;
    }
    observer.dot(&line_of_sight) >= 0.0
}

/// Minimal cosine of the angle between the observer local vertical
/// and the line of sight, for a sphere of radius `earth_radius_km`.
/// Null at the surface, where the curved horizon matches the planar one:
/// a surface observer does not see below its local plane, so the threshold
/// there is 0 and not -1. The radicand is clamped so observers at or below
/// the surface fall back to the planar horizon.
pub fn curved_horizon_threshold(observer_radius_km: f64, earth_radius_km: f64) -> f64 {
    let ratio = earth_radius_km / observer_radius_km;
    -(1.0 - ratio.powi(2)).max(0.0).sqrt()
}

/// True if satellite is above the Earth curvature corrected horizon.
pub fn curved_visible(
    observer: &Vector3<f64>,
    satellite: &Vector3<f64>,
    earth_radius_km: f64,
) -> bool {
    let line_of_sight = satellite - observer;
    let (observer_radius, distance) = (observer.norm(), line_of_sight.norm());
    if observer_radius == 0.0 || distance == 0.0 {
        return false;
    }
    let cos = observer.dot(&line_of_sight) / observer_radius / distance;
    cos >= curved_horizon_threshold(observer_radius, earth_radius_km)
}

/// Line of sight predicate. Both coordinates must be expressed
/// in the same frame, at the same epoch.
pub fn is_visible(
    observer: &Vector3<f64>,
    satellite: &Vector3<f64>,
    horizon: Horizon,
    earth_radius_km: f64,
) -> bool {
    match horizon {
        Horizon::Planar => planar_visible(observer, satellite),
        Horizon::Curved => curved_visible(observer, satellite, earth_radius_km),
    }
}
