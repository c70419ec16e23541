//! Satellites and their orbital elements
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        GPS_INCLINATION_RAD, GPS_RADIUS_KM, GPS_RATE_RAD_MIN, TRANSIT_INCLINATION_RAD,
        TRANSIT_RADIUS_KM, TRANSIT_RATE_RAD_MIN,
    },
    error::Error,
};

/// Elements of a circular orbit. Radius and angular rate
/// are constant over the lifetime of the satellite.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElements {
    /// Right ascension of the ascending node Ω (rad)
    pub ascending_node_rad: f64,
    /// Epoch offset τ (minutes since vernal equinox) at which
    /// the satellite crosses the ascending node
    pub epoch_offset_min: f64,
    /// Inclination (rad)
    pub inclination_rad: f64,
    /// Orbital radius (km)
    pub radius_km: f64,
    /// Angular rate (rad.min⁻¹)
    pub rate_rad_min: f64,
}

impl OrbitalElements {
    /// Builds new [OrbitalElements], rejecting non physical values.
    pub fn new(
        ascending_node_rad: f64,
        epoch_offset_min: f64,
        inclination_rad: f64,
        radius_km: f64,
        rate_rad_min: f64,
    ) -> Result<Self, Error> {
        let elements = Self {
            ascending_node_rad,
            epoch_offset_min,
            inclination_rad,
            radius_km,
            rate_rad_min,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Transit-type orbit: polar, 7500 km radius, 3°/min.
    pub fn transit(ascending_node_rad: f64, epoch_offset_min: f64) -> Self {
        Self {
            ascending_node_rad,
            epoch_offset_min,
            inclination_rad: TRANSIT_INCLINATION_RAD,
            radius_km: TRANSIT_RADIUS_KM,
            rate_rad_min: TRANSIT_RATE_RAD_MIN,
        }
    }

    /// GPS-type orbit: 60° inclination, 15000 km radius, 2°/min.
    pub fn gps(ascending_node_rad: f64, epoch_offset_min: f64) -> Self {
        Self {
            ascending_node_rad,
            epoch_offset_min,
            inclination_rad: GPS_INCLINATION_RAD,
            radius_km: GPS_RADIUS_KM,
            rate_rad_min: GPS_RATE_RAD_MIN,
        }
    }

    /// Orbital period (minutes)
    pub fn period_min(&self) -> f64 {
        std::f64::consts::TAU / self.rate_rad_min
    }

    fn validate(&self) -> Result<(), Error> {
        let values = [
            self.ascending_node_rad,
            self.epoch_offset_min,
            self.inclination_rad,
            self.radius_km,
            self.rate_rad_min,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::NonFiniteElement);
        }
        if self.radius_km <= 0.0 {
            return Err(Error::NonPositiveOrbitalRadius);
        }
        if self.rate_rad_min <= 0.0 {
            return Err(Error::NonPositiveAngularRate);
        }
        Ok(())
    }
}

/// [Satellite] of a constellation
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Satellite {
    /// Identifier within its constellation
    pub prn: u8,
    /// [OrbitalElements]
    pub(crate) elements: OrbitalElements,
}

impl std::fmt::Display for Satellite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{:02} (Ω={:.3}rad i={:.3}rad R={}km)",
            self.prn,
            self.elements.ascending_node_rad,
            self.elements.inclination_rad,
            self.elements.radius_km
        )
    }
}

impl Satellite {
    /// Builds new [Satellite], rejecting non physical [OrbitalElements].
    pub fn new(prn: u8, elements: OrbitalElements) -> Result<Self, Error> {
        elements.validate()?;
        Ok(Self { prn, elements })
    }

    /// Builds new Transit-type [Satellite]
    pub fn transit(prn: u8, ascending_node_rad: f64, epoch_offset_min: f64) -> Self {
        Self {
            prn,
            elements: OrbitalElements::transit(ascending_node_rad, epoch_offset_min),
        }
    }

    /// Builds new GPS-type [Satellite]
    pub fn gps(prn: u8, ascending_node_rad: f64, epoch_offset_min: f64) -> Self {
        Self {
            prn,
            elements: OrbitalElements::gps(ascending_node_rad, epoch_offset_min),
        }
    }

    /// Returns [OrbitalElements]
    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }
}
