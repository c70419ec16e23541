//! Range-rate (Doppler) equations
use crate::{
    navigation::{range::range, Linearization, Model},
    orbit::OrbitalState,
    prelude::{DMatrix, DVector, Error, Vector3},
};

/// Range-rate observation to one satellite
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DopplerObservation {
    /// Satellite position (km), in the frame of the fix
    pub satellite_km: Vector3<f64>,
    /// Satellite velocity (km.min⁻¹), in the frame of the fix
    pub satellite_velocity_km_min: Vector3<f64>,
    /// Measured range-rate (km.min⁻¹), positive when receding
    pub range_rate_km_min: f64,
}

impl DopplerObservation {
    pub fn new(
        satellite_km: Vector3<f64>,
        satellite_velocity_km_min: Vector3<f64>,
        range_rate_km_min: f64,
    ) -> Self {
        Self {
            satellite_km,
            satellite_velocity_km_min,
            range_rate_km_min,
        }
    }

    /// Builds new [DopplerObservation] from a propagated [OrbitalState]
    pub fn from_state(state: &OrbitalState, range_rate_km_min: f64) -> Self {
        Self::new(state.position_km, state.velocity_km_min, range_rate_km_min)
    }
}

/// Range-rate ρ̇ = (p - ps).(v - vs) / ρ (km.min⁻¹), the time derivative
/// of the range between receiver and satellite.
/// Undefined when receiver and satellite coincide (ρ = 0): NaN is returned.
/// Doppler fixes report this case as [Error::ColocatedSatellite].
pub fn range_rate(
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    satellite: &Vector3<f64>,
    satellite_velocity: &Vector3<f64>,
) -> f64 {
    let rho = range(position, satellite);
    (position - satellite).dot(&(velocity - satellite_velocity)) / rho
}

/// Range-rate equations: the unknowns are rectangular coordinates (km).
pub(crate) struct DopplerRange<'a> {
    /// Receiver velocity (km.min⁻¹)
    pub velocity: Vector3<f64>,
    pub observations: &'a [DopplerObservation],
}

impl Model for DopplerRange<'_> {
    fn unknowns(&self) -> usize {
        3
    }

    fn linearize(&self, x: &DVector<f64>) -> Result<Linearization, Error> {
        let position = Vector3::new(x[0], x[1], x[2]);

        let size = self.observations.len();
        let mut jacobian = DMatrix::<f64>::zeros(size, 3);
        let mut residuals = DVector::<f64>::zeros(size);

        for (i, obs) in self.observations.iter().enumerate() {
            let rho = range(&position, &obs.satellite_km);
            if rho == 0.0 {
                return Err(Error::ColocatedSatellite(i));
            }

            let delta = position - obs.satellite_km;
            let relative_velocity = self.velocity - obs.satellite_velocity_km_min;
            let rho_dot = delta.dot(&relative_velocity) / rho;

            let row = relative_velocity / rho - rho_dot * delta / rho.powi(2);
            for j in 0..3 {
                jacobian[(i, j)] = row[j];
            }

            residuals[i] = obs.range_rate_km_min - rho_dot;
        }

        Ok(Linearization {
            jacobian,
            residuals,
        })
    }
}
