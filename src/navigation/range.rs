//! Range (multilateration) equations
use crate::{
    frame::{spherical_to_rectangular, Spherical},
    navigation::{Linearization, Model},
    prelude::{DMatrix, DVector, Error, Vector3},
};

/// Range observation to one satellite
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RangeObservation {
    /// Satellite position (km), in the frame of the fix
    pub satellite_km: Vector3<f64>,
    /// Measured range (km)
    pub range_km: f64,
}

impl RangeObservation {
    pub fn new(satellite_km: Vector3<f64>, range_km: f64) -> Self {
        Self {
            satellite_km,
            range_km,
        }
    }
}

/// Euclidean distance between receiver and satellite (km)
pub fn range(position: &Vector3<f64>, satellite: &Vector3<f64>) -> f64 {
    (position - satellite).norm()
}

/// Verifies a set of observations is suitable for a fix with `unknowns` unknowns.
pub(crate) fn check_observations(
    unknowns: usize,
    values: impl ExactSizeIterator<Item = f64>,
) -> Result<(), Error> {
    if values.len() != unknowns {
        return Err(Error::MeasurementCount {
            expected: unknowns,
            provided: values.len(),
        });
    }
    for (i, value) in values.enumerate() {
        if !value.is_finite() {
            return Err(Error::InvalidMeasurement(i));
        }
    }
    Ok(())
}

/// Range equations on a sphere: the unknowns are latitude and longitude (rad).
pub(crate) struct SurfaceRange<'a> {
    pub radius_km: f64,
    pub observations: &'a [RangeObservation],
}

impl Model for SurfaceRange<'_> {
    fn unknowns(&self) -> usize {
        2
    }

    fn linearize(&self, x: &DVector<f64>) -> Result<Linearization, Error> {
        let (psi, lambda) = (x[0], x[1]);
        let (sin_psi, cos_psi) = psi.sin_cos();
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let r = self.radius_km;
        let position = spherical_to_rectangular(&Spherical::new(r, psi, lambda));

        let size = self.observations.len();
        let mut jacobian = DMatrix::<f64>::zeros(size, 2);
        let mut residuals = DVector::<f64>::zeros(size);

        for (i, obs) in self.observations.iter().enumerate() {
            let rho = range(&position, &obs.satellite_km);
            if rho == 0.0 {
                return Err(Error::ColocatedSatellite(i));
            }

            let delta = obs.satellite_km - position;
            let (dx, dy, dz) = (delta[0], delta[1], delta[2]);

            // ∂ρ/∂ψ and ∂ρ/∂λ, through the rectangular conversion
            jacobian[(i, 0)] = r / rho
                * (dx * sin_psi * cos_lambda + dy * sin_psi * sin_lambda - dz * cos_psi);
            jacobian[(i, 1)] = r / rho * cos_psi * (dx * sin_lambda - dy * cos_lambda);

            residuals[i] = obs.range_km - rho;
        }

        Ok(Linearization {
            jacobian,
            residuals,
        })
    }
}

/// Range equations in free space: the unknowns are rectangular coordinates (km).
pub(crate) struct FreeRange<'a> {
    pub observations: &'a [RangeObservation],
}

impl Model for FreeRange<'_> {
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

            let line_of_sight = (position - obs.satellite_km) / rho;
            for j in 0..3 {
                jacobian[(i, j)] = line_of_sight[j];
            }

            residuals[i] = obs.range_km - rho;
        }

        Ok(Linearization {
            jacobian,
            residuals,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{range, FreeRange, SurfaceRange};
    use crate::{
        navigation::Model,
        prelude::{DVector, Error, RangeObservation, Vector3},
    };

    #[test]
    fn surface_jacobian_matches_finite_difference() {
        let observations = [
            RangeObservation::new(Vector3::new(8676.21, -2487.86, 4305.11), 5339.75),
            RangeObservation::new(Vector3::new(9146.41, 2280.46, -3338.07), 5101.44),
        ];
        let model = SurfaceRange {
            radius_km: 6300.0,
            observations: &observations,
        };

        let x = DVector::from_row_slice(&[0.3, -0.2]);
        let lin = model.linearize(&x).unwrap();

        let h = 1.0E-7;
        for j in 0..2 {
            let mut plus = x.clone();
            let mut minus = x.clone();
            plus[j] += h;
            minus[j] -= h;

            let res_plus = model.linearize(&plus).unwrap().residuals;
            let res_minus = model.linearize(&minus).unwrap().residuals;

            for i in 0..2 {
                // residual = measured - predicted
                let numerical = -(res_plus[i] - res_minus[i]) / (2.0 * h);
                assert!(
                    (numerical - lin.jacobian[(i, j)]).abs() < 1.0E-3,
                    "∂ρ{}/∂x{}: {} != {}",
                    i,
                    j,
                    numerical,
                    lin.jacobian[(i, j)]
                );
            }
        }
    }

    #[test]
    fn free_jacobian_is_line_of_sight() {
        let observations = [
            RangeObservation::new(Vector3::new(10.0, 0.0, 0.0), 1.0),
            RangeObservation::new(Vector3::new(0.0, 10.0, 0.0), 1.0),
            RangeObservation::new(Vector3::new(0.0, 0.0, 10.0), 1.0),
        ];
        let model = FreeRange {
            observations: &observations,
        };

        let lin = model.linearize(&DVector::zeros(3)).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { -1.0 } else { 0.0 };
                assert_eq!(lin.jacobian[(i, j)], expected);
            }
            assert_eq!(lin.residuals[i], -9.0);
        }

        let colocated = DVector::from_row_slice(&[0.0, 10.0, 0.0]);
        assert!(matches!(
            model.linearize(&colocated),
            Err(Error::ColocatedSatellite(1))
        ));
    }

    #[test]
    fn euclidean_range() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 6.0, 3.0);
        assert_eq!(range(&a, &b), 5.0);
        assert_eq!(range(&b, &a), 5.0);
    }
}
