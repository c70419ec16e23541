//! Newton-Raphson navigation
use log::{debug, error, warn};

use crate::{
    constants::SINGULARITY_THRESHOLD,
    prelude::{Config, DMatrix, DVector, Error},
};

pub mod doppler;
pub mod range;
pub mod solution;
pub mod transition;

pub use doppler::DopplerObservation;
pub use range::RangeObservation;
pub use solution::{IterationRecord, SolveResult};
pub use transition::TransitionEstimate;

/// Measurement equations linearized at the current estimate
pub(crate) struct Linearization {
    /// Partial derivatives of each measurement, with respect to each unknown
    pub jacobian: DMatrix<f64>,
    /// Measured - predicted
    pub residuals: DVector<f64>,
}

/// Square system of measurement equations
pub(crate) trait Model {
    /// Number of unknowns, which is also the number of equations
    fn unknowns(&self) -> usize;

    /// Linearize the equations at current estimate `x`
    fn linearize(&self, x: &DVector<f64>) -> Result<Linearization, Error>;
}

/// Ratio of |det(A)| over the product of its row norms (Hadamard ratio).
/// 1 for orthogonal rows, 0 for linearly dependent rows.
pub(crate) fn hadamard_ratio(det: f64, row_norms: impl Iterator<Item = f64>) -> f64 {
    let scale = row_norms.product::<f64>();
    if scale == 0.0 || !scale.is_finite() {
        return 0.0;
    }
    det.abs() / scale
}

/// Solves A.x = b for square A, rejecting (nearly) singular systems.
pub(crate) fn solve_square(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let ratio = hadamard_ratio(a.determinant(), a.row_iter().map(|row| row.norm()));
    if !(ratio > SINGULARITY_THRESHOLD) {
        return None;
    }
    let x = a.clone().lu().solve(b)?;
    if x.iter().all(|xi| xi.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Newton-Raphson iteration skeleton
#[derive(Debug, Clone)]
pub(crate) struct Navigation<'a> {
    cfg: &'a Config,
}

impl<'a> Navigation<'a> {
    pub fn new(cfg: &'a Config) -> Self {
        Self { cfg }
    }

    /// Refines `x0` until the correction norm drops below tolerance,
    /// or the iteration budget is exhausted.
    pub fn resolve<M: Model>(
        &self,
        model: &M,
        x0: DVector<f64>,
    ) -> Result<SolveResult<DVector<f64>>, Error> {
        let size = model.unknowns();
        if x0.len() != size {
            return Err(Error::MeasurementCount {
                expected: size,
                provided: x0.len(),
            });
        }

        let mut x = x0;
        let mut trace = Vec::<IterationRecord>::new();
        let mut correction_norm = f64::INFINITY;

        for iteration in 1..=self.cfg.max_iterations {
            let linearization = model.linearize(&x)?;

            let dx = solve_square(&linearization.jacobian, &linearization.residuals)
                .ok_or_else(|| {
                    error!("iteration #{}: singular system", iteration);
                    Error::SingularSystem { iteration }
                })?;

            correction_norm = dx.norm();
            x += &dx;

            debug!(
                "iteration #{}: |dx|={:.6E} x={}",
                iteration,
                correction_norm,
                x.transpose()
            );

            if self.cfg.trace {
                trace.push(IterationRecord {
                    iteration,
                    correction: dx,
                    correction_norm,
                    estimate: x.clone(),
                });
            }

            if correction_norm < self.cfg.tolerance {
                return Ok(SolveResult {
                    estimate: x,
                    converged: true,
                    iterations: iteration,
                    correction_norm,
                    trace,
                });
            }
        }

        warn!(
            "not converged after {} iterations (|dx|={:.6E})",
            self.cfg.max_iterations, correction_norm
        );

        Ok(SolveResult {
            estimate: x,
            converged: false,
            iterations: self.cfg.max_iterations,
            correction_norm,
            trace,
        })
    }
}
