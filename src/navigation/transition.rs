//! Linear position transition estimate
use nalgebra::{Matrix2, Vector2};

use crate::{constants::SINGULARITY_THRESHOLD, navigation::hadamard_ratio, prelude::Error};

/// [TransitionEstimate] is the linear operator M such that
/// [P1 P2] = M.[P0 P1], derived from three successive (latitude, longitude) fixes.
/// It is used for short horizon extrapolation of the receiver drift.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionEstimate {
    /// Transition matrix M
    pub matrix: Matrix2<f64>,
    /// Fixes P0, P1 and P2 the estimate is derived from (rad)
    pub fixes: [Vector2<f64>; 3],
}

impl TransitionEstimate {
    /// Estimates M = S1.S0⁻¹ with S0 = [P0 P1] and S1 = [P1 P2] (columns).
    /// P0 and P1 must not be colinear.
    pub fn from_fixes(
        p0: Vector2<f64>,
        p1: Vector2<f64>,
        p2: Vector2<f64>,
    ) -> Result<Self, Error> {
        let s0 = Matrix2::from_columns(&[p0, p1]);
        let s1 = Matrix2::from_columns(&[p1, p2]);

        let ratio = hadamard_ratio(s0.determinant(), s0.row_iter().map(|row| row.norm()));
        if !(ratio > SINGULARITY_THRESHOLD) {
            return Err(Error::SingularTransition);
        }

        let s0_inv = s0.try_inverse().ok_or(Error::SingularTransition)?;

        Ok(Self {
            matrix: s1 * s0_inv,
            fixes: [p0, p1, p2],
        })
    }

    /// Extrapolates `position` over `steps` transitions.
    pub fn predict(&self, position: &Vector2<f64>, steps: usize) -> Vector2<f64> {
        (0..steps).fold(*position, |p, _| self.matrix * p)
    }
}
