use crate::prelude::DVector;

/// Record of a single Newton-Raphson iteration
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// Iteration number, starting at 1
    pub iteration: usize,
    /// Correction Δ applied to the estimate, in the solver unknowns
    /// (radians for surface fixes, kilometers otherwise)
    pub correction: DVector<f64>,
    /// |Δ|
    pub correction_norm: f64,
    /// Estimate after this correction
    pub estimate: DVector<f64>,
}

/// [SolveResult] of a fix attempt. Failed attempts (singular systems)
/// are reported as errors, so a [SolveResult] either converged or
/// exhausted its iteration budget.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult<T> {
    /// Refined estimate. When not converged, this is the last
    /// estimate and remains usable as a partial refinement.
    pub estimate: T,
    /// True when |Δ| dropped below the tolerance
    pub converged: bool,
    /// Number of iterations performed
    pub iterations: usize,
    /// Norm of the last correction
    pub correction_norm: f64,
    /// Iteration trace, only populated when requested in [Config]
    ///
    /// [Config]: crate::prelude::Config
    pub trace: Vec<IterationRecord>,
}

impl<T> SolveResult<T> {
    /// Converts the estimate, preserving the convergence report
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SolveResult<U> {
        SolveResult {
            estimate: f(self.estimate),
            converged: self.converged,
            iterations: self.iterations,
            correction_norm: self.correction_norm,
            trace: self.trace,
        }
    }
}
