use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The Jacobian matrix could not be inverted at this iteration.
    /// Satellites are (nearly) coplanar with the receiver, or the
    /// measurements are not independent. The solving attempt is aborted.
    #[error("singular system at iteration #{iteration}")]
    SingularSystem { iteration: usize },

    /// Transition matrix estimation requires two distinct fixes.
    #[error("transition estimate requires two distinct fixes")]
    SingularTransition,

    /// Receiver estimate coincides with this satellite: range is null
    /// and the range equations cannot be linearized.
    #[error("receiver coincides with satellite #{0}")]
    ColocatedSatellite(usize),

    /// Each fix requires exactly as many observations as unknowns.
    #[error("invalid number of observations: expecting {expected}, got {provided}")]
    MeasurementCount { expected: usize, provided: usize },

    /// Observation is not a finite number
    #[error("observation #{0} is not a finite value")]
    InvalidMeasurement(usize),

    #[error("orbital radius must be strictly positive")]
    NonPositiveOrbitalRadius,

    #[error("orbital angular rate must be strictly positive")]
    NonPositiveAngularRate,

    #[error("orbital elements must be finite values")]
    NonFiniteElement,

    #[error("iteration budget must be at least 1")]
    InvalidMaxIterations,

    #[error("convergence tolerance must be finite and strictly positive")]
    InvalidTolerance,

    /// Earth radius and rotation rates must be finite and strictly positive
    #[error("invalid Earth model")]
    InvalidEarthModel,

    #[error("receiver velocity must be finite")]
    InvalidReceiverVelocity,

    /// Operation is not defined in this reference frame
    #[error("operation not supported in {0} frame")]
    UnsupportedFrame(crate::prelude::Frame),
}
