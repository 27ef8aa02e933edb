//! Error taxonomy shared by time series construction and the solver.

pub type Result<T> = std::result::Result<T, BdeError>;

/// Errors that can occur while building time series or running a simulation.
///
/// None of these are transient: each one points at malformed input or a
/// malformed model, so nothing is retried internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BdeError {
    /// Malformed series construction (empty, non-increasing, mismatched lengths, ...).
    #[error("Invalid time series: {0}")]
    InvalidSeries(String),

    /// Two series were compared over different horizons.
    #[error("Horizon mismatch: {left} != {right}")]
    HorizonMismatch { left: f64, right: f64 },

    /// The solver was set up inconsistently (arity, history horizons, delays).
    #[error("Invalid solver configuration: {0}")]
    Configuration(String),

    /// A lookup fell outside the domain `[0, horizon]` of a series.
    #[error("Time {time} is outside of the domain [0, {horizon}]")]
    Domain { time: f64, horizon: f64 },

    /// Zero-delay feedback that never settles within a single instant.
    #[error("Cyclic dependency at t = {time}: no fixed point after {evaluations} evaluations")]
    CyclicDependency { time: f64, evaluations: usize },
}

impl BdeError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        BdeError::InvalidSeries(message.into())
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        BdeError::Configuration(message.into())
    }
}
