//! Error types for afinar operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for afinar operations.
///
/// Covers configuration validation, sampler failures, and thread-pool
/// construction. A failure inside a benchmark sweep carries one of these
/// variants out of the whole sweep; there is no per-configuration recovery.
///
/// # Examples
///
/// ```
/// use afinar::error::AfinarError;
///
/// let err = AfinarError::InvalidGrainsize {
///     grainsize: 5000,
///     n_obs: 1000,
/// };
/// assert!(err.to_string().contains("grainsize"));
/// ```
#[derive(Debug)]
pub enum AfinarError {
    /// Vector lengths don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Grainsize exceeds the number of observations, so no feasible
    /// partial-sum partition exists.
    InvalidGrainsize {
        /// Requested grainsize
        grainsize: usize,
        /// Number of observations in the dataset
        n_obs: usize,
    },

    /// A sweep axis has no candidate values.
    EmptySweepAxis {
        /// Axis name ("cores", "grainsize", "iterations")
        axis: &'static str,
    },

    /// Response value is outside the support of the likelihood family.
    InvalidResponse {
        /// Family name
        family: &'static str,
        /// Offending response value
        value: f64,
    },

    /// Log posterior density evaluated to NaN or infinity.
    NonFiniteDensity {
        /// Iteration at which the density degenerated (0 = initial point)
        iteration: usize,
    },

    /// Thread pool construction failed.
    ThreadPool {
        /// Error details from the pool builder
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for AfinarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AfinarError::DimensionMismatch { expected, actual } => {
                write!(f, "Dimension mismatch: expected {expected}, got {actual}")
            }
            AfinarError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            AfinarError::InvalidGrainsize { grainsize, n_obs } => {
                write!(
                    f,
                    "Invalid grainsize: {grainsize} exceeds {n_obs} observations, \
                     no partial-sum partition is feasible"
                )
            }
            AfinarError::EmptySweepAxis { axis } => {
                write!(f, "Sweep axis '{axis}' has no candidate values")
            }
            AfinarError::InvalidResponse { family, value } => {
                write!(f, "{family} response out of support: {value}")
            }
            AfinarError::NonFiniteDensity { iteration } => {
                write!(
                    f,
                    "Log posterior is not finite at iteration {iteration}; \
                     check priors and initial values"
                )
            }
            AfinarError::ThreadPool { message } => {
                write!(f, "Failed to build thread pool: {message}")
            }
            AfinarError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for AfinarError {}

impl From<&str> for AfinarError {
    fn from(msg: &str) -> Self {
        AfinarError::Other(msg.to_string())
    }
}

impl From<String> for AfinarError {
    fn from(msg: String) -> Self {
        AfinarError::Other(msg)
    }
}

/// Convenience result type for afinar operations.
pub type Result<T> = std::result::Result<T, AfinarError>;
