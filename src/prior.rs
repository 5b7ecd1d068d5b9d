//! Prior specifications for regression coefficients.
//!
//! Priors are evaluated coefficient-wise; the model's log prior is the sum
//! of the per-coefficient log-densities. Normalizing constants are kept so
//! that log-posterior traces are comparable across prior choices.

use crate::family::ln_gamma;

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Prior over a single regression coefficient.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Prior {
    /// Improper flat prior: log-density contribution is zero everywhere.
    Flat,

    /// Normal prior with the given mean and standard deviation.
    Normal {
        /// Prior mean
        mean: f64,
        /// Prior standard deviation (must be positive)
        sd: f64,
    },

    /// Student-t prior with degrees of freedom, location, and scale.
    StudentT {
        /// Degrees of freedom ν (must be positive)
        df: f64,
        /// Location parameter
        loc: f64,
        /// Scale parameter (must be positive)
        scale: f64,
    },
}

impl Prior {
    /// Log-density of the prior at `theta`.
    #[must_use]
    pub fn log_density(&self, theta: f64) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Normal { mean, sd } => {
                let z = (theta - mean) / sd;
                -0.5 * LN_2PI - sd.ln() - 0.5 * z * z
            }
            Self::StudentT { df, loc, scale } => {
                let nu = *df;
                let z = (theta - loc) / scale;
                ln_gamma(0.5 * (nu + 1.0))
                    - ln_gamma(0.5 * nu)
                    - 0.5 * (nu * std::f64::consts::PI).ln()
                    - scale.ln()
                    - 0.5 * (nu + 1.0) * (z * z / nu).ln_1p()
            }
        }
    }

    /// Whether the prior's parameters satisfy their constraints.
    #[must_use]
    pub fn is_proper_configuration(&self) -> bool {
        match self {
            Self::Flat => true,
            Self::Normal { sd, .. } => *sd > 0.0 && sd.is_finite(),
            Self::StudentT { df, scale, .. } => {
                *df > 0.0 && df.is_finite() && *scale > 0.0 && scale.is_finite()
            }
        }
    }
}
