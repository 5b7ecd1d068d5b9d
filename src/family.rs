//! Likelihood families for Bayesian regression models.
//!
//! Each family defines the per-observation log-density term (the unit of
//! partial-sum splitting during within-chain parallel evaluation) together
//! with its canonical link and response validation.
//!
//! # Families
//!
//! - **Poisson**: Count data, canonical link = log
//! - **Negative Binomial**: Overdispersed count data, canonical link = log,
//!   shape φ supplied via the model's dispersion parameter
//! - **Bernoulli**: Binary data, canonical link = logit
//! - **Gaussian**: Continuous data, canonical link = identity, noise σ
//!   supplied via the model's dispersion parameter

use crate::error::{AfinarError, Result};

const LN_2PI: f64 = 1.837_877_066_409_345_5;

/// Likelihood family of a regression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Family {
    /// Poisson distribution for count data.
    /// Canonical link: log
    Poisson,

    /// Negative Binomial distribution for overdispersed count data.
    /// Canonical link: log. The shape parameter φ comes from the model's
    /// dispersion field; variance is μ + μ²/φ.
    NegativeBinomial,

    /// Bernoulli distribution for binary data.
    /// Canonical link: logit
    Bernoulli,

    /// Gaussian distribution for continuous data.
    /// Canonical link: identity. The noise standard deviation σ comes from
    /// the model's dispersion field.
    Gaussian,
}

/// Link function mapping the mean to the linear predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Link {
    /// Log link: η = log(μ), μ = exp(η)
    Log,

    /// Logit link: η = log(μ/(1-μ)), μ = 1/(1+exp(-η))
    Logit,

    /// Identity link: η = μ
    Identity,
}

impl Family {
    /// Returns the canonical link function for this family.
    #[must_use]
    pub const fn canonical_link(&self) -> Link {
        match self {
            Self::Poisson | Self::NegativeBinomial => Link::Log,
            Self::Bernoulli => Link::Logit,
            Self::Gaussian => Link::Identity,
        }
    }

    /// Display name of the family.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Poisson => "Poisson",
            Self::NegativeBinomial => "NegativeBinomial",
            Self::Bernoulli => "Bernoulli",
            Self::Gaussian => "Gaussian",
        }
    }

    /// Whether this family reads the model's dispersion parameter.
    #[must_use]
    pub const fn uses_dispersion(&self) -> bool {
        matches!(self, Self::NegativeBinomial | Self::Gaussian)
    }

    /// Log-density of a single observation given its linear predictor η.
    ///
    /// `dispersion` is the Negative Binomial shape φ or the Gaussian noise
    /// standard deviation σ; it is ignored by the other families.
    #[must_use]
    pub fn log_density_term(&self, y: f64, eta: f64, dispersion: f64) -> f64 {
        match self {
            Self::Poisson => {
                // log p(y | μ) with μ = exp(η): y·η − μ − log Γ(y+1)
                y * eta - eta.exp() - ln_gamma(y + 1.0)
            }
            Self::NegativeBinomial => {
                let phi = dispersion;
                let mu = eta.exp();
                let log_denom = (phi + mu).ln();
                ln_gamma(y + phi) - ln_gamma(phi) - ln_gamma(y + 1.0)
                    + phi * (phi.ln() - log_denom)
                    + y * (eta - log_denom)
            }
            Self::Bernoulli => {
                // y·η − log(1 + exp(η)), with a stable softplus
                y * eta - softplus(eta)
            }
            Self::Gaussian => {
                let sigma = dispersion;
                let z = (y - eta) / sigma;
                -0.5 * LN_2PI - sigma.ln() - 0.5 * z * z
            }
        }
    }

    /// Validates that response values lie in the support of this family.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` naming the first offending value.
    pub fn validate_response(&self, y: &[f64]) -> Result<()> {
        match self {
            Self::Poisson | Self::NegativeBinomial => {
                for &val in y {
                    if !val.is_finite() || val < 0.0 {
                        return Err(AfinarError::InvalidResponse {
                            family: self.name(),
                            value: val,
                        });
                    }
                }
            }
            Self::Bernoulli => {
                for &val in y {
                    if val != 0.0 && val != 1.0 {
                        return Err(AfinarError::InvalidResponse {
                            family: self.name(),
                            value: val,
                        });
                    }
                }
            }
            Self::Gaussian => {
                for &val in y {
                    if !val.is_finite() {
                        return Err(AfinarError::InvalidResponse {
                            family: self.name(),
                            value: val,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl Link {
    /// Inverse link function: μ = g⁻¹(η).
    #[must_use]
    pub fn inverse(self, eta: f64) -> f64 {
        match self {
            Self::Log => eta.exp(),
            Self::Logit => 1.0 / (1.0 + (-eta).exp()),
            Self::Identity => eta,
        }
    }
}

/// Numerically stable log(1 + exp(x)).
fn softplus(x: f64) -> f64 {
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

/// Natural log of the Gamma function, Lanczos approximation (g = 7, n = 9).
///
/// Accurate to ~15 significant digits over the positive reals.
pub(crate) fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEF: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula for the left half-plane
        let pi = std::f64::consts::PI;
        pi.ln() - (pi * x).sin().abs().ln() - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut a = COEF[0];
        let t = x + G + 0.5;
        for (i, &c) in COEF.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        0.5 * LN_2PI + (x + 0.5) * t.ln() - t + a.ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln_gamma_integers() {
        // Γ(n) = (n-1)!
        assert!((ln_gamma(1.0) - 0.0).abs() < 1e-12);
        assert!((ln_gamma(2.0) - 0.0).abs() < 1e-12);
        assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
        assert!((ln_gamma(11.0) - 3_628_800.0_f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn test_ln_gamma_half() {
        // Γ(1/2) = √π
        let expected = std::f64::consts::PI.sqrt().ln();
        assert!((ln_gamma(0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_poisson_log_density() {
        // log p(y=3 | μ=2) = 3·ln 2 − 2 − ln 3!
        let expected = 3.0 * 2.0_f64.ln() - 2.0 - 6.0_f64.ln();
        let got = Family::Poisson.log_density_term(3.0, 2.0_f64.ln(), 0.0);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_neg_binomial_matches_poisson_at_large_shape() {
        // NB(μ, φ) → Poisson(μ) as φ → ∞
        let eta = 1.2;
        let poisson = Family::Poisson.log_density_term(4.0, eta, 0.0);
        let nb = Family::NegativeBinomial.log_density_term(4.0, eta, 1e7);
        assert!((poisson - nb).abs() < 1e-4);
    }

    #[test]
    fn test_bernoulli_log_density() {
        // At η = 0, p = 0.5 for both outcomes
        let expected = 0.5_f64.ln();
        assert!((Family::Bernoulli.log_density_term(1.0, 0.0, 0.0) - expected).abs() < 1e-12);
        assert!((Family::Bernoulli.log_density_term(0.0, 0.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_log_density() {
        // Standard normal at the mean: -0.5·ln(2π)
        let got = Family::Gaussian.log_density_term(0.0, 0.0, 1.0);
        assert!((got + 0.5 * LN_2PI).abs() < 1e-12);
    }

    #[test]
    fn test_softplus_stability() {
        assert!((softplus(800.0) - 800.0).abs() < 1e-9);
        assert!(softplus(-800.0) >= 0.0);
        assert!(softplus(-800.0) < 1e-300);
    }

    #[test]
    fn test_validate_counts() {
        assert!(Family::Poisson.validate_response(&[0.0, 3.0, 12.0]).is_ok());
        assert!(Family::Poisson.validate_response(&[1.0, -2.0]).is_err());
        assert!(Family::NegativeBinomial
            .validate_response(&[f64::NAN])
            .is_err());
    }

    #[test]
    fn test_validate_bernoulli() {
        assert!(Family::Bernoulli.validate_response(&[0.0, 1.0, 1.0]).is_ok());
        assert!(Family::Bernoulli.validate_response(&[0.5]).is_err());
    }

    #[test]
    fn test_canonical_links() {
        assert_eq!(Family::Poisson.canonical_link(), Link::Log);
        assert_eq!(Family::Bernoulli.canonical_link(), Link::Logit);
        assert_eq!(Family::Gaussian.canonical_link(), Link::Identity);
    }

    #[test]
    fn test_inverse_link() {
        assert!((Link::Log.inverse(0.0) - 1.0).abs() < 1e-12);
        assert!((Link::Logit.inverse(0.0) - 0.5).abs() < 1e-12);
        assert!((Link::Identity.inverse(3.5) - 3.5).abs() < 1e-12);
    }
}
