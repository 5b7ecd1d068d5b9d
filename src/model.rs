//! Immutable model templates.
//!
//! A `ModelSpec` bundles everything a fit needs except the threading and
//! sampling configuration: data, likelihood family, priors, and the
//! family's dispersion parameter. Benchmark sweeps clone the template and
//! override only the swept knobs, so one baseline spec drives an entire
//! grid of re-fits.

use crate::data::Dataset;
use crate::error::{AfinarError, Result};
use crate::family::Family;
use crate::prior::Prior;

/// Model descriptor: data, likelihood family, and priors.
///
/// Construct once, then reuse as a template. All setters are
/// builder-style and return a modified copy of the spec.
///
/// # Example
///
/// ```
/// use afinar::data::simulate_poisson;
/// use afinar::family::Family;
/// use afinar::model::ModelSpec;
/// use afinar::prior::Prior;
///
/// let data = simulate_poisson(500, 3.0, 42);
/// let spec = ModelSpec::new(data, Family::Poisson)
///     .with_intercept_prior(Prior::Normal { mean: 0.0, sd: 5.0 });
/// assert_eq!(spec.n_params(), 1);
/// spec.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ModelSpec {
    dataset: Dataset,
    family: Family,
    intercept_prior: Prior,
    coefficient_prior: Prior,
    dispersion: f64,
}

impl ModelSpec {
    /// Create a model spec with default priors: Student-t(3, 0, 2.5) on the
    /// intercept, flat on the slopes, dispersion 1.
    #[must_use]
    pub fn new(dataset: Dataset, family: Family) -> Self {
        Self {
            dataset,
            family,
            intercept_prior: Prior::StudentT {
                df: 3.0,
                loc: 0.0,
                scale: 2.5,
            },
            coefficient_prior: Prior::Flat,
            dispersion: 1.0,
        }
    }

    /// Set the intercept prior.
    #[must_use]
    pub fn with_intercept_prior(mut self, prior: Prior) -> Self {
        self.intercept_prior = prior;
        self
    }

    /// Set the prior shared by all slope coefficients.
    #[must_use]
    pub fn with_coefficient_prior(mut self, prior: Prior) -> Self {
        self.coefficient_prior = prior;
        self
    }

    /// Set the dispersion parameter: Negative Binomial shape φ or Gaussian
    /// noise standard deviation σ. Ignored by Poisson and Bernoulli.
    #[must_use]
    pub fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// The observed data.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The likelihood family.
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    /// The dispersion parameter.
    #[must_use]
    pub fn dispersion(&self) -> f64 {
        self.dispersion
    }

    /// Number of sampled parameters (intercept + slopes).
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.dataset.n_params()
    }

    /// Validates data, priors, and dispersion against the family.
    ///
    /// # Errors
    ///
    /// Returns an error for empty data, responses outside the family's
    /// support, non-positive dispersion where the family reads it, or
    /// ill-configured priors.
    pub fn validate(&self) -> Result<()> {
        if self.dataset.n_obs() == 0 {
            return Err(AfinarError::Other(
                "dataset has no observations".to_string(),
            ));
        }
        self.family.validate_response(self.dataset.y())?;
        if self.family.uses_dispersion() && !(self.dispersion > 0.0 && self.dispersion.is_finite())
        {
            return Err(AfinarError::InvalidHyperparameter {
                param: "dispersion".to_string(),
                value: format!("{}", self.dispersion),
                constraint: "positive and finite".to_string(),
            });
        }
        for (name, prior) in [
            ("intercept_prior", &self.intercept_prior),
            ("coefficient_prior", &self.coefficient_prior),
        ] {
            if !prior.is_proper_configuration() {
                return Err(AfinarError::InvalidHyperparameter {
                    param: name.to_string(),
                    value: format!("{prior:?}"),
                    constraint: "positive scale and degrees of freedom".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Joint log prior over the parameter vector.
    #[must_use]
    pub fn log_prior(&self, params: &[f64]) -> f64 {
        let mut total = self.intercept_prior.log_density(params[0]);
        for &slope in &params[1..] {
            total += self.coefficient_prior.log_density(slope);
        }
        total
    }
}
