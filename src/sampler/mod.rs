//! Sampling backend: the model-fitting seam and its configuration.
//!
//! The benchmark harness treats model fitting as an opaque synchronous
//! call behind the [`FitEngine`] trait. The bundled reference backend is
//! [`metropolis::MetropolisEngine`]; tests substitute mock engines through
//! the same seam.

pub mod metropolis;
pub mod partial_sum;

pub use metropolis::MetropolisEngine;

use crate::error::{AfinarError, Result};
use crate::model::ModelSpec;
use crate::threading::ThreadConfig;

/// Initial values for the sampling chain.
///
/// Fixed initial values keep runtime comparisons from being confounded by
/// differing starting geometry, so the default is a constant.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Inits {
    /// Every parameter starts at the given constant.
    Constant(f64),
    /// Explicit per-parameter starting values.
    Values(Vec<f64>),
}

impl Default for Inits {
    fn default() -> Self {
        Self::Constant(0.0)
    }
}

impl Inits {
    /// Resolve to a concrete starting vector of length `n_params`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if explicit values have the wrong length.
    pub fn resolve(&self, n_params: usize) -> Result<Vec<f64>> {
        match self {
            Self::Constant(c) => Ok(vec![*c; n_params]),
            Self::Values(values) => {
                if values.len() != n_params {
                    return Err(AfinarError::DimensionMismatch {
                        expected: format!("{n_params} initial values"),
                        actual: format!("{} initial values", values.len()),
                    });
                }
                Ok(values.clone())
            }
        }
    }
}

/// Sampling configuration for one fit: chain count, iteration counts,
/// seed, and initial values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SamplerConfig {
    chains: usize,
    iterations: usize,
    warmup: usize,
    seed: u64,
    inits: Inits,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            chains: 1,
            iterations: 1000,
            warmup: 500,
            seed: 1234,
            inits: Inits::default(),
        }
    }
}

impl SamplerConfig {
    /// Configuration with the default single chain, 1000 retained draws,
    /// 500 warmup iterations, and seed 1234.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of chains. The benchmark harness always uses one
    /// chain so between-chain parallelism cannot mask within-chain effects.
    #[must_use]
    pub fn with_chains(mut self, chains: usize) -> Self {
        self.chains = chains;
        self
    }

    /// Set the number of retained (post-warmup) draws per chain.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the number of warmup (adaptation) iterations per chain.
    #[must_use]
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Set the random seed. Chain `c` derives its RNG from `seed + c`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initial values.
    #[must_use]
    pub fn with_inits(mut self, inits: Inits) -> Self {
        self.inits = inits;
        self
    }

    /// Number of chains.
    #[must_use]
    pub fn chains(&self) -> usize {
        self.chains
    }

    /// Retained draws per chain.
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Warmup iterations per chain.
    #[must_use]
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Random seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Initial values.
    #[must_use]
    pub fn inits(&self) -> &Inits {
        &self.inits
    }

    /// Validates chain and iteration counts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if `chains` or `iterations` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chains == 0 {
            return Err(AfinarError::InvalidHyperparameter {
                param: "chains".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        if self.iterations == 0 {
            return Err(AfinarError::InvalidHyperparameter {
                param: "iterations".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        Ok(())
    }
}

/// A fitted model: retained draws plus sampler diagnostics.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FittedModel {
    draws: Vec<Vec<f64>>,
    log_posterior: Vec<f64>,
    accept_rate: f64,
}

impl FittedModel {
    /// Assemble a fitted model from retained draws and their log-posterior
    /// trace.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if draws are ragged or the trace length
    /// differs from the draw count.
    pub fn new(draws: Vec<Vec<f64>>, log_posterior: Vec<f64>, accept_rate: f64) -> Result<Self> {
        if let Some(first) = draws.first() {
            let width = first.len();
            if draws.iter().any(|d| d.len() != width) {
                return Err(AfinarError::DimensionMismatch {
                    expected: format!("{width} parameters per draw"),
                    actual: "ragged draw matrix".to_string(),
                });
            }
        }
        if draws.len() != log_posterior.len() {
            return Err(AfinarError::DimensionMismatch {
                expected: format!("{} log-posterior values", draws.len()),
                actual: format!("{}", log_posterior.len()),
            });
        }
        Ok(Self {
            draws,
            log_posterior,
            accept_rate,
        })
    }

    /// Retained draws, one parameter vector per iteration.
    #[must_use]
    pub fn draws(&self) -> &[Vec<f64>] {
        &self.draws
    }

    /// Number of retained draws.
    #[must_use]
    pub fn n_draws(&self) -> usize {
        self.draws.len()
    }

    /// Number of parameters per draw (0 for an empty fit).
    #[must_use]
    pub fn n_params(&self) -> usize {
        self.draws.first().map_or(0, Vec::len)
    }

    /// Log-posterior value of each retained draw.
    #[must_use]
    pub fn log_posterior(&self) -> &[f64] {
        &self.log_posterior
    }

    /// Overall proposal acceptance rate.
    #[must_use]
    pub fn accept_rate(&self) -> f64 {
        self.accept_rate
    }

    /// Posterior mean of each parameter, or `None` for an empty fit.
    #[must_use]
    pub fn posterior_mean(&self) -> Option<Vec<f64>> {
        let n = self.draws.len();
        if n == 0 {
            return None;
        }
        let width = self.n_params();
        let mut mean = vec![0.0; width];
        for draw in &self.draws {
            for (m, &v) in mean.iter_mut().zip(draw) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n as f64;
        }
        Some(mean)
    }
}

/// The model-fitting seam: accepts a model template plus sampling and
/// threading configuration, returns a fitted model or a sampler error.
///
/// The benchmark harness is generic over this trait, so the backend under
/// test is injected rather than assumed.
pub trait FitEngine: Send + Sync {
    /// Fit the model. A synchronous call that runs to completion or fails.
    ///
    /// # Errors
    ///
    /// Implementations surface invalid configurations (e.g. an infeasible
    /// grainsize) and internal sampler failures.
    fn fit(
        &self,
        spec: &ModelSpec,
        sampling: &SamplerConfig,
        threading: &ThreadConfig,
    ) -> Result<FittedModel>;
}

impl<E: FitEngine + ?Sized> FitEngine for &E {
    fn fit(
        &self,
        spec: &ModelSpec,
        sampling: &SamplerConfig,
        threading: &ThreadConfig,
    ) -> Result<FittedModel> {
        (**self).fit(spec, sampling, threading)
    }
}
