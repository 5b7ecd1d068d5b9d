//! Reference sampling backend: adaptive random-walk Metropolis.
//!
//! The log-posterior is the model's log prior plus the partial-sum
//! log-likelihood evaluated under the fit's threading configuration, so
//! every density evaluation exercises the reduction being tuned. Warmup
//! adapts the proposal scale toward a target acceptance rate; retained
//! draws follow.

use crate::error::{AfinarError, Result};
use crate::model::ModelSpec;
use crate::rng::standard_normal;
use crate::sampler::partial_sum::log_likelihood_in_pool;
use crate::sampler::{FitEngine, FittedModel, SamplerConfig};
use crate::threading::ThreadConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Adaptive random-walk Metropolis engine.
///
/// # Example
///
/// ```
/// use afinar::data::simulate_poisson;
/// use afinar::family::Family;
/// use afinar::model::ModelSpec;
/// use afinar::sampler::{FitEngine, MetropolisEngine, SamplerConfig};
/// use afinar::threading::ThreadConfig;
///
/// let spec = ModelSpec::new(simulate_poisson(200, 3.0, 42), Family::Poisson);
/// let engine = MetropolisEngine::new();
/// let sampling = SamplerConfig::new().with_iterations(200).with_warmup(100);
/// let threading = ThreadConfig::new(1, 50).unwrap();
///
/// let fit = engine.fit(&spec, &sampling, &threading).unwrap();
/// assert_eq!(fit.n_draws(), 200);
/// // Posterior mean of the log-rate should sit near ln(3)
/// let mean = fit.posterior_mean().unwrap()[0];
/// assert!((mean - 3.0_f64.ln()).abs() < 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct MetropolisEngine {
    initial_step: f64,
    target_accept: f64,
    adapt_window: usize,
}

impl Default for MetropolisEngine {
    fn default() -> Self {
        Self {
            initial_step: 0.1,
            target_accept: 0.3,
            adapt_window: 50,
        }
    }
}

impl MetropolisEngine {
    /// Engine with default step size 0.1 and target acceptance 0.3.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial proposal step size.
    #[must_use]
    pub fn with_initial_step(mut self, step: f64) -> Self {
        self.initial_step = step;
        self
    }

    /// Set the warmup target acceptance rate.
    #[must_use]
    pub fn with_target_accept(mut self, target: f64) -> Self {
        self.target_accept = target;
        self
    }

    fn run_chain(
        &self,
        spec: &ModelSpec,
        sampling: &SamplerConfig,
        threading: &ThreadConfig,
        pool: &rayon::ThreadPool,
        chain: usize,
        draws: &mut Vec<Vec<f64>>,
        lp_trace: &mut Vec<f64>,
    ) -> Result<(usize, usize)> {
        let n_params = spec.n_params();
        let mut rng = StdRng::seed_from_u64(sampling.seed().wrapping_add(chain as u64));
        let mut position = sampling.inits().resolve(n_params)?;
        let mut current_lp =
            spec.log_prior(&position) + log_likelihood_in_pool(spec, &position, threading, pool);
        if !current_lp.is_finite() {
            return Err(AfinarError::NonFiniteDensity { iteration: 0 });
        }

        let mut step = self.initial_step;
        let mut accepted = 0usize;
        let mut proposed = 0usize;
        let mut window_accepts = 0usize;
        let total = sampling.warmup() + sampling.iterations();

        for iter in 0..total {
            let proposal: Vec<f64> = position
                .iter()
                .map(|&p| p + step * standard_normal(&mut rng))
                .collect();
            let proposal_lp = spec.log_prior(&proposal)
                + log_likelihood_in_pool(spec, &proposal, threading, pool);
            proposed += 1;

            let accept = proposal_lp.is_finite()
                && (proposal_lp >= current_lp
                    || rng.gen::<f64>().ln() < proposal_lp - current_lp);
            if accept {
                position = proposal;
                current_lp = proposal_lp;
                accepted += 1;
                window_accepts += 1;
            }

            let warming = iter < sampling.warmup();
            if warming && (iter + 1) % self.adapt_window == 0 {
                let rate = window_accepts as f64 / self.adapt_window as f64;
                step = (step * (rate - self.target_accept).exp()).clamp(1e-6, 10.0);
                window_accepts = 0;
            }
            if !warming {
                draws.push(position.clone());
                lp_trace.push(current_lp);
            }
        }
        Ok((accepted, proposed))
    }
}

impl FitEngine for MetropolisEngine {
    fn fit(
        &self,
        spec: &ModelSpec,
        sampling: &SamplerConfig,
        threading: &ThreadConfig,
    ) -> Result<FittedModel> {
        spec.validate()?;
        sampling.validate()?;
        threading.validate_for(spec.dataset().n_obs())?;
        let pool = threading.build_pool()?;

        let retained = sampling.chains() * sampling.iterations();
        let mut draws = Vec::with_capacity(retained);
        let mut lp_trace = Vec::with_capacity(retained);
        let mut accepted = 0usize;
        let mut proposed = 0usize;

        for chain in 0..sampling.chains() {
            let (a, p) = self.run_chain(
                spec,
                sampling,
                threading,
                &pool,
                chain,
                &mut draws,
                &mut lp_trace,
            )?;
            accepted += a;
            proposed += p;
        }

        let accept_rate = if proposed == 0 {
            0.0
        } else {
            accepted as f64 / proposed as f64
        };
        FittedModel::new(draws, lp_trace, accept_rate)
    }
}
