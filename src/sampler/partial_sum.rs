//! Partial-sum evaluation of the log-likelihood.
//!
//! The observation range is split into chunks of at most `grainsize`
//! elements; each chunk's contribution is an independent partial sum.
//! Under the static schedule the chunk boundaries and the combination
//! order are fixed by the configuration alone, so the total is
//! bitwise-reproducible for a given (data, params, grainsize) regardless
//! of thread count. The adaptive schedule hands chunks to rayon's
//! work-stealing reduction, where the combination order may vary.

use crate::model::ModelSpec;
use crate::threading::ThreadConfig;
use rayon::prelude::*;
use std::ops::Range;

/// Log-likelihood contribution of one chunk of observations.
#[must_use]
pub fn partial_log_likelihood(spec: &ModelSpec, params: &[f64], range: Range<usize>) -> f64 {
    let dataset = spec.dataset();
    let family = spec.family();
    let dispersion = spec.dispersion();
    let y = dataset.y();
    let mut total = 0.0;
    for i in range {
        let eta = dataset.linear_predictor(i, params);
        total += family.log_density_term(y[i], eta, dispersion);
    }
    total
}

/// Chunk boundaries for `n_obs` observations at the given grainsize.
fn chunk_ranges(n_obs: usize, grainsize: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::with_capacity(n_obs.div_ceil(grainsize));
    let mut start = 0;
    while start < n_obs {
        let end = (start + grainsize).min(n_obs);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

/// Full log-likelihood evaluated inside an existing pool.
pub(crate) fn log_likelihood_in_pool(
    spec: &ModelSpec,
    params: &[f64],
    config: &ThreadConfig,
    pool: &rayon::ThreadPool,
) -> f64 {
    let ranges = chunk_ranges(spec.dataset().n_obs(), config.grainsize());
    if config.is_static() {
        // Materialize partials in chunk order, combine sequentially
        let partials: Vec<f64> = pool.install(|| {
            ranges
                .par_iter()
                .map(|r| partial_log_likelihood(spec, params, r.clone()))
                .collect()
        });
        partials.iter().sum()
    } else {
        pool.install(|| {
            ranges
                .into_par_iter()
                .map(|r| partial_log_likelihood(spec, params, r))
                .sum()
        })
    }
}

/// Full log-likelihood under the given threading configuration.
///
/// Builds a dedicated pool for this evaluation; the sampler uses the
/// pooled variant internally so one pool serves a whole fit.
///
/// # Errors
///
/// Returns an error if the grainsize is infeasible for the data or the
/// pool cannot be built.
pub fn log_likelihood(
    spec: &ModelSpec,
    params: &[f64],
    config: &ThreadConfig,
) -> crate::error::Result<f64> {
    config.validate_for(spec.dataset().n_obs())?;
    let pool = config.build_pool()?;
    Ok(log_likelihood_in_pool(spec, params, config, &pool))
}
