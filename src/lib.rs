//! Afinar: threading and grainsize tuning for Bayesian model fitting.
//!
//! Afinar benchmarks within-chain parallelization: it re-fits a model
//! across a grid of worker-thread counts and partial-sum grainsizes,
//! timing each single-chain fit, so the configuration that actually pays
//! off on the host can be read off a table instead of guessed.
//!
//! # Quick Start
//!
//! ```
//! use afinar::prelude::*;
//!
//! // Simulated count data and a Poisson model template
//! let data = simulate_poisson(400, 3.0, 42);
//! let n_obs = data.n_obs();
//! let spec = ModelSpec::new(data, Family::Poisson)
//!     .with_intercept_prior(Prior::Normal { mean: 0.0, sd: 5.0 });
//!
//! // Sweep 1 and 2 workers at two grainsizes, 20 iterations each
//! let grid = SweepGrid::new(vec![1, 2], vec![100, 50], vec![20]).unwrap();
//! let bench = ThreadingBenchmark::new(MetropolisEngine::new());
//! let table = bench.run(&spec, &grid, &SweepOptions::default()).unwrap();
//!
//! assert_eq!(table.len(), 4);
//! let summary = afinar::bench::report::summarize(&table, n_obs);
//! assert_eq!(summary.len(), 4);
//! ```
//!
//! # Modules
//!
//! - [`data`]: Observed data and seeded count simulation
//! - [`family`]: Likelihood families and per-observation log-density terms
//! - [`prior`]: Coefficient priors
//! - [`model`]: Immutable model templates
//! - [`threading`]: Within-chain threading configuration
//! - [`sampler`]: The model-fitting seam and the reference Metropolis backend
//! - [`bench`]: The threading benchmark harness and downstream summaries

pub mod bench;
pub mod data;
pub mod error;
pub mod family;
pub mod model;
pub mod prelude;
pub mod prior;
pub(crate) mod rng;
pub mod sampler;
pub mod threading;

pub use error::{AfinarError, Result};
