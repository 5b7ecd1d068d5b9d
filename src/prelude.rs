//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use afinar::prelude::*;
//! ```

pub use crate::bench::{
    BenchmarkRow, Clock, MonotonicClock, ResultTable, SweepGrid, SweepOptions, ThreadingBenchmark,
};
pub use crate::data::{simulate_neg_binomial, simulate_poisson, Dataset};
pub use crate::error::{AfinarError, Result};
pub use crate::family::{Family, Link};
pub use crate::model::ModelSpec;
pub use crate::prior::Prior;
pub use crate::sampler::{FitEngine, FittedModel, Inits, MetropolisEngine, SamplerConfig};
pub use crate::threading::{detected_parallelism, ThreadConfig};
