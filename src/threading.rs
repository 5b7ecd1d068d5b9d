//! Within-chain threading configuration.
//!
//! A `ThreadConfig` fixes the three knobs the sampler's partial-sum
//! reduction exposes: worker thread count, grainsize (target observations
//! per partial-sum chunk), and the scheduling policy. Each fit builds its
//! own rayon pool from this configuration so measurements never share
//! worker state.

use crate::error::{AfinarError, Result};

/// Threading configuration for one model fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ThreadConfig {
    threads: usize,
    grainsize: usize,
    static_schedule: bool,
}

impl ThreadConfig {
    /// Create a threading configuration with an adaptive (work-stealing)
    /// schedule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHyperparameter` if `threads` or `grainsize` is zero.
    pub fn new(threads: usize, grainsize: usize) -> Result<Self> {
        if threads == 0 {
            return Err(AfinarError::InvalidHyperparameter {
                param: "threads".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        if grainsize == 0 {
            return Err(AfinarError::InvalidHyperparameter {
                param: "grainsize".to_string(),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        Ok(Self {
            threads,
            grainsize,
            static_schedule: false,
        })
    }

    /// Select a deterministic fixed-partition schedule (true) or rayon's
    /// adaptive work-stealing schedule (false).
    #[must_use]
    pub fn with_static_schedule(mut self, static_schedule: bool) -> Self {
        self.static_schedule = static_schedule;
        self
    }

    /// Worker thread count.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Target observations per partial-sum chunk.
    #[must_use]
    pub fn grainsize(&self) -> usize {
        self.grainsize
    }

    /// Whether the deterministic fixed-partition schedule is selected.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.static_schedule
    }

    /// Number of partial-sum chunks a dataset of `n_obs` observations
    /// splits into.
    #[must_use]
    pub fn chunks(&self, n_obs: usize) -> usize {
        n_obs.div_ceil(self.grainsize)
    }

    /// Checks that at least one full partition is feasible for `n_obs`
    /// observations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrainsize` if the grainsize exceeds `n_obs`.
    pub fn validate_for(&self, n_obs: usize) -> Result<()> {
        if self.grainsize > n_obs {
            return Err(AfinarError::InvalidGrainsize {
                grainsize: self.grainsize,
                n_obs,
            });
        }
        Ok(())
    }

    /// Build a dedicated rayon pool with this configuration's thread count.
    ///
    /// # Errors
    ///
    /// Returns `ThreadPool` if the pool cannot be constructed.
    pub fn build_pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(|i| format!("afinar-worker-{i}"))
            .build()
            .map_err(|e| AfinarError::ThreadPool {
                message: e.to_string(),
            })
    }
}

/// Number of hardware threads visible to this process, for callers that
/// want to seed a sweep grid from the host. Falls back to 1 when the
/// parallelism cannot be queried. The harness itself never calls this;
/// core counts reach it only through the grid.
#[must_use]
pub fn detected_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
}
