//! Threading benchmark harness.
//!
//! Given a baseline model template and candidate lists for cores,
//! grainsize, and iterations, the harness re-fits the model once per
//! combination in the cross-product of the lists, measuring wall-clock
//! elapsed time per fit, and returns the full table of configurations and
//! runtimes. `static` policy and initial values are held fixed per sweep;
//! the seed is fixed so per-configuration stochastic cost stays constant,
//! and every measured fit runs exactly one chain so between-chain
//! parallelism cannot mask within-chain effects.
//!
//! The sweep is strictly sequential: each configuration's fit starts only
//! after the previous one's elapsed time has been recorded. A failing fit
//! aborts the whole sweep; no partial table survives.
//!
//! # Example
//!
//! ```
//! use afinar::prelude::*;
//!
//! let data = simulate_poisson(300, 3.0, 42);
//! let spec = ModelSpec::new(data, Family::Poisson);
//!
//! let grid = SweepGrid::new(vec![1, 2], vec![75], vec![20]).unwrap();
//! let bench = ThreadingBenchmark::new(MetropolisEngine::new());
//! let table = bench.run(&spec, &grid, &SweepOptions::default()).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert!(table.rows().iter().all(|r| r.runtime_secs() >= 0.0));
//! ```

pub mod report;

use crate::error::{AfinarError, Result};
use crate::model::ModelSpec;
use crate::sampler::{FitEngine, Inits, SamplerConfig};
use crate::threading::ThreadConfig;
use std::time::{Duration, Instant};

/// Wall-clock measurement seam.
///
/// The harness measures each fit through this trait so tests can
/// substitute a deterministic clock.
pub trait Clock {
    /// Run `op` and return its result together with the elapsed duration.
    fn measure<T>(&self, op: impl FnOnce() -> T) -> (T, Duration);
}

/// Default clock backed by `std::time::Instant`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn measure<T>(&self, op: impl FnOnce() -> T) -> (T, Duration) {
        let start = Instant::now();
        let out = op();
        (out, start.elapsed())
    }
}

/// Candidate values for the three swept tuning axes.
///
/// The sweep covers the full cross-product; the row count of the result
/// table equals the product of the three cardinalities.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SweepGrid {
    cores: Vec<usize>,
    grainsizes: Vec<usize>,
    iterations: Vec<usize>,
}

impl SweepGrid {
    /// Create a sweep grid.
    ///
    /// # Errors
    ///
    /// Returns `EmptySweepAxis` for an empty axis and
    /// `InvalidHyperparameter` for a zero candidate value.
    pub fn new(cores: Vec<usize>, grainsizes: Vec<usize>, iterations: Vec<usize>) -> Result<Self> {
        for (axis, values) in [
            ("cores", &cores),
            ("grainsize", &grainsizes),
            ("iterations", &iterations),
        ] {
            if values.is_empty() {
                return Err(AfinarError::EmptySweepAxis { axis });
            }
            if values.contains(&0) {
                return Err(AfinarError::InvalidHyperparameter {
                    param: axis.to_string(),
                    value: "0".to_string(),
                    constraint: ">= 1".to_string(),
                });
            }
        }
        Ok(Self {
            cores,
            grainsizes,
            iterations,
        })
    }

    /// Candidate core counts.
    #[must_use]
    pub fn cores(&self) -> &[usize] {
        &self.cores
    }

    /// Candidate grainsizes.
    #[must_use]
    pub fn grainsizes(&self) -> &[usize] {
        &self.grainsizes
    }

    /// Candidate iteration counts.
    #[must_use]
    pub fn iterations(&self) -> &[usize] {
        &self.iterations
    }

    /// Number of configurations in the cross-product.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cores.len() * self.grainsizes.len() * self.iterations.len()
    }

    /// Whether the cross-product is empty. Unreachable through `new`, which
    /// rejects empty axes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(cores, grainsize, iterations)` combinations in enumeration
    /// order: cores outermost, then grainsize, then iterations.
    #[must_use]
    pub fn combinations(&self) -> Vec<(usize, usize, usize)> {
        let mut combos = Vec::with_capacity(self.len());
        for &c in &self.cores {
            for &g in &self.grainsizes {
                for &i in &self.iterations {
                    combos.push((c, g, i));
                }
            }
        }
        combos
    }
}

/// Per-sweep settings held fixed across all configurations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepOptions {
    seed: u64,
    inits: Inits,
    static_schedule: bool,
    probe_iterations: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        Self {
            seed: 1234,
            inits: Inits::default(),
            static_schedule: false,
            probe_iterations: 10,
        }
    }
}

impl SweepOptions {
    /// Options with seed 1234, constant-zero inits, adaptive scheduling,
    /// and a 10-iteration scaling probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed shared by every measured fit.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initial values shared by every measured fit.
    #[must_use]
    pub fn with_inits(mut self, inits: Inits) -> Self {
        self.inits = inits;
        self
    }

    /// Select the deterministic fixed-partition schedule for every fit.
    #[must_use]
    pub fn with_static_schedule(mut self, static_schedule: bool) -> Self {
        self.static_schedule = static_schedule;
        self
    }

    /// Set the iteration count of the untimed scaling probe.
    #[must_use]
    pub fn with_probe_iterations(mut self, probe_iterations: usize) -> Self {
        self.probe_iterations = probe_iterations.max(1);
        self
    }

    /// Seed shared by every measured fit.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether the deterministic schedule is selected.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.static_schedule
    }
}

/// One measured configuration: the tuning tuple plus its wall-clock
/// runtime. Rows are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkRow {
    /// Worker thread count used for this fit
    pub cores: usize,
    /// Grainsize used for this fit
    pub grainsize: usize,
    /// Retained iteration count used for this fit
    pub iterations: usize,
    /// Whether the deterministic schedule was selected
    pub static_schedule: bool,
    /// Wall-clock duration of the fit
    pub runtime: Duration,
}

impl BenchmarkRow {
    /// Runtime in seconds.
    #[must_use]
    pub fn runtime_secs(&self) -> f64 {
        self.runtime.as_secs_f64()
    }
}

/// The full sweep result: one row per configuration tried, in enumeration
/// order. Purely additive; finalized when the sweep completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResultTable {
    rows: Vec<BenchmarkRow>,
}

impl ResultTable {
    /// Column names of the flat tabular view.
    pub const COLUMNS: [&'static str; 4] = ["cores", "grainsize", "iter", "runtime"];

    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row.
    pub fn push(&mut self, row: BenchmarkRow) {
        self.rows.push(row);
    }

    /// All rows in enumeration order.
    #[must_use]
    pub fn rows(&self) -> &[BenchmarkRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row with the smallest runtime, if any.
    #[must_use]
    pub fn fastest(&self) -> Option<&BenchmarkRow> {
        self.rows.iter().min_by_key(|r| r.runtime)
    }
}

/// The benchmark harness: sweeps a grid of threading configurations
/// against a fixed model template, timing one single-chain fit per grid
/// point through an injected engine and clock.
#[derive(Debug, Clone)]
pub struct ThreadingBenchmark<E, C = MonotonicClock> {
    engine: E,
    clock: C,
}

impl<E: FitEngine> ThreadingBenchmark<E, MonotonicClock> {
    /// Harness over `engine` with the default monotonic clock.
    #[must_use]
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            clock: MonotonicClock,
        }
    }
}

impl<E: FitEngine, C: Clock> ThreadingBenchmark<E, C> {
    /// Harness over `engine` measuring with `clock`.
    #[must_use]
    pub fn with_clock(engine: E, clock: C) -> Self {
        Self { engine, clock }
    }

    /// Run the sweep.
    ///
    /// First fits an untimed "scaling" variant of the template (single
    /// core, first candidate grainsize, the chosen schedule, minimal
    /// iterations), which installs threading configuration and warms
    /// caches without entering the table. Then, for every combination in
    /// the grid's cross-product, one single-chain fit is timed with the
    /// fixed seed and inits. Each measured fit retains the configured
    /// iteration count preceded by a half-length warmup phase.
    ///
    /// # Errors
    ///
    /// Any fit failure aborts the sweep and discards all timings already
    /// taken.
    pub fn run(
        &self,
        template: &ModelSpec,
        grid: &SweepGrid,
        options: &SweepOptions,
    ) -> Result<ResultTable> {
        let probe_threading = ThreadConfig::new(1, grid.grainsizes()[0])?
            .with_static_schedule(options.static_schedule);
        let probe_sampling = SamplerConfig::new()
            .with_chains(1)
            .with_iterations(options.probe_iterations)
            .with_warmup(0)
            .with_seed(options.seed)
            .with_inits(options.inits.clone());
        self.engine
            .fit(template, &probe_sampling, &probe_threading)?;

        let mut table = ResultTable::new();
        for (cores, grainsize, iterations) in grid.combinations() {
            let threading = ThreadConfig::new(cores, grainsize)?
                .with_static_schedule(options.static_schedule);
            let sampling = SamplerConfig::new()
                .with_chains(1)
                .with_iterations(iterations)
                .with_warmup(iterations / 2)
                .with_seed(options.seed)
                .with_inits(options.inits.clone());

            let (outcome, elapsed) = self
                .clock
                .measure(|| self.engine.fit(template, &sampling, &threading));
            outcome?;

            table.push(BenchmarkRow {
                cores,
                grainsize,
                iterations,
                static_schedule: options.static_schedule,
                runtime: elapsed,
            });
        }
        Ok(table)
    }
}
