//! Tune within-chain parallelization for a Negative Binomial count model.
//!
//! Simulates overdispersed count data, then sweeps worker counts and
//! grainsizes against the bundled Metropolis backend and prints the
//! resulting runtime table with derived chunks/slowdown/speedup columns.
//!
//! Run with: cargo run --release --example threading_tuning

use afinar::bench::report;
use afinar::prelude::*;

fn main() -> afinar::Result<()> {
    let n_obs = 10_000;
    let data = simulate_neg_binomial(n_obs, 5.0, 2.0, 20_240_817);
    let spec = ModelSpec::new(data, Family::NegativeBinomial)
        .with_dispersion(2.0)
        .with_intercept_prior(Prior::Normal { mean: 0.0, sd: 5.0 });

    let max_workers = detected_parallelism().min(4);
    let cores: Vec<usize> = [1, 2, 4].into_iter().filter(|&c| c <= max_workers).collect();
    let grid = SweepGrid::new(cores, vec![2500, 1250, 625], vec![50])?;

    println!(
        "Sweeping {} configurations over {} observations...\n",
        grid.len(),
        n_obs
    );

    let options = SweepOptions::new().with_seed(1234).with_static_schedule(true);
    let bench = ThreadingBenchmark::new(MetropolisEngine::new());
    let table = bench.run(&spec, &grid, &options)?;

    let summary = report::summarize(&table, n_obs);
    print!("{}", report::render(&summary));

    if let Some(best) = table.fastest() {
        println!(
            "\nBest configuration: {} cores, grainsize {} ({:.3} s)",
            best.cores,
            best.grainsize,
            best.runtime_secs()
        );
    }
    Ok(())
}
