//! Derived columns and plain-text rendering for sweep results.
//!
//! These summaries are computed downstream of the harness and never feed
//! back into it: `chunks` from the data size, `slowdown` relative to the
//! fastest row at the same iteration level, `speedup` relative to the
//! single-core row with the same grainsize and iteration count.

use crate::bench::ResultTable;
use std::fmt::Write as _;

/// One summarized sweep row with derived columns.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SummaryRow {
    /// Worker thread count
    pub cores: usize,
    /// Grainsize
    pub grainsize: usize,
    /// Retained iteration count
    pub iterations: usize,
    /// Partial-sum chunks the data splits into at this grainsize
    pub chunks: usize,
    /// Runtime in seconds
    pub runtime_secs: f64,
    /// Runtime relative to the fastest row at the same iteration level
    pub slowdown: f64,
    /// Single-core runtime at the same grainsize and iterations divided by
    /// this row's runtime; `None` when the sweep has no such baseline
    pub speedup: Option<f64>,
}

/// Compute derived columns for every row of a sweep result.
///
/// `n_obs` is the observation count of the benchmarked dataset.
#[must_use]
pub fn summarize(table: &ResultTable, n_obs: usize) -> Vec<SummaryRow> {
    let rows = table.rows();
    rows.iter()
        .map(|row| {
            let fastest_at_level = rows
                .iter()
                .filter(|r| r.iterations == row.iterations)
                .map(|r| r.runtime_secs())
                .fold(f64::INFINITY, f64::min);
            let slowdown = if fastest_at_level > 0.0 {
                row.runtime_secs() / fastest_at_level
            } else {
                1.0
            };
            let speedup = rows
                .iter()
                .find(|r| {
                    r.cores == 1 && r.grainsize == row.grainsize && r.iterations == row.iterations
                })
                .and_then(|base| {
                    let secs = row.runtime_secs();
                    (secs > 0.0).then(|| base.runtime_secs() / secs)
                });
            SummaryRow {
                cores: row.cores,
                grainsize: row.grainsize,
                iterations: row.iterations,
                chunks: n_obs.div_ceil(row.grainsize),
                runtime_secs: row.runtime_secs(),
                slowdown,
                speedup,
            }
        })
        .collect()
}

/// Render summary rows as an aligned plain-text table.
#[must_use]
pub fn render(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>10} {:>6} {:>7} {:>12} {:>9} {:>8}",
        "cores", "grainsize", "iter", "chunks", "runtime (s)", "slowdown", "speedup"
    );
    for row in rows {
        let speedup = row
            .speedup
            .map_or_else(|| "-".to_string(), |s| format!("{s:.2}"));
        let _ = writeln!(
            out,
            "{:>6} {:>10} {:>6} {:>7} {:>12.4} {:>9.2} {:>8}",
            row.cores,
            row.grainsize,
            row.iterations,
            row.chunks,
            row.runtime_secs,
            row.slowdown,
            speedup
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bench::BenchmarkRow;
    use std::time::Duration;

    fn table() -> ResultTable {
        let mut table = ResultTable::new();
        for (cores, ms) in [(1, 400), (2, 220), (4, 100)] {
            table.push(BenchmarkRow {
                cores,
                grainsize: 250,
                iterations: 25,
                static_schedule: false,
                runtime: Duration::from_millis(ms),
            });
        }
        table
    }

    #[test]
    fn test_chunks_derived_from_data_size() {
        let summary = summarize(&table(), 1000);
        assert!(summary.iter().all(|r| r.chunks == 4));
        let uneven = summarize(&table(), 1001);
        assert!(uneven.iter().all(|r| r.chunks == 5));
    }

    #[test]
    fn test_speedup_relative_to_single_core() {
        let summary = summarize(&table(), 1000);
        let quad = summary.iter().find(|r| r.cores == 4).expect("present");
        assert!((quad.speedup.expect("baseline exists") - 4.0).abs() < 1e-9);
        let single = summary.iter().find(|r| r.cores == 1).expect("present");
        assert!((single.speedup.expect("baseline exists") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_slowdown_relative_to_fastest() {
        let summary = summarize(&table(), 1000);
        let single = summary.iter().find(|r| r.cores == 1).expect("present");
        assert!((single.slowdown - 4.0).abs() < 1e-9);
        let quad = summary.iter().find(|r| r.cores == 4).expect("present");
        assert!((quad.slowdown - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_speedup_none_without_baseline() {
        let mut table = ResultTable::new();
        table.push(BenchmarkRow {
            cores: 2,
            grainsize: 100,
            iterations: 25,
            static_schedule: false,
            runtime: Duration::from_millis(50),
        });
        let summary = summarize(&table, 500);
        assert!(summary[0].speedup.is_none());
    }

    #[test]
    fn test_render_contains_all_rows() {
        let text = render(&summarize(&table(), 1000));
        assert!(text.contains("cores"));
        // Header plus three data rows
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_empty_table_summary() {
        let summary = summarize(&ResultTable::new(), 100);
        assert!(summary.is_empty());
        assert_eq!(render(&summary).lines().count(), 1);
    }
}
