//! Strong and weak scaling studies of the blocked benchmark.
//!
//! Every point runs [`bench::run`] on its own Rayon pool of `workers` threads,
//! for `workers` in `1..=max_workers`. Speedup and efficiency are relative to
//! the first (one-worker) point.

use std::fmt;
use std::time::Duration;

use crate::{
    bench::{self, format_significant, BenchConfig, Report, Variant},
    error::{thread_pool_error, Result},
};

/// Cube side of the strong study.
pub const STRONG_SIZE: usize = 1000;

/// Multiply-adds per worker in the weak study.
pub const OPS_PER_WORKER: u64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ScalingMode {
    /// Fixed problem size, growing worker count.
    Strong,
    /// Problem grows with the worker count so each worker keeps the same load.
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalingConfig {
    pub mode: ScalingMode,
    pub max_workers: usize,
    /// Cube side in strong mode.
    pub size: usize,
    /// Per-worker load in weak mode.
    pub ops_per_worker: u64,
    pub variant: Variant,
}

impl ScalingConfig {
    pub fn new(mode: ScalingMode, max_workers: usize) -> Self {
        ScalingConfig {
            mode,
            max_workers,
            size: STRONG_SIZE,
            ops_per_worker: OPS_PER_WORKER,
            variant: Variant::BLOCKED,
        }
    }

    /// Cube side (M = N = K) of the point run with `workers` threads.
    pub fn side(&self, workers: usize) -> usize {
        match self.mode {
            ScalingMode::Strong => self.size,
            ScalingMode::Weak => weak_side(workers, self.ops_per_worker),
        }
    }
}

/// Largest `d` with `d^3 <= workers * ops_per_worker`, and at least 1.
pub fn weak_side(workers: usize, ops_per_worker: u64) -> usize {
    let target = workers as u128 * ops_per_worker as u128;

    // cbrt is only a first guess; fix it up so exact cubes land exactly.
    let mut side = (target as f64).cbrt() as u128;
    while (side + 1).pow(3) <= target {
        side += 1;
    }
    while side > 0 && side.pow(3) > target {
        side -= 1;
    }
    side.max(1) as usize
}

/// `(speedup, efficiency)` of a point against the one-worker `baseline`.
///
/// With a fixed problem, `t1 / tN` is the speedup. When the problem grows
/// with the worker count, `t1 / tN` is the efficiency and the scaled speedup
/// is `workers * t1 / tN`. Efficiency is `speedup / workers` either way.
pub fn relative_performance(
    mode: ScalingMode,
    baseline: Duration,
    elapsed: Duration,
    workers: usize,
) -> (f64, f64) {
    let ratio = baseline.as_secs_f64() / elapsed.as_secs_f64();
    let workers = workers as f64;
    match mode {
        ScalingMode::Strong => (ratio, ratio / workers),
        ScalingMode::Weak => (ratio * workers, ratio),
    }
}

/// One line of study output.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingRow {
    pub workers: usize,
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub elapsed: Duration,
    pub speedup: f64,
    pub efficiency: f64,
}

impl fmt::Display for ScalingRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.workers,
            self.m,
            self.n,
            self.k,
            self.elapsed.as_nanos(),
            format_significant(self.speedup, 4),
            format_significant(self.efficiency, 4)
        )
    }
}

/// Turns raw reports into rows, using the first report as the baseline.
pub fn summarize(mode: ScalingMode, reports: &[Report]) -> Vec<ScalingRow> {
    let Some(baseline) = reports.first().map(|r| r.elapsed) else {
        return Vec::new();
    };

    reports
        .iter()
        .map(|report| {
            let (speedup, efficiency) =
                relative_performance(mode, baseline, report.elapsed, report.workers);
            ScalingRow {
                workers: report.workers,
                m: report.m,
                n: report.n,
                k: report.k,
                elapsed: report.elapsed,
                speedup,
                efficiency,
            }
        })
        .collect()
}

/// Runs the study, one dedicated pool per worker count.
pub fn run_study(config: &ScalingConfig) -> Result<Vec<ScalingRow>> {
    let mut reports = Vec::with_capacity(config.max_workers);

    for workers in 1..=config.max_workers {
        let side = config.side(workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("gemm-worker-{}", i))
            .build()
            .map_err(|e| thread_pool_error(e.to_string()))?;

        let bench_config = BenchConfig::new(side, side, side, config.variant);
        let report = pool.install(|| bench::run(&bench_config));
        log::info!(
            "{:?} scaling: {} worker(s), {}^3 in {:?}",
            config.mode,
            workers,
            side,
            report.elapsed
        );
        reports.push(report);
    }

    Ok(summarize(config.mode, &reports))
}
