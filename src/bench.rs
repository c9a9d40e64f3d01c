//! Benchmark driver: allocation, seeded initialization, the timed kernel call
//! and the report line.

use std::fmt;
use std::time::{Duration, Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    checksum::checksum,
    init::InitRule,
    matmul::{matrix_product, Tiling},
    matrix::{ColMajor, Matrix, RowMajor},
    BLOCK_SIZE,
};

/// Seed of the run's generator.
pub const DEFAULT_SEED: u64 = 42;

/// Per-binary choices: kernel tiling, initialization rule, and whether the
/// checksum is part of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variant {
    pub tiling: Tiling,
    pub init: InitRule,
    pub report_checksum: bool,
}

impl Variant {
    /// Blocked kernel over the pattern fixture, with checksum.
    pub const BLOCKED: Variant = Variant {
        tiling: Tiling::Blocked {
            block_size: BLOCK_SIZE,
        },
        init: InitRule::Pattern,
        report_checksum: true,
    };

    /// Row-per-task kernel over the pattern fixture, with checksum.
    pub const NAIVE: Variant = Variant {
        tiling: Tiling::Naive,
        init: InitRule::Pattern,
        report_checksum: true,
    };

    /// Blocked kernel over seeded random matrices, timing only.
    pub const RANDOM: Variant = Variant {
        tiling: Tiling::Blocked {
            block_size: BLOCK_SIZE,
        },
        init: InitRule::Random,
        report_checksum: false,
    };
}

/// Everything needed to reproduce one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub variant: Variant,
    pub seed: u64,
}

impl BenchConfig {
    pub fn new(m: usize, n: usize, k: usize, variant: Variant) -> Self {
        BenchConfig {
            m,
            n,
            k,
            variant,
            seed: DEFAULT_SEED,
        }
    }
}

/// Result of one run. `Display` renders the tab-separated report line.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub m: usize,
    pub n: usize,
    pub k: usize,
    pub workers: usize,
    pub elapsed: Duration,
    pub checksum: Option<f64>,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}s",
            self.m,
            self.n,
            self.k,
            self.workers,
            self.elapsed.as_nanos(),
            format_significant(self.elapsed.as_secs_f64(), 4)
        )?;
        if let Some(cs) = self.checksum {
            write!(f, "\t{}", cs)?;
        }
        Ok(())
    }
}

/// Runs one benchmark on the current Rayon pool.
///
/// Generator draws happen in a fixed order: `alpha`, fill A, fill B, `beta`,
/// fill C. Changing that order changes every number downstream even with the
/// same seed.
pub fn run(config: &BenchConfig) -> Report {
    let BenchConfig {
        m,
        n,
        k,
        variant,
        seed,
    } = *config;

    let mut rng = StdRng::seed_from_u64(seed);

    let mut a = Matrix::<RowMajor>::new(m, k);
    let mut b = Matrix::<ColMajor>::new(k, n);
    let mut c = Matrix::<RowMajor>::new(m, n);

    let alpha: f64 = rng.random();
    variant.init.fill(&mut a, &mut rng);
    variant.init.fill(&mut b, &mut rng);
    let beta: f64 = rng.random();
    variant.init.fill(&mut c, &mut rng);
    log::debug!("initialized ({:?}), alpha = {}, beta = {}", variant.init, alpha, beta);

    // Each fill returns only after all of its tasks joined, so nothing is
    // pending on the pool when the clock starts.
    let start = Instant::now();
    matrix_product(alpha, &a, &b, beta, &mut c, variant.tiling);
    let elapsed = start.elapsed();

    log::info!("kernel {}x{}x{} took {:?}", m, n, k, elapsed);

    Report {
        m,
        n,
        k,
        workers: rayon::current_num_threads(),
        elapsed,
        checksum: variant.report_checksum.then(|| checksum(&c)),
    }
}

/// Formats `value` with `digits` significant digits in `%g` style: fixed
/// notation when the decimal exponent is in `[-4, digits)`, scientific
/// otherwise, trailing zeros removed.
pub fn format_significant(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    // Rounding to `digits` first gives the exponent of the printed value,
    // e.g. 9.99996 rounds to 1.000e1.
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", strip_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp) as usize;
        strip_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
