//! Command-line entry points shared by the benchmark binaries.

use std::ffi::OsString;
use std::num::NonZeroUsize;

use clap::Parser;

use crate::{
    bench::{self, BenchConfig, Variant},
    error::{thread_pool_error, usage_error, BenchError, Result},
    scaling::{self, ScalingConfig, ScalingMode},
};

/// Process exit status for a usage error.
pub const USAGE_EXIT_CODE: i32 = -1;

const DEFAULT_PROGRAM: &str = "matrix-product";

/// `<program> <M> <N> <K>`; there are no flags.
#[derive(Parser, Debug)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Rows of A and C
    #[arg(value_parser = parse_positive)]
    m: usize,

    /// Columns of B and C
    #[arg(value_parser = parse_positive)]
    n: usize,

    /// Columns of A, rows of B
    #[arg(value_parser = parse_positive)]
    k: usize,

    /// Anything after `<K>` is ignored.
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,
}

/// Reads a positive count the way C's `atoi` reads an integer: leading
/// whitespace and an optional `+`, then the longest run of decimal digits.
/// Whatever follows is dropped, so `"1259.92"` is 1259.
///
/// No leading digits, a value of zero, or a value past `usize::MAX` is an
/// error.
pub fn parse_positive(s: &str) -> std::result::Result<usize, String> {
    let rest = s.trim_start();
    let rest = rest.strip_prefix('+').unwrap_or(rest);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    match rest[..end].parse::<usize>() {
        Ok(0) => Err("must be positive".to_string()),
        Ok(value) => Ok(value),
        Err(_) if end == 0 => Err("not a number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Parses `argv` (program name first) into a run configuration.
///
/// Missing, zero, negative or non-numeric dimensions are all reported as
/// [`BenchError::Usage`].
pub fn parse_config<I, T>(args: I, variant: Variant) -> Result<BenchConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    let cli = Cli::try_parse_from(&args).map_err(|e| usage_error(&program, e.to_string()))?;

    if !cli.extra.is_empty() {
        log::warn!("ignoring {} extra argument(s)", cli.extra.len());
    }

    Ok(BenchConfig::new(cli.m, cli.n, cli.k, variant))
}

/// Strong or weak scaling study of the blocked benchmark.
#[derive(Parser, Debug)]
#[command(name = "matrix-product-scaling")]
struct ScalingCli {
    /// Keep the problem fixed (strong) or grow it with the workers (weak)
    #[arg(value_enum, default_value_t = ScalingMode::Strong)]
    mode: ScalingMode,

    /// Largest worker count [default: available parallelism]
    #[arg(long, value_parser = parse_positive)]
    max_workers: Option<usize>,

    /// Cube side of the strong study
    #[arg(long, value_parser = parse_positive, default_value_t = scaling::STRONG_SIZE)]
    size: usize,

    /// Multiply-adds per worker in the weak study
    #[arg(long, default_value_t = scaling::OPS_PER_WORKER)]
    ops_per_worker: u64,
}

impl ScalingCli {
    fn into_config(self) -> ScalingConfig {
        let max_workers = self.max_workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });

        let mut config = ScalingConfig::new(self.mode, max_workers);
        config.size = self.size;
        config.ops_per_worker = self.ops_per_worker;
        config
    }
}

/// Starts the global Rayon pool. Must run at most once per process.
pub fn init_thread_pool() -> Result<usize> {
    rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("gemm-worker-{}", i))
        .build_global()
        .map_err(|e| thread_pool_error(e.to_string()))?;

    Ok(rayon::current_num_threads())
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

/// Runs `variant` with the process arguments and returns the exit status.
pub fn main(variant: Variant) -> i32 {
    init_logging();

    let config = match parse_config(std::env::args_os(), variant) {
        Ok(config) => config,
        Err(err) => {
            if let BenchError::Usage { message, .. } = &err {
                log::debug!("{}", message.trim_end());
                println!("{}", err);
                return USAGE_EXIT_CODE;
            }
            eprintln!("Error: {}", err);
            return 1;
        }
    };

    match init_thread_pool() {
        Ok(workers) => log::debug!("thread pool started with {} workers", workers),
        Err(err) => {
            eprintln!("Error: {}", err);
            return 1;
        }
    }

    let report = bench::run(&config);
    println!("{}", report);
    0
}

/// Runs a scaling study with the process arguments and returns the exit
/// status. Prints one row per worker count:
/// `workers\tM\tN\tK\t<elapsed_ns>\t<speedup>\t<efficiency>`.
pub fn scaling_main() -> i32 {
    init_logging();

    let config = ScalingCli::parse().into_config();
    log::debug!("scaling config: {:?}", config);

    match scaling::run_study(&config) {
        Ok(rows) => {
            for row in rows {
                println!("{}", row);
            }
            0
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            1
        }
    }
}
