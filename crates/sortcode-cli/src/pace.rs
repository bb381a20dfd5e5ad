//! `sortcode pace` implementation.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use sortcode_throttle::{GlobalThrottle, LocalThrottle, Throttle, ThrottleConfig};
use tracing::info;

/// Arguments for `sortcode pace`.
#[derive(Args, Debug)]
pub struct PaceArgs {
    /// Minimum interval between tokens, in milliseconds.
    #[arg(long, default_value_t = 100)]
    pub interval_ms: u64,

    /// Tokens the global throttle may bank.
    #[arg(long, default_value_t = 1)]
    pub max_unused: u32,

    /// Number of grants to acquire.
    #[arg(long, default_value_t = 5)]
    pub count: u32,

    /// Use a per-thread local throttle instead of the global token bucket.
    #[arg(long, default_value_t = false)]
    pub local: bool,

    /// Output JSON instead of human-readable lines.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Summary of a pace run.
#[derive(Debug, Serialize)]
struct PaceReport {
    throttle: &'static str,
    interval_ms: u64,
    max_unused: u32,
    grants_ms: Vec<u128>,
    total_ms: u128,
}

/// Run the pace command.
///
/// # Errors
///
/// Returns an error if the throttle configuration is invalid.
pub fn run(args: &PaceArgs) -> Result<()> {
    let config = ThrottleConfig::new(Duration::from_millis(args.interval_ms))
        .with_max_unused(args.max_unused);

    let (kind, throttle): (&'static str, Box<dyn Throttle>) = if args.local {
        let throttle = LocalThrottle::from_config(&config).context("invalid throttle settings")?;
        ("local", Box::new(throttle))
    } else {
        let throttle =
            GlobalThrottle::from_config(&config).context("invalid throttle settings")?;
        ("global", Box::new(throttle))
    };

    info!(throttle = kind, count = args.count, "acquiring grants");
    let start = Instant::now();
    let grants_ms: Vec<u128> = (0..args.count)
        .map(|_| {
            throttle.throttle(true);
            start.elapsed().as_millis()
        })
        .collect();

    let report = PaceReport {
        throttle: kind,
        interval_ms: args.interval_ms,
        max_unused: args.max_unused,
        total_ms: start.elapsed().as_millis(),
        grants_ms,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (idx, at) in report.grants_ms.iter().enumerate() {
            println!("grant {:>3} at {at:>6} ms", idx + 1);
        }
        println!("{} grants in {} ms", report.grants_ms.len(), report.total_ms);
    }
    Ok(())
}
