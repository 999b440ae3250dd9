//! # Edge-Scout
//!
//! Samples published address ranges, probes the sample, and learns which
//! /24 groups are worth probing next time.
//!
//! ## Exit codes
//!
//! - `0`: run finished, or was interrupted with Ctrl-C
//! - `1`: broken config, no ranges, or nothing to probe

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scout_runtime::{Ipv6Mode, RuntimeOptions, ScoutRuntime};

#[derive(Parser, Debug)]
#[command(name = "edge-scout", version)]
#[command(about = "Find fast edge endpoints with a learning probe budget")]
struct Args {
    /// Directory holding config.json, ucb_model.json, range lists and outputs
    #[arg(short, long, default_value = ".")]
    work_dir: PathBuf,

    /// Replace a broken config.json with defaults instead of exiting
    #[arg(long, alias = "fix_conf")]
    fix_conf: bool,

    /// Probe IPv6 ranges: alongside IPv4 (`both`, the bare-flag default) or alone (`only`)
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "both")]
    ipv6: Option<Ipv6Mode>,

    /// Seed for candidate generation
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    let runtime = ScoutRuntime::new(RuntimeOptions {
        work_dir: args.work_dir,
        fix_conf: args.fix_conf,
        ipv6: args.ipv6,
        seed: args.seed,
    });

    tokio::select! {
        result = runtime.run() => match result {
            Ok(_) => Ok(ExitCode::SUCCESS),
            Err(e) => {
                error!("[runtime] {}", e);
                Ok(ExitCode::from(e.exit_code()))
            }
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("[runtime] Interrupted; model file left unchanged");
            Ok(ExitCode::SUCCESS)
        }
    }
}
