// src/cli/commands.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Miner metrics CLI - mining throughput and network height tracking
#[derive(Parser, Debug)]
#[command(name = "miner-metrics-rs")]
#[command(version, about, long_about = None)]
pub struct Commands {
    /// The action to perform
    #[command(subcommand)]
    pub action: Action,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Action {
    /// Run the synthetic workload with the metrics reporter attached
    Run(RunOptions),

    /// Estimate the network height from a local tip
    EstimateHeight(EstimateOptions),

    /// Generate configuration file template
    Config(ConfigOptions),
}

/// Options for the synthetic workload
#[derive(Parser, Debug)]
pub struct RunOptions {
    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Number of mining lanes (overrides config)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Seconds to run before shutting down
    #[arg(short, long, default_value_t = 30)]
    pub duration: u64,

    /// Leading zero bits required for a block (overrides config)
    #[arg(short = 'b', long)]
    pub difficulty_bits: Option<u32>,

    /// Emit reports as JSON lines (overrides config)
    #[arg(long)]
    pub json: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options for network height estimation
#[derive(Parser, Debug)]
pub struct EstimateOptions {
    /// Path to configuration file holding consensus parameters
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Local tip height
    #[arg(long)]
    pub height: u64,

    /// Median time past of the local tip (unix seconds)
    #[arg(long)]
    pub tip_time: i64,
}

/// Options for generating configuration files
#[derive(Parser, Debug)]
pub struct ConfigOptions {
    /// Output file path
    #[arg(short, long, default_value = "config.toml")]
    pub output: PathBuf,

    /// Include an example checkpoint
    #[arg(long)]
    pub checkpoint: bool,
}
