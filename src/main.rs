// src/main.rs
use clap::Parser;
use crossbeam_channel::unbounded;
use miner_metrics_rs::cli::{Action, Commands, ConfigOptions, EstimateOptions, RunOptions};
use miner_metrics_rs::miner::Sha256d;
use miner_metrics_rs::utils::{init_logging, init_verbose_logging};
use miner_metrics_rs::{
    BlockAssembler, BlockHash, ChainTip, MetricsError, MetricsRegistry, MetricsReporter,
    Scheduler, config, estimate_net_height,
};
use std::sync::Arc;
use std::time::Duration;

/// Main entry point
///
/// Parses command line arguments and delegates to the subcommand handler.
fn main() -> Result<(), MetricsError> {
    let cli = Commands::parse();

    match cli.action {
        Action::Run(opts) => run_workload(opts),
        Action::EstimateHeight(opts) => estimate_height(opts),
        Action::Config(opts) => generate_config(opts),
    }
}

/// Runs the synthetic workload with the reporter attached
///
/// # Operations
/// 1. Loads configuration and applies CLI overrides
/// 2. Starts the reporter and block assembler threads
/// 3. Mines for the requested duration
/// 4. Stops lanes, then the assembler, then the reporter
fn run_workload(opts: RunOptions) -> Result<(), MetricsError> {
    if opts.verbose {
        init_verbose_logging();
    } else {
        init_logging();
    }

    let mut config = config::load_or_default(&opts.config)?;
    if let Some(threads) = opts.threads {
        config.mining.worker_threads = threads;
    }
    if let Some(bits) = opts.difficulty_bits {
        config.mining.difficulty_bits = bits;
    }
    if opts.json {
        config.display.json = true;
    }
    config.validate()?;

    let registry = Arc::new(MetricsRegistry::from_config(&config.display));
    let reporter = MetricsReporter::from_config(registry.clone(), &config.display).start_reporting()?;

    let scheduler = Arc::new(Scheduler::new(registry.clone(), config.mining.batch_size));
    let (share_sender, share_receiver) = unbounded();

    let mut assembler = BlockAssembler::new(registry.clone(), scheduler.clone(), &config.mining);
    assembler.publish_initial(&BlockHash::default());
    let assembler = assembler.start(share_receiver)?;

    let lanes = config.mining.lanes();
    scheduler.start_mining(Arc::new(Sha256d), lanes, share_sender)?;
    registry.push_message(format!(
        "Mining with {} lanes at {} difficulty bits",
        lanes, config.mining.difficulty_bits
    ));

    std::thread::sleep(Duration::from_secs(opts.duration));

    scheduler.stop()?;
    assembler
        .join()
        .map_err(|_| MetricsError::ThreadError("Block assembler panicked".into()))?;
    registry.request_shutdown();
    reporter
        .join()
        .map_err(|_| MetricsError::ThreadError("Metrics reporter panicked".into()))?;

    let snapshot = registry.snapshot();
    log::info!("Run finished");
    log::info!("Solution checks: {}", snapshot.solution_target_checks);
    log::info!("Active mining time: {:.2}s", snapshot.mining_secs);
    log::info!("Average rate: {:.2} Sol/s", snapshot.local_sol_ps);
    log::info!("Blocks mined: {}", snapshot.mined_blocks);
    log::logger().flush();

    Ok(())
}

/// Prints the estimated network height for a local tip
fn estimate_height(opts: EstimateOptions) -> Result<(), MetricsError> {
    init_logging();

    let config = config::load_or_default(&opts.config)?;
    let tip = ChainTip {
        height: opts.height,
        median_time: opts.tip_time,
    };
    let checkpoint = config.consensus.latest_checkpoint();
    let height = estimate_net_height(&tip, &config.consensus)?;

    log::info!(
        "Extrapolated from checkpoint {} at {} with {}s spacing",
        checkpoint.height,
        checkpoint.time,
        config.consensus.target_spacing
    );
    println!("{}", height);
    Ok(())
}

/// Writes a configuration template
fn generate_config(opts: ConfigOptions) -> Result<(), MetricsError> {
    let template = config::generate_template(opts.checkpoint);
    std::fs::write(opts.output, template)?;
    Ok(())
}
