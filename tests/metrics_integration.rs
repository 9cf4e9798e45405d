// tests/metrics_integration.rs
//! End-to-end checks of the metrics core as workers and the display see it

use hex_literal::hex;
use miner_metrics_rs::metrics::{ActivityTimer, ManualClock, Wake};
use miner_metrics_rs::miner::Sha256d;
use miner_metrics_rs::{
    BlockAssembler, BlockHash, ChainTip, ChainView, Config, MetricsRegistry, MetricsReporter,
    Scheduler, estimate_net_height_inner,
};
use std::io::Write;
use std::sync::{Arc, Barrier};
use std::time::Duration;

const BLOCK_A: BlockHash = BlockHash::new(hex!(
    "0000000000d0c1a7b2b7a3a3f0e6c8b0b7b1c2d3e4f5061728394a5b6c7d8e9f"
));
const BLOCK_B: BlockHash = BlockHash::new(hex!(
    "00000000002e3b6f1c9d8e7a6b5c4d3e2f1a0b9c8d7e6f5a4b3c2d1e0f9a8b7c"
));

#[test]
fn counters_converge_across_threads() {
    let registry = Arc::new(MetricsRegistry::new(1, 1));
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let registry = registry.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                barrier.wait();
                for n in 0..5_000 {
                    registry.solver_runs.increment();
                    if (n + i) % 3 == 0 {
                        registry.solver_runs.decrement();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let decrements: i64 = (0..6)
        .map(|i| (0..5_000).filter(|n| (n + i) % 3 == 0).count() as i64)
        .sum();
    assert_eq!(registry.solver_runs.get(), 6 * 5_000 - decrements);
}

#[test]
fn overlapping_workers_measure_union_of_intervals() {
    let clock = Arc::new(ManualClock::new());
    let timer = Arc::new(ActivityTimer::with_clock(clock.clone()));
    let step = Arc::new(Barrier::new(3));

    // Worker A: active 0..5, worker B: active 2..7. The test thread moves time.
    let spawn_worker = |start_at: usize, stop_at: usize| {
        let timer = timer.clone();
        let step = step.clone();
        std::thread::spawn(move || {
            for tick in 0..=7 {
                if tick == start_at {
                    timer.start();
                }
                if tick == stop_at {
                    timer.stop();
                }
                step.wait();
                step.wait();
            }
        })
    };
    let a = spawn_worker(0, 5);
    let b = spawn_worker(2, 7);

    let mut counts = Vec::new();
    for tick in 0..=7u64 {
        step.wait();
        counts.push(timer.thread_count());
        clock.set(Duration::from_secs(tick + 1));
        step.wait();
    }
    a.join().unwrap();
    b.join().unwrap();

    // Both workers stop at their tick before time moves past it.
    assert_eq!(timer.elapsed(), Duration::from_secs(7));
    assert!(!timer.running());
    assert_eq!(counts, vec![1, 1, 2, 2, 2, 1, 1, 0]);
}

#[test]
fn mined_blocks_keep_latest_and_wake_display() {
    let registry = MetricsRegistry::new(2, 2);
    registry.track_mined_block(BLOCK_A);
    registry.track_mined_block(BLOCK_B);
    registry.track_mined_block(BLOCK_A);

    assert_eq!(registry.recent_blocks(), vec![BLOCK_B, BLOCK_A]);
    assert_eq!(registry.mined_blocks.get(), 3);
    assert_eq!(registry.wait_for_refresh(Duration::from_secs(1)), Wake::Signaled);
    assert_eq!(
        registry.wait_for_refresh(Duration::from_millis(10)),
        Wake::Timeout
    );
}

#[test]
fn height_estimates_match_examples() {
    let tc = 1_700_000_000;
    let g = 1_478_403_829;
    assert_eq!(estimate_net_height_inner(100, tc + 600, 90, tc, g, 150).unwrap(), 100);
    assert_eq!(estimate_net_height_inner(80, tc + 600, 90, tc, g, 150).unwrap(), 94);
    assert_eq!(estimate_net_height_inner(80, tc, 90, tc, g, 150).unwrap(), 90);
    assert!(estimate_net_height_inner(80, tc + 600, 90, tc, g, 0).is_err());
}

#[test]
fn config_file_drives_registry_and_estimate() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[display]
recent_blocks = 2

[consensus]
genesis_time = 1000
target_spacing = 60
checkpoints = [{{ height = 50, time = 4000 }}]
"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.display.recent_blocks, 2);
    assert_eq!(config.display.refresh_interval_secs, 1);

    let registry = MetricsRegistry::from_config(&config.display);
    for n in 0..4u8 {
        registry.track_mined_block(BlockHash::new([n; 32]));
    }
    assert_eq!(registry.recent_blocks().len(), 2);

    let tip = ChainTip {
        height: 55,
        median_time: 4000 + 60 * 20,
    };
    assert_eq!(
        miner_metrics_rs::estimate_net_height(&tip, &config.consensus).unwrap(),
        70
    );
}

#[test]
fn syncing_node_estimates_from_checkpoint_above_tip() {
    let tc = 1_700_000_000;
    let config = Config::parse(&format!(
        "[consensus]\ntarget_spacing = 150\ncheckpoints = [{{ height = 90, time = {} }}]\n",
        tc
    ))
    .unwrap();

    let tip = ChainTip {
        height: 80,
        median_time: tc + 600,
    };
    assert_eq!(
        miner_metrics_rs::estimate_net_height(&tip, &config.consensus).unwrap(),
        94
    );
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert!(Config::load(dir.path().join("absent.toml")).is_err());
}

struct AllOnChain;

impl ChainView for AllOnChain {
    fn tip(&self) -> Option<ChainTip> {
        Some(ChainTip {
            height: 10,
            median_time: 1_478_403_829 + 150 * 20,
        })
    }

    fn contains(&self, _hash: &BlockHash) -> bool {
        true
    }
}

#[test]
fn workload_feeds_registry_and_reporter() {
    let config = Config::parse(
        "[mining]\nworker_threads = 2\nbatch_size = 64\ndifficulty_bits = 4\ntemplate_transactions = 2\n",
    )
    .unwrap();

    let registry = Arc::new(MetricsRegistry::from_config(&config.display));
    let reporter = MetricsReporter::from_config(registry.clone(), &config.display)
        .with_chain(Arc::new(AllOnChain), config.consensus.clone());

    let scheduler = Arc::new(Scheduler::new(registry.clone(), config.mining.batch_size));
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut assembler = BlockAssembler::new(registry.clone(), scheduler.clone(), &config.mining);
    assembler.publish_initial(&BlockHash::default());
    let assembler = assembler.start(rx).unwrap();

    scheduler
        .start_mining(Arc::new(Sha256d), config.mining.lanes(), tx)
        .unwrap();

    // One in sixteen hashes meets 4 bits, so blocks arrive quickly.
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while registry.mined_blocks.get() < 3 && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }

    scheduler.stop().unwrap();
    assembler.join().unwrap();

    let report = reporter.collect();
    assert!(report.snapshot.mined_blocks >= 3);
    assert_eq!(report.snapshot.mining_threads, 0);
    assert!(report.snapshot.solution_target_checks >= 64);
    assert_eq!(report.snapshot.solver_runs, report.snapshot.solution_target_checks);
    assert!(report.snapshot.local_sol_ps > 0.0);
    assert!(report.snapshot.transactions_validated >= 2 * 4);
    assert_eq!(report.orphaned_blocks, Some(0));
    assert_eq!(report.local_height, Some(10));
    assert_eq!(report.network_height, Some(20));
}
