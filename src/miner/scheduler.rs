// src/miner/scheduler.rs
//! Mining lane scheduler
//!
//! Lanes share one atomically swappable job and a nonce cursor. Each batch is
//! bracketed by the registry's mining timer, so concurrent lanes add to active
//! mining time only once.

use crate::metrics::MetricsRegistry;
use crate::miner::algorithm::{Algorithm, meets_target};
use crate::utils::error::MetricsError;
use arc_swap::ArcSwap;
use crossbeam_channel::Sender;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

/// Work handed to every lane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiningJob {
    /// Sequence number of the template
    pub job_id: u64,
    /// Height of the block being mined
    pub height: u64,
    /// Header bytes to hash together with the nonce
    pub header: Vec<u8>,
    /// Leading zero bits a hash needs to be a block
    pub difficulty_bits: u32,
}

/// A hash meeting the job target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    /// Job this share solves
    pub job_id: u64,
    /// Winning nonce
    pub nonce: u64,
    /// Resulting hash
    pub hash: [u8; 32],
}

/// Coordinates mining lanes
pub struct Scheduler {
    /// Metrics shared with the display consumer
    registry: Arc<MetricsRegistry>,
    /// Current job (atomically swappable)
    current_job: Arc<ArcSwap<Option<MiningJob>>>,
    /// Next unclaimed nonce of the current job
    nonce_counter: Arc<AtomicU64>,
    /// Cleared to make lanes exit after their current batch
    active: Arc<AtomicBool>,
    /// Nonces hashed per timer bracket
    batch_size: u64,
    /// Running lane threads
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Scheduler {
    /// Creates a scheduler with no job
    ///
    /// # Arguments
    /// * `registry` - Metrics context the lanes report into
    /// * `batch_size` - Nonces hashed per timer bracket
    pub fn new(registry: Arc<MetricsRegistry>, batch_size: u64) -> Self {
        Scheduler {
            registry,
            current_job: Arc::new(ArcSwap::from_pointee(None)),
            nonce_counter: Arc::new(AtomicU64::new(0)),
            active: Arc::new(AtomicBool::new(true)),
            batch_size: batch_size.max(1),
            handles: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the current job and restarts the nonce cursor
    pub fn update_job(&self, new_job: MiningJob) {
        log::debug!("New job {} at height {}", new_job.job_id, new_job.height);
        self.current_job.store(Arc::new(Some(new_job)));
        self.nonce_counter.store(0, Ordering::SeqCst);
    }

    /// Identifier of the current job, if any
    pub fn current_job_id(&self) -> Option<u64> {
        (**self.current_job.load()).as_ref().map(|job| job.job_id)
    }

    /// Spawns mining lanes
    ///
    /// Marks the registry's start time. Shares go to `share_sender`; the channel
    /// disconnects once every lane has exited.
    ///
    /// # Arguments
    /// * `algorithm` - Hash function to mine with
    /// * `lanes` - Number of lane threads
    /// * `share_sender` - Where winning shares are sent
    pub fn start_mining(
        &self,
        algorithm: Arc<dyn Algorithm>,
        lanes: usize,
        share_sender: Sender<Share>,
    ) -> Result<(), MetricsError> {
        self.registry.mark_start_time();
        log::info!("Starting {} {} mining lanes", lanes, algorithm.name());

        let mut handles = self.handles.lock().unwrap_or_else(|e| e.into_inner());
        for lane in 0..lanes {
            let job_arc = self.current_job.clone();
            let nonce_ctr = self.nonce_counter.clone();
            let sender = share_sender.clone();
            let active = self.active.clone();
            let registry = self.registry.clone();
            let batch = self.batch_size;
            let algo = algorithm.clone();

            let handle = std::thread::Builder::new()
                .name(format!("mining-lane-{}", lane))
                .spawn(move || {
                    while active.load(Ordering::Relaxed) {
                        let current_job = job_arc.load();
                        if let Some(job) = &**current_job {
                            let start_nonce = nonce_ctr.fetch_add(batch, Ordering::SeqCst);
                            mine_batch(&registry, algo.as_ref(), job, start_nonce, batch, &sender);
                        } else {
                            std::thread::sleep(Duration::from_millis(100));
                        }
                    }
                    log::debug!("Lane {} exiting", lane);
                })?;
            handles.push(handle);
        }

        Ok(())
    }

    /// Stops all lanes and waits for them to finish their current batch
    pub fn stop(&self) -> Result<(), MetricsError> {
        self.active.store(false, Ordering::SeqCst);

        let handles = std::mem::take(&mut *self.handles.lock().unwrap_or_else(|e| e.into_inner()));
        let mut panicked = 0;
        for handle in handles {
            if handle.join().is_err() {
                panicked += 1;
            }
        }

        if panicked > 0 {
            return Err(MetricsError::ThreadError(format!(
                "{} mining lane(s) panicked",
                panicked
            )));
        }
        Ok(())
    }
}

/// Hashes one batch of nonces inside a mining timer bracket
fn mine_batch(
    registry: &MetricsRegistry,
    algo: &dyn Algorithm,
    job: &MiningJob,
    start_nonce: u64,
    batch: u64,
    sender: &Sender<Share>,
) {
    let _active = registry.mining_timer.guard();

    (start_nonce..start_nonce.saturating_add(batch))
        .into_par_iter()
        .for_each(|nonce| {
            registry.solver_runs.increment();
            let hash = algo.hash(&job.header, nonce);
            registry.solution_target_checks.increment();
            if meets_target(&hash, job.difficulty_bits) {
                let share = Share {
                    job_id: job.job_id,
                    nonce,
                    hash,
                };
                if let Err(e) = submit(sender, share) {
                    log::warn!("{}", e);
                }
            }
        });
}

fn submit(sender: &Sender<Share>, share: Share) -> Result<(), MetricsError> {
    sender.send(share)?;
    Ok(())
}
