// src/miner/assembler.rs
//! Block assembly for the synthetic workload
//!
//! Turns winning shares into mined blocks: records them in the registry and
//! publishes the next template on top of them.

use crate::config::MiningConfig;
use crate::metrics::MetricsRegistry;
use crate::miner::scheduler::{MiningJob, Scheduler, Share};
use crate::types::BlockHash;
use crate::utils::error::MetricsError;
use crossbeam_channel::Receiver;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Consumes shares and keeps the scheduler supplied with templates
pub struct BlockAssembler {
    registry: Arc<MetricsRegistry>,
    scheduler: Arc<Scheduler>,
    difficulty_bits: u32,
    template_transactions: u32,
    next_job_id: u64,
    height: u64,
}

impl BlockAssembler {
    /// Creates an assembler whose first template is at height 1
    pub fn new(
        registry: Arc<MetricsRegistry>,
        scheduler: Arc<Scheduler>,
        config: &MiningConfig,
    ) -> Self {
        BlockAssembler {
            registry,
            scheduler,
            difficulty_bits: config.difficulty_bits,
            template_transactions: config.template_transactions,
            next_job_id: 0,
            height: 0,
        }
    }

    /// Builds the template for the block after `prev`
    ///
    /// Every transaction placed in the template counts as validated.
    pub fn next_template(&mut self, prev: &BlockHash) -> MiningJob {
        for _ in 0..self.template_transactions {
            self.registry.transactions_validated.increment();
        }

        self.height += 1;
        self.next_job_id += 1;

        let mut header = Vec::with_capacity(32 + 8 + 4);
        header.extend_from_slice(prev.as_bytes());
        header.extend_from_slice(&self.height.to_le_bytes());
        header.extend_from_slice(&self.template_transactions.to_le_bytes());

        MiningJob {
            job_id: self.next_job_id,
            height: self.height,
            header,
            difficulty_bits: self.difficulty_bits,
        }
    }

    /// Publishes the first template, on top of `genesis`
    pub fn publish_initial(&mut self, genesis: &BlockHash) {
        let job = self.next_template(genesis);
        self.scheduler.update_job(job);
    }

    /// Handles one share; returns the mined block hash if it was current
    pub fn accept(&mut self, share: Share) -> Option<BlockHash> {
        if Some(share.job_id) != self.scheduler.current_job_id() {
            log::debug!("Dropping stale share for job {}", share.job_id);
            return None;
        }

        let hash = BlockHash::from(share.hash);
        self.registry.track_mined_block(hash);
        let job = self.next_template(&hash);
        self.scheduler.update_job(job);
        Some(hash)
    }

    /// Processes shares until every sender is gone
    pub fn run(mut self, shares: Receiver<Share>) {
        for share in shares {
            self.accept(share);
        }
        log::debug!("Share channel closed, block assembler exiting");
    }

    /// Spawns [`BlockAssembler::run`] on a background thread
    pub fn start(self, shares: Receiver<Share>) -> Result<JoinHandle<()>, MetricsError> {
        let handle = std::thread::Builder::new()
            .name("block-assembler".into())
            .spawn(move || self.run(shares))?;
        Ok(handle)
    }
}
