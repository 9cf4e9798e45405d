// src/stats/reporter.rs
use crate::config::{ConsensusParams, DisplayConfig};
use crate::metrics::clock::{Clock, SystemClock};
use crate::metrics::height::estimate_net_height;
use crate::metrics::refresh::Wake;
use crate::metrics::{MetricsRegistry, MetricsSnapshot};
use crate::types::ChainView;
use crate::utils::error::MetricsError;
use crossbeam_channel::Sender;
use serde::Serialize;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// One redraw worth of data: the registry snapshot plus chain-derived values
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Registry counters and recent events
    #[serde(flatten)]
    pub snapshot: MetricsSnapshot,
    /// Local tip height, when a chain view is attached and loaded
    pub local_height: Option<u64>,
    /// Estimated network height, when a chain view is attached and loaded
    pub network_height: Option<u64>,
    /// Recently mined blocks no longer on the active chain
    pub orphaned_blocks: Option<usize>,
}

impl MetricsReport {
    /// Single-line human readable rendering
    pub fn to_line(&self) -> String {
        let s = &self.snapshot;
        let mut line = format!(
            "Uptime: {}s | Sol/s: {:.2} | Threads: {} | Checks: {} | Solver runs: {} | Txs: {} | Mined: {}",
            s.uptime_secs,
            s.local_sol_ps,
            s.mining_threads,
            s.solution_target_checks,
            s.solver_runs,
            s.transactions_validated,
            s.mined_blocks
        );
        if let Some(orphaned) = self.orphaned_blocks {
            line.push_str(&format!(" ({} orphaned)", orphaned));
        }
        if let (Some(local), Some(network)) = (self.local_height, self.network_height) {
            if local < network {
                let percent = local as f64 * 100.0 / network as f64;
                line.push_str(&format!(
                    " | Syncing: {}/{} ({:.1}%)",
                    local, network, percent
                ));
            } else {
                line.push_str(&format!(" | Height: {}", local));
            }
        }
        line
    }
}

/// Display consumer: redraws on every refresh request or polling interval
pub struct MetricsReporter<C: Clock + Clone = SystemClock> {
    /// Shared metrics context
    registry: Arc<MetricsRegistry<C>>,
    /// Optional view of the active chain
    chain: Option<Arc<dyn ChainView>>,
    /// Parameters for network height estimation
    consensus: ConsensusParams,
    /// Maximum time between redraws
    report_interval: Duration,
    /// Emit JSON lines instead of text
    json: bool,
    /// Extra destination for every rendered line, besides the log
    sink: Option<Sender<String>>,
}

impl<C: Clock + Clone> MetricsReporter<C> {
    /// Creates a reporter polling at the given interval
    ///
    /// # Arguments
    /// * `registry` - Shared metrics context
    /// * `report_interval` - Maximum time between redraws
    pub fn new(registry: Arc<MetricsRegistry<C>>, report_interval: Duration) -> Self {
        MetricsReporter {
            registry,
            chain: None,
            consensus: ConsensusParams::default(),
            report_interval,
            json: false,
            sink: None,
        }
    }

    /// Creates a reporter from the display configuration
    pub fn from_config(registry: Arc<MetricsRegistry<C>>, display: &DisplayConfig) -> Self {
        Self::new(registry, Duration::from_secs(display.refresh_interval_secs)).json(display.json)
    }

    /// Attaches a chain view for height estimation and orphan accounting
    pub fn with_chain(mut self, chain: Arc<dyn ChainView>, consensus: ConsensusParams) -> Self {
        self.chain = Some(chain);
        self.consensus = consensus;
        self
    }

    /// Selects JSON output
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Also sends every rendered line to `sink`
    pub fn with_sink(mut self, sink: Sender<String>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the current report
    pub fn collect(&self) -> MetricsReport {
        let snapshot = self.registry.snapshot();
        let mut report = MetricsReport::default();

        if let Some(chain) = &self.chain {
            report.orphaned_blocks = Some(
                snapshot
                    .recent_blocks
                    .iter()
                    .filter(|hash| !chain.contains(hash))
                    .count(),
            );

            if let Some(tip) = chain.tip() {
                report.local_height = Some(tip.height);
                match estimate_net_height(&tip, &self.consensus) {
                    Ok(height) => report.network_height = Some(height),
                    Err(e) => log::warn!("Network height unavailable: {}", e),
                }
            }
        }

        report.snapshot = snapshot;
        report
    }

    /// Renders the current report as one line
    pub fn render(&self) -> Result<String, MetricsError> {
        let report = self.collect();
        if self.json {
            Ok(serde_json::to_string(&report)?)
        } else {
            Ok(report.to_line())
        }
    }

    /// Runs the display loop on the current thread until shutdown is requested
    pub fn run(&self) {
        log::info!(
            "Metrics reporter started (interval {}s)",
            self.report_interval.as_secs_f64()
        );

        while !self.registry.shutdown_requested() {
            let wake = self.registry.wait_for_refresh(self.report_interval);
            if self.registry.shutdown_requested() {
                break;
            }
            if wake == Wake::Signaled {
                log::debug!("Out-of-band refresh");
            }

            match self.render() {
                Ok(line) => {
                    log::info!("{}", line);
                    if let Some(sink) = &self.sink {
                        if sink.send(line).is_err() {
                            log::debug!("Report sink disconnected");
                        }
                    }
                }
                Err(e) => log::error!("Failed to render metrics: {}", e),
            }
        }

        log::info!("Metrics reporter stopped");
    }

    /// Spawns the display loop on a background thread
    ///
    /// The thread exits after [`MetricsRegistry::request_shutdown`].
    pub fn start_reporting(self) -> Result<JoinHandle<()>, MetricsError>
    where
        C: 'static,
    {
        let handle = std::thread::Builder::new()
            .name("metrics-display".into())
            .spawn(move || self.run())?;
        Ok(handle)
    }
}
