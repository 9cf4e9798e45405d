// src/config/config.rs
use crate::metrics::registry::{DEFAULT_MESSAGES, DEFAULT_RECENT_BLOCKS};
use crate::utils::error::MetricsError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
///
/// Every section and field has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display consumer settings
    pub display: DisplayConfig,

    /// Synthetic workload settings
    pub mining: MiningConfig,

    /// Chain parameters used for network height estimation
    pub consensus: ConsensusParams,
}

/// Display consumer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Seconds between unprompted redraws
    pub refresh_interval_secs: u64,

    /// Number of mined block hashes kept for display
    pub recent_blocks: usize,

    /// Number of notices kept for display
    pub messages: usize,

    /// Emit each report as a JSON line instead of text
    pub json: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            refresh_interval_secs: 1,
            recent_blocks: DEFAULT_RECENT_BLOCKS,
            messages: DEFAULT_MESSAGES,
            json: false,
        }
    }
}

/// Synthetic workload settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MiningConfig {
    /// Number of mining lanes (default: number of CPU cores)
    pub worker_threads: usize,

    /// Nonces hashed per timer bracket
    pub batch_size: u64,

    /// Leading zero bits a hash needs to count as a block
    pub difficulty_bits: u32,

    /// Transactions validated for every block template
    pub template_transactions: u32,
}

impl Default for MiningConfig {
    fn default() -> Self {
        MiningConfig {
            worker_threads: num_cpus::get(),
            batch_size: 1000,
            difficulty_bits: 16,
            template_transactions: 8,
        }
    }
}

impl MiningConfig {
    /// Lane count, with 0 meaning one lane per CPU core
    pub fn lanes(&self) -> usize {
        match self.worker_threads {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

/// Trusted `(height, time)` anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Block height
    pub height: u64,
    /// Block timestamp (unix seconds)
    pub time: i64,
}

/// Chain parameters used for network height estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusParams {
    /// Genesis block timestamp (unix seconds)
    pub genesis_time: i64,

    /// Nominal seconds between blocks
    pub target_spacing: i64,

    /// Trusted checkpoints, in any order
    pub checkpoints: Vec<Checkpoint>,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        ConsensusParams {
            genesis_time: 1_478_403_829,
            target_spacing: 150,
            checkpoints: Vec::new(),
        }
    }
}

impl ConsensusParams {
    /// Newest configured checkpoint, or the genesis block when none are set
    ///
    /// The local tip plays no part in the choice: a node still syncing sits
    /// below the checkpoint it extrapolates from.
    pub fn latest_checkpoint(&self) -> Checkpoint {
        self.checkpoints
            .iter()
            .max_by_key(|c| c.height)
            .copied()
            .unwrap_or(Checkpoint {
                height: 0,
                time: self.genesis_time,
            })
    }
}

impl Config {
    /// Loads configuration from a TOML file and validates it
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(MetricsError)` - If the file couldn't be read, parsed or validated
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, MetricsError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            MetricsError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&config_str)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default(path: impl Into<PathBuf>) -> Result<Self, MetricsError> {
        let path = path.into();
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parses and validates configuration text
    pub fn parse(config_str: &str) -> Result<Self, MetricsError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the metrics core cannot work with
    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.display.refresh_interval_secs == 0 {
            return Err(MetricsError::ConfigError(
                "display.refresh_interval_secs must be at least 1".into(),
            ));
        }
        if self.display.recent_blocks == 0 {
            return Err(MetricsError::ConfigError(
                "display.recent_blocks must be at least 1".into(),
            ));
        }
        if self.display.messages == 0 {
            return Err(MetricsError::ConfigError(
                "display.messages must be at least 1".into(),
            ));
        }
        if self.consensus.target_spacing <= 0 {
            return Err(MetricsError::ConfigError(format!(
                "consensus.target_spacing must be positive, got {}",
                self.consensus.target_spacing
            )));
        }
        if self.mining.batch_size == 0 {
            return Err(MetricsError::ConfigError(
                "mining.batch_size must be at least 1".into(),
            ));
        }
        if self.mining.difficulty_bits > 256 {
            return Err(MetricsError::ConfigError(format!(
                "mining.difficulty_bits cannot exceed 256, got {}",
                self.mining.difficulty_bits
            )));
        }
        Ok(())
    }

    /// Generates a commented configuration template
    ///
    /// # Arguments
    /// * `checkpoint` - Include an example checkpoint entry
    pub fn generate_template(checkpoint: bool) -> String {
        let mut template = String::new();
        template.push_str("# Miner metrics configuration\n\n");
        template.push_str("[display]\n");
        template.push_str("# Seconds between unprompted redraws\n");
        template.push_str("refresh_interval_secs = 1\n");
        template.push_str("# Mined block hashes and notices kept for display\n");
        template.push_str("recent_blocks = 10\n");
        template.push_str("messages = 5\n");
        template.push_str("# Emit reports as JSON lines\n");
        template.push_str("json = false\n\n");

        template.push_str("[mining]\n");
        template.push_str("# Number of mining lanes (0 = auto-detect)\n");
        template.push_str("worker_threads = 0\n");
        template.push_str("# Nonces hashed per timer bracket\n");
        template.push_str("batch_size = 1000\n");
        template.push_str("# Leading zero bits required for a block\n");
        template.push_str("difficulty_bits = 16\n");
        template.push_str("# Transactions validated per block template\n");
        template.push_str("template_transactions = 8\n\n");

        template.push_str("[consensus]\n");
        template.push_str("genesis_time = 1478403829\n");
        template.push_str("target_spacing = 150\n");

        if checkpoint {
            template.push_str("\n# Trusted checkpoints used for network height estimation\n");
            template.push_str("[[consensus.checkpoints]]\n");
            template.push_str("height = 160000\n");
            template.push_str("time = 1503408160\n");
        }

        template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.consensus.target_spacing, 150);
    }

    #[test]
    fn template_parses() {
        let config = Config::parse(&Config::generate_template(true)).unwrap();
        assert_eq!(config.consensus.checkpoints.len(), 1);
        assert_eq!(config.mining.batch_size, 1000);

        let config = Config::parse(&Config::generate_template(false)).unwrap();
        assert!(config.consensus.checkpoints.is_empty());
    }

    #[test]
    fn rejects_non_positive_spacing() {
        let err = Config::parse("[consensus]\ntarget_spacing = 0\n").unwrap_err();
        assert!(matches!(err, MetricsError::ConfigError(_)));
    }

    #[test]
    fn rejects_zero_refresh_interval() {
        assert!(Config::parse("[display]\nrefresh_interval_secs = 0\n").is_err());
    }

    #[test]
    fn rejects_zero_display_capacities() {
        let err = Config::parse("[display]\nrecent_blocks = 0\n").unwrap_err();
        assert!(matches!(err, MetricsError::ConfigError(_)));
        let err = Config::parse("[display]\nmessages = 0\n").unwrap_err();
        assert!(matches!(err, MetricsError::ConfigError(_)));
        assert!(Config::parse("[display]\nmessages = 1\nrecent_blocks = 1\n").is_ok());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::parse("[display\n").unwrap_err();
        assert!(matches!(err, MetricsError::ConfigError(_)));
    }

    #[test]
    fn checkpoint_selection() {
        let params = ConsensusParams {
            genesis_time: 100,
            target_spacing: 150,
            checkpoints: vec![
                Checkpoint { height: 500, time: 900 },
                Checkpoint { height: 200, time: 400 },
            ],
        };
        assert_eq!(params.latest_checkpoint(), Checkpoint { height: 500, time: 900 });

        let genesis_only = ConsensusParams {
            checkpoints: Vec::new(),
            ..params
        };
        assert_eq!(
            genesis_only.latest_checkpoint(),
            Checkpoint { height: 0, time: 100 }
        );
    }
}
