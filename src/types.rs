// src/types.rs
use crate::utils::error::MetricsError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 256-bit block identifier
///
/// Displayed and parsed as 64 lowercase hex characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlockHash([u8; 32]);

impl BlockHash {
    /// Wraps raw hash bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        BlockHash(bytes)
    }

    /// Raw hash bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        BlockHash(bytes)
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for BlockHash {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(BlockHash(bytes))
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Locally known chain tip, as supplied by the node
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTip {
    /// Height of the local tip
    pub height: u64,
    /// Median time past of the local tip (unix seconds)
    pub median_time: i64,
}

/// Read-only view of the active chain
///
/// Implemented by the node integration; the reporter uses it to estimate
/// network height and to tell which mined blocks were orphaned.
pub trait ChainView: Send + Sync {
    /// Current local tip, if the chain is loaded
    fn tip(&self) -> Option<ChainTip>;

    /// Whether the block is part of the active chain
    fn contains(&self, hash: &BlockHash) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_hash_hex_round_trip() {
        let text = "00000000000000000000000000000000000000000000000000000000000000ff";
        let hash: BlockHash = text.parse().unwrap();
        assert_eq!(hash.as_bytes()[31], 0xff);
        assert_eq!(hash.to_string(), text);
    }

    #[test]
    fn block_hash_rejects_short_input() {
        assert!(matches!(
            "abcd".parse::<BlockHash>(),
            Err(MetricsError::InputError(_))
        ));
    }

    #[test]
    fn block_hash_serializes_as_string() {
        let hash = BlockHash::new([0x11; 32]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{}\"", "11".repeat(32)));
        let back: BlockHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
