// src/miner/algorithm.rs
//! Proof-of-work hashing for the synthetic workload

use sha2::{Digest, Sha256};

/// Common interface for mining hash functions
pub trait Algorithm: Send + Sync {
    /// Hash of `input` with `nonce` appended
    fn hash(&self, input: &[u8], nonce: u64) -> [u8; 32];

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Double SHA-256 over `input || nonce_le`
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256d;

impl Algorithm for Sha256d {
    fn hash(&self, input: &[u8], nonce: u64) -> [u8; 32] {
        let first = Sha256::new()
            .chain_update(input)
            .chain_update(nonce.to_le_bytes())
            .finalize();
        Sha256::digest(first).into()
    }

    fn name(&self) -> &'static str {
        "sha256d"
    }
}

/// Whether `hash` starts with at least `bits` zero bits
pub fn meets_target(hash: &[u8; 32], bits: u32) -> bool {
    let mut remaining = bits;
    for byte in hash {
        if remaining == 0 {
            return true;
        }
        if remaining >= 8 {
            if *byte != 0 {
                return false;
            }
            remaining -= 8;
        } else {
            return byte.leading_zeros() >= remaining;
        }
    }
    remaining == 0
}
