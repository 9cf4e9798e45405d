// src/metrics/height.rs
//! Network height estimation
//!
//! Extrapolates the remote chain height from the local tip and a trusted
//! checkpoint, assuming blocks arrive at the nominal target spacing since the
//! checkpoint. The local height is always a lower bound.

use crate::config::ConsensusParams;
use crate::types::ChainTip;
use crate::utils::error::MetricsError;

/// Estimates the network height from raw tip and checkpoint values
///
/// # Arguments
/// * `height` - Local tip height
/// * `tip_median_time` - Median time past of the local tip (unix seconds)
/// * `checkpoint_height` - Height of the trusted checkpoint
/// * `checkpoint_time` - Timestamp of the trusted checkpoint (unix seconds)
/// * `_genesis_time` - Genesis timestamp; only used when selecting a checkpoint
/// * `target_spacing` - Nominal seconds between blocks
///
/// # Returns
/// * `Ok(u64)` - `max(checkpoint_height + elapsed / target_spacing, height)`,
///   or `checkpoint_height` when the tip is not newer than the checkpoint
/// * `Err(MetricsError)` - If `target_spacing` is not positive
pub fn estimate_net_height_inner(
    height: u64,
    tip_median_time: i64,
    checkpoint_height: u64,
    checkpoint_time: i64,
    _genesis_time: i64,
    target_spacing: i64,
) -> Result<u64, MetricsError> {
    if target_spacing <= 0 {
        return Err(MetricsError::InputError(format!(
            "Target spacing must be positive, got {}",
            target_spacing
        )));
    }

    if tip_median_time <= checkpoint_time {
        return Ok(checkpoint_height);
    }

    // Both operands are positive here, so integer division is a floor.
    let elapsed = (tip_median_time as i128) - (checkpoint_time as i128);
    let blocks = (elapsed / target_spacing as i128).min(u64::MAX as i128) as u64;
    let estimate = checkpoint_height.saturating_add(blocks);

    Ok(estimate.max(height))
}

/// Estimates the network height for a tip using the configured checkpoints
///
/// Always anchors on the newest configured checkpoint, even when the tip is
/// below it, and falls back to genesis when none are configured.
pub fn estimate_net_height(tip: &ChainTip, params: &ConsensusParams) -> Result<u64, MetricsError> {
    let checkpoint = params.latest_checkpoint();
    estimate_net_height_inner(
        tip.height,
        tip.median_time,
        checkpoint.height,
        checkpoint.time,
        params.genesis_time,
        params.target_spacing,
    )
}
