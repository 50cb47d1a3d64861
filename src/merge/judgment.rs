//! Merge rules
//!
//! Stateless: tier comparison, merge midpoint, tier promotion and the
//! random choice of the next item to drop.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Outcome of merging two equal-tier items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MergeResult {
    /// Midpoint of the two source items
    pub position: Vec2,
    /// Source tier + 1
    pub item_no: i32,
}

fn check_tier(tier: i32) -> Result<()> {
    if tier < 0 {
        return Err(GameError::InvalidTier(tier));
    }
    Ok(())
}

/// Two tiers merge when they are equal
pub fn can_merge(a: i32, b: i32) -> Result<bool> {
    check_tier(a)?;
    check_tier(b)?;
    Ok(a == b)
}

#[inline]
pub fn merge_position(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) / 2.0
}

/// Resolve a merge of two `tier` items at `a` and `b`
pub fn create_merge_data(a: Vec2, b: Vec2, tier: i32) -> Result<MergeResult> {
    check_tier(tier)?;
    Ok(MergeResult {
        position: merge_position(a, b),
        item_no: tier + 1,
    })
}

/// Pick the tier of the next dropped item.
///
/// Only the lower half of the roster is ever dropped; larger tiers come
/// from merging. Rosters smaller than 2 always yield tier 0.
pub fn generate_next_item_index<R: Rng>(rng: &mut R, max_item_no: i32) -> Result<i32> {
    if max_item_no <= 0 {
        return Err(GameError::InvalidRosterSize(max_item_no));
    }
    let max_index = (max_item_no / 2 - 1).max(0);
    Ok(rng.random_range(0..=max_index))
}
