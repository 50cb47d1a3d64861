//! Mergeable item entity
//!
//! One item in play: its tier, where it is, and how long it has been
//! resting against the ceiling trigger.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque item identity, stable for the item's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
    pub(crate) fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An item in play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeItem {
    id: ItemId,
    /// Tier (0 = smallest)
    item_no: i32,
    pub position: Vec2,
    /// Seconds of continuous ceiling contact
    contact_time: f32,
    contact_time_limit: f32,
}

impl MergeItem {
    /// Tier and limit are validated by the registry before construction.
    pub(crate) fn new(id: ItemId, item_no: i32, position: Vec2, contact_time_limit: f32) -> Self {
        Self {
            id,
            item_no,
            position,
            contact_time: 0.0,
            contact_time_limit,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn item_no(&self) -> i32 {
        self.item_no
    }

    pub fn contact_time(&self) -> f32 {
        self.contact_time
    }

    pub fn contact_time_limit(&self) -> f32 {
        self.contact_time_limit
    }

    /// Accumulate ceiling contact (`delta` is elapsed seconds, >= 0)
    pub fn add_contact_time(&mut self, delta: f32) {
        self.contact_time += delta;
    }

    /// Contact with the ceiling ended
    pub fn reset_contact_time(&mut self) {
        self.contact_time = 0.0;
    }

    /// Same-tier items merge
    pub fn can_merge_with(&self, other: &MergeItem) -> bool {
        self.item_no == other.item_no
    }

    /// Strictly past the limit; resting exactly at the limit is still safe
    pub fn check_game_over(&self) -> bool {
        self.contact_time > self.contact_time_limit
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            item_no: self.item_no,
            position: self.position,
            contact_time: self.contact_time,
        }
    }
}

/// Read-only copy of an item handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub item_no: i32,
    pub position: Vec2,
    pub contact_time: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn item(id: u32, item_no: i32) -> MergeItem {
        MergeItem::new(ItemId::new(id), item_no, Vec2::ZERO, 1.0)
    }

    #[test]
    fn test_contact_time_accumulates() {
        let mut a = item(1, 0);
        a.add_contact_time(0.25);
        a.add_contact_time(0.5);
        assert!((a.contact_time() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_is_strict() {
        let mut a = item(1, 0);
        a.add_contact_time(1.0);
        assert!(!a.check_game_over());
        a.add_contact_time(0.01);
        assert!(a.check_game_over());
    }

    #[test]
    fn test_can_merge_with_same_tier_only() {
        let a = item(1, 3);
        assert!(a.can_merge_with(&item(2, 3)));
        assert!(!a.can_merge_with(&item(3, 4)));
    }

    #[test]
    fn test_snapshot_copies_state() {
        let mut a = MergeItem::new(ItemId::new(7), 2, Vec2::new(3.0, 4.0), 1.0);
        a.add_contact_time(0.5);
        let snap = a.snapshot();
        assert_eq!(snap.id, ItemId::new(7));
        assert_eq!(snap.item_no, 2);
        assert_eq!(snap.position, Vec2::new(3.0, 4.0));
        assert_eq!(snap.contact_time, 0.5);
    }

    proptest! {
        #[test]
        fn game_over_iff_contact_exceeds_limit(limit in 0.01f32..10.0, c in 0.0f32..20.0) {
            let mut a = MergeItem::new(ItemId::new(1), 0, Vec2::ZERO, limit);
            a.add_contact_time(c);
            prop_assert_eq!(a.check_game_over(), c > limit);
        }

        #[test]
        fn reset_always_clears_contact(deltas in proptest::collection::vec(0.0f32..5.0, 0..16)) {
            let mut a = item(1, 0);
            for d in deltas {
                a.add_contact_time(d);
            }
            a.reset_contact_time();
            prop_assert_eq!(a.contact_time(), 0.0);
        }

        #[test]
        fn equal_tiers_merge_adjacent_do_not(t in 0i32..1000) {
            prop_assert!(item(1, t).can_merge_with(&item(2, t)));
            prop_assert!(!item(1, t).can_merge_with(&item(2, t + 1)));
        }
    }
}
