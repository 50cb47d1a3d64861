//! Live item registry
//!
//! Owns every item in play, keyed by id. Merges remove both source items
//! in one step; nothing ever comes back once removed.

use std::collections::HashMap;

use glam::Vec2;
use rand_pcg::Pcg32;

use super::item::{ItemId, ItemSnapshot, MergeItem};
use super::judgment::{self, MergeResult};
use crate::error::{GameError, Result};
use crate::settings::GameRules;

pub struct MergeItemRegistry {
    items: HashMap<ItemId, MergeItem>,
    next_id: u32,
    contact_time_limit: f32,
    max_item_no: i32,
    next_item_index: i32,
    rng: Pcg32,
}

impl MergeItemRegistry {
    /// Create an empty registry for one run
    pub fn new(rules: &GameRules, rng: Pcg32) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            items: HashMap::new(),
            next_id: 1,
            contact_time_limit: rules.contact_time_limit,
            max_item_no: rules.max_item_no,
            next_item_index: 0,
            rng,
        })
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn get(&self, id: ItemId) -> Result<&MergeItem> {
        self.items.get(&id).ok_or(GameError::NotFound(id))
    }

    fn get_mut(&mut self, id: ItemId) -> Result<&mut MergeItem> {
        self.items.get_mut(&id).ok_or(GameError::NotFound(id))
    }

    /// Spawn a new item of the given tier
    pub fn create_item(&mut self, item_no: i32, position: Vec2) -> Result<ItemSnapshot> {
        if item_no < 0 {
            return Err(GameError::InvalidTier(item_no));
        }
        let id = self.allocate_id();
        let item = MergeItem::new(id, item_no, position, self.contact_time_limit);
        let snapshot = item.snapshot();
        self.items.insert(id, item);
        log::debug!("spawned item {} tier {}", id, item_no);
        Ok(snapshot)
    }

    /// Look up an item. Missing ids are expected (already merged) and
    /// reported as `None`.
    pub fn get_by_id(&self, id: ItemId) -> Option<ItemSnapshot> {
        self.items.get(&id).map(MergeItem::snapshot)
    }

    pub fn set_position(&mut self, id: ItemId, position: Vec2) -> Result<()> {
        self.get_mut(id)?.position = position;
        Ok(())
    }

    pub fn add_contact_time(&mut self, id: ItemId, delta: f32) -> Result<()> {
        self.get_mut(id)?.add_contact_time(delta);
        Ok(())
    }

    pub fn reset_contact_time(&mut self, id: ItemId) -> Result<()> {
        self.get_mut(id)?.reset_contact_time();
        Ok(())
    }

    pub fn check_game_over(&self, id: ItemId) -> Result<bool> {
        Ok(self.get(id)?.check_game_over())
    }

    /// True when any live item has overstayed the ceiling
    pub fn any_game_over(&self) -> bool {
        self.items.values().any(MergeItem::check_game_over)
    }

    pub fn can_merge(&self, a: ItemId, b: ItemId) -> Result<bool> {
        let item_a = self.get(a)?;
        let item_b = self.get(b)?;
        Ok(item_a.can_merge_with(item_b))
    }

    /// Merge two items, consuming both.
    ///
    /// All checks run before either item is removed, so a failed merge
    /// leaves the registry untouched.
    pub fn resolve_merge(
        &mut self,
        a: ItemId,
        b: ItemId,
        pos_a: Vec2,
        pos_b: Vec2,
    ) -> Result<MergeResult> {
        let item_a = self.get(a)?;
        let item_b = self.get(b)?;
        if a == b || !item_a.can_merge_with(item_b) {
            return Err(GameError::NotMergeable { a, b });
        }
        let result = judgment::create_merge_data(pos_a, pos_b, item_a.item_no())?;

        self.items.remove(&a);
        self.items.remove(&b);
        log::debug!("merged {} + {} -> tier {}", a, b, result.item_no);
        Ok(result)
    }

    /// Remove an item without merging (fell out, cleared by the host)
    pub fn despawn(&mut self, id: ItemId) -> Option<ItemSnapshot> {
        self.items.remove(&id).map(|item| item.snapshot())
    }

    /// Roll the tier of the next item to drop
    pub fn update_next_item_index(&mut self) -> Result<i32> {
        self.next_item_index = judgment::generate_next_item_index(&mut self.rng, self.max_item_no)?;
        Ok(self.next_item_index)
    }

    pub fn next_item_index(&self) -> i32 {
        self.next_item_index
    }

    pub fn max_item_no(&self) -> i32 {
        self.max_item_no
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Snapshots of all live items, ordered by id
    pub fn snapshots(&self) -> Vec<ItemSnapshot> {
        let mut out: Vec<_> = self.items.values().map(MergeItem::snapshot).collect();
        out.sort_by_key(|s| s.id);
        out
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
