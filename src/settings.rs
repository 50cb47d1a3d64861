//! Game rules
//!
//! Read-only configuration for a run. Loaded from JSON, falling back to
//! defaults when missing or unreadable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CONTACT_TIME_LIMIT, DEFAULT_MAX_ITEM_NO};
use crate::error::{GameError, Result};

/// Rules shared by every item and merge in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameRules {
    /// Seconds an item may rest against the ceiling before the run ends
    pub contact_time_limit: f32,
    /// Number of tiers in the item roster
    pub max_item_no: i32,
    /// Points for creating tier `i` by merging (index = resulting tier)
    pub score_table: Vec<u32>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            contact_time_limit: DEFAULT_CONTACT_TIME_LIMIT,
            max_item_no: DEFAULT_MAX_ITEM_NO,
            score_table: triangular_score_table(DEFAULT_MAX_ITEM_NO),
        }
    }
}

/// 0, 1, 3, 6, 10, ... up to and including tier `max_item_no`
pub fn triangular_score_table(max_item_no: i32) -> Vec<u32> {
    (0..=max_item_no.max(0) as u32).map(|i| i * (i + 1) / 2).collect()
}

impl GameRules {
    pub fn validate(&self) -> Result<()> {
        // Written so NaN fails too
        if !(self.contact_time_limit > 0.0) {
            return Err(GameError::InvalidContactTimeLimit(self.contact_time_limit));
        }
        if self.max_item_no <= 0 {
            return Err(GameError::InvalidRosterSize(self.max_item_no));
        }
        Ok(())
    }

    /// Points for a merge that produced `item_no`
    pub fn merge_score(&self, item_no: i32) -> u32 {
        if item_no < 0 {
            return 0;
        }
        self.score_table
            .get(item_no as usize)
            .or(self.score_table.last())
            .copied()
            .unwrap_or(0)
    }

    /// Tier produced by merging two items of the top tier. Such merges
    /// clear both items without spawning anything.
    pub fn is_beyond_roster(&self, item_no: i32) -> bool {
        item_no >= self.max_item_no
    }

    /// Load rules from a JSON file
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<GameRules>(&json) {
                Ok(rules) if rules.validate().is_ok() => {
                    log::info!("Loaded game rules from {}", path.display());
                    return rules;
                }
                Ok(rules) => {
                    log::warn!("Rejected game rules in {}: {:?}", path.display(), rules.validate());
                }
                Err(e) => log::warn!("Could not parse {}: {}", path.display(), e),
            },
            Err(e) => log::debug!("No rules file at {}: {}", path.display(), e),
        }

        log::info!("Using default game rules");
        Self::default()
    }

    pub fn save(&self, path: &Path) -> std::result::Result<(), crate::error::PersistenceError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Game rules saved to {}", path.display());
        Ok(())
    }
}
