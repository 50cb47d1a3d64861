//! Merge Drop - a falling-and-merging puzzle game core
//!
//! Core modules:
//! - `merge`: Item entity, merge rules and the live item registry
//! - `score`: Daily/monthly/all-time rankings, calendar resets, storage
//! - `session`: Context object wiring one player's runs together
//! - `settings`: Data-driven game rules
//! - `observable`: Change notification for values the UI watches
//!
//! Physics, rendering and audio belong to the host engine. It reports
//! positions, contacts and collisions; the core answers with snapshots
//! and merge results.

pub mod error;
pub mod merge;
pub mod observable;
pub mod score;
pub mod session;
pub mod settings;

pub use error::{GameError, PersistenceError};
pub use merge::{ItemId, ItemSnapshot, MergeItem, MergeItemRegistry, MergeResult};
pub use observable::{Observable, SubscriptionId};
pub use score::{Bucket, ScoreContainer, ScoreOutcome, ScoreRepository, ScoreUseCase};
pub use session::{GamePhase, GameSession, MergeOutcome};
pub use settings::GameRules;

/// Game configuration constants
pub mod consts {
    /// Entries kept in each ranking bucket
    pub const MAX_RANKING_ENTRIES: usize = 7;

    /// Seconds an item may touch the ceiling trigger
    pub const DEFAULT_CONTACT_TIME_LIMIT: f32 = 1.0;
    /// Tiers in the default roster (cherry .. watermelon)
    pub const DEFAULT_MAX_ITEM_NO: i32 = 11;
}

/// Today's calendar date in local time
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
