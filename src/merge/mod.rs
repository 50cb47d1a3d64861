//! Merge domain
//!
//! Pure and engine-free:
//! - Positions are plain 2D vectors reported by the host
//! - Seeded RNG only
//! - No physics, rendering or timing of its own

pub mod item;
pub mod judgment;
pub mod registry;

pub use item::{ItemId, ItemSnapshot, MergeItem};
pub use judgment::{
    MergeResult, can_merge, create_merge_data, generate_next_item_index, merge_position,
};
pub use registry::MergeItemRegistry;
