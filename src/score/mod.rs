//! Score rankings and persistence
//!
//! Daily, monthly and all-time top-N lists plus the best score, kept in a
//! single record that is loaded once per session and saved after each run.

pub mod container;
pub mod ranking;
pub mod repository;
pub mod reset;
pub mod usecase;

pub use container::{Bucket, ScoreContainer};
pub use ranking::{is_new_best_score, placement, update_top_scores};
#[cfg(target_arch = "wasm32")]
pub use repository::LocalStorageScoreRepository;
pub use repository::{JsonFileScoreRepository, MemoryScoreRepository, ScoreRepository};
pub use reset::{reset_scores, should_reset_daily_scores, should_reset_monthly_scores};
pub use usecase::{ScoreOutcome, ScoreUseCase};
