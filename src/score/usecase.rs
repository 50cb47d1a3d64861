//! Score use-case
//!
//! Owns the score record for one session: load (with calendar resets),
//! fold in finished runs, save.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::container::{Bucket, ScoreContainer};
use super::ranking::{is_new_best_score, placement, update_top_scores};
use super::repository::ScoreRepository;
use crate::consts::MAX_RANKING_ENTRIES;
use crate::error::PersistenceError;
use crate::observable::Observable;

/// What recording one finished run changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub score: u32,
    pub new_best: bool,
    /// 1-based ranks, `None` where the score did not place
    pub daily_rank: Option<usize>,
    pub monthly_rank: Option<usize>,
    pub all_time_rank: Option<usize>,
}

impl ScoreOutcome {
    pub fn rank(&self, bucket: Bucket) -> Option<usize> {
        match bucket {
            Bucket::Daily => self.daily_rank,
            Bucket::Monthly => self.monthly_rank,
            Bucket::AllTime => self.all_time_rank,
        }
    }
}

pub struct ScoreUseCase {
    repository: Box<dyn ScoreRepository>,
    scores: ScoreContainer,
    pub best_score: Observable<u32>,
}

impl ScoreUseCase {
    /// Load the stored record and apply the daily/monthly resets against
    /// `today`. A missing or unreadable record starts fresh.
    pub fn load(repository: Box<dyn ScoreRepository>, today: NaiveDate) -> Self {
        let mut scores = match repository.load() {
            Ok(Some(scores)) => scores,
            Ok(None) => {
                log::info!("No scores found, starting fresh");
                ScoreContainer::new(today)
            }
            Err(e) => {
                log::warn!("Could not load scores ({}), starting fresh", e);
                ScoreContainer::new(today)
            }
        };

        scores.normalize();
        let cleared = scores.apply_resets(today);
        if !cleared.is_empty() {
            log::info!(
                "Cleared {:?} rankings (last played {})",
                cleared,
                scores.last_played
            );
        }
        scores.last_played = today;

        Self {
            repository,
            best_score: Observable::new(scores.best_score),
            scores,
        }
    }

    pub fn scores(&self) -> &ScoreContainer {
        &self.scores
    }

    /// Fold a finished run into every bucket and the best score
    pub fn record_score(&mut self, score: u32) -> ScoreOutcome {
        let mut ranks = [None; 3];
        for (rank, bucket) in ranks.iter_mut().zip(Bucket::ALL) {
            let current = self.scores.bucket(bucket);
            *rank = placement(current, score, MAX_RANKING_ENTRIES);
            let updated = update_top_scores(current, score, MAX_RANKING_ENTRIES);
            *self.scores.bucket_mut(bucket) = updated;
        }

        let new_best = is_new_best_score(self.scores.best_score, score);
        if new_best {
            self.scores.best_score = score;
            self.best_score.set(score);
            log::info!("New best score: {}", score);
        }

        ScoreOutcome {
            score,
            new_best,
            daily_rank: ranks[0],
            monthly_rank: ranks[1],
            all_time_rank: ranks[2],
        }
    }

    pub fn save(&mut self) -> Result<(), PersistenceError> {
        self.repository.save(&self.scores)
    }
}
