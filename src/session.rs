//! Game session
//!
//! The context object for one player's runs. The host creates it, keeps it
//! and forwards drop / contact / merge events to it; nothing here is
//! global.

use chrono::NaiveDate;
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, PersistenceError, Result};
use crate::merge::{ItemId, ItemSnapshot, MergeItemRegistry, MergeResult};
use crate::observable::Observable;
use crate::score::{ScoreOutcome, ScoreRepository, ScoreUseCase};
use crate::settings::GameRules;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first drop
    Ready,
    /// Items are being dropped and merged
    Playing,
    /// An item overstayed the ceiling
    GameOver,
}

/// Result of a merge as seen by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOutcome {
    pub result: MergeResult,
    /// The new item, or `None` when two top-tier items cleared each other
    pub spawned: Option<ItemSnapshot>,
    pub points: u32,
}

pub struct GameSession {
    rules: GameRules,
    registry: MergeItemRegistry,
    scores: ScoreUseCase,
    /// Score of the current run
    pub score: Observable<u32>,
    /// Tier of the item that will be dropped next
    pub next_item_index: Observable<i32>,
    pub phase: Observable<GamePhase>,
    /// Set once the current run has been recorded
    outcome: Option<ScoreOutcome>,
}

impl GameSession {
    /// Create a session with a seeded next-item sequence
    pub fn new(rules: GameRules, scores: ScoreUseCase, seed: u64) -> Result<Self> {
        let mut registry = MergeItemRegistry::new(&rules, Pcg32::seed_from_u64(seed))?;
        let first = registry.update_next_item_index()?;
        log::info!(
            "Session created (seed {}, roster {}, contact limit {}s)",
            seed,
            rules.max_item_no,
            rules.contact_time_limit
        );
        Ok(Self {
            rules,
            registry,
            scores,
            score: Observable::new(0),
            next_item_index: Observable::new(first),
            phase: Observable::new(GamePhase::Ready),
            outcome: None,
        })
    }

    /// Load scores from `repository` for `today` and create the session
    pub fn open(
        rules: GameRules,
        repository: Box<dyn ScoreRepository>,
        today: NaiveDate,
        seed: u64,
    ) -> Result<Self> {
        let scores = ScoreUseCase::load(repository, today);
        Self::new(rules, scores, seed)
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn registry(&self) -> &MergeItemRegistry {
        &self.registry
    }

    pub fn scores(&self) -> &ScoreUseCase {
        &self.scores
    }

    pub fn scores_mut(&mut self) -> &mut ScoreUseCase {
        &mut self.scores
    }

    pub fn outcome(&self) -> Option<ScoreOutcome> {
        self.outcome
    }

    fn require(&self, expected: GamePhase) -> Result<()> {
        let actual = self.phase.value();
        if actual != expected {
            return Err(GameError::InvalidPhase { expected, actual });
        }
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.require(GamePhase::Ready)?;
        self.phase.set(GamePhase::Playing);
        log::info!("Run started");
        Ok(())
    }

    /// Clear the board and get ready for another run
    pub fn restart(&mut self) -> Result<()> {
        self.registry.clear();
        self.score.set(0);
        self.outcome = None;
        let next = self.registry.update_next_item_index()?;
        self.next_item_index.set(next);
        self.phase.set(GamePhase::Ready);
        Ok(())
    }

    /// Drop the pending item at `position` and roll the next one
    pub fn drop_item(&mut self, position: Vec2) -> Result<ItemSnapshot> {
        self.require(GamePhase::Playing)?;
        let item = self
            .registry
            .create_item(self.next_item_index.value(), position)?;
        let next = self.registry.update_next_item_index()?;
        self.next_item_index.set(next);
        Ok(item)
    }

    pub fn report_position(&mut self, id: ItemId, position: Vec2) -> Result<()> {
        self.registry.set_position(id, position)
    }

    /// Item `id` touched the ceiling for another `dt` seconds. Returns true
    /// if that ended the run.
    pub fn report_contact(&mut self, id: ItemId, dt: f32) -> Result<bool> {
        self.require(GamePhase::Playing)?;
        self.registry.add_contact_time(id, dt)?;
        if self.registry.check_game_over(id)? {
            log::info!("Item {} overstayed the ceiling, game over", id);
            self.phase.set(GamePhase::GameOver);
            return Ok(true);
        }
        Ok(false)
    }

    pub fn report_contact_end(&mut self, id: ItemId) -> Result<()> {
        self.registry.reset_contact_time(id)
    }

    /// Merge two touching items and award points for the result
    pub fn merge(
        &mut self,
        a: ItemId,
        b: ItemId,
        pos_a: Vec2,
        pos_b: Vec2,
    ) -> Result<MergeOutcome> {
        self.require(GamePhase::Playing)?;
        let result = self.registry.resolve_merge(a, b, pos_a, pos_b)?;
        let points = self.rules.merge_score(result.item_no);
        self.score.update(|s| s.saturating_add(points));

        let spawned = if self.rules.is_beyond_roster(result.item_no) {
            log::debug!("Top tier merge cleared {} and {}", a, b);
            None
        } else {
            Some(self.registry.create_item(result.item_no, result.position)?)
        };

        Ok(MergeOutcome {
            result,
            spawned,
            points,
        })
    }

    /// Remove an item without scoring it
    pub fn despawn(&mut self, id: ItemId) -> Option<ItemSnapshot> {
        self.registry.despawn(id)
    }

    /// End the run and record its score.
    ///
    /// Calling again after the run was recorded returns the same outcome.
    /// A failed save is logged; call [`save_scores`](Self::save_scores) to
    /// retry or inspect the error.
    pub fn finish(&mut self) -> Result<ScoreOutcome> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }
        if self.phase.value() == GamePhase::Ready {
            return Err(GameError::InvalidPhase {
                expected: GamePhase::Playing,
                actual: GamePhase::Ready,
            });
        }
        self.phase.set(GamePhase::GameOver);

        let outcome = self.scores.record_score(self.score.value());
        self.outcome = Some(outcome);
        log::info!(
            "Run finished: score {} (best {})",
            outcome.score,
            self.scores.scores().best_score
        );
        if let Err(e) = self.save_scores() {
            log::warn!("Failed to save scores: {}", e);
        }
        Ok(outcome)
    }

    pub fn save_scores(&mut self) -> std::result::Result<(), PersistenceError> {
        self.scores.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::MemoryScoreRepository;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
    }

    fn session() -> GameSession {
        GameSession::open(
            GameRules::default(),
            Box::new(MemoryScoreRepository::new()),
            today(),
            12345,
        )
        .unwrap()
    }

    #[test]
    fn test_ready_to_playing() {
        let mut s = session();
        assert_eq!(s.phase.value(), GamePhase::Ready);
        assert!(matches!(
            s.drop_item(Vec2::ZERO),
            Err(GameError::InvalidPhase { .. })
        ));
        s.start().unwrap();
        assert_eq!(s.phase.value(), GamePhase::Playing);
        assert!(s.start().is_err());
    }

    #[test]
    fn test_drop_uses_pending_tier() {
        let mut s = session();
        s.start().unwrap();
        for _ in 0..20 {
            let pending = s.next_item_index.value();
            let item = s.drop_item(Vec2::new(0.0, 10.0)).unwrap();
            assert_eq!(item.item_no, pending);
            assert!(s.registry().get_by_id(item.id).is_some());
        }
        assert_eq!(s.registry().len(), 20);
    }

    #[test]
    fn test_merge_spawns_and_scores() {
        let mut s = session();
        s.start().unwrap();
        let reg = &mut s.registry;
        let a = reg.create_item(2, Vec2::new(0.0, 0.0)).unwrap().id;
        let b = reg.create_item(2, Vec2::new(4.0, 0.0)).unwrap().id;

        let out = s
            .merge(a, b, Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0))
            .unwrap();
        let spawned = out.spawned.unwrap();
        assert_eq!(spawned.item_no, 3);
        assert_eq!(spawned.position, Vec2::new(2.0, 0.0));
        assert_eq!(out.points, s.rules().merge_score(3));
        assert_eq!(s.score.value(), out.points);
        assert!(s.registry().get_by_id(a).is_none());
        assert!(s.registry().get_by_id(b).is_none());
    }

    #[test]
    fn test_top_tier_merge_clears_both() {
        let mut s = session();
        s.start().unwrap();
        let top = s.rules().max_item_no - 1;
        let a = s.registry.create_item(top, Vec2::ZERO).unwrap().id;
        let b = s.registry.create_item(top, Vec2::ONE).unwrap().id;

        let out = s.merge(a, b, Vec2::ZERO, Vec2::ONE).unwrap();
        assert!(out.spawned.is_none());
        assert!(out.points > 0);
        assert!(s.registry().is_empty());
    }

    #[test]
    fn test_contact_ends_run() {
        let mut s = session();
        s.start().unwrap();
        let id = s.drop_item(Vec2::ZERO).unwrap().id;
        let limit = s.rules().contact_time_limit;

        assert!(!s.report_contact(id, limit * 0.9).unwrap());
        s.report_contact_end(id).unwrap();
        assert!(!s.report_contact(id, limit * 0.9).unwrap());
        assert!(s.report_contact(id, limit * 0.2).unwrap());
        assert_eq!(s.phase.value(), GamePhase::GameOver);
    }

    #[test]
    fn test_stale_contact_is_not_found() {
        let mut s = session();
        s.start().unwrap();
        let id = s.drop_item(Vec2::ZERO).unwrap().id;
        s.despawn(id);
        assert_eq!(s.report_contact(id, 0.1), Err(GameError::NotFound(id)));
    }

    #[test]
    fn test_finish_records_once() {
        let mut s = session();
        assert!(s.finish().is_err());
        s.start().unwrap();
        s.score.set(120);

        let first = s.finish().unwrap();
        assert_eq!(first.score, 120);
        assert!(first.new_best);
        assert_eq!(s.finish().unwrap(), first);
        assert_eq!(s.scores().scores().all_time, vec![120]);
    }

    #[test]
    fn test_restart_resets_run_state() {
        let mut s = session();
        s.start().unwrap();
        s.drop_item(Vec2::ZERO).unwrap();
        s.score.set(50);
        s.finish().unwrap();

        s.restart().unwrap();
        assert_eq!(s.phase.value(), GamePhase::Ready);
        assert_eq!(s.score.value(), 0);
        assert!(s.registry().is_empty());
        assert!(s.outcome().is_none());
        assert_eq!(s.scores().scores().best_score, 50);
    }
}
