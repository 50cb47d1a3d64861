//! Persisted score aggregate
//!
//! Stored as:
//! `{"bestScore": 0, "lastPlayed": "2024-10-01", "daily": [], "monthly": [], "allTime": []}`

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::reset;
use crate::consts::MAX_RANKING_ENTRIES;

/// Ranking bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Daily,
    Monthly,
    AllTime,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Daily, Bucket::Monthly, Bucket::AllTime];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Daily => "Daily",
            Bucket::Monthly => "Monthly",
            Bucket::AllTime => "All Time",
        }
    }
}

/// Best score, last-played date and the three top-N buckets.
///
/// Buckets are always sorted highest first and hold at most
/// [`MAX_RANKING_ENTRIES`] scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreContainer {
    pub best_score: u32,
    pub last_played: NaiveDate,
    #[serde(default)]
    pub daily: Vec<u32>,
    #[serde(default)]
    pub monthly: Vec<u32>,
    #[serde(default)]
    pub all_time: Vec<u32>,
}

impl ScoreContainer {
    /// Fresh record: nothing played yet
    pub fn new(today: NaiveDate) -> Self {
        Self {
            best_score: 0,
            last_played: today,
            daily: Vec::new(),
            monthly: Vec::new(),
            all_time: Vec::new(),
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[u32] {
        match bucket {
            Bucket::Daily => &self.daily,
            Bucket::Monthly => &self.monthly,
            Bucket::AllTime => &self.all_time,
        }
    }

    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<u32> {
        match bucket {
            Bucket::Daily => &mut self.daily,
            Bucket::Monthly => &mut self.monthly,
            Bucket::AllTime => &mut self.all_time,
        }
    }

    /// Re-sort and cap every bucket (for records edited or written by an
    /// older build). Also lifts the best score to the top all-time entry.
    pub fn normalize(&mut self) {
        for bucket in Bucket::ALL {
            let scores = self.bucket_mut(bucket);
            scores.sort_by(|a, b| b.cmp(a));
            scores.truncate(MAX_RANKING_ENTRIES);
        }
        if let Some(&top) = self.all_time.first() {
            self.best_score = self.best_score.max(top);
        }
    }

    /// Clear buckets whose period ended between the last play and `today`.
    /// Returns which buckets were cleared.
    pub fn apply_resets(&mut self, today: NaiveDate) -> Vec<Bucket> {
        let mut cleared = Vec::new();
        if reset::should_reset_daily_scores(self.last_played, today) {
            reset::reset_scores(&mut self.daily);
            cleared.push(Bucket::Daily);
        }
        if reset::should_reset_monthly_scores(self.last_played, today) {
            reset::reset_scores(&mut self.monthly);
            cleared.push(Bucket::Monthly);
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled(last_played: NaiveDate) -> ScoreContainer {
        ScoreContainer {
            best_score: 900,
            last_played,
            daily: vec![300, 200],
            monthly: vec![600, 300],
            all_time: vec![900, 600],
        }
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(filled(date(2024, 10, 1))).unwrap();
        assert_eq!(json["bestScore"], 900);
        assert_eq!(json["lastPlayed"], "2024-10-01");
        assert_eq!(json["allTime"][0], 900);
        assert!(json["daily"].is_array());
        assert!(json["monthly"].is_array());
    }

    #[test]
    fn test_missing_buckets_default_empty() {
        let c: ScoreContainer =
            serde_json::from_str(r#"{"bestScore": 5, "lastPlayed": "2024-01-02"}"#).unwrap();
        assert_eq!(c.best_score, 5);
        assert!(c.daily.is_empty() && c.monthly.is_empty() && c.all_time.is_empty());
    }

    #[test]
    fn test_normalize() {
        let mut c = ScoreContainer::new(date(2024, 1, 1));
        c.all_time = vec![1, 9, 3, 7, 5, 2, 8, 4, 6];
        c.normalize();
        assert_eq!(c.all_time, vec![9, 8, 7, 6, 5, 4, 3]);
        assert_eq!(c.best_score, 9);
    }

    #[test]
    fn test_resets_same_day() {
        let mut c = filled(date(2024, 10, 1));
        assert!(c.apply_resets(date(2024, 10, 1)).is_empty());
        assert_eq!(c, filled(date(2024, 10, 1)));
    }

    #[test]
    fn test_resets_next_day() {
        let mut c = filled(date(2024, 10, 1));
        assert_eq!(c.apply_resets(date(2024, 10, 2)), vec![Bucket::Daily]);
        assert!(c.daily.is_empty());
        assert_eq!(c.monthly, vec![600, 300]);
    }

    #[test]
    fn test_resets_next_month_keeps_all_time() {
        let mut c = filled(date(2023, 12, 31));
        assert_eq!(
            c.apply_resets(date(2024, 1, 1)),
            vec![Bucket::Daily, Bucket::Monthly]
        );
        assert!(c.daily.is_empty() && c.monthly.is_empty());
        assert_eq!(c.all_time, vec![900, 600]);
        assert_eq!(c.best_score, 900);
    }
}
