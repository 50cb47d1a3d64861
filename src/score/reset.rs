//! Calendar resets for the daily and monthly buckets

use chrono::{Datelike, NaiveDate};

pub fn should_reset_daily_scores(last_played: NaiveDate, current: NaiveDate) -> bool {
    last_played != current
}

pub fn should_reset_monthly_scores(last_played: NaiveDate, current: NaiveDate) -> bool {
    last_played.month() != current.month() || last_played.year() != current.year()
}

pub fn reset_scores(scores: &mut Vec<u32>) {
    scores.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_reset() {
        assert!(should_reset_daily_scores(date(2024, 9, 30), date(2024, 10, 1)));
        assert!(!should_reset_daily_scores(date(2024, 10, 1), date(2024, 10, 1)));
    }

    #[test]
    fn test_monthly_reset() {
        assert!(should_reset_monthly_scores(date(2023, 12, 31), date(2024, 1, 1)));
        assert!(should_reset_monthly_scores(date(2024, 9, 30), date(2024, 10, 1)));
        assert!(!should_reset_monthly_scores(date(2024, 10, 1), date(2024, 10, 31)));
        // Same month, different year
        assert!(should_reset_monthly_scores(date(2023, 10, 5), date(2024, 10, 5)));
    }

    #[test]
    fn test_reset_scores_clears() {
        let mut scores = vec![5, 3, 1];
        reset_scores(&mut scores);
        assert!(scores.is_empty());
    }
}
