//! Top-N score lists
//!
//! Each bucket (daily, monthly, all-time) is its own truncated view of the
//! same stream of finished runs, so these run once per bucket.

/// Insert `new_score` and keep the best `max_entries`, highest first.
///
/// Ties keep insertion order: the new score lands after equal entries.
pub fn update_top_scores(current: &[u32], new_score: u32, max_entries: usize) -> Vec<u32> {
    let mut scores = Vec::with_capacity(current.len() + 1);
    scores.extend_from_slice(current);
    scores.push(new_score);
    // sort_by is stable
    scores.sort_by(|a, b| b.cmp(a));
    scores.truncate(max_entries);
    scores
}

/// Strictly greater; matching the best is not a new best
pub fn is_new_best_score(current_best: u32, new_score: u32) -> bool {
    new_score > current_best
}

/// 1-based rank `new_score` takes when folded into `current` by
/// [`update_top_scores`], or `None` if it is cut off
pub fn placement(current: &[u32], new_score: u32, max_entries: usize) -> Option<usize> {
    // Equal scores are inserted after existing ones
    let rank = current.iter().filter(|s| **s >= new_score).count() + 1;
    (rank <= max_entries).then_some(rank)
}
