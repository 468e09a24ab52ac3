//! Filter to ensure minimum quality threshold.
//!
//! Removes movies rated below the user's minimum score or with too few
//! votes for the rating to mean much.

use crate::context::FilterContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Movie;

/// Votes a movie needs before its rating is trusted
pub const DEFAULT_MIN_VOTES: u32 = 100;

/// Removes movies below quality thresholds.
///
/// ## Algorithm
/// For each movie:
/// 1. Check `vote_average >= preferences.min_score`
/// 2. Check `vote_count >= min_votes` (an unknown count only passes a zero threshold)
/// 3. Keep only if both conditions met
pub struct MinimumRatingFilter {
    min_votes: u32,
}

impl MinimumRatingFilter {
    /// # Arguments
    /// * `min_votes` - Minimum number of votes (typically 100)
    pub fn new(min_votes: u32) -> Self {
        Self { min_votes }
    }
}

impl Default for MinimumRatingFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_VOTES)
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let min_score = context.preferences.min_score;
        let filtered: Vec<Movie> = movies
            .into_iter()
            .filter(|movie| {
                let enough_votes = match movie.vote_count {
                    Some(count) => count >= self.min_votes,
                    None => self.min_votes == 0,
                };
                movie.vote_average >= min_score && enough_votes
            })
            .collect();

        Ok(filtered)
    }
}
