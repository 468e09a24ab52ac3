//! Shared types for the combination engine.

use catalog::{Movie, MovieId};
use serde::Serialize;
use std::fmt;

use crate::format::summarize;

// =============================================================================
// Target window
// =============================================================================

/// Inclusive runtime window `[center - margin, center + margin]`, in minutes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub center: f64,
    pub margin: f64,
}

impl Band {
    /// Window around a target expressed in hours
    pub fn around_hours(target_hours: f64, margin_minutes: f64) -> Self {
        Self {
            center: target_hours * 60.0,
            margin: margin_minutes,
        }
    }

    pub fn min(&self) -> f64 {
        self.center - self.margin
    }

    pub fn max(&self) -> f64 {
        self.center + self.margin
    }

    pub fn contains(&self, total_minutes: u32) -> bool {
        let total = f64::from(total_minutes);
        total >= self.min() && total <= self.max()
    }

    /// 1.0 at the center, falling linearly to 0.0 at either edge
    pub fn time_accuracy(&self, total_minutes: u32) -> f64 {
        if self.margin <= 0.0 {
            return 1.0;
        }
        1.0 - (f64::from(total_minutes) - self.center).abs() / self.margin
    }
}

// =============================================================================
// Combination
// =============================================================================

/// A movie-night bundle.
///
/// Movies keep the order in which the generator found them; a repair
/// swaps a movie in place so positions stay stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Combination {
    pub movies: Vec<Movie>,
    /// Sum of the movies' runtimes in minutes
    pub total_runtime: u32,
    /// Mean of the movies' ratings
    pub average_rating: f32,
    /// Streaming provider this bundle was built for, if any
    pub provider: Option<String>,
}

impl Combination {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut combination = Self {
            movies,
            total_runtime: 0,
            average_rating: 0.0,
            provider: None,
        };
        combination.recompute();
        combination
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn size(&self) -> usize {
        self.movies.len()
    }

    pub fn movie_ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.movies.iter().map(|m| m.id)
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.movies.iter().any(|m| m.id == id)
    }

    pub fn position_of(&self, id: MovieId) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }

    /// Swap the movie at `position` and recompute the aggregates.
    ///
    /// Returns the movie that was removed, or `None` if `position` is out of
    /// range (in which case nothing changes).
    pub fn replace_at(&mut self, position: usize, movie: Movie) -> Option<Movie> {
        let slot = self.movies.get_mut(position)?;
        let removed = std::mem::replace(slot, movie);
        self.recompute();
        Some(removed)
    }

    fn recompute(&mut self) {
        self.total_runtime = self
            .movies
            .iter()
            .map(|m| m.known_runtime().unwrap_or(0))
            .fold(0u32, u32::saturating_add);
        self.average_rating = if self.movies.is_empty() {
            0.0
        } else {
            self.movies.iter().map(|m| m.vote_average).sum::<f32>() / self.movies.len() as f32
        };
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&summarize(self))
    }
}

/// A combination together with the score it was ranked by
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCombination {
    pub combination: Combination,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, runtime: u32, rating: f32) -> Movie {
        Movie::new(id, format!("Movie {id}"), Some(runtime), rating)
    }

    #[test]
    fn test_band_edges_inclusive() {
        let band = Band::around_hours(2.0, 30.0);
        assert_eq!(band.min(), 90.0);
        assert_eq!(band.max(), 150.0);
        assert!(band.contains(90));
        assert!(band.contains(150));
        assert!(!band.contains(89));
        assert!(!band.contains(151));
    }

    #[test]
    fn test_time_accuracy() {
        let band = Band::around_hours(2.0, 30.0);
        assert_eq!(band.time_accuracy(120), 1.0);
        assert_eq!(band.time_accuracy(135), 0.5);
        assert_eq!(band.time_accuracy(90), 0.0);
    }

    #[test]
    fn test_new_computes_aggregates() {
        let combination = Combination::new(vec![movie(1, 55, 7.0), movie(2, 65, 9.0)]);
        assert_eq!(combination.total_runtime, 120);
        assert!((combination.average_rating - 8.0).abs() < 1e-6);
        assert_eq!(combination.provider, None);
    }

    #[test]
    fn test_total_runtime_saturates() {
        let combination = Combination::new(vec![movie(1, u32::MAX, 7.0), movie(2, 90, 8.0)]);
        assert_eq!(combination.total_runtime, u32::MAX);
    }

    #[test]
    fn test_replace_at_recomputes() {
        let mut combination = Combination::new(vec![movie(1, 55, 7.0), movie(2, 65, 9.0)]);

        let removed = combination.replace_at(0, movie(3, 60, 5.0)).unwrap();
        assert_eq!(removed.id, 1);
        assert_eq!(combination.movies[0].id, 3);
        assert_eq!(combination.movies[1].id, 2);
        assert_eq!(combination.total_runtime, 125);
        assert!((combination.average_rating - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_replace_at_out_of_range() {
        let mut combination = Combination::new(vec![movie(1, 55, 7.0)]);
        assert!(combination.replace_at(3, movie(9, 60, 5.0)).is_none());
        assert_eq!(combination.total_runtime, 55);
    }
}
