//! Combination Replacer - single-movie substitutes
//!
//! Finds one movie to stand in for a movie the user rejected (or has
//! already watched) inside a displayed bundle.
//!
//! ## Algorithm
//! 1. Target the original's runtime (90 minutes if it has none)
//! 2. Strict pass: unused movies within ±15 minutes of the target
//! 3. Only if the strict pass is empty, one widened pass at ±30 minutes
//! 4. Highest rating wins; ties go to the earliest movie in the pool
//!
//! The finder only guarantees runtime closeness to the movie it replaces.
//! Whether the repaired bundle still lands in its original window is up to
//! the caller.

use catalog::{Movie, MovieId};
use std::collections::HashSet;
use tracing::debug;

/// Minutes either side of the original runtime for the strict pass
pub const REPLACEMENT_MARGIN_MINUTES: u32 = 15;

/// Runtime assumed for an original that has none
pub const DEFAULT_RUNTIME_MINUTES: u32 = 90;

/// Finds runtime-compatible substitutes for a single movie
#[derive(Debug, Clone)]
pub struct ReplacementFinder {
    margin_minutes: u32,
    default_runtime: u32,
}

impl ReplacementFinder {
    pub fn new() -> Self {
        Self {
            margin_minutes: REPLACEMENT_MARGIN_MINUTES,
            default_runtime: DEFAULT_RUNTIME_MINUTES,
        }
    }

    /// Configure the strict-pass margin (default: 15 minutes).
    /// The widened pass always uses twice this.
    pub fn with_margin_minutes(mut self, minutes: u32) -> Self {
        self.margin_minutes = minutes;
        self
    }

    /// Configure the runtime assumed for originals without one (default: 90)
    pub fn with_default_runtime(mut self, minutes: u32) -> Self {
        self.default_runtime = minutes;
        self
    }

    /// Pick a substitute for `original` from `pool`.
    ///
    /// `excluded` should hold every id showing in any displayed bundle plus
    /// every id that has already been rotated through this slot. Returns
    /// `None` when nothing fits even the widened window.
    pub fn find<'a>(
        &self,
        original: &Movie,
        pool: &'a [Movie],
        excluded: &HashSet<MovieId>,
    ) -> Option<&'a Movie> {
        let target = original.known_runtime().unwrap_or(self.default_runtime);
        debug!(
            "Finding replacement for {} ({} min) among {} movies, {} excluded",
            original.id,
            target,
            pool.len(),
            excluded.len()
        );

        let strict = self.best_within(original, pool, excluded, target, self.margin_minutes);
        if strict.is_some() {
            return strict;
        }

        let widened_margin = self.margin_minutes * 2;
        debug!("No strict match, widening to ±{} minutes", widened_margin);
        let widened = self.best_within(original, pool, excluded, target, widened_margin);
        if widened.is_none() {
            debug!("No replacement for movie {}", original.id);
        }
        widened
    }

    /// Highest-rated eligible movie within `margin` of `target`.
    ///
    /// Only a strictly better rating displaces the current pick, so ties go
    /// to pool order.
    fn best_within<'a>(
        &self,
        original: &Movie,
        pool: &'a [Movie],
        excluded: &HashSet<MovieId>,
        target: u32,
        margin: u32,
    ) -> Option<&'a Movie> {
        let mut best: Option<&'a Movie> = None;
        for movie in pool {
            if movie.id == original.id || excluded.contains(&movie.id) {
                continue;
            }
            let Some(runtime) = movie.known_runtime() else {
                continue;
            };
            if runtime.abs_diff(target) > margin {
                continue;
            }
            match best {
                Some(current) if movie.vote_average <= current.vote_average => {}
                _ => best = Some(movie),
            }
        }
        best
    }
}

impl Default for ReplacementFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// [`ReplacementFinder::find`] with the default margins
pub fn find_replacement<'a>(
    original: &Movie,
    pool: &'a [Movie],
    excluded: &HashSet<MovieId>,
) -> Option<&'a Movie> {
    ReplacementFinder::new().find(original, pool, excluded)
}
