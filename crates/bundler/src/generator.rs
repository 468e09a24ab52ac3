//! Combination Generator - runtime-bounded movie bundles
//!
//! Builds "movie night" bundles: small sets of movies whose runtimes add
//! up to a target duration, give or take a margin.
//!
//! ## Algorithm
//! 1. Drop movies without a positive runtime
//! 2. For every bundle size from 1 to 5, enumerate index-ordered subsets,
//!    skipping any movie that would push the running total past the upper
//!    edge of the window. Each size class stops collecting once it holds
//!    more than 1000 bundles.
//! 3. Score every in-window bundle:
//!    `0.3 * time_accuracy + 0.7 * average_rating / 10`
//! 4. Stable sort by score, best first
//! 5. Walk the ranking and keep a bundle only if it shares no movie with a
//!    bundle already kept
//!
//! Size classes are independent, so they are enumerated on the rayon pool
//! and stitched back together in size order.

use crate::types::{Band, Combination, ScoredCombination};
use catalog::{Movie, MovieId, ProviderDirectory};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Minutes either side of the target a bundle may land
pub const DEFAULT_MARGIN_MINUTES: u32 = 30;

/// Largest bundle the generator will build
pub const MAX_COMBINATION_SIZE: usize = 5;

/// Qualifying bundles collected per size class before enumeration stops
pub const SIZE_CLASS_CAP: usize = 1000;

/// Bundles returned by [`CombinationGenerator::generate`] when the caller has no preference
pub const DEFAULT_COUNT: usize = 5;

/// Bundles generated for each provider in the partitioned variant
pub const PER_PROVIDER_COUNT: usize = 3;

const TIME_WEIGHT: f64 = 0.3;
const RATING_WEIGHT: f64 = 0.7;

/// Result of a provider-partitioned run
#[derive(Debug, Clone, Default)]
pub struct ProviderBatch {
    /// Bundles in provider order, each tagged with its provider id
    pub combinations: Vec<Combination>,
    /// Every movie id consumed so far, including the ids passed in
    pub used_ids: HashSet<MovieId>,
}

/// Generates ranked, mutually disjoint movie bundles
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    margin_minutes: u32,
    max_size: usize,
    size_class_cap: usize,
    time_weight: f64,
    rating_weight: f64,
}

impl CombinationGenerator {
    pub fn new() -> Self {
        Self {
            margin_minutes: DEFAULT_MARGIN_MINUTES,
            max_size: MAX_COMBINATION_SIZE,
            size_class_cap: SIZE_CLASS_CAP,
            time_weight: TIME_WEIGHT,
            rating_weight: RATING_WEIGHT,
        }
    }

    /// Configure the window margin (default: 30 minutes)
    pub fn with_margin_minutes(mut self, minutes: u32) -> Self {
        self.margin_minutes = minutes;
        self
    }

    /// Configure the largest bundle size (default: 5)
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Configure how many bundles a size class may collect (default: 1000)
    pub fn with_size_class_cap(mut self, cap: usize) -> Self {
        self.size_class_cap = cap;
        self
    }

    /// Configure the score blend (default: 0.3 time, 0.7 rating)
    pub fn with_weights(mut self, time_weight: f64, rating_weight: f64) -> Self {
        self.time_weight = time_weight;
        self.rating_weight = rating_weight;
        self
    }

    /// The acceptance window for a target, or `None` for a target that
    /// cannot produce bundles (zero, negative, NaN or infinite hours)
    pub fn band(&self, target_hours: f64) -> Option<Band> {
        if !target_hours.is_finite() || target_hours <= 0.0 {
            return None;
        }
        Some(Band::around_hours(target_hours, f64::from(self.margin_minutes)))
    }

    /// Generate up to `count` disjoint bundles for `target_hours`.
    ///
    /// Nothing found (or nothing to search) is an empty vector, not an error.
    #[instrument(skip(self, pool), fields(pool = pool.len()))]
    pub fn generate(&self, pool: &[Movie], target_hours: f64, count: usize) -> Vec<Combination> {
        if count == 0 {
            return Vec::new();
        }
        let ranked = self.rank(pool, target_hours);
        let selected = select_disjoint(ranked, count);
        debug!("Selected {} disjoint combinations", selected.len());
        selected
    }

    /// Every in-window bundle with its score, best first.
    ///
    /// This is the list [`generate`](Self::generate) picks from; overlapping
    /// bundles are all still present.
    pub fn rank(&self, pool: &[Movie], target_hours: f64) -> Vec<ScoredCombination> {
        let Some(band) = self.band(target_hours) else {
            debug!("Non-positive target {} hours, nothing to generate", target_hours);
            return Vec::new();
        };

        let valid: Vec<&Movie> = pool.iter().filter(|m| m.known_runtime().is_some()).collect();
        if valid.is_empty() {
            debug!("No movies with a known runtime");
            return Vec::new();
        }

        let largest = self.max_size.min(valid.len());
        debug!(
            "Searching sizes 1..={} over {} movies, window [{}, {}]",
            largest,
            valid.len(),
            band.min(),
            band.max()
        );

        let per_size: Vec<Vec<ScoredCombination>> = (1..=largest)
            .into_par_iter()
            .map(|size| self.enumerate_size(&valid, size, &band))
            .collect();

        let mut ranked: Vec<ScoredCombination> = per_size.into_iter().flatten().collect();
        // Stable: equal scores keep size order, then discovery order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        debug!("Found {} in-window combinations", ranked.len());
        ranked
    }

    /// Generate [`PER_PROVIDER_COUNT`] bundles for each provider, never
    /// reusing a movie across providers.
    pub fn generate_per_provider<S: AsRef<str>>(
        &self,
        pool: &[Movie],
        target_hours: f64,
        provider_ids: &[S],
        directory: &ProviderDirectory,
    ) -> Vec<Combination> {
        self.generate_per_provider_excluding(pool, target_hours, provider_ids, directory, HashSet::new())
            .combinations
    }

    /// Provider-partitioned generation that starts from an existing set of
    /// used ids and hands the grown set back.
    ///
    /// Providers are served in the order given; the first provider to claim
    /// a movie keeps it. A provider with no unused movies of its own draws
    /// from every unused movie instead.
    #[instrument(skip_all, fields(pool = pool.len(), providers = provider_ids.len()))]
    pub fn generate_per_provider_excluding<S: AsRef<str>>(
        &self,
        pool: &[Movie],
        target_hours: f64,
        provider_ids: &[S],
        directory: &ProviderDirectory,
        mut used_ids: HashSet<MovieId>,
    ) -> ProviderBatch {
        let mut combinations = Vec::new();

        for provider_id in provider_ids {
            let provider_id = provider_id.as_ref();
            let catalog_id = directory.lookup(provider_id);

            let unused: Vec<Movie> = pool
                .iter()
                .filter(|m| !used_ids.contains(&m.id))
                .cloned()
                .collect();
            let on_provider: Vec<Movie> = match catalog_id {
                Some(catalog_id) => unused
                    .iter()
                    .filter(|m| m.is_available_on(catalog_id))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };

            debug!(
                "Provider {} ({:?}): {} unused movies on provider, {} unused overall",
                provider_id,
                catalog_id,
                on_provider.len(),
                unused.len()
            );

            let candidates = if on_provider.is_empty() { unused } else { on_provider };
            if candidates.is_empty() {
                debug!("No unused movies left for provider {}", provider_id);
                continue;
            }

            let found = self.generate(&candidates, target_hours, PER_PROVIDER_COUNT);
            for combination in found {
                used_ids.extend(combination.movie_ids());
                combinations.push(combination.with_provider(provider_id));
            }
        }

        debug!(
            "Generated {} provider combinations using {} movies",
            combinations.len(),
            used_ids.len()
        );
        ProviderBatch {
            combinations,
            used_ids,
        }
    }

    fn score(&self, band: &Band, combination: &Combination) -> f64 {
        let time_accuracy = band.time_accuracy(combination.total_runtime);
        let rating_score = f64::from(combination.average_rating) / 10.0;
        self.time_weight * time_accuracy + self.rating_weight * rating_score
    }

    /// Enumerate size-`size` subsets of `valid` in index order.
    ///
    /// `picks` is an explicit index stack and `totals[d]` the runtime of the
    /// first `d` picks, so backtracking is a pop rather than an undo.
    fn enumerate_size(&self, valid: &[&Movie], size: usize, band: &Band) -> Vec<ScoredCombination> {
        let mut results = Vec::new();
        let mut picks: Vec<usize> = Vec::with_capacity(size);
        let mut totals: Vec<u32> = Vec::with_capacity(size + 1);
        totals.push(0);
        let mut next = 0;

        loop {
            if picks.len() == size {
                let total = totals[size];
                if band.contains(total) {
                    let movies = picks.iter().map(|&i| valid[i].clone()).collect();
                    let combination = Combination::new(movies);
                    let score = self.score(band, &combination);
                    results.push(ScoredCombination { combination, score });
                    if results.len() > self.size_class_cap {
                        break;
                    }
                }
            } else if next < valid.len() {
                let runtime = valid[next].known_runtime().unwrap_or(0);
                // An overflowing total is past any band, so skip the pick
                if let Some(candidate_total) = totals[picks.len()].checked_add(runtime) {
                    if f64::from(candidate_total) <= band.max() {
                        picks.push(next);
                        totals.push(candidate_total);
                    }
                }
                next += 1;
                continue;
            }

            // Leaf reached or this depth is exhausted: step back one level
            match picks.pop() {
                Some(last) => {
                    totals.pop();
                    next = last + 1;
                }
                None => break,
            }
        }

        debug!("Size {}: {} in-window combinations", size, results.len());
        results
    }
}

impl Default for CombinationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedily keep the best bundles that share no movie with one already kept
fn select_disjoint(ranked: Vec<ScoredCombination>, count: usize) -> Vec<Combination> {
    let mut selected = Vec::new();
    let mut used: HashSet<MovieId> = HashSet::new();

    for scored in ranked {
        if selected.len() >= count {
            break;
        }
        let combination = scored.combination;
        if combination.movie_ids().any(|id| used.contains(&id)) {
            continue;
        }
        used.extend(combination.movie_ids());
        selected.push(combination);
    }

    selected
}
