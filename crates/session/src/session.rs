//! # Movie-Night Session
//!
//! Coordinates one user's browsing session:
//! 1. Filter the catalog against their preferences and watch history
//! 2. Order and cap the surviving pool
//! 3. Either list the best movies or bundle them into combinations
//! 4. Repair the displayed results one movie at a time (replace / mark watched)
//!
//! The session owns the displayed state and the exclusion history, so every
//! repair goes through `&mut self` and completes before the next starts.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument};

use bundler::{
    Combination, CombinationGenerator, DEFAULT_COUNT, ExclusionHistory, ReplacementFinder,
    SlotKey,
};
use catalog::{Catalog, Movie, MovieId, ProviderDirectory, WatchHistory};
use pipeline::{DEFAULT_POOL_LIMIT, FilterPipeline, Preferences, build_filter_context, order_movies};

use crate::error::{Result, SessionError};

/// How many movies the list view shows at once
pub const DEFAULT_LIST_LENGTH: usize = 20;

/// What a single repair did to the displayed results
#[derive(Debug, Clone, PartialEq)]
pub enum ReplaceOutcome {
    /// `removed` left the display and `added` took its place
    Replaced { removed: Movie, added: Movie },
    /// List view only: nothing fit, so the movie was dropped from the list
    Removed(Movie),
    /// Nothing fit; the display is unchanged
    NoReplacement,
    /// The movie was not on display, so there was nothing to repair
    NotShown,
}

/// Counts reported after a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSummary {
    /// Movies left after filtering, ordering, and capping
    pub pool: usize,
    pub listed: usize,
    pub combinations: usize,
}

/// Owns the displayed results for one user and keeps them consistent
/// across replacements.
pub struct MovieNightSession {
    catalog: Arc<Catalog>,
    pipeline: FilterPipeline,
    directory: ProviderDirectory,
    generator: CombinationGenerator,
    finder: ReplacementFinder,
    pool_limit: usize,
    list_length: usize,
    combination_count: usize,

    preferences: Option<Preferences>,
    pool: Vec<Movie>,
    listed: Vec<Movie>,
    combinations: Vec<Combination>,
    history: ExclusionHistory,
}

impl MovieNightSession {
    /// Session over `catalog` with the nine built-in streaming services and
    /// every preference filter.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let directory = ProviderDirectory::streaming_services();
        Self {
            catalog,
            pipeline: FilterPipeline::for_preferences(directory.clone()),
            directory,
            generator: CombinationGenerator::new(),
            finder: ReplacementFinder::new(),
            pool_limit: DEFAULT_POOL_LIMIT,
            list_length: DEFAULT_LIST_LENGTH,
            combination_count: DEFAULT_COUNT,
            preferences: None,
            pool: Vec::new(),
            listed: Vec::new(),
            combinations: Vec::new(),
            history: ExclusionHistory::new(),
        }
    }

    /// Swap the provider directory; the provider filter is rebuilt with it.
    pub fn with_directory(mut self, directory: ProviderDirectory) -> Self {
        self.pipeline = FilterPipeline::for_preferences(directory.clone());
        self.directory = directory;
        self
    }

    pub fn with_pipeline(mut self, pipeline: FilterPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_generator(mut self, generator: CombinationGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_finder(mut self, finder: ReplacementFinder) -> Self {
        self.finder = finder;
        self
    }

    pub fn with_pool_limit(mut self, limit: usize) -> Self {
        self.pool_limit = limit;
        self
    }

    pub fn with_list_length(mut self, length: usize) -> Self {
        self.list_length = length;
        self
    }

    /// Number of combinations shown when no provider is selected
    pub fn with_combination_count(mut self, count: usize) -> Self {
        self.combination_count = count;
        self
    }

    pub fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    /// Every movie that survived the last search, best first
    pub fn pool(&self) -> &[Movie] {
        &self.pool
    }

    pub fn listed(&self) -> &[Movie] {
        &self.listed
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn exclusion_history(&self) -> &ExclusionHistory {
        &self.history
    }

    /// Whether the last search asked for combinations rather than a list
    pub fn is_combination_mode(&self) -> bool {
        self.preferences
            .as_ref()
            .is_some_and(Preferences::wants_combinations)
    }

    /// Run a fresh search. Replaces everything on display and forgets the
    /// exclusion history.
    #[instrument(skip_all)]
    pub fn search(
        &mut self,
        preferences: Preferences,
        history: &dyn WatchHistory,
    ) -> Result<SearchSummary> {
        let start_time = Instant::now();

        let context = build_filter_context(&preferences, history);
        let filtered = self.pipeline.apply(self.catalog.pool(), &context)?;
        info!(
            "Applied filters, {} of {} catalog movies remaining",
            filtered.len(),
            self.catalog.len()
        );

        self.pool = order_movies(filtered, &preferences, self.pool_limit);
        self.listed = self.pool.iter().take(self.list_length).cloned().collect();
        self.history.clear();

        self.combinations = if preferences.wants_combinations() {
            self.build_combinations(&self.pool, &preferences)
        } else {
            Vec::new()
        };
        self.preferences = Some(preferences);

        let summary = SearchSummary {
            pool: self.pool.len(),
            listed: self.listed.len(),
            combinations: self.combinations.len(),
        };
        info!(
            "Search finished in {:.2?}: pool={}, combinations={}",
            start_time.elapsed(),
            summary.pool,
            summary.combinations
        );
        Ok(summary)
    }

    /// Produce a different batch from the same pool.
    ///
    /// The pool is shuffled with `seed` before generation, which changes
    /// which of several equally scored bundles win and which bundles the
    /// per-size cap lets through. Same seed, same batch.
    pub fn regenerate(&mut self, seed: u64) -> Result<&[Combination]> {
        let preferences = self.preferences.clone().ok_or(SessionError::NoSearch)?;
        if !preferences.wants_combinations() {
            return Err(SessionError::NotCombinationMode);
        }

        let mut shuffled = self.pool.clone();
        let mut rng = StdRng::seed_from_u64(seed);
        shuffled.shuffle(&mut rng);

        self.combinations = self.build_combinations(&shuffled, &preferences);
        self.history.clear();
        info!(
            "Regenerated {} combinations with seed {}",
            self.combinations.len(),
            seed
        );
        Ok(self.combinations.as_slice())
    }

    /// Swap `movie_id` out of combination `combination_index` for an unused
    /// movie of similar length.
    ///
    /// The slot's history grows only when a substitute is applied.
    pub fn replace_movie(&mut self, combination_index: usize, movie_id: MovieId) -> Result<ReplaceOutcome> {
        let combination = self.combinations.get(combination_index).ok_or(
            SessionError::UnknownCombination {
                index: combination_index,
                available: self.combinations.len(),
            },
        )?;
        let position = combination
            .position_of(movie_id)
            .ok_or(SessionError::MovieNotInCombination {
                movie_id,
                index: combination_index,
            })?;
        let original = combination.movies[position].clone();

        let slot = SlotKey::new(combination_index, position);
        let excluded = self.history.excluded_for(slot, &self.combinations);

        let Some(added) = self.finder.find(&original, &self.pool, &excluded).cloned() else {
            info!(
                "No replacement for \"{}\" in combination {}",
                original.title, combination_index
            );
            return Ok(ReplaceOutcome::NoReplacement);
        };

        self.combinations[combination_index].replace_at(position, added.clone());
        self.history.record_replaced(slot, original.id);
        info!(
            "Replaced \"{}\" with \"{}\" in combination {}",
            original.title, added.title, combination_index
        );

        Ok(ReplaceOutcome::Replaced {
            removed: original,
            added,
        })
    }

    /// Record `movie_id` as watched, then repair whatever was showing it.
    ///
    /// A movie marked without "might watch again" also leaves the pool, so
    /// no later replacement can bring it back.
    pub fn mark_watched(
        &mut self,
        movie_id: MovieId,
        might_watch_again: bool,
        history: &mut dyn WatchHistory,
    ) -> Result<ReplaceOutcome> {
        history.mark_watched(movie_id, might_watch_again)?;
        if history.should_exclude(movie_id) {
            self.pool.retain(|movie| movie.id != movie_id);
        }

        if self.is_combination_mode() {
            match self.combinations.iter().position(|c| c.contains(movie_id)) {
                Some(index) => self.replace_movie(index, movie_id),
                None => Ok(ReplaceOutcome::NotShown),
            }
        } else {
            Ok(self.replace_listed(movie_id))
        }
    }

    fn replace_listed(&mut self, movie_id: MovieId) -> ReplaceOutcome {
        let Some(position) = self.listed.iter().position(|m| m.id == movie_id) else {
            return ReplaceOutcome::NotShown;
        };

        let excluded: HashSet<MovieId> = self
            .listed
            .iter()
            .map(|m| m.id)
            .filter(|&id| id != movie_id)
            .collect();
        let original = &self.listed[position];

        match self.finder.find(original, &self.pool, &excluded).cloned() {
            Some(added) => {
                let removed = std::mem::replace(&mut self.listed[position], added.clone());
                debug!("Replaced \"{}\" with \"{}\" in list", removed.title, added.title);
                ReplaceOutcome::Replaced { removed, added }
            }
            None => {
                let removed = self.listed.remove(position);
                debug!("Removed \"{}\" from list, nothing similar left", removed.title);
                ReplaceOutcome::Removed(removed)
            }
        }
    }

    fn build_combinations(&self, pool: &[Movie], preferences: &Preferences) -> Vec<Combination> {
        let hours = preferences.total_hours.unwrap_or_default();
        if preferences.streaming_providers.is_empty() {
            self.generator.generate(pool, hours, self.combination_count)
        } else {
            self.generator
                .generate_per_provider(pool, hours, &preferences.streaming_providers, &self.directory)
        }
    }
}
