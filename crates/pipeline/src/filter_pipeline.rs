//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::context::FilterContext;
use crate::filters::{
    AlreadyWatchedFilter, GenreFilter, LanguageFilter, MinimumRatingFilter, ProviderFilter,
    ReleaseYearFilter,
};
use crate::traits::Filter;
use anyhow::Result;
use catalog::{Movie, ProviderDirectory};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyWatchedFilter)
///     .add_filter(MinimumRatingFilter::default())
///     .add_filter(GenreFilter);
///
/// let filtered = pipeline.apply(movies, &context)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Every preference filter, cheapest first.
    ///
    /// `directory` resolves the user's provider picks to catalog ids.
    pub fn for_preferences(directory: ProviderDirectory) -> Self {
        Self::new()
            .add_filter(AlreadyWatchedFilter)
            .add_filter(MinimumRatingFilter::default())
            .add_filter(GenreFilter)
            .add_filter(LanguageFilter)
            .add_filter(ReleaseYearFilter)
            .add_filter(ProviderFilter::new(directory))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence.
    ///
    /// # Returns
    /// * `Ok(Vec<Movie>)` - The movies left after all filters, in input order
    /// * `Err` - If any filter fails
    pub fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let mut current = movies;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
