//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a list of movies.

use crate::context::FilterContext;
use anyhow::Result;
use catalog::Movie;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec<Movie> and return a filtered Vec
/// - Filters must keep the relative order of the movies they let through
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a list of movies.
    ///
    /// # Arguments
    /// * `movies` - The movies to filter (takes ownership)
    /// * `context` - Preferences and excluded ids
    ///
    /// # Returns
    /// * `Ok(Vec<Movie>)` - The movies that passed
    /// * `Err` - If filtering fails
    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>>;
}
