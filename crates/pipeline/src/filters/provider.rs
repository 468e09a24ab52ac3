//! Filter to movies streaming on the selected services.

use crate::context::FilterContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::{Movie, ProviderDirectory};

/// Keeps movies available on at least one selected provider.
///
/// Selections the directory can't resolve are ignored; if none resolve,
/// every movie passes.
pub struct ProviderFilter {
    directory: ProviderDirectory,
}

impl ProviderFilter {
    pub fn new(directory: ProviderDirectory) -> Self {
        Self { directory }
    }
}

impl Filter for ProviderFilter {
    fn name(&self) -> &str {
        "ProviderFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let catalog_ids = self
            .directory
            .catalog_ids(&context.preferences.streaming_providers);
        if catalog_ids.is_empty() {
            return Ok(movies);
        }

        let filtered: Vec<Movie> = movies
            .into_iter()
            .filter(|movie| catalog_ids.iter().any(|&id| movie.is_available_on(id)))
            .collect();
        Ok(filtered)
    }
}
