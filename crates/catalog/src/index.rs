//! Catalog building from parsed records.

use crate::error::Result;
use crate::parser;
use crate::types::{Catalog, Movie};
use std::path::Path;
use tracing::{info, warn};

impl Catalog {
    /// Load a catalog from a JSON file.
    ///
    /// Steps:
    /// 1. Parse and validate every record
    /// 2. Insert them in file order, building the provider and genre indices
    /// 3. Report how many movies can take part in combinations
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {}", path.display());
        let movies = parser::parse_catalog_file(path)?;
        let catalog = Self::from_movies(movies);

        let with_runtime = catalog
            .movies()
            .filter(|m| m.known_runtime().is_some())
            .count();
        info!(
            "Loaded {} movies ({} with a known runtime)",
            catalog.len(),
            with_runtime
        );
        Ok(catalog)
    }

    /// Build a catalog from movies that are already in memory
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut catalog = Catalog::new();
        for movie in movies {
            if catalog.get_movie(movie.id).is_some() {
                warn!("Duplicate movie id {} in catalog, keeping the later record", movie.id);
            }
            catalog.insert_movie(movie);
        }
        catalog
    }
}
