//! Core domain types for the movie catalog.
//!
//! A [`Movie`] is the candidate record that every other crate works with:
//! the filters narrow a list of them, the bundler sums their runtimes and
//! averages their ratings, and the session displays them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a movie (the catalog's own id)
pub type MovieId = u32;

/// Catalog-side identifier of a streaming provider (e.g. 8 for Netflix)
pub type ProviderId = u32;

/// Catalog-side identifier of a genre (e.g. 28 for Action)
pub type GenreId = u32;

// =============================================================================
// Movie
// =============================================================================

/// A movie as the rest of the system sees it.
///
/// Immutable once loaded; the bundler and session clone it into
/// combinations rather than holding references into the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Runtime in minutes.
    ///
    /// `None` or `Some(0)` means the runtime is unknown; such movies are
    /// never placed into a combination.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Average audience rating on a 0-10 scale
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: Option<u32>,
    /// ISO 639-1 code such as "en" or "ko"
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub release_year: Option<u16>,
    #[serde(default)]
    pub genre_ids: Vec<GenreId>,
    /// Providers that stream this movie as part of a subscription
    #[serde(default)]
    pub available_on: Vec<ProviderId>,
}

impl Movie {
    /// Build a movie with only the fields the combination engine cares about.
    pub fn new(id: MovieId, title: impl Into<String>, runtime: Option<u32>, vote_average: f32) -> Self {
        Self {
            id,
            title: title.into(),
            runtime,
            vote_average,
            vote_count: None,
            original_language: String::new(),
            release_year: None,
            genre_ids: Vec::new(),
            available_on: Vec::new(),
        }
    }

    /// Runtime in minutes, if it is known and positive
    pub fn known_runtime(&self) -> Option<u32> {
        self.runtime.filter(|&minutes| minutes > 0)
    }

    pub fn is_available_on(&self, provider: ProviderId) -> bool {
        self.available_on.contains(&provider)
    }

    pub fn is_english(&self) -> bool {
        self.original_language == "en"
    }
}

// =============================================================================
// Catalog - the in-memory movie store
// =============================================================================

/// Holds every known movie plus a couple of secondary indices.
///
/// Insertion order is preserved so that anything derived from the
/// catalog (filter output, generator input) is deterministic.
#[derive(Debug, Default)]
pub struct Catalog {
    pub(crate) movies: HashMap<MovieId, Movie>,
    /// Movie ids in the order they were first inserted
    pub(crate) order: Vec<MovieId>,
    /// Movies grouped by streaming provider
    pub(crate) provider_index: HashMap<ProviderId, Vec<MovieId>>,
    /// Movies grouped by genre (one movie can appear in multiple lists)
    pub(crate) genre_index: HashMap<GenreId, Vec<MovieId>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All movies in insertion order
    pub fn movies(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.order.iter().filter_map(|id| self.movies.get(id))
    }

    /// Owned copy of every movie, in insertion order.
    ///
    /// This is what gets handed to the filter pipeline.
    pub fn pool(&self) -> Vec<Movie> {
        self.movies().cloned().collect()
    }

    pub fn get_movies_by_provider(&self, provider: ProviderId) -> &[MovieId] {
        self.provider_index
            .get(&provider)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn get_movies_by_genre(&self, genre: GenreId) -> &[MovieId] {
        self.genre_index
            .get(&genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Insert a movie and update the secondary indices.
    ///
    /// Re-inserting an existing id replaces the stored record but keeps its
    /// original position.
    pub fn insert_movie(&mut self, movie: Movie) {
        if let Some(previous) = self.movies.remove(&movie.id) {
            self.unindex(&previous);
        } else {
            self.order.push(movie.id);
        }

        for &provider in &movie.available_on {
            self.provider_index.entry(provider).or_default().push(movie.id);
        }
        for &genre in &movie.genre_ids {
            self.genre_index.entry(genre).or_default().push(movie.id);
        }
        self.movies.insert(movie.id, movie);
    }

    fn unindex(&mut self, movie: &Movie) {
        for provider in &movie.available_on {
            if let Some(ids) = self.provider_index.get_mut(provider) {
                ids.retain(|&id| id != movie.id);
            }
        }
        for genre in &movie.genre_ids {
            if let Some(ids) = self.genre_index.get_mut(genre) {
                ids.retain(|&id| id != movie.id);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
