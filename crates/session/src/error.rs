//! Errors surfaced by a movie-night session.
//!
//! "Nothing found" is never an error here: empty batches and missing
//! substitutes come back as values. These variants cover misuse by the
//! caller and failures in the stores around the session.

use catalog::{CatalogError, MovieId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No search has been run yet")]
    NoSearch,

    #[error("The current search has no viewing-time budget, so there are no combinations")]
    NotCombinationMode,

    #[error("Combination {index} does not exist ({available} displayed)")]
    UnknownCombination { index: usize, available: usize },

    #[error("Movie {movie_id} is not part of combination {index}")]
    MovieNotInCombination { movie_id: MovieId, index: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Filter(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
