//! Parser for catalog JSON files.
//!
//! The catalog file mirrors the shape of a movie-discovery API response
//! that has already been enriched with runtimes and provider data:
//!
//! ```json
//! { "movies": [ { "id": 550, "title": "Fight Club", "runtime": 139,
//!                 "vote_average": 8.4, "vote_count": 27000,
//!                 "original_language": "en", "release_date": "1999-10-15",
//!                 "genre_ids": [18], "available_on": [8, 9] } ] }
//! ```

use crate::error::{CatalogError, Result};
use crate::types::{GenreId, Movie, MovieId, ProviderId};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    movies: Vec<MovieRecord>,
}

/// One movie as it appears on disk
#[derive(Debug, Deserialize)]
struct MovieRecord {
    id: MovieId,
    title: String,
    #[serde(default)]
    runtime: Option<u32>,
    vote_average: f32,
    #[serde(default)]
    vote_count: Option<u32>,
    #[serde(default)]
    original_language: String,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    genre_ids: Vec<GenreId>,
    #[serde(default)]
    available_on: Vec<ProviderId>,
}

/// Read and parse a catalog file from disk
pub fn parse_catalog_file(path: &Path) -> Result<Vec<Movie>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;
    parse_catalog_str(&content, &path.display().to_string())
}

/// Parse catalog JSON that is already in memory.
///
/// `source` is only used to label errors.
pub fn parse_catalog_str(content: &str, source: &str) -> Result<Vec<Movie>> {
    let file: CatalogFile = serde_json::from_str(content).map_err(|e| CatalogError::ParseError {
        file: source.to_string(),
        reason: e.to_string(),
    })?;

    file.movies.into_iter().map(into_movie).collect()
}

fn into_movie(record: MovieRecord) -> Result<Movie> {
    if !(0.0..=10.0).contains(&record.vote_average) {
        return Err(CatalogError::InvalidValue {
            movie_id: record.id,
            field: "vote_average".to_string(),
            value: record.vote_average.to_string(),
        });
    }

    let release_year = match record.release_date.as_deref() {
        None | Some("") => None,
        Some(date) => Some(parse_release_year(date).ok_or_else(|| CatalogError::InvalidValue {
            movie_id: record.id,
            field: "release_date".to_string(),
            value: date.to_string(),
        })?),
    };

    Ok(Movie {
        id: record.id,
        title: record.title,
        runtime: record.runtime,
        vote_average: record.vote_average,
        vote_count: record.vote_count,
        original_language: record.original_language,
        release_year,
        genre_ids: record.genre_ids,
        available_on: record.available_on,
    })
}

/// Extract the year from a "YYYY-MM-DD" date (a bare "YYYY" is accepted too)
pub fn parse_release_year(date: &str) -> Option<u16> {
    let year = date.split('-').next()?;
    if year.len() != 4 {
        return None;
    }
    year.parse().ok()
}
