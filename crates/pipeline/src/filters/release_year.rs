//! Filter on release year.

use crate::context::FilterContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Movie;

/// Keeps movies released within `[from_year, to_year]` (both inclusive,
/// either optional).
///
/// A movie with no known release year only passes when neither bound is set.
pub struct ReleaseYearFilter;

impl Filter for ReleaseYearFilter {
    fn name(&self) -> &str {
        "ReleaseYearFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let from = context.preferences.from_year;
        let to = context.preferences.to_year;
        if from.is_none() && to.is_none() {
            return Ok(movies);
        }

        let filtered: Vec<Movie> = movies
            .into_iter()
            .filter(|movie| match movie.release_year {
                Some(year) => from.is_none_or(|f| year >= f) && to.is_none_or(|t| year <= t),
                None => false,
            })
            .collect();

        Ok(filtered)
    }
}
