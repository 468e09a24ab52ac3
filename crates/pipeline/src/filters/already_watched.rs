//! Filter to remove movies the user has already watched.
//!
//! This is typically the first filter in the pipeline, as there's no
//! point in suggesting movies the user has already seen.

use crate::context::FilterContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Movie;

/// Removes movies listed in `FilterContext.excluded_movies`.
///
/// Movies marked "might watch again" never make it into that set, so
/// they pass.
pub struct AlreadyWatchedFilter;

impl Filter for AlreadyWatchedFilter {
    fn name(&self) -> &str {
        "AlreadyWatchedFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let filtered: Vec<Movie> = movies
            .into_iter()
            .filter(|movie| !context.excluded_movies.contains(&movie.id))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Preferences;

    #[test]
    fn test_already_watched_filter() {
        let mut context = FilterContext::new(Preferences::default());
        context.excluded_movies.insert(100);
        context.excluded_movies.insert(200);

        let movies = vec![
            Movie::new(100, "Seen", Some(90), 7.0),
            Movie::new(101, "Fresh", Some(90), 7.0),
            Movie::new(200, "Seen too", Some(90), 7.0),
            Movie::new(300, "Also fresh", Some(90), 7.0),
        ];

        let filtered = AlreadyWatchedFilter.apply(movies, &context).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, 101);
        assert_eq!(filtered[1].id, 300);
    }
}
