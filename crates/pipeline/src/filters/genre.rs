//! Filter to keep only movies in the selected genres.

use crate::context::FilterContext;
use crate::traits::Filter;
use anyhow::Result;
use catalog::Movie;

/// Keeps movies that carry every selected genre.
///
/// With no genres selected every movie passes.
pub struct GenreFilter;

impl Filter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let wanted = &context.preferences.genres;
        if wanted.is_empty() {
            return Ok(movies);
        }

        let filtered: Vec<Movie> = movies
            .into_iter()
            .filter(|movie| wanted.iter().all(|genre| movie.genre_ids.contains(genre)))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Preferences;

    fn movie(id: u32, genres: Vec<u32>) -> Movie {
        let mut movie = Movie::new(id, format!("Movie {id}"), Some(100), 7.0);
        movie.genre_ids = genres;
        movie
    }

    #[test]
    fn test_requires_all_selected_genres() {
        let context = FilterContext::new(Preferences {
            genres: vec![28, 878],
            ..Preferences::default()
        });

        let movies = vec![
            movie(1, vec![28, 878, 12]),
            movie(2, vec![28]),
            movie(3, vec![878]),
            movie(4, vec![]),
        ];

        let filtered = GenreFilter.apply(movies, &context).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_no_selection_keeps_everything() {
        let context = FilterContext::new(Preferences::default());
        let filtered = GenreFilter
            .apply(vec![movie(1, vec![]), movie(2, vec![18])], &context)
            .unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
