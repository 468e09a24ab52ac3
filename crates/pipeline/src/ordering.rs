//! Ordering of filtered movies before they are listed or bundled.
//!
//! ## Algorithm
//! 1. Stable sort by rating, best first
//! 2. When the user asked for all languages but picked specific
//!    international ones, alternate English and international picks
//!    (English first) so neither side crowds out the other
//! 3. Cap the list at `limit`

use crate::context::{LanguagePreference, Preferences};
use catalog::Movie;

/// Movies handed onward after ordering
pub const DEFAULT_POOL_LIMIT: usize = 150;

pub fn order_movies(movies: Vec<Movie>, preferences: &Preferences, limit: usize) -> Vec<Movie> {
    let interleave = preferences.language == LanguagePreference::All
        && !preferences.international_languages.is_empty();

    let mut ordered = if interleave {
        let (english, international): (Vec<Movie>, Vec<Movie>) =
            movies.into_iter().partition(|m| m.is_english());
        alternate(by_rating(english), by_rating(international))
    } else {
        by_rating(movies)
    };

    ordered.truncate(limit);
    ordered
}

fn by_rating(mut movies: Vec<Movie>) -> Vec<Movie> {
    movies.sort_by(|a, b| b.vote_average.total_cmp(&a.vote_average));
    movies
}

fn alternate(first: Vec<Movie>, second: Vec<Movie>) -> Vec<Movie> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();

    loop {
        let a = first.next();
        let b = second.next();
        if a.is_none() && b.is_none() {
            break;
        }
        merged.extend(a);
        merged.extend(b);
    }
    merged
}
