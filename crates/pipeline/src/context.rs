//! User preferences and the context filters run against.
//!
//! Preferences are what the user typed into the filter panel. The
//! [`FilterContext`] adds the watch-history lookups the filters need, so
//! the pipeline never touches the history store directly.

use catalog::{GenreId, MovieId, WatchHistory};
use std::collections::HashSet;

/// Which original languages to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguagePreference {
    English,
    International,
    #[default]
    All,
}

/// A language the user can pick by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub id: &'static str,
    pub name: &'static str,
    /// ISO 639-1 code; empty for the catch-all "other" entry
    pub code: &'static str,
}

pub const LANGUAGE_OPTIONS: &[LanguageOption] = &[
    LanguageOption { id: "spanish", name: "Spanish", code: "es" },
    LanguageOption { id: "french", name: "French", code: "fr" },
    LanguageOption { id: "german", name: "German", code: "de" },
    LanguageOption { id: "italian", name: "Italian", code: "it" },
    LanguageOption { id: "japanese", name: "Japanese", code: "ja" },
    LanguageOption { id: "korean", name: "Korean", code: "ko" },
    LanguageOption { id: "chinese", name: "Chinese", code: "zh" },
    LanguageOption { id: "hindi", name: "Hindi", code: "hi" },
    LanguageOption { id: "portuguese", name: "Portuguese", code: "pt" },
    LanguageOption { id: "other", name: "Other", code: "" },
];

/// Everything the user can filter on
#[derive(Debug, Clone, Default)]
pub struct Preferences {
    /// Movies must carry every one of these genres
    pub genres: Vec<GenreId>,
    /// Minimum average rating on the 0-10 scale
    pub min_score: f32,
    pub language: LanguagePreference,
    /// Ids from [`LANGUAGE_OPTIONS`] narrowing the non-English side
    pub international_languages: Vec<String>,
    /// Internal provider ids such as "netflix"
    pub streaming_providers: Vec<String>,
    pub from_year: Option<u16>,
    pub to_year: Option<u16>,
    /// Viewing-time budget. When set and positive, results are bundles.
    pub total_hours: Option<f64>,
}

impl Preferences {
    /// Whether these preferences ask for bundles rather than a list
    pub fn wants_combinations(&self) -> bool {
        self.total_hours.is_some_and(|hours| hours > 0.0)
    }
}

/// Preferences plus the ids the user never wants suggested
#[derive(Debug, Clone, Default)]
pub struct FilterContext {
    pub preferences: Preferences,
    pub excluded_movies: HashSet<MovieId>,
}

impl FilterContext {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            preferences,
            excluded_movies: HashSet::new(),
        }
    }
}

/// Build a [`FilterContext`] from preferences and the user's watch history.
///
/// A watched movie is excluded unless it was marked "might watch again".
pub fn build_filter_context(preferences: &Preferences, history: &dyn WatchHistory) -> FilterContext {
    let excluded_movies = history
        .all()
        .into_iter()
        .filter(|watched| !watched.might_watch_again)
        .map(|watched| watched.id)
        .collect();

    FilterContext {
        preferences: preferences.clone(),
        excluded_movies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::InMemoryWatchHistory;

    #[test]
    fn test_build_filter_context() {
        let mut history = InMemoryWatchHistory::new();
        history.mark_watched(1, false).unwrap();
        history.mark_watched(2, true).unwrap();

        let context = build_filter_context(&Preferences::default(), &history);
        assert!(context.excluded_movies.contains(&1));
        assert!(!context.excluded_movies.contains(&2));
    }

    #[test]
    fn test_wants_combinations() {
        let mut preferences = Preferences::default();
        assert!(!preferences.wants_combinations());

        preferences.total_hours = Some(0.0);
        assert!(!preferences.wants_combinations());

        preferences.total_hours = Some(3.5);
        assert!(preferences.wants_combinations());
    }
}
