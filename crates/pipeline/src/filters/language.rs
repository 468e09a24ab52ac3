//! Filter on a movie's original language.
//!
//! ## Rules
//! - `English`: only "en"
//! - `International`: anything but "en", narrowed by the selected languages
//! - `All`: everything, unless languages are selected, in which case
//!   "en" plus the selected languages
//!
//! Selecting "other" admits every language that has no entry of its own
//! in [`LANGUAGE_OPTIONS`].

use crate::context::{FilterContext, LanguagePreference, Preferences, LANGUAGE_OPTIONS};
use crate::traits::Filter;
use anyhow::Result;
use catalog::Movie;

pub struct LanguageFilter;

/// What the selected international languages let through
#[derive(Debug, PartialEq)]
enum Narrowing {
    /// No usable selection
    Any,
    Codes(Vec<&'static str>),
    Unlisted,
    CodesOrUnlisted(Vec<&'static str>),
}

impl Narrowing {
    fn from_preferences(preferences: &Preferences) -> Self {
        let selected = &preferences.international_languages;
        let codes: Vec<&'static str> = selected
            .iter()
            .filter_map(|id| LANGUAGE_OPTIONS.iter().find(|option| option.id == id))
            .map(|option| option.code)
            .filter(|code| !code.is_empty())
            .collect();
        let has_other = selected.iter().any(|id| id == "other");

        match (codes.is_empty(), has_other) {
            (true, false) => Narrowing::Any,
            (false, false) => Narrowing::Codes(codes),
            (true, true) => Narrowing::Unlisted,
            (false, true) => Narrowing::CodesOrUnlisted(codes),
        }
    }

    fn admits(&self, language: &str) -> bool {
        match self {
            Narrowing::Any => true,
            Narrowing::Codes(codes) => codes.contains(&language),
            Narrowing::Unlisted => is_unlisted(language),
            Narrowing::CodesOrUnlisted(codes) => codes.contains(&language) || is_unlisted(language),
        }
    }
}

fn is_unlisted(language: &str) -> bool {
    !LANGUAGE_OPTIONS
        .iter()
        .any(|option| !option.code.is_empty() && option.code == language)
}

impl Filter for LanguageFilter {
    fn name(&self) -> &str {
        "LanguageFilter"
    }

    fn apply(&self, movies: Vec<Movie>, context: &FilterContext) -> Result<Vec<Movie>> {
        let preferences = &context.preferences;
        let narrowing = Narrowing::from_preferences(preferences);

        let filtered: Vec<Movie> = match preferences.language {
            LanguagePreference::English => movies.into_iter().filter(|m| m.is_english()).collect(),
            LanguagePreference::International => movies
                .into_iter()
                .filter(|m| !m.is_english() && narrowing.admits(&m.original_language))
                .collect(),
            LanguagePreference::All if narrowing == Narrowing::Any => movies,
            LanguagePreference::All => movies
                .into_iter()
                .filter(|m| m.is_english() || narrowing.admits(&m.original_language))
                .collect(),
        };
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movies() -> Vec<Movie> {
        ["en", "ko", "fr", "tl", "ja"]
            .iter()
            .enumerate()
            .map(|(i, lang)| {
                let mut movie = Movie::new(i as u32 + 1, format!("Movie {lang}"), Some(100), 7.0);
                movie.original_language = lang.to_string();
                movie
            })
            .collect()
    }

    fn languages(language: LanguagePreference, selected: &[&str]) -> Vec<String> {
        let context = FilterContext::new(Preferences {
            language,
            international_languages: selected.iter().map(|s| s.to_string()).collect(),
            ..Preferences::default()
        });
        LanguageFilter
            .apply(movies(), &context)
            .unwrap()
            .into_iter()
            .map(|m| m.original_language)
            .collect()
    }

    #[test]
    fn test_english_only() {
        assert_eq!(languages(LanguagePreference::English, &["korean"]), vec!["en"]);
    }

    #[test]
    fn test_international() {
        assert_eq!(
            languages(LanguagePreference::International, &[]),
            vec!["ko", "fr", "tl", "ja"]
        );
        assert_eq!(
            languages(LanguagePreference::International, &["korean", "japanese"]),
            vec!["ko", "ja"]
        );
        // Tagalog has no option of its own, so it counts as "other"
        assert_eq!(languages(LanguagePreference::International, &["other"]), vec!["tl"]);
        assert_eq!(
            languages(LanguagePreference::International, &["french", "other"]),
            vec!["fr", "tl"]
        );
    }

    #[test]
    fn test_all() {
        assert_eq!(languages(LanguagePreference::All, &[]).len(), 5);
        assert_eq!(languages(LanguagePreference::All, &["korean"]), vec!["en", "ko"]);
        assert_eq!(languages(LanguagePreference::All, &["other"]), vec!["en", "tl"]);
    }

    #[test]
    fn test_unknown_selection_is_ignored() {
        assert_eq!(languages(LanguagePreference::All, &["klingon"]).len(), 5);
    }
}
