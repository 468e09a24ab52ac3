//! Filter implementations for the movie pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_watched;
pub mod genre;
pub mod language;
pub mod minimum_rating;
pub mod provider;
pub mod release_year;

// Re-export for convenience
pub use already_watched::AlreadyWatchedFilter;
pub use genre::GenreFilter;
pub use language::LanguageFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use provider::ProviderFilter;
pub use release_year::ReleaseYearFilter;
