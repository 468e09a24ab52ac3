//! Pipeline for filtering and ordering movie candidates.
//!
//! This crate provides:
//! - Preferences and the FilterContext filters read from
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Ordering of the surviving movies
//!
//! ## Architecture
//! The pipeline processes the catalog in stages:
//! 1. Filters remove unwanted movies (already watched, low rated, wrong
//!    genre, language, era or provider)
//! 2. The survivors are ordered by rating and capped
//! 3. The result is either listed directly or handed to the bundler
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_filter_context, order_movies, FilterPipeline, DEFAULT_POOL_LIMIT};
//! use catalog::ProviderDirectory;
//!
//! let context = build_filter_context(&preferences, &history);
//! let pipeline = FilterPipeline::for_preferences(ProviderDirectory::streaming_services());
//!
//! let filtered = pipeline.apply(catalog.pool(), &context)?;
//! let pool = order_movies(filtered, &preferences, DEFAULT_POOL_LIMIT);
//! ```

pub mod context;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ordering;

// Re-export main types
pub use context::{build_filter_context, FilterContext, LanguagePreference, Preferences, LANGUAGE_OPTIONS};
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use ordering::{order_movies, DEFAULT_POOL_LIMIT};
