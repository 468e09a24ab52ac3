//! # Catalog Crate
//!
//! Movie data and the stores that sit around it.
//!
//! ## Main Components
//!
//! - **types**: `Movie` and the in-memory `Catalog`
//! - **parser**: Parse catalog JSON files into `Movie` records
//! - **index**: Build a `Catalog` with provider and genre indices
//! - **providers**: Streaming provider directory
//! - **watch_history**: Watched-movie stores (in-memory and JSON file)
//! - **error**: Error types for loading and saving
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, JsonWatchHistory, WatchHistory};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/catalog.json"))?;
//! let history = JsonWatchHistory::open("data/watched.json")?;
//!
//! let unseen = catalog.movies().filter(|m| !history.should_exclude(m.id)).count();
//! println!("{unseen} movies left to watch");
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod providers;
pub mod watch_history;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{Catalog, GenreId, Movie, MovieId, ProviderId};
pub use providers::{ProviderDirectory, StreamingProvider, STREAMING_PROVIDERS};
pub use watch_history::{InMemoryWatchHistory, JsonWatchHistory, WatchHistory, WatchedMovie};
