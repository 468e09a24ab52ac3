//! # Session Crate
//!
//! The stateful shell around the pure engines: runs searches through the
//! filter pipeline, hands the pool to the bundler, and keeps the displayed
//! results and exclusion history consistent while the user replaces movies
//! or marks them watched.
//!
//! ```ignore
//! use session::{MovieNightSession, ReplaceOutcome};
//!
//! let mut session = MovieNightSession::new(catalog);
//! session.search(preferences, &history)?;
//! if let ReplaceOutcome::Replaced { added, .. } = session.replace_movie(0, movie_id)? {
//!     println!("Try {} instead", added.title);
//! }
//! ```

pub mod error;
pub mod session;

pub use error::{Result, SessionError};
pub use session::{DEFAULT_LIST_LENGTH, MovieNightSession, ReplaceOutcome, SearchSummary};
