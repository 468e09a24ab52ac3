//! # Bundler Crate
//!
//! The movie-night combination engine.
//!
//! ## Components
//!
//! ### Combination Generator
//! Bounded subset search over a candidate pool:
//! - Bundles of 1-5 movies whose runtimes sum to within ±30 minutes of a target
//! - Ranked by `0.3 * time accuracy + 0.7 * rating`
//! - Selected so that no movie appears in two bundles
//! - Optional per-provider partition, 3 bundles per streaming service
//!
//! ### Combination Replacer
//! Swaps one movie in a displayed bundle for an unused movie of similar
//! length (±15 minutes, widened once to ±30).
//!
//! ### Exclusion History
//! Remembers what has already been rotated through each slot so the replacer
//! can't cycle back to a rejected movie.
//!
//! ## Example Usage
//!
//! ```ignore
//! use bundler::{CombinationGenerator, ExclusionHistory, SlotKey, find_replacement};
//!
//! let generator = CombinationGenerator::new();
//! let mut bundles = generator.generate(&pool, 3.0, 5);
//!
//! let mut history = ExclusionHistory::new();
//! let slot = SlotKey::new(0, 1);
//! let excluded = history.excluded_for(slot, &bundles);
//! let original = bundles[0].movies[1].clone();
//! if let Some(substitute) = find_replacement(&original, &pool, &excluded) {
//!     bundles[0].replace_at(1, substitute.clone());
//!     history.record_replaced(slot, original.id);
//! }
//! ```
//!
//! Everything here is synchronous and allocation-local: no I/O, no shared
//! state. Callers that keep bundles and history across user actions must
//! apply one replacement completely before starting the next.

pub mod types;
pub mod generator;
pub mod replacer;
pub mod history;
pub mod format;

// Re-export commonly used types
pub use types::{Band, Combination, ScoredCombination};
pub use generator::{
    CombinationGenerator, ProviderBatch, DEFAULT_COUNT, DEFAULT_MARGIN_MINUTES,
    MAX_COMBINATION_SIZE, PER_PROVIDER_COUNT, SIZE_CLASS_CAP,
};
pub use replacer::{find_replacement, ReplacementFinder, DEFAULT_RUNTIME_MINUTES, REPLACEMENT_MARGIN_MINUTES};
pub use history::{displayed_ids, ExclusionHistory, SlotKey};
pub use format::{format_runtime, summarize};
