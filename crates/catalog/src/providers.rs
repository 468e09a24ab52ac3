//! Streaming provider directory.
//!
//! Users pick services by a short internal id ("netflix"); movies in the
//! catalog list the catalog-side numeric ids they stream on. The directory
//! maps one to the other.

use crate::types::ProviderId;
use std::collections::HashMap;

/// A streaming service a user can choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamingProvider {
    pub id: &'static str,
    pub name: &'static str,
    pub catalog_id: ProviderId,
}

pub const STREAMING_PROVIDERS: &[StreamingProvider] = &[
    StreamingProvider { id: "netflix", name: "Netflix", catalog_id: 8 },
    StreamingProvider { id: "prime", name: "Prime", catalog_id: 9 },
    StreamingProvider { id: "hulu", name: "Hulu", catalog_id: 15 },
    StreamingProvider { id: "paramount", name: "Paramount", catalog_id: 531 },
    StreamingProvider { id: "hbo", name: "HBO", catalog_id: 384 },
    StreamingProvider { id: "disney", name: "Disney", catalog_id: 337 },
    StreamingProvider { id: "tubi", name: "Tubi", catalog_id: 283 },
    StreamingProvider { id: "peacock", name: "Peacock", catalog_id: 386 },
    StreamingProvider { id: "appletv", name: "AppleTV", catalog_id: 350 },
];

/// Maps internal provider ids to catalog provider ids
#[derive(Debug, Clone, Default)]
pub struct ProviderDirectory {
    entries: HashMap<String, ProviderId>,
}

impl ProviderDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory containing every known streaming service
    pub fn streaming_services() -> Self {
        let mut directory = Self::new();
        for provider in STREAMING_PROVIDERS {
            directory.insert(provider.id, provider.catalog_id);
        }
        directory
    }

    /// Directory restricted to the given internal ids.
    ///
    /// Unknown ids are skipped, which leaves them unmapped.
    pub fn for_selection<S: AsRef<str>>(ids: &[S]) -> Self {
        let mut directory = Self::new();
        for id in ids {
            if let Some(provider) = STREAMING_PROVIDERS.iter().find(|p| p.id == id.as_ref()) {
                directory.insert(provider.id, provider.catalog_id);
            }
        }
        directory
    }

    pub fn insert(&mut self, id: impl Into<String>, catalog_id: ProviderId) {
        self.entries.insert(id.into(), catalog_id);
    }

    pub fn lookup(&self, id: &str) -> Option<ProviderId> {
        self.entries.get(id).copied()
    }

    /// Catalog ids for a list of internal ids, skipping unmapped ones
    pub fn catalog_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<ProviderId> {
        ids.iter().filter_map(|id| self.lookup(id.as_ref())).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_services_lookup() {
        let directory = ProviderDirectory::streaming_services();
        assert_eq!(directory.len(), STREAMING_PROVIDERS.len());
        assert_eq!(directory.lookup("netflix"), Some(8));
        assert_eq!(directory.lookup("paramount"), Some(531));
        assert_eq!(directory.lookup("blockbuster"), None);
    }

    #[test]
    fn test_for_selection_skips_unknown() {
        let directory = ProviderDirectory::for_selection(&["hulu", "blockbuster", "tubi"]);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.catalog_ids(&["hulu", "blockbuster", "tubi"]), vec![15, 283]);
    }
}
