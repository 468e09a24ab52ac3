//! Per-slot replacement history.
//!
//! Every movie that has been swapped out of a slot is remembered so the
//! replacer can never hand it back to that slot. A slot is addressed by the
//! bundle's index in the displayed batch and the movie's position inside
//! the bundle; repairs swap in place, so positions don't drift.
//!
//! The history belongs to one displayed batch. Throw it away (or
//! [`clear`](ExclusionHistory::clear) it) whenever a fresh batch is generated.

use crate::types::Combination;
use catalog::MovieId;
use std::collections::{HashMap, HashSet};

/// Address of one movie inside a displayed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub combination: usize,
    pub position: usize,
}

impl SlotKey {
    pub fn new(combination: usize, position: usize) -> Self {
        Self { combination, position }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExclusionHistory {
    slots: HashMap<SlotKey, Vec<MovieId>>,
}

impl ExclusionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids swapped out of `slot`, oldest first
    pub fn replaced_in(&self, slot: SlotKey) -> &[MovieId] {
        self.slots.get(&slot).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Remember that `movie_id` was swapped out of `slot`
    pub fn record_replaced(&mut self, slot: SlotKey, movie_id: MovieId) {
        self.slots.entry(slot).or_default().push(movie_id);
    }

    /// Everything the replacer must avoid for `slot`: every id currently
    /// shown in any bundle plus the slot's own history
    pub fn excluded_for(&self, slot: SlotKey, displayed: &[Combination]) -> HashSet<MovieId> {
        let mut excluded = displayed_ids(displayed);
        excluded.extend(self.replaced_in(slot).iter().copied());
        excluded
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that have seen at least one replacement
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Every movie id across a batch of bundles
pub fn displayed_ids(combinations: &[Combination]) -> HashSet<MovieId> {
    combinations.iter().flat_map(|c| c.movie_ids()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Movie;

    fn combination(ids: &[MovieId]) -> Combination {
        Combination::new(
            ids.iter()
                .map(|&id| Movie::new(id, format!("Movie {id}"), Some(60), 7.0))
                .collect(),
        )
    }

    #[test]
    fn test_record_and_read() {
        let mut history = ExclusionHistory::new();
        let slot = SlotKey::new(0, 1);

        assert!(history.replaced_in(slot).is_empty());
        history.record_replaced(slot, 10);
        history.record_replaced(slot, 11);

        assert_eq!(history.replaced_in(slot), &[10, 11]);
        assert!(history.replaced_in(SlotKey::new(1, 0)).is_empty());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_slots_are_independent() {
        let mut history = ExclusionHistory::new();
        history.record_replaced(SlotKey::new(0, 0), 1);
        history.record_replaced(SlotKey::new(0, 1), 2);
        history.record_replaced(SlotKey::new(1, 0), 3);

        assert_eq!(history.replaced_in(SlotKey::new(0, 0)), &[1]);
        assert_eq!(history.replaced_in(SlotKey::new(0, 1)), &[2]);
        assert_eq!(history.replaced_in(SlotKey::new(1, 0)), &[3]);
    }

    #[test]
    fn test_excluded_for_unions_display_and_history() {
        let mut history = ExclusionHistory::new();
        let slot = SlotKey::new(0, 0);
        history.record_replaced(slot, 99);
        history.record_replaced(SlotKey::new(1, 0), 77);

        let displayed = vec![combination(&[1, 2]), combination(&[3])];
        let excluded = history.excluded_for(slot, &displayed);

        let expected: HashSet<MovieId> = [1, 2, 3, 99].into_iter().collect();
        assert_eq!(excluded, expected);
    }

    #[test]
    fn test_clear() {
        let mut history = ExclusionHistory::new();
        history.record_replaced(SlotKey::new(0, 0), 1);
        history.clear();
        assert!(history.is_empty());
    }
}
