#![forbid(unsafe_code)]

use std::fmt;
use std::slice::Iter;

use itertools::Itertools;

use crate::StateIndex;

/// The set of target states of a single transition, represented by a sorted
/// vector without duplicates.
///
/// States of an [crate::Automaton] are stored in canonical order, so sorting
/// by index also sorts the targets by their identifiers.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetSet {
    /// The internal storage with the invariant that the array is sorted.
    sorted_array: Vec<StateIndex>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a set only containing the given state.
    pub fn singleton(state: StateIndex) -> Self {
        Self {
            sorted_array: vec![state],
        }
    }

    /// Returns true iff the set contains the given state.
    pub fn contains(&self, state: StateIndex) -> bool {
        self.sorted_array.binary_search(&state).is_ok()
    }

    /// Inserts the given state, returns true iff it was not yet present.
    pub fn insert(&mut self, state: StateIndex) -> bool {
        if let Err(position) = self.sorted_array.binary_search(&state) {
            self.sorted_array.insert(position, state);
            return true;
        }

        false
    }

    /// Removes the given state, returns true iff it was present.
    pub fn remove(&mut self, state: StateIndex) -> bool {
        if let Ok(position) = self.sorted_array.binary_search(&state) {
            self.sorted_array.remove(position);
            return true;
        }

        false
    }

    /// Adds all states of the other set to this one.
    pub fn union_with(&mut self, other: &TargetSet) {
        if other.is_empty() {
            return;
        }

        // Both are sorted, so a merge keeps the invariant.
        self.sorted_array = self
            .sorted_array
            .iter()
            .merge(other.sorted_array.iter())
            .dedup()
            .copied()
            .collect();
    }

    /// Returns the smallest state in the set, the only one for deterministic transitions.
    pub fn first(&self) -> Option<StateIndex> {
        self.sorted_array.first().copied()
    }

    /// Returns an iterator over the states in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.sorted_array.iter().copied()
    }

    /// Returns the number of states in the set.
    pub fn len(&self) -> usize {
        self.sorted_array.len()
    }

    /// Returns true iff the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sorted_array.is_empty()
    }

    /// Applies the given renumbering to every state, dropping the states that are mapped to `None`.
    pub fn remap(&self, mapping: impl Fn(StateIndex) -> Option<StateIndex>) -> TargetSet {
        self.sorted_array.iter().filter_map(|&state| mapping(state)).collect()
    }
}

impl FromIterator<StateIndex> for TargetSet {
    fn from_iter<I: IntoIterator<Item = StateIndex>>(iter: I) -> Self {
        let mut sorted_array: Vec<StateIndex> = iter.into_iter().collect();
        sorted_array.sort_unstable();
        sorted_array.dedup();

        Self { sorted_array }
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a StateIndex;
    type IntoIter = Iter<'a, StateIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_array.iter()
    }
}

impl fmt::Debug for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}}}", self.sorted_array.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> TargetSet {
        indices.iter().map(|&index| StateIndex::new(index)).collect()
    }

    #[test]
    fn test_target_set_from_iter_sorts_and_deduplicates() {
        let targets = set(&[3, 1, 3, 2]);

        assert_eq!(targets.len(), 3);
        assert_eq!(targets.iter().map(|state| state.value()).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(targets.first(), Some(StateIndex::new(1)));
    }

    #[test]
    fn test_target_set_union() {
        let mut targets = set(&[1, 4]);
        targets.union_with(&set(&[0, 4, 5]));

        assert_eq!(targets, set(&[0, 1, 4, 5]));
    }

    #[test]
    fn test_target_set_insert_remove() {
        let mut targets = TargetSet::new();

        assert!(targets.insert(StateIndex::new(2)));
        assert!(!targets.insert(StateIndex::new(2)));
        assert!(targets.insert(StateIndex::new(0)));
        assert!(targets.contains(StateIndex::new(0)));

        assert!(targets.remove(StateIndex::new(2)));
        assert!(!targets.remove(StateIndex::new(2)));
        assert_eq!(targets, TargetSet::singleton(StateIndex::new(0)));
    }

    #[test]
    fn test_target_set_remap() {
        let targets = set(&[0, 1, 2]);
        let remapped = targets.remap(|state| if state.value() == 1 { None } else { Some(StateIndex::new(5 - state.value())) });

        assert_eq!(remapped, set(&[3, 5]));
    }
}
