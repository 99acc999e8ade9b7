#![forbid(unsafe_code)]

use rustc_hash::FxHashMap;

use crate::Automaton;
use crate::State;
use crate::StateIndex;
use crate::TargetSet;
use crate::compare_state_ids;

/// Incrementally constructs an [Automaton] from states that are identified by
/// their name, in any order.
///
/// Indices returned by the builder are only valid for the builder itself,
/// since [AutomatonBuilder::finish] sorts the states into canonical order.
#[derive(Default)]
pub struct AutomatonBuilder {
    states: Vec<State>,
    ids: FxHashMap<String, StateIndex>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the state with the given identifier, creating it when necessary.
    pub fn add_state(&mut self, id: &str) -> StateIndex {
        self.insert_state(id).0
    }

    /// Same as [AutomatonBuilder::add_state], but also returns whether the state was created.
    pub fn insert_state(&mut self, id: &str) -> (StateIndex, bool) {
        if let Some(&index) = self.ids.get(id) {
            return (index, false);
        }

        let index = StateIndex::new(self.states.len());
        self.states.push(State::new(id));
        self.ids.insert(id.to_string(), index);
        (index, true)
    }

    pub fn state(&self, index: StateIndex) -> &State {
        &self.states[index]
    }

    pub fn set_initial(&mut self, index: StateIndex, is_initial: bool) {
        self.states[index].set_initial(is_initial);
    }

    pub fn set_final(&mut self, index: StateIndex, is_final: bool) {
        self.states[index].set_final(is_final);
    }

    /// Sets the transitions of a state, in the order of the alphabet that is passed to `finish`.
    pub fn set_transitions(&mut self, index: StateIndex, transitions: Vec<TargetSet>) {
        self.states[index].set_transitions(transitions);
    }

    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Sorts the states into canonical order and returns the resulting automaton.
    pub fn finish(self, alphabet: Vec<String>) -> Automaton {
        let mut indexed: Vec<(usize, State)> = self.states.into_iter().enumerate().collect();
        indexed.sort_by(|(_, left), (_, right)| compare_state_ids(left.id(), right.id()));

        let mut permutation = vec![StateIndex::default(); indexed.len()];
        for (new_index, (old_index, _)) in indexed.iter().enumerate() {
            permutation[*old_index] = StateIndex::new(new_index);
        }

        let states = indexed
            .into_iter()
            .map(|(_, mut state)| {
                for targets in state.transitions_mut() {
                    *targets = targets.remap(|target| Some(permutation[target]));
                }
                state
            })
            .collect();

        Automaton::from_sorted_states(alphabet, states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sorts_states() {
        let mut builder = AutomatonBuilder::new();

        let b = builder.add_state("b");
        let ten = builder.add_state("10");
        let two = builder.add_state("2");
        assert_eq!(builder.insert_state("10"), (ten, false));
        assert_eq!(builder.num_of_states(), 3);

        builder.set_initial(b, true);
        builder.set_final(two, true);
        builder.set_transitions(b, vec![TargetSet::singleton(ten)]);
        builder.set_transitions(ten, vec![TargetSet::singleton(two)]);
        builder.set_transitions(two, vec![[b, two].into_iter().collect()]);

        let automaton = builder.finish(vec!["a".to_string()]);
        let ids: Vec<&str> = automaton.states().iter().map(|state| state.id()).collect();
        assert_eq!(ids, vec!["2", "10", "b"]);

        // The targets follow the states to their new position.
        let b = automaton.find_state("b").unwrap();
        let ten = automaton.find_state("10").unwrap();
        let two = automaton.find_state("2").unwrap();
        assert_eq!(automaton.state(b).transitions()[0], TargetSet::singleton(ten));
        assert_eq!(automaton.state(two).transitions()[0], [two, b].into_iter().collect());
        assert_eq!(automaton.initials(), &[b]);
        assert_eq!(automaton.finals(), &[two]);
    }
}
