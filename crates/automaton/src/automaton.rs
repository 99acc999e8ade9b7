#![forbid(unsafe_code)]

//! The automaton type, its invariants and the operations on its state set.

use std::fmt;
use std::str::FromStr;

use log::debug;
use log::trace;
use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::State;
use crate::StateIndex;
use crate::StateNotFoundError;
use crate::SymbolIndex;
use crate::ValidationError;
use crate::compare_state_ids;
use crate::is_epsilon;

/// The kind of an automaton, as written in the heading of the text format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AutomatonKind {
    /// Nondeterministic finite automaton.
    Nfa,
    /// Deterministic finite automaton.
    Dfa,
}

impl fmt::Display for AutomatonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AutomatonKind::Nfa => write!(f, "NFA"),
            AutomatonKind::Dfa => write!(f, "DFA"),
        }
    }
}

impl FromStr for AutomatonKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NFA" => Ok(AutomatonKind::Nfa),
            "DFA" => Ok(AutomatonKind::Dfa),
            _ => Err(()),
        }
    }
}

/// A finite automaton over string symbols.
///
/// # Details
///
/// The states are stored in an arena, sorted by [compare_state_ids], and
/// refer to each other by [StateIndex]. The sets of initial and final states
/// are derived from the state flags whenever the state set changes.
///
/// All transformations (`remove_epsilon`, `determinize`, `minimize` and
/// `normalize`) consume the automaton and build a new one, which also resets
/// the normalized flag unless the transformation was a no-op.
#[derive(Clone, Debug, Default)]
pub struct Automaton {
    alphabet: Vec<String>,
    states: Vec<State>,

    /// Derived from `states`.
    ids: FxHashMap<String, StateIndex>,
    initials: Vec<StateIndex>,
    finals: Vec<StateIndex>,

    normalized: bool,
}

impl Automaton {
    /// Creates an automaton from states that are already in canonical order,
    /// and whose transitions are given in the order of the alphabet.
    pub(crate) fn from_sorted_states(alphabet: Vec<String>, states: Vec<State>) -> Automaton {
        debug_assert!(
            states
                .windows(2)
                .all(|pair| compare_state_ids(pair[0].id(), pair[1].id()).is_le()),
            "States must be sorted by their identifier"
        );

        let mut automaton = Automaton {
            alphabet,
            states,
            ids: FxHashMap::default(),
            initials: Vec::new(),
            finals: Vec::new(),
            normalized: false,
        };
        automaton.update_states();
        automaton
    }

    /// Recomputes the identifier lookup and the initial and final states.
    fn update_states(&mut self) {
        self.ids = self
            .states
            .iter()
            .enumerate()
            .map(|(index, state)| (state.id().to_string(), StateIndex::new(index)))
            .collect();

        self.initials = self.iter_states().filter(|&index| self.states[index].is_initial()).collect();
        self.finals = self.iter_states().filter(|&index| self.states[index].is_final()).collect();
    }

    /// Returns the alphabet, in the order of the transition columns.
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    /// Returns the index of the given symbol in the alphabet.
    pub fn symbol_index(&self, symbol: &str) -> Option<SymbolIndex> {
        self.alphabet
            .iter()
            .position(|other| other == symbol)
            .map(SymbolIndex::new)
    }

    /// Returns all states in canonical order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, index: StateIndex) -> &State {
        &self.states[index]
    }

    /// Iterates over the indices of all states.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.states.len()).map(StateIndex::new)
    }

    /// Returns the index of the state with the given identifier.
    pub fn find_state(&self, id: &str) -> Option<StateIndex> {
        self.ids.get(id).copied()
    }

    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of (state, symbol, target) triples.
    pub fn num_of_transitions(&self) -> usize {
        self.states
            .iter()
            .flat_map(|state| state.transitions())
            .map(|targets| targets.len())
            .sum()
    }

    pub fn initials(&self) -> &[StateIndex] {
        &self.initials
    }

    pub fn finals(&self) -> &[StateIndex] {
        &self.finals
    }

    /// Returns true iff this automaton is the result of [Automaton::normalize]
    /// and has not been changed since.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub(crate) fn set_normalized(&mut self) {
        self.normalized = true;
    }

    /// Returns true iff there is exactly one initial state, the alphabet does
    /// not contain epsilon, and no symbol leads to more than one state.
    pub fn is_deterministic(&self) -> bool {
        self.initials.len() == 1
            && !self.alphabet.iter().any(|symbol| is_epsilon(symbol))
            && !self.states.iter().any(|state| state.has_multiple_transitions())
    }

    /// Returns the kind that describes the current structure.
    pub fn kind(&self) -> AutomatonKind {
        if self.is_deterministic() {
            AutomatonKind::Dfa
        } else {
            AutomatonKind::Nfa
        }
    }

    /// Checks the structural invariants of the automaton.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut symbols = FxHashSet::default();
        for symbol in &self.alphabet {
            if !symbols.insert(symbol.as_str()) {
                return Err(ValidationError::DuplicateSymbol(symbol.clone()));
            }
        }

        if self.initials.is_empty() {
            return Err(ValidationError::NoInitialState);
        }

        if self.finals.is_empty() {
            return Err(ValidationError::NoFinalState);
        }

        // Equal identifiers are adjacent since the states are sorted.
        if let Some(pair) = self.states.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(ValidationError::DuplicateState(pair[0].id().to_string()));
        }

        for state in &self.states {
            if state.transitions().is_empty() && !self.alphabet.is_empty() {
                return Err(ValidationError::UndefinedState(state.id().to_string()));
            }

            if state.transitions().len() != self.alphabet.len() {
                return Err(ValidationError::AlphabetMismatch {
                    state: state.id().to_string(),
                });
            }

            for targets in state.transitions() {
                if let Some(target) = targets.iter().find(|target| target.value() >= self.states.len()) {
                    return Err(ValidationError::DanglingTarget {
                        state: state.id().to_string(),
                        target: target.value(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Removes the state with the given identifier, together with all
    /// transitions into it.
    pub fn remove_state(&mut self, id: &str) -> Result<(), StateNotFoundError> {
        let index = self
            .find_state(id)
            .ok_or_else(|| StateNotFoundError::State(id.to_string()))?;

        let mut keep = vec![true; self.num_of_states()];
        keep[index] = false;

        let automaton = std::mem::take(self);
        *self = automaton.retain_states(&keep);
        Ok(())
    }

    /// Removes `target` from the transition of state `state` labelled with `symbol`.
    pub fn remove_transition(&mut self, state: &str, symbol: &str, target: &str) -> Result<(), StateNotFoundError> {
        let not_found = || StateNotFoundError::Transition {
            state: state.to_string(),
            symbol: symbol.to_string(),
            target: target.to_string(),
        };

        let symbol_index = self.symbol_index(symbol).ok_or_else(not_found)?;
        let state_index = self.find_state(state).ok_or_else(not_found)?;
        let target_index = self.find_state(target).ok_or_else(not_found)?;

        let removed = self.states[state_index]
            .transitions_mut()
            .get_mut(symbol_index.value())
            .is_some_and(|targets| targets.remove(target_index));

        if !removed {
            return Err(not_found());
        }

        self.normalized = false;
        Ok(())
    }

    /// Marks every state that can be reached from an initial state.
    pub fn reachable_states(&self) -> Vec<bool> {
        let mut reachable = vec![false; self.num_of_states()];
        let mut stack: Vec<StateIndex> = self.initials.clone();

        while let Some(state_index) = stack.pop() {
            if reachable[state_index] {
                continue;
            }
            reachable[state_index] = true;

            for targets in self.states[state_index].transitions() {
                stack.extend(targets.iter().filter(|&target| !reachable[target]));
            }
        }

        reachable
    }

    /// Removes all states that cannot be reached from an initial state.
    pub fn remove_unreachable_states(self) -> Automaton {
        let reachable = self.reachable_states();
        if reachable.iter().all(|&reachable| reachable) {
            return self;
        }

        let automaton = self.retain_states(&reachable);
        debug!("Removed unreachable states, {} states remain", automaton.num_of_states());
        automaton
    }

    /// Removes the states from which no final state can be reached, together
    /// with all transitions into them. Initial states are kept, so the result
    /// still has an initial state, but lose their transitions when they are
    /// dead themselves.
    pub fn remove_dead_states(self) -> Automaton {
        let mut predecessors: Vec<Vec<StateIndex>> = vec![Vec::new(); self.num_of_states()];
        for state_index in self.iter_states() {
            for targets in self.states[state_index].transitions() {
                for target in targets {
                    predecessors[*target].push(state_index);
                }
            }
        }

        let mut live = vec![false; self.num_of_states()];
        let mut stack: Vec<StateIndex> = self.finals.clone();
        while let Some(state_index) = stack.pop() {
            if live[state_index] {
                continue;
            }
            live[state_index] = true;

            stack.extend(predecessors[state_index].iter().filter(|&&predecessor| !live[predecessor]));
        }

        if live.iter().all(|&live| live) {
            return self;
        }

        let mut keep = live.clone();
        for &initial in &self.initials {
            keep[initial] = true;
        }

        let mut automaton = self;
        for state in &mut automaton.states {
            for targets in state.transitions_mut() {
                *targets = targets.remap(|target| live[target].then_some(target));
            }
        }

        let automaton = automaton.retain_states(&keep);
        debug!("Removed dead states, {} states remain", automaton.num_of_states());
        automaton
    }

    /// Keeps the states for which `keep` is true and drops all transitions
    /// into the other states.
    pub(crate) fn retain_states(self, keep: &[bool]) -> Automaton {
        debug_assert_eq!(keep.len(), self.num_of_states());

        let mut mapping: Vec<Option<StateIndex>> = vec![None; keep.len()];
        let mut num_kept = 0;
        for (index, _) in keep.iter().enumerate().filter(|(_, keep)| **keep) {
            mapping[index] = Some(StateIndex::new(num_kept));
            num_kept += 1;
        }

        let states: Vec<State> = self
            .states
            .into_iter()
            .zip(keep)
            .filter(|(_, keep)| **keep)
            .map(|(mut state, _)| {
                for targets in state.transitions_mut() {
                    *targets = targets.remap(|target| mapping[target]);
                }
                state
            })
            .collect();

        trace!("Retained {num_kept} states");
        Automaton::from_sorted_states(self.alphabet, states)
    }
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.alphabet == other.alphabet && self.states == other.states
    }
}

impl Eq for Automaton {}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;
    use test_log::test;

    fn parse(text: &str) -> Automaton {
        text.parse().unwrap()
    }

    #[test]
    fn test_is_deterministic() {
        let dfa = parse(indoc! {"
            DFA a b
            >1 2 -
            <2 - 2
        "});
        assert!(dfa.is_deterministic());
        assert_eq!(dfa.kind(), AutomatonKind::Dfa);

        let multiple_targets = parse(indoc! {"
            NFA a
            >1 1|2
            <2 -
        "});
        assert!(!multiple_targets.is_deterministic());

        let multiple_initials = parse(indoc! {"
            NFA a
            >1 2
            ><2 -
        "});
        assert!(!multiple_initials.is_deterministic());

        let epsilon = parse(indoc! {"
            NFA a ε
            >1 - 2
            <2 - -
        "});
        assert!(!epsilon.is_deterministic());
    }

    #[test]
    fn test_remove_state_purges_transitions() {
        let mut automaton = parse(indoc! {"
            NFA a b
            >1 1|2|3 3
            <2 - -
            <3 2 1
        "});

        automaton.remove_state("2").unwrap();

        assert_eq!(automaton.num_of_states(), 2);
        assert_eq!(automaton.find_state("2"), None);
        assert_eq!(automaton.finals().len(), 1);
        assert_eq!(automaton.to_string(), "NFA a b\n>1 1|3 3\n<3 - 1\n");
        automaton.validate().unwrap();

        assert_eq!(
            automaton.remove_state("2"),
            Err(StateNotFoundError::State("2".to_string()))
        );
    }

    #[test]
    fn test_remove_transition() {
        let mut automaton = parse(indoc! {"
            NFA a
            >1 1|2
            <2 -
        "});

        automaton.remove_transition("1", "a", "1").unwrap();
        assert!(automaton.is_deterministic());

        assert!(matches!(
            automaton.remove_transition("1", "a", "1"),
            Err(StateNotFoundError::Transition { .. })
        ));
        assert!(automaton.remove_transition("1", "b", "2").is_err());
        assert!(automaton.remove_transition("3", "a", "2").is_err());
    }

    #[test]
    fn test_remove_unreachable_states() {
        let automaton = parse(indoc! {"
            DFA a
            >1 2
            <2 2
            3 1
            4 4
        "});

        let reachable = automaton.remove_unreachable_states();

        assert_eq!(reachable.num_of_states(), 2);
        assert_eq!(reachable.to_string(), "DFA a\n>1 2\n<2 2\n");
    }

    #[test]
    fn test_remove_dead_states() {
        let automaton = parse(indoc! {"
            DFA a b
            >1 2 3
            <2 2 2
            3 4 3
            4 3 3
        "});

        let live = automaton.remove_dead_states();
        assert_eq!(live.to_string(), "DFA a b\n>1 2 -\n<2 2 2\n");

        // The initial state is kept, even when no final state is reachable from it.
        let empty = parse("NFA a\n>1 1\n<2 2\n").remove_dead_states();
        assert_eq!(empty.to_string(), "DFA a\n>1 -\n<2 2\n");

        let empty = parse("NFA a\n>1 3\n3 1\n<2 2\n").remove_dead_states();
        assert_eq!(empty.to_string(), "DFA a\n>1 -\n<2 2\n");
    }

    #[test]
    fn test_validate_missing_final_state() {
        let mut automaton = parse(indoc! {"
            NFA a
            >1 2
            <2 -
        "});

        automaton.remove_state("2").unwrap();
        assert_eq!(automaton.validate(), Err(ValidationError::NoFinalState));
    }

    #[test]
    fn test_validate_structure() {
        let alphabet = vec!["a".to_string()];

        let mismatch = Automaton::from_sorted_states(
            alphabet.clone(),
            vec![State::with_transitions(
                "1",
                true,
                true,
                vec![Default::default(), Default::default()],
            )],
        );
        assert!(matches!(
            mismatch.validate(),
            Err(ValidationError::AlphabetMismatch { .. })
        ));

        let dangling = Automaton::from_sorted_states(
            alphabet.clone(),
            vec![State::with_transitions(
                "1",
                true,
                true,
                vec![crate::TargetSet::singleton(StateIndex::new(4))],
            )],
        );
        assert_eq!(
            dangling.validate(),
            Err(ValidationError::DanglingTarget {
                state: "1".to_string(),
                target: 4
            })
        );

        let duplicate = Automaton::from_sorted_states(
            alphabet,
            vec![
                State::with_transitions("1", true, true, vec![Default::default()]),
                State::with_transitions("1", false, false, vec![Default::default()]),
            ],
        );
        assert_eq!(duplicate.validate(), Err(ValidationError::DuplicateState("1".to_string())));
    }
}
