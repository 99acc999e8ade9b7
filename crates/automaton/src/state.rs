#![forbid(unsafe_code)]

use automin_utilities::TagIndex;

use crate::SymbolIndex;
use crate::TargetSet;

/// A unique type for the states.
pub struct StateTag;

/// The index of a state in the arena of an [crate::Automaton].
pub type StateIndex = TagIndex<usize, StateTag>;

/// A single state of an automaton.
///
/// The outgoing transitions are stored per alphabet symbol, addressed by the
/// [SymbolIndex] of the symbol in the owning automaton, and refer to other
/// states by their [StateIndex].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    id: String,
    is_initial: bool,
    is_final: bool,
    transitions: Vec<TargetSet>,
}

impl State {
    /// Creates a state without flags and without transitions.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            is_initial: false,
            is_final: false,
            transitions: Vec::new(),
        }
    }

    /// Creates a state with the given flags and transitions.
    pub fn with_transitions(id: impl Into<String>, is_initial: bool, is_final: bool, transitions: Vec<TargetSet>) -> Self {
        Self {
            id: id.into(),
            is_initial,
            is_final,
            transitions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Returns the targets for every symbol, in alphabet order.
    pub fn transitions(&self) -> &[TargetSet] {
        &self.transitions
    }

    /// Returns the targets of the transition labelled with the given symbol.
    pub fn targets(&self, symbol: SymbolIndex) -> &TargetSet {
        &self.transitions[symbol]
    }

    /// Returns true iff some symbol leads to more than one state.
    pub fn has_multiple_transitions(&self) -> bool {
        self.transitions.iter().any(|targets| targets.len() > 1)
    }

    /// Computes the states reachable from this state through epsilon transitions.
    ///
    /// The result is empty when the state has no outgoing epsilon transition,
    /// and contains the state itself (given by `index`) otherwise. `states` is
    /// the arena of the owning automaton. Cycles of epsilon transitions are
    /// only visited once.
    pub fn epsilon_closure(&self, index: StateIndex, states: &[State], epsilon: SymbolIndex) -> TargetSet {
        let mut closure = TargetSet::new();
        if self.targets(epsilon).is_empty() {
            return closure;
        }

        let mut stack = vec![index];
        while let Some(state) = stack.pop() {
            if !closure.insert(state) {
                continue;
            }

            for target in states[state].targets(epsilon) {
                if !closure.contains(*target) {
                    stack.push(*target);
                }
            }
        }

        closure
    }

    pub(crate) fn set_initial(&mut self, is_initial: bool) {
        self.is_initial = is_initial;
    }

    pub(crate) fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    pub(crate) fn set_transitions(&mut self, transitions: Vec<TargetSet>) {
        self.transitions = transitions;
    }

    pub(crate) fn transitions_mut(&mut self) -> &mut Vec<TargetSet> {
        &mut self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(indices: &[usize]) -> TargetSet {
        indices.iter().map(|&index| StateIndex::new(index)).collect()
    }

    /// Three states with epsilon (symbol 1) transitions 0 -> 1 -> 2 -> 1.
    fn epsilon_cycle() -> Vec<State> {
        vec![
            State::with_transitions("0", true, false, vec![targets(&[0]), targets(&[1])]),
            State::with_transitions("1", false, false, vec![targets(&[]), targets(&[2])]),
            State::with_transitions("2", false, true, vec![targets(&[2]), targets(&[1])]),
        ]
    }

    #[test]
    fn test_epsilon_closure_with_cycle() {
        let states = epsilon_cycle();
        let epsilon = SymbolIndex::new(1);

        let closure = states[0].epsilon_closure(StateIndex::new(0), &states, epsilon);
        assert_eq!(closure, targets(&[0, 1, 2]));

        let closure = states[2].epsilon_closure(StateIndex::new(2), &states, epsilon);
        assert_eq!(closure, targets(&[1, 2]));
    }

    #[test]
    fn test_epsilon_closure_without_epsilon_transitions() {
        let states = vec![State::with_transitions("0", true, true, vec![targets(&[0]), targets(&[])])];

        assert!(states[0].epsilon_closure(StateIndex::new(0), &states, SymbolIndex::new(1)).is_empty());
    }

    #[test]
    fn test_state_queries() {
        let states = epsilon_cycle();

        assert!(!states[0].has_multiple_transitions());
        assert!(State::with_transitions("x", false, false, vec![targets(&[0, 1])]).has_multiple_transitions());

        assert_eq!(states[2].targets(SymbolIndex::new(0)), &targets(&[2]));
    }
}
