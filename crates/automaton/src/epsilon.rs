#![forbid(unsafe_code)]

use log::debug;

use crate::Automaton;
use crate::EPSILON;
use crate::State;
use crate::TargetSet;
use crate::ValidationError;

impl Automaton {
    /// Removes all epsilon transitions and the epsilon symbol from the alphabet.
    ///
    /// Every state with outgoing epsilon transitions takes over the
    /// transitions of the states in its epsilon closure, and becomes final when
    /// one of them is final. The closures are computed on the original
    /// automaton, before any state is changed. Returns the automaton unchanged
    /// when the alphabet has no epsilon.
    pub fn remove_epsilon(self) -> Result<Automaton, ValidationError> {
        let Some(epsilon) = self.symbol_index(EPSILON) else {
            return Ok(self);
        };

        let closures: Vec<TargetSet> = self
            .iter_states()
            .map(|state_index| {
                self.state(state_index)
                    .epsilon_closure(state_index, self.states(), epsilon)
            })
            .collect();

        let mut states = Vec::with_capacity(self.num_of_states());
        for (state, closure) in self.states().iter().zip(&closures) {
            let mut is_final = state.is_final();
            let mut transitions = state.transitions().to_vec();

            if !closure.is_empty() {
                is_final = closure.iter().any(|member| self.state(member).is_final());

                for member in closure {
                    for (targets, member_targets) in transitions.iter_mut().zip(self.state(*member).transitions()) {
                        targets.union_with(member_targets);
                    }
                }
            }

            transitions.remove(epsilon.value());
            states.push(State::with_transitions(
                state.id(),
                state.is_initial(),
                is_final,
                transitions,
            ));
        }

        let mut alphabet = self.alphabet().to_vec();
        alphabet.remove(epsilon.value());

        let automaton = Automaton::from_sorted_states(alphabet, states);
        automaton.validate()?;

        debug!(
            "Removed epsilon transitions, {} transitions remain",
            automaton.num_of_transitions()
        );
        Ok(automaton)
    }
}
