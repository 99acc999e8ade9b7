#![forbid(unsafe_code)]

use std::collections::VecDeque;

use log::info;

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::StateIndex;
use crate::SymbolIndex;
use crate::ValidationError;
use crate::moore_partition;
use crate::quotient;

impl Automaton {
    /// Returns the canonical form of the automaton. Two automata accept the
    /// same language iff their normalized forms print identically.
    ///
    /// # Details
    ///
    /// The automaton is minimized, after which the states from which no final
    /// state can be reached are removed and the result is minimized again. The
    /// alphabet is sorted, and the states are renamed `1, 2, ...` in breadth
    /// first order from the initial state, following the sorted alphabet.
    ///
    /// Returns the automaton unchanged when it is already normalized.
    pub fn normalize(self) -> Result<Automaton, ValidationError> {
        if self.is_normalized() {
            return Ok(self);
        }

        let trimmed = self.minimize()?.remove_dead_states();
        let reduced = quotient(&trimmed, &moore_partition(&trimmed));

        let mut columns: Vec<SymbolIndex> = (0..reduced.alphabet().len()).map(SymbolIndex::new).collect();
        columns.sort_by(|left, right| reduced.alphabet()[*left].cmp(&reduced.alphabet()[*right]));

        let order = breadth_first_order(&reduced, &columns);

        let mut builder = AutomatonBuilder::new();
        let mut renumbering = vec![StateIndex::default(); reduced.num_of_states()];
        for (number, state_index) in order.iter().enumerate() {
            renumbering[*state_index] = builder.add_state(&(number + 1).to_string());
        }

        for state_index in order {
            let state = reduced.state(state_index);
            let index = renumbering[state_index];

            builder.set_initial(index, state.is_initial());
            builder.set_final(index, state.is_final());
            builder.set_transitions(
                index,
                columns
                    .iter()
                    .map(|column| state.targets(*column).remap(|target| Some(renumbering[target])))
                    .collect(),
            );
        }

        let mut result = builder.finish(columns.iter().map(|column| reduced.alphabet()[*column].clone()).collect());
        result.set_normalized();

        info!("Normalized automaton has {} states", result.num_of_states());
        Ok(result)
    }
}

/// Returns the states in the order in which a breadth first search from the
/// initial states visits them, taking the symbols in the order of `columns`.
/// Unreachable states come last, in their original order.
fn breadth_first_order(automaton: &Automaton, columns: &[SymbolIndex]) -> Vec<StateIndex> {
    let mut visited = vec![false; automaton.num_of_states()];
    let mut order = Vec::with_capacity(automaton.num_of_states());
    let mut queue = VecDeque::new();

    for &initial in automaton.initials() {
        if !visited[initial] {
            visited[initial] = true;
            queue.push_back(initial);
        }
    }

    while let Some(state_index) = queue.pop_front() {
        order.push(state_index);

        for column in columns {
            for target in automaton.state(state_index).targets(*column).iter() {
                if !visited[target] {
                    visited[target] = true;
                    queue.push_back(target);
                }
            }
        }
    }

    order.extend(automaton.iter_states().filter(|state_index| !visited[*state_index]));
    order
}
