#![forbid(unsafe_code)]

use log::debug;
use log::info;
use log::trace;
use rustc_hash::FxHashMap;

use automin_io::LargeFormatter;

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::BlockIndex;
use crate::IndexedPartition;
use crate::StateIndex;
use crate::ValidationError;

/// The signature of a state: its final flag and the block of the target for
/// every symbol, `None` when there is no transition.
type Signature = (bool, Vec<Option<BlockIndex>>);

impl Automaton {
    /// Returns the minimal deterministic automaton accepting the same language.
    ///
    /// The automaton is first determinized and its unreachable states are
    /// removed. Equivalent states are then merged by [moore_partition], and
    /// every block becomes a state named after its (one based) block number.
    pub fn minimize(self) -> Result<Automaton, ValidationError> {
        let automaton = self.determinize()?.remove_unreachable_states();

        let partition = moore_partition(&automaton);
        let result = quotient(&automaton, &partition);

        info!(
            "Minimized automaton with {} states into {} states",
            LargeFormatter(automaton.num_of_states()),
            LargeFormatter(result.num_of_states())
        );
        Ok(result)
    }
}

/// Computes the coarsest partition of the states of a deterministic automaton
/// in which equivalent states share a block, using Moore's algorithm.
///
/// # Details
///
/// Starts from the partition that separates the final states from the other
/// states, numbered in the order in which the states first appear. Every round computes the [Signature] of each state
/// with respect to the previous partition, and numbers the distinct
/// signatures in the order in which the states first produce them. Stops when
/// a round no longer changes the partition.
pub fn moore_partition(automaton: &Automaton) -> IndexedPartition {
    debug_assert!(
        automaton.is_deterministic(),
        "Moore's algorithm requires a deterministic automaton"
    );

    let mut partition = final_partition(automaton);
    trace!("Initial partition {partition}");

    let mut id: FxHashMap<Signature, BlockIndex> = FxHashMap::default();
    let mut iteration = 0;
    loop {
        id.clear();
        let mut next_partition = IndexedPartition::new(automaton.num_of_states());

        for state_index in automaton.iter_states() {
            let state = automaton.state(state_index);
            let signature: Signature = (
                state.is_final(),
                state
                    .transitions()
                    .iter()
                    .map(|targets| targets.first().map(|target| partition.block_number(target)))
                    .collect(),
            );

            trace!("State {} signature {signature:?}", state.id());

            let new_id = BlockIndex::new(id.len());
            let block = *id.entry(signature).or_insert(new_id);
            next_partition.set_block(state_index, block);
        }

        iteration += 1;
        debug!("Iteration {iteration}, found {} blocks", id.len());

        trace!("Partition {next_partition}");
        if next_partition == partition {
            break;
        }
        partition = next_partition;
    }

    partition
}

/// Separates the final states from the other states, the block of the first
/// state is numbered 0.
fn final_partition(automaton: &Automaton) -> IndexedPartition {
    let mut partition = IndexedPartition::new(automaton.num_of_states());
    let first_is_final = automaton.states().first().is_some_and(|state| state.is_final());

    for state_index in automaton.iter_states() {
        let block = usize::from(automaton.state(state_index).is_final() != first_is_final);
        partition.set_block(state_index, BlockIndex::new(block));
    }

    partition
}

/// Returns the automaton with one state per block of the partition. The
/// states of a block must have the same signature.
pub fn quotient(automaton: &Automaton, partition: &IndexedPartition) -> Automaton {
    let mut builder = AutomatonBuilder::new();

    let blocks: Vec<StateIndex> = (0..partition.num_of_blocks())
        .map(|block| builder.add_state(&(block + 1).to_string()))
        .collect();

    for state_index in automaton.iter_states() {
        let state = automaton.state(state_index);
        let block = blocks[partition.block_number(state_index)];

        if state.is_initial() {
            builder.set_initial(block, true);
        }
        if state.is_final() {
            builder.set_final(block, true);
        }

        builder.set_transitions(
            block,
            state
                .transitions()
                .iter()
                .map(|targets| targets.remap(|target| Some(blocks[partition.block_number(target)])))
                .collect(),
        );
    }

    builder.finish(automaton.alphabet().to_vec())
}
