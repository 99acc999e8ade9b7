#![forbid(unsafe_code)]

use std::fmt;

use automin_utilities::TagIndex;

use crate::StateIndex;

/// A zero sized tag for the block.
pub struct BlockTag {}

/// The index for blocks.
pub type BlockIndex = TagIndex<usize, BlockTag>;

/// Defines a partition based on an explicit indexing of states to their block
/// number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexedPartition {
    partition: Vec<BlockIndex>,

    num_of_blocks: usize,
}

impl IndexedPartition {
    /// Create a new partition where all elements are in a single block.
    pub fn new(num_of_elements: usize) -> IndexedPartition {
        IndexedPartition {
            partition: vec![BlockIndex::new(0); num_of_elements],
            num_of_blocks: 1,
        }
    }

    /// Returns the block of the given state.
    pub fn block_number(&self, state_index: StateIndex) -> BlockIndex {
        self.partition[state_index.value()]
    }

    pub fn num_of_blocks(&self) -> usize {
        self.num_of_blocks
    }

    /// Iterates over the blocks in the partition.
    pub fn iter(&self) -> impl Iterator<Item = BlockIndex> + '_ {
        self.partition.iter().copied()
    }

    /// Sets the block number of the given element.
    pub fn set_block(&mut self, state_index: StateIndex, block_number: BlockIndex) {
        // Assumes that the blocks are dense, otherwise it overestimates the number of blocks.
        self.num_of_blocks = self.num_of_blocks.max(block_number.value() + 1);

        self.partition[state_index.value()] = block_number;
    }
}

impl fmt::Display for IndexedPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;

        for block_index in 0..self.num_of_blocks {
            if block_index > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{{")?;
            let mut first = true;
            for (element_index, _) in self.iter().enumerate().filter(|(_, block)| *block == block_index) {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{element_index}")?;
                first = false;
            }
            write!(f, "}}")?;
        }

        write!(f, " }}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_partition() {
        let mut partition = IndexedPartition::new(4);
        assert_eq!(partition.num_of_blocks(), 1);

        partition.set_block(StateIndex::new(1), BlockIndex::new(1));
        partition.set_block(StateIndex::new(3), BlockIndex::new(2));

        assert_eq!(partition.num_of_blocks(), 3);
        assert_eq!(partition.block_number(StateIndex::new(3)), BlockIndex::new(2));
        assert_eq!(partition.to_string(), "{ {0, 2}, {1}, {3} }");

        let mut same = IndexedPartition::new(4);
        for (element, block) in partition.iter().enumerate() {
            same.set_block(StateIndex::new(element), block);
        }
        assert_eq!(same, partition);
    }
}
