#![forbid(unsafe_code)]

use automin_utilities::TagIndex;

/// The symbol denoting an epsilon transition, never a real input character.
pub const EPSILON: &str = "ε";

/// An ASCII spelling of [`EPSILON`] that is accepted when reading automata.
pub const EPSILON_ASCII: &str = "\\eps";

/// A unique type for the alphabet symbols.
pub struct SymbolTag;

/// The index of a symbol in the alphabet of an automaton.
pub type SymbolIndex = TagIndex<usize, SymbolTag>;

/// Returns true iff the given symbol is the epsilon symbol.
pub fn is_epsilon(symbol: &str) -> bool {
    symbol == EPSILON
}

/// Maps the alternative spellings of epsilon onto [`EPSILON`].
pub fn canonical_symbol(symbol: &str) -> &str {
    if symbol == EPSILON_ASCII { EPSILON } else { symbol }
}
