#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised while reading an automaton, the line numbers are one based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Missing heading, expected '<NFA|DFA> <symbols>...'")]
    MissingHeader,

    #[error("Unexpected '{found}' on line {line}, expected 'NFA' or 'DFA'")]
    InvalidKind { line: usize, found: String },

    #[error("Duplicate symbol '{symbol}' in the alphabet on line {line}")]
    DuplicateSymbol { line: usize, symbol: String },

    #[error("Identifier of state not specified on line {line}")]
    MissingIdentifier { line: usize },

    #[error("Identifier '{id}' on line {line} starts with a '>' or '<' marker")]
    InvalidIdentifier { line: usize, id: String },

    #[error("Redefinition of state '{id}' on line {line}")]
    Redefinition { line: usize, id: String },

    #[error("Transition count {found} doesn't match the symbol count {expected} on line {line}")]
    FieldCountMismatch { line: usize, expected: usize, found: usize },

    #[error("Invalid target list '{field}' on line {line}")]
    InvalidTarget { line: usize, field: String },
}

/// Violations of the structural invariants of an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one initial state required")]
    NoInitialState,

    #[error("At least one final state required")]
    NoFinalState,

    #[error("Duplicate symbol '{0}' in the alphabet")]
    DuplicateSymbol(String),

    #[error("Duplicate state identifier '{0}'")]
    DuplicateState(String),

    #[error("Definition of state '{0}' not found")]
    UndefinedState(String),

    #[error("Transitions of state '{state}' don't match the alphabet")]
    AlphabetMismatch { state: String },

    #[error("State with index {target} pointed to by '{state}' not found")]
    DanglingTarget { state: String, target: usize },
}

/// Raised when removing a state or a transition that does not exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateNotFoundError {
    #[error("Unable to delete state '{0}' - state doesn't exist")]
    State(String),

    #[error("State '{target}' not found in '{symbol}' transition of '{state}' state")]
    Transition {
        state: String,
        symbol: String,
        target: String,
    },
}
