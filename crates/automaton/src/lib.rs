#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod automaton;
mod builder;
mod determinize;
mod epsilon;
mod error;
mod io_fa;
mod membership;
mod minimize;
mod normalize;
mod partition;
mod random_automaton;
mod state;
mod state_order;
mod symbol;
mod target_set;

pub use automaton::*;
pub use builder::*;
pub use error::*;
pub use io_fa::*;
pub use minimize::*;
pub use partition::*;
pub use random_automaton::*;
pub use state::*;
pub use state_order::*;
pub use symbol::*;
pub use target_set::*;
