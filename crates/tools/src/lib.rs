#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod verbosity;
mod version;

pub use verbosity::*;
pub use version::*;
