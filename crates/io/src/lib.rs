#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod dumpfiles;
mod format;
mod line_iterator;

pub use dumpfiles::*;
pub use format::*;
pub use line_iterator::*;
