//! Source acquisition.
//!
//! This module provides:
//! - `InputProvider`: Trait for sources the parser opens itself
//! - Standard implementations for files and stdin
//! - `InMemorySource` for in-memory text
//! - `CloseList`: readers the parser opened and must release

mod close_list;
mod input;
mod memory;
mod std_io;

pub(crate) use close_list::CloseList;
pub use input::InputProvider;
pub use memory::InMemorySource;
pub use std_io::{FileInput, StdinInput};
