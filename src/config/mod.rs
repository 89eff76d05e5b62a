//! Configuration types for a parse.
//!
//! This module provides:
//! - `ParserOptions`: the row-level option set
//! - `SevereRowPolicy`: what happens to rows that raised a severe error
//! - `SourceSpec`: where the lines come from

mod options;
mod spec;

pub use options::{ParserOptions, SevereRowPolicy};
pub use spec::SourceSpec;
