//! Source tests.
