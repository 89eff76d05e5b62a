//! Metadata registry tests.
