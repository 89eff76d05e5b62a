//! Engine module tests.

mod row_policy_tests;
