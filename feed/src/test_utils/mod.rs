//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Mocks are written by hand: the ports are small, and a mock that counts
//! its calls is easier to assert on than a generated expectation.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
