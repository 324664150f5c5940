//! Shared test helpers for `housewatch-core` integration tests.

pub mod transport;
