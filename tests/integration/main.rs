//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises a specific subsystem
//! against the host adapters. Everything runs against temporary
//! directories or in-memory stores.

mod mocks;
mod script_replay_tests;
mod stored_state_tests;
