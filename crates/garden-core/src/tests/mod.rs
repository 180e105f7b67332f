//! Crate-level tests for the full frame loop.
//!
//! - `determinism.rs`: same seed and inputs give the same run
//! - `integration.rs`: end-to-end behaviour of `Garden::step`
//! - `helpers.rs`: a recording host double and target/input factories


pub mod helpers;
