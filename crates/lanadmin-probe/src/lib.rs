//! lanadmin-probe library entry point.
//!
//! Re-exports the probe client so integration tests in `tests/` and the
//! binary entry point in `main.rs` share the same module tree.

pub mod client;

pub use client::{ProbeClient, ProbeConfig, ProbeError, ProbeOutcome};
