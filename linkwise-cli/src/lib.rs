//! Library half of the `linkwise` binary.
//!
//! Exposes the command pipeline and logging setup so tests can drive a solve
//! in-process.

pub mod cli;
pub mod logging;
