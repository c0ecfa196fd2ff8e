//! Shared test utilities used across linkwise crates.
//!
//! Hosts the tracing recorder used to assert instrumentation and the
//! environment-driven profile consumed by the property suites.

pub mod profile;
pub mod tracing;
