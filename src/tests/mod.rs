//! Crate-internal test tree.
//!
//! Unit tests live next to the code they test; this tree holds the shared
//! fixtures and the property-based suites that span several modules.

mod common;
mod property;
