//! Common Test Utilities
//!
//! Record and catalog fixtures shared by the property suites.

pub mod fixtures;

pub use fixtures::*;
