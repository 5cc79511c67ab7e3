//! Property-based tests for MX Error Guide
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `search_props`: search pipeline
//!   - Same query and filters give the same ordered result
//!   - Every result passes the active filters
//!   - Results never repeat a code
//!   - A record's exact code always finds it
//!
//! - `pagination_props`: pagination view-model
//!   - Page slices are bounded by the page size
//!   - Pages partition the result list in order
//!   - Any query or filter change lands on page one
//!
//! - `synonym_props`: synonym expander
//!   - Expansion starts with the original words, lowercased and in order
//!   - Every listed synonym of a key is added
//!   - Words outside the table come back unchanged
//!
//! - `explanation_props`: explanation generator
//!   - No placeholder survives substitution for any record
//!
//! - `deep_link_props`: link parsing
//!   - Every accepted link form yields the bare code
//!
//! - `guide_props`: reference guide lookup
//!   - Case and version suffixes never change which guide a tag opens
//!   - Any tag in a catalog either resolves or is reported
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. Set `PROPTEST_CASES`
//! to change it.

mod deep_link_props;
mod explanation_props;
mod guide_props;
mod pagination_props;
mod search_props;
mod synonym_props;
