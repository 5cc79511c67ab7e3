/// MX Error Guide - ISO 20022 payment error code lookup (TUI Edition)
///
/// Core library providing the error catalog, synonym-aware fuzzy search,
/// plain-language explanations, and the terminal interface around them.

pub mod cli;
pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
