//! Terminal interface: an Elm-style event loop over the search and detail views.

pub mod app;
pub mod events;
pub mod layout;
pub mod theme;
pub mod views;
pub mod widgets;
