pub mod catalog;
pub mod logging;

// Search: synonym expansion + weighted fuzzy matching + filters
pub mod search;
pub mod view_model;

pub mod deep_link;
pub mod explain;
pub mod guides;
pub mod progress;
pub mod subscribe;
