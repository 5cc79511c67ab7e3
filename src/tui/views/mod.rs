pub mod command_palette;
pub mod detail;
pub mod guide;
pub mod search;
pub mod subscribe;
