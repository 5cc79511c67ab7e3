use std::sync::Arc;

use crate::core::catalog::Catalog;
use crate::core::guides::GuideTopic;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The startup catalog load finished.
    CatalogLoaded(Arc<Catalog>),
    /// The startup catalog load failed; carries the rendered cause.
    CatalogFailed(String),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper or command palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusSearch,
    OpenDetail(String),
    OpenGuide(GuideTopic),

    // Search
    ClearFilters,
    ToggleShowAll,
    NextPage,
    PrevPage,

    // Modals
    OpenCommandPalette,
    CloseCommandPalette,
    ShowHelp,
    CloseHelp,
    OpenSubscribe,
    CloseSubscribe,

    // Application
    ClearProgress,
    Quit,
}

/// Which top-level view has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Search,
    Detail,
    Guide,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Search, Focus::Detail, Focus::Guide];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Search => "Search",
            Focus::Detail => "Detail",
            Focus::Guide => "Guide",
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_labels() {
        for f in Focus::ALL {
            assert!(!f.label().is_empty());
        }
        assert_eq!(Focus::Detail.label(), "Detail");
        assert_eq!(Focus::Guide.label(), "Guide");
    }

    #[test]
    fn test_open_detail_compares_by_code() {
        assert_eq!(
            Action::OpenDetail("AC04".into()),
            Action::OpenDetail("AC04".into())
        );
        assert_ne!(
            Action::OpenDetail("AC04".into()),
            Action::OpenDetail("AC06".into())
        );
    }
}
