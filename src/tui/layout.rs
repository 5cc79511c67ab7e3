//! Root layout: catalog header, main content, status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Header rows (title line + catalog summary line).
pub const HEADER_HEIGHT: u16 = 2;
/// Below this terminal height the header is dropped.
pub const HIDE_HEADER_THRESHOLD: u16 = 12;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Catalog header (None on very short terminals).
    pub header: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let header_height = if area.height < HIDE_HEADER_THRESHOLD {
            0
        } else {
            HEADER_HEIGHT
        };

        let rows = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        AppLayout {
            header: (header_height > 0).then_some(rows[0]),
            main: rows[1],
            status: rows[2],
        }
    }
}
