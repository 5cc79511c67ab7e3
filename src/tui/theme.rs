//! Teal & Coral color theme for the MX Error Guide TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::catalog::{Category, Severity};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Teal: focused borders, active search bar.
pub const PRIMARY: Color = Color::Rgb(0x00, 0x80, 0x80);
/// Light teal: key hints, section labels.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x00, 0x96, 0x88);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Coral: error codes, selected rows, titles.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x7F, 0x50);
/// Soft coral: synonym hints.
pub const ACCENT_SOFT: Color = Color::Rgb(0xFF, 0x8A, 0x65);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Charcoal: base background.
pub const BG_BASE: Color = Color::Rgb(0x0A, 0x19, 0x19);
/// Surface: selected result row.
pub const BG_SURFACE: Color = Color::Rgb(0x12, 0x26, 0x26);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Domain ──────────────────────────────────────────────────────────────────

/// Color for a severity: fatal rejections are red, temporary ones amber.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Fatal => ERROR,
        Severity::Temporary => WARNING,
    }
}

/// Stable per-category color for the result list and detail header.
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Account => Color::Rgb(0x42, 0xA5, 0xF5),
        Category::Amount => Color::Rgb(0x66, 0xBB, 0x6A),
        Category::Party => Color::Rgb(0xCE, 0x93, 0xD8),
        Category::Regulatory => Color::Rgb(0xEF, 0x53, 0x50),
        Category::Routing => Color::Rgb(0x26, 0xC6, 0xDA),
        Category::Mandate => Color::Rgb(0xFF, 0xCA, 0x28),
        Category::Duplicate => Color::Rgb(0xFF, 0x8A, 0x65),
        Category::Cancellation => Color::Rgb(0xA1, 0x88, 0x7F),
        Category::Narrative => Color::Rgb(0x9C, 0xCC, 0x65),
        Category::System => Color::Rgb(0x78, 0x90, 0x9C),
        Category::Other => TEXT_MUTED,
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent bold text (titles, error codes).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_SURFACE)
        .add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Badge shown while the search bar has the cursor.
pub fn insert_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Inverted badge for a severity label.
pub fn severity_badge(severity: Severity) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(severity_color(severity))
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
