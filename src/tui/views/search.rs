//! Search view: the error code browser.
//!
//! A search bar on top, the filter row below it, then the current page of
//! results. Typing re-runs the search on every keystroke; `Enter` opens the
//! selected record.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::super::theme;
use crate::core::catalog::{Catalog, ErrorRecord};
use crate::core::progress::ProgressStore;
use crate::core::search::{NucleoMatcher, SearchPipeline};
use crate::core::view_model::{SearchViewModel, EMPTY_RESULTS};
use crate::tui::widgets::input_buffer::{InputBuffer, InputEdit};

/// Longest query the search bar accepts.
const QUERY_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusZone {
    Query,
    List,
}

/// What the search view did with an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Consumed,
    /// Open the detail view for this code.
    Open(String),
}

pub struct SearchViewState {
    vm: SearchViewModel<NucleoMatcher>,
    input: InputBuffer,
    focus: FocusZone,
    /// Index into the visible page.
    selected: usize,
}

impl SearchViewState {
    pub fn new(catalog: Arc<Catalog>, pipeline: SearchPipeline, page_size: usize) -> Self {
        Self {
            vm: SearchViewModel::new(catalog, pipeline, page_size),
            input: InputBuffer::with_max_chars(QUERY_MAX_CHARS),
            focus: FocusZone::List,
            selected: 0,
        }
    }

    pub fn view_model(&self) -> &SearchViewModel<NucleoMatcher> {
        &self.vm
    }

    pub fn is_typing(&self) -> bool {
        self.focus == FocusZone::Query
    }

    pub fn focus_query(&mut self) {
        self.focus = FocusZone::Query;
    }

    pub fn selected_record(&self) -> Option<&Arc<ErrorRecord>> {
        self.vm.visible().get(self.selected)
    }

    // ── Commands (also reachable from the palette) ──────────────────────

    pub fn clear_filters(&mut self) {
        self.vm.clear_filters();
        self.selected = 0;
    }

    pub fn toggle_show_all(&mut self) {
        self.vm.toggle_show_all();
        self.selected = 0;
    }

    pub fn next_page(&mut self) {
        self.vm.next_page();
        self.selected = 0;
    }

    pub fn prev_page(&mut self) {
        self.vm.prev_page();
        self.selected = 0;
    }

    fn select_next(&mut self) {
        let len = self.vm.visible().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn requery(&mut self) {
        self.vm.set_query(self.input.text());
        self.selected = 0;
    }

    // ── Input handling ──────────────────────────────────────────────────

    /// `None` when the event is not for this view.
    pub fn handle_input(&mut self, event: &Event) -> Option<SearchResult> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match self.focus {
            FocusZone::Query => self.handle_query_input(*code, *modifiers),
            FocusZone::List => self.handle_list_input(*code, *modifiers),
        }
    }

    fn handle_query_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<SearchResult> {
        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.input.clear();
                self.requery();
                Some(SearchResult::Consumed)
            }
            // Leave other chords to the global keymap
            (KeyModifiers::CONTROL | KeyModifiers::ALT, _) => None,
            (_, KeyCode::Esc | KeyCode::Enter | KeyCode::Down | KeyCode::Tab) => {
                self.focus = FocusZone::List;
                Some(SearchResult::Consumed)
            }
            (_, code) => {
                if self.input.handle_key(code) == InputEdit::Changed {
                    self.requery();
                }
                Some(SearchResult::Consumed)
            }
        }
    }

    fn handle_list_input(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<SearchResult> {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Char('/') | KeyCode::Char('i')) => {
                self.focus = FocusZone::Query;
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => self.select_next(),
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => self.select_prev(),
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => self.selected = 0,
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
                self.selected = self.vm.visible().len().saturating_sub(1);
            }
            (
                KeyModifiers::NONE,
                KeyCode::Char('n') | KeyCode::Right | KeyCode::PageDown,
            ) => self.next_page(),
            (
                KeyModifiers::NONE,
                KeyCode::Char('p') | KeyCode::Left | KeyCode::PageUp,
            ) => self.prev_page(),
            (KeyModifiers::NONE, KeyCode::Char('c')) => {
                self.vm.cycle_category(true);
                self.selected = 0;
            }
            (KeyModifiers::SHIFT, KeyCode::Char('C')) => {
                self.vm.cycle_category(false);
                self.selected = 0;
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.vm.cycle_severity();
                self.selected = 0;
            }
            (KeyModifiers::NONE, KeyCode::Char('x')) => self.clear_filters(),
            (KeyModifiers::NONE, KeyCode::Char('a')) => self.toggle_show_all(),
            (KeyModifiers::NONE, KeyCode::Enter) => {
                return self
                    .selected_record()
                    .map(|record| SearchResult::Open(record.code.clone()));
            }
            _ => return None,
        }
        Some(SearchResult::Consumed)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, progress: &ProgressStore) {
        let block = if self.is_typing() {
            theme::block_focused("Search")
        } else {
            theme::block_default("Search")
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::vertical([
            Constraint::Length(1), // Search bar
            Constraint::Length(1), // Filters + count
            Constraint::Length(1), // Spacer
            Constraint::Min(1),    // Results
            Constraint::Length(1), // Pager
        ])
        .split(inner);

        self.render_search_bar(frame, chunks[0]);
        self.render_filters(frame, chunks[1]);
        self.render_results(frame, chunks[3], progress);
        self.render_pager(frame, chunks[4]);
    }

    fn render_search_bar(&self, frame: &mut Frame, area: Rect) {
        let typing = self.is_typing();
        let prefix_style = if typing {
            Style::default()
                .fg(theme::PRIMARY_LIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        };

        let line = if typing {
            self.input.line(
                Span::styled(" [/] Search: ", prefix_style),
                Style::default().fg(theme::TEXT),
                Style::default().bg(theme::TEXT).fg(theme::BG_BASE),
                "code, name or keyword (e.g. frozen account)",
                theme::dim(),
            )
        } else if self.input.text().is_empty() {
            Line::from(vec![
                Span::styled(" [/] Search: ", prefix_style),
                Span::styled("Press / to search...", theme::dim()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" [/] Search: ", prefix_style),
                Span::styled(self.input.text().to_string(), Style::default().fg(theme::TEXT)),
            ])
        };

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_filters(&self, frame: &mut Frame, area: Rect) {
        let filters = self.vm.filters();
        let category = filters
            .category
            .map(|c| c.label())
            .unwrap_or("All");
        let severity = filters
            .severity
            .map(|s| s.as_str())
            .unwrap_or("all");
        let active = |on: bool| {
            if on {
                theme::highlight()
            } else {
                theme::muted()
            }
        };

        let line = Line::from(vec![
            Span::styled(" [c] ", theme::key_hint()),
            Span::styled("Category: ", theme::muted()),
            Span::styled(category, active(filters.category.is_some())),
            Span::styled("  [s] ", theme::key_hint()),
            Span::styled("Severity: ", theme::muted()),
            Span::styled(severity, active(filters.severity.is_some())),
            Span::styled("  [x] ", theme::key_hint()),
            Span::styled("clear", theme::muted()),
            Span::raw("  │  "),
            Span::styled(
                format!(
                    "{} of {} errors",
                    self.vm.results().len(),
                    self.vm.catalog().len()
                ),
                Style::default().fg(theme::TEXT),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect, progress: &ProgressStore) {
        let visible = self.vm.visible();
        if visible.is_empty() {
            let empty = Paragraph::new(vec![
                Line::raw(""),
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(EMPTY_RESULTS, theme::muted()),
                ]),
            ]);
            frame.render_widget(empty, area);
            return;
        }

        // Keep the selection on screen when show-all overflows the area
        let height = area.height.max(1) as usize;
        let offset = self.selected.saturating_sub(height - 1);

        let lines: Vec<Line> = visible
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, record)| {
                result_line(record, i == self.selected, progress.is_viewed(&record.code))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_pager(&self, frame: &mut Frame, area: Rect) {
        let line = if self.vm.show_all() {
            Line::from(vec![
                Span::styled(
                    format!(" Showing all {}", self.vm.results().len()),
                    theme::muted(),
                ),
                Span::styled("  [a] ", theme::key_hint()),
                Span::styled("paginate", theme::muted()),
            ])
        } else if self.vm.is_paginated() {
            Line::from(vec![
                Span::styled(
                    format!(" Page {} of {}", self.vm.page(), self.vm.total_pages()),
                    Style::default().fg(theme::TEXT),
                ),
                Span::styled("  [n/p] ", theme::key_hint()),
                Span::styled("page", theme::muted()),
                Span::styled("  [a] ", theme::key_hint()),
                Span::styled("show all", theme::muted()),
            ])
        } else {
            Line::raw("")
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

fn result_line(record: &ErrorRecord, selected: bool, viewed: bool) -> Line<'static> {
    let marker = if selected { "▸ " } else { "  " };
    let viewed_mark = if viewed { "● " } else { "  " };
    let row_style = if selected {
        theme::highlight()
    } else {
        Style::default().fg(theme::TEXT)
    };

    Line::from(vec![
        Span::styled(marker, theme::title()),
        Span::styled(viewed_mark, Style::default().fg(theme::SUCCESS)),
        Span::styled(format!("{:<6}", record.code), theme::title()),
        Span::styled(format!(" {:<40}", truncate(&record.name, 40)), row_style),
        Span::styled(
            format!(" {:<13}", record.category.label()),
            Style::default().fg(theme::category_color(record.category)),
        ),
        Span::styled(
            format!(" {} ", record.severity.as_str()),
            Style::default().fg(theme::severity_color(record.severity)),
        ),
    ])
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> Event {
        key_with(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn make_state(page_size: usize) -> SearchViewState {
        let catalog = Arc::new(Catalog::bundled().unwrap());
        SearchViewState::new(catalog, SearchPipeline::default(), page_size)
    }

    fn type_text(state: &mut SearchViewState, text: &str) {
        for c in text.chars() {
            state.handle_input(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_starts_with_full_catalog() {
        let state = make_state(12);
        let vm = state.view_model();
        assert_eq!(vm.results().len(), vm.catalog().len());
        assert_eq!(vm.visible().len(), 12);
        assert!(!state.is_typing());
    }

    #[test]
    fn test_slash_then_typing_searches_each_keystroke() {
        let mut state = make_state(12);
        state.handle_input(&key(KeyCode::Char('/')));
        assert!(state.is_typing());

        type_text(&mut state, "AC04");
        assert_eq!(state.view_model().query(), "AC04");
        assert_eq!(state.view_model().results()[0].code, "AC04");

        state.handle_input(&key(KeyCode::Enter));
        assert!(!state.is_typing());
        assert_eq!(
            state.handle_input(&key(KeyCode::Enter)),
            Some(SearchResult::Open("AC04".to_string()))
        );
    }

    #[test]
    fn test_typing_letters_does_not_trigger_list_keys() {
        let mut state = make_state(12);
        state.focus_query();
        type_text(&mut state, "xs");
        assert!(state.view_model().filters().is_empty());
        assert_eq!(state.view_model().query(), "xs");
    }

    #[test]
    fn test_ctrl_chords_pass_through_while_typing() {
        let mut state = make_state(12);
        state.focus_query();
        let ctrl_p = key_with(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_input(&ctrl_p), None);
    }

    #[test]
    fn test_filter_keys_reset_to_first_page() {
        let mut state = make_state(5);
        state.handle_input(&key(KeyCode::Char('n')));
        state.handle_input(&key(KeyCode::Char('n')));
        assert_eq!(state.view_model().page(), 3);

        state.handle_input(&key(KeyCode::Char('c')));
        assert_eq!(
            state.view_model().filters().category,
            Some(crate::core::catalog::Category::Account)
        );
        assert_eq!(state.view_model().page(), 1);

        state.handle_input(&key(KeyCode::Char('s')));
        assert!(state.view_model().filters().severity.is_some());

        state.handle_input(&key(KeyCode::Char('x')));
        assert!(state.view_model().filters().is_empty());
    }

    #[test]
    fn test_selection_is_clamped_to_page() {
        let mut state = make_state(3);
        for _ in 0..10 {
            state.handle_input(&key(KeyCode::Char('j')));
        }
        assert_eq!(state.selected, 2);
        state.handle_input(&key(KeyCode::Char('n')));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_enter_on_empty_results_is_ignored() {
        let mut state = make_state(12);
        state.focus_query();
        type_text(&mut state, "xyz123");
        state.handle_input(&key(KeyCode::Esc));
        assert!(state.view_model().results().is_empty());
        assert_eq!(state.handle_input(&key(KeyCode::Enter)), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
