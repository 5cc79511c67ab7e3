//! Command palette: fuzzy-searchable registry of app commands and codes.
//!
//! Opens on Ctrl+P. Every reference guide and every catalog record is listed
//! as a jump target, so typing `ac04` here goes straight to its detail view.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use nucleo::{
    pattern::{Atom, AtomKind, CaseMatching, Normalization},
    Matcher, Utf32Str,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::super::theme;
use crate::core::catalog::Catalog;
use crate::core::guides::GuideTopic;
use crate::tui::events::Action;
use crate::tui::widgets::input_buffer::{InputBuffer, InputEdit};

// ============================================================================
// Command types
// ============================================================================

#[derive(Clone)]
pub struct Command {
    pub label: String,
    pub description: &'static str,
    pub category: CommandCategory,
    pub keybinding: Option<&'static str>,
    pub action: Action,
}

impl Command {
    fn new(
        label: &str,
        description: &'static str,
        category: CommandCategory,
        keybinding: Option<&'static str>,
        action: Action,
    ) -> Self {
        Self {
            label: label.to_string(),
            description,
            category,
            keybinding,
            action,
        }
    }
}

/// Command grouping for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandCategory {
    Search,
    System,
    Guides,
    Errors,
}

impl CommandCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::System => "System",
            Self::Guides => "Guides",
            Self::Errors => "Error Codes",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Search => theme::PRIMARY_LIGHT,
            Self::System => theme::INFO,
            Self::Guides => theme::SUCCESS,
            Self::Errors => theme::ACCENT,
        }
    }
}

/// A command that matched the current filter, with score and indices.
struct FilteredCommand {
    command_index: usize,
    score: u16,
    indices: Vec<u32>,
}

/// Result of handling a palette input event.
pub enum PaletteResult {
    /// Event consumed, palette stays open.
    Consumed,
    /// User selected a command; close and dispatch this action.
    Execute(Action),
    /// User pressed Esc.
    Close,
}

// ============================================================================
// Command registry
// ============================================================================

/// App commands and guides, followed by one jump entry per record when a
/// catalog is loaded.
pub fn build_command_registry(catalog: Option<&Catalog>) -> Vec<Command> {
    let mut commands = vec![
        Command::new(
            "Search Errors",
            "Focus the search bar",
            CommandCategory::Search,
            Some("/"),
            Action::FocusSearch,
        ),
        Command::new(
            "Clear Filters",
            "Reset category and severity filters",
            CommandCategory::Search,
            Some("x"),
            Action::ClearFilters,
        ),
        Command::new(
            "Toggle Show All",
            "Show every result on one page",
            CommandCategory::Search,
            Some("a"),
            Action::ToggleShowAll,
        ),
        Command::new(
            "Next Page",
            "Go to the next page of results",
            CommandCategory::Search,
            Some("n"),
            Action::NextPage,
        ),
        Command::new(
            "Previous Page",
            "Go to the previous page of results",
            CommandCategory::Search,
            Some("p"),
            Action::PrevPage,
        ),
        Command::new(
            "Subscribe to Updates",
            "Get notified when new codes are added",
            CommandCategory::System,
            Some("Ctrl+S"),
            Action::OpenSubscribe,
        ),
        Command::new(
            "Clear Viewed Progress",
            "Forget which codes you have opened",
            CommandCategory::System,
            None,
            Action::ClearProgress,
        ),
        Command::new(
            "Show Help",
            "Open the keybindings help modal",
            CommandCategory::System,
            Some("?"),
            Action::ShowHelp,
        ),
        Command::new(
            "Quit",
            "Exit the application",
            CommandCategory::System,
            Some("q"),
            Action::Quit,
        ),
    ];

    commands.extend(GuideTopic::all().into_iter().map(|topic| Command {
        label: format!("Guide: {}", topic.title()),
        description: match topic {
            GuideTopic::Message(_) => "Open message type guide",
            GuideTopic::Family(_) => "Open error family overview",
        },
        category: CommandCategory::Guides,
        keybinding: None,
        action: Action::OpenGuide(topic),
    }));

    if let Some(catalog) = catalog {
        commands.extend(catalog.records().iter().map(|record| Command {
            label: format!("{} {}", record.code, record.name),
            description: "Open error detail",
            category: CommandCategory::Errors,
            keybinding: None,
            action: Action::OpenDetail(record.code.clone()),
        }));
    }

    commands
}

// ============================================================================
// Palette state
// ============================================================================

pub struct CommandPaletteState {
    input: InputBuffer,
    commands: Vec<Command>,
    filtered: Vec<FilteredCommand>,
    selected: usize,
    matcher: Matcher,
}

impl CommandPaletteState {
    pub fn new(commands: Vec<Command>) -> Self {
        let len = commands.len();
        let mut state = Self {
            input: InputBuffer::new(),
            commands,
            filtered: Vec::with_capacity(len),
            selected: 0,
            matcher: Matcher::default(),
        };
        state.refilter();
        state
    }

    /// Re-run fuzzy matching against all commands using current input.
    fn refilter(&mut self) {
        self.filtered.clear();
        let query = self.input.text();

        if query.trim().is_empty() {
            self.filtered
                .extend((0..self.commands.len()).map(|i| FilteredCommand {
                    command_index: i,
                    score: 0,
                    indices: Vec::new(),
                }));
        } else {
            let atom = Atom::new(
                query,
                CaseMatching::Ignore,
                Normalization::Smart,
                AtomKind::Fuzzy,
                false,
            );

            let mut buf = Vec::new();
            for (i, cmd) in self.commands.iter().enumerate() {
                let haystack = Utf32Str::new(&cmd.label, &mut buf);
                let mut indices = Vec::new();
                if let Some(score) = atom.indices(haystack, &mut self.matcher, &mut indices) {
                    self.filtered.push(FilteredCommand {
                        command_index: i,
                        score,
                        indices,
                    });
                }
            }

            // Stable: equal scores keep registry order
            self.filtered.sort_by(|a, b| b.score.cmp(&a.score));
        }

        if self.filtered.is_empty() {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(self.filtered.len() - 1);
        }
    }

    pub fn select_next(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + 1) % self.filtered.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.filtered.is_empty() {
            self.selected = (self.selected + self.filtered.len() - 1) % self.filtered.len();
        }
    }

    pub fn selected_action(&self) -> Option<Action> {
        self.filtered
            .get(self.selected)
            .map(|fc| self.commands[fc.command_index].action.clone())
    }

    // ── Input handling ──────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> PaletteResult {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return PaletteResult::Consumed;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                PaletteResult::Close
            }
            (KeyModifiers::NONE, KeyCode::Enter) => match self.selected_action() {
                Some(action) => PaletteResult::Execute(action),
                None => PaletteResult::Close,
            },
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::CONTROL, KeyCode::Char('p')) => {
                self.select_prev();
                PaletteResult::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::CONTROL, KeyCode::Char('n')) => {
                self.select_next();
                PaletteResult::Consumed
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.input.clear();
                self.refilter();
                PaletteResult::Consumed
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => {
                if self.input.handle_key(code) == InputEdit::Changed {
                    self.refilter();
                }
                PaletteResult::Consumed
            }
            _ => PaletteResult::Consumed,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_palette_rect(area);

        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(" Command Palette ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(theme::border_focused());

        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        if inner.height < 3 || inner.width < 10 {
            return;
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // Input
            Constraint::Length(1), // Separator
            Constraint::Min(1),    // Results
        ])
        .split(inner);

        let input_line = self.input.line(
            Span::styled("> ", Style::default().fg(theme::PRIMARY_LIGHT)),
            Style::default().fg(theme::TEXT),
            Style::default().bg(theme::TEXT).fg(theme::BG_BASE),
            "Type a command or error code...",
            theme::dim(),
        );
        frame.render_widget(Paragraph::new(input_line), chunks[0]);

        let sep = Line::styled("─".repeat(chunks[1].width as usize), theme::dim());
        frame.render_widget(Paragraph::new(sep), chunks[1]);

        self.render_results(frame, chunks[2]);
    }

    fn render_results(&self, frame: &mut Frame, area: Rect) {
        if self.filtered.is_empty() {
            let no_match = Line::styled("  No matching commands", theme::dim());
            frame.render_widget(Paragraph::new(no_match), area);
            return;
        }

        let visible_height = area.height as usize;
        let is_filtered = !self.input.is_empty();
        // Scroll so the selection stays visible in the long code list
        let offset = self.selected.saturating_sub(visible_height.saturating_sub(1));

        let mut lines: Vec<Line> = Vec::new();

        if is_filtered {
            for (i, fc) in self.filtered.iter().enumerate().skip(offset) {
                if lines.len() >= visible_height {
                    break;
                }
                let cmd = &self.commands[fc.command_index];
                lines.push(render_command_line(cmd, &fc.indices, i == self.selected, area.width));
            }
        } else {
            let mut current_category: Option<CommandCategory> = None;
            for (i, fc) in self.filtered.iter().enumerate().skip(offset) {
                if lines.len() >= visible_height {
                    break;
                }
                let cmd = &self.commands[fc.command_index];

                if current_category != Some(cmd.category) {
                    current_category = Some(cmd.category);
                    if !lines.is_empty() {
                        lines.push(Line::raw(""));
                    }
                    if lines.len() < visible_height {
                        lines.push(Line::styled(
                            format!("  {}", cmd.category.label()),
                            Style::default()
                                .fg(cmd.category.color())
                                .add_modifier(Modifier::BOLD),
                        ));
                    }
                }

                if lines.len() < visible_height {
                    lines.push(render_command_line(
                        cmd,
                        &fc.indices,
                        i == self.selected,
                        area.width,
                    ));
                }
            }
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn render_command_line(
    cmd: &Command,
    match_indices: &[u32],
    is_selected: bool,
    width: u16,
) -> Line<'static> {
    let mut spans: Vec<Span> = Vec::new();

    let prefix = if is_selected { "▸ " } else { "  " };
    spans.push(Span::styled(prefix, theme::title()));

    let base_style = if is_selected {
        Style::default().fg(theme::TEXT).bold()
    } else {
        Style::default().fg(theme::TEXT)
    };
    let highlight_style = if is_selected {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    };

    for (i, ch) in cmd.label.chars().enumerate() {
        let style = if match_indices.contains(&(i as u32)) {
            highlight_style
        } else {
            base_style
        };
        spans.push(Span::styled(ch.to_string(), style));
    }

    let hint = match cmd.keybinding {
        Some(key) => format!(" [{key}]"),
        None if is_selected => format!(" {}", cmd.description),
        None => String::new(),
    };
    if !hint.is_empty() {
        let label_len = cmd.label.chars().count() + 2;
        let padding = (width as usize)
            .saturating_sub(label_len)
            .saturating_sub(hint.chars().count());
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
        }
        spans.push(Span::styled(hint, theme::dim()));
    }

    Line::from(spans)
}

/// Palette modal position: top-center, half the width.
fn centered_palette_rect(area: Rect) -> Rect {
    let width = (area.width * 50 / 100).max(30).min(area.width);
    let height = (area.height * 45 / 100).max(10).min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + area.height / 6;

    Rect::new(x, y, width, height.min(area.height.saturating_sub(area.height / 6)))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const APP_COMMANDS: usize = 9;
    /// Three message types and eight error families.
    const GUIDE_COMMANDS: usize = 11;

    fn make_palette() -> CommandPaletteState {
        CommandPaletteState::new(build_command_registry(None))
    }

    fn type_into(palette: &mut CommandPaletteState, text: &str) {
        for c in text.chars() {
            palette.input.insert_char(c);
        }
        palette.refilter();
    }

    #[test]
    fn test_empty_input_shows_all() {
        let palette = make_palette();
        assert_eq!(palette.filtered.len(), APP_COMMANDS + GUIDE_COMMANDS);
    }

    #[test]
    fn test_typing_filters() {
        let mut palette = make_palette();
        type_into(&mut palette, "qui");
        assert!(!palette.filtered.is_empty());
        let top = &palette.commands[palette.filtered[0].command_index];
        assert_eq!(top.label, "Quit");
    }

    #[test]
    fn test_no_match() {
        let mut palette = make_palette();
        type_into(&mut palette, "zzzzzz");
        assert!(palette.filtered.is_empty());
        assert!(palette.selected_action().is_none());
    }

    #[test]
    fn test_selection_wraps() {
        let mut palette = make_palette();
        palette.select_prev();
        assert_eq!(palette.selected, palette.filtered.len() - 1);
        palette.select_next();
        assert_eq!(palette.selected, 0);
    }

    #[test]
    fn test_first_command_focuses_search() {
        let palette = make_palette();
        assert_eq!(palette.selected_action(), Some(Action::FocusSearch));
    }

    #[test]
    fn test_catalog_adds_jump_entries() {
        let catalog = Catalog::bundled().unwrap();
        let registry = build_command_registry(Some(&catalog));
        assert_eq!(registry.len(), APP_COMMANDS + GUIDE_COMMANDS + catalog.len());

        let mut palette = CommandPaletteState::new(registry);
        type_into(&mut palette, "ac04");
        assert_eq!(
            palette.selected_action(),
            Some(Action::OpenDetail("AC04".to_string()))
        );
        assert!(!palette.filtered[0].indices.is_empty());
    }

    #[test]
    fn test_guides_are_listed() {
        let mut palette = make_palette();
        type_into(&mut palette, "guide camt");
        assert_eq!(
            palette.selected_action(),
            Some(Action::OpenGuide(GuideTopic::Message("camt.053")))
        );

        let families = build_command_registry(None)
            .into_iter()
            .filter(|c| matches!(c.action, Action::OpenGuide(GuideTopic::Family(_))))
            .count();
        assert_eq!(families, 8);
    }

    #[test]
    fn test_category_ordering() {
        let catalog = Catalog::bundled().unwrap();
        let categories: Vec<_> = build_command_registry(Some(&catalog))
            .iter()
            .map(|c| c.category)
            .collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_enter_executes_and_esc_closes() {
        use crossterm::event::KeyEventState;
        let key = |code| {
            Event::Key(KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            })
        };
        let mut palette = make_palette();
        assert!(matches!(
            palette.handle_input(&key(KeyCode::Enter)),
            PaletteResult::Execute(Action::FocusSearch)
        ));
        assert!(matches!(
            palette.handle_input(&key(KeyCode::Esc)),
            PaletteResult::Close
        ));
    }
}
