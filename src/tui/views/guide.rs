//! Guide view: a message-type guide or an error-family overview.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use super::detail::{bullets, paragraph, section};
use crate::core::catalog::Catalog;
use crate::core::guides::{self, FamilyGuide, GuideTopic, MessageGuide};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuideResult {
    Consumed,
    /// Return to the view the guide was opened from.
    Back,
    /// Open a catalog record listed in the guide.
    OpenDetail(String),
}

pub struct GuideViewState {
    topic: GuideTopic,
    lines: Vec<Line<'static>>,
    /// Catalog codes listed under "In the Catalog", in display order.
    codes: Vec<String>,
    selected: usize,
    scroll: usize,
}

impl GuideViewState {
    pub fn open(catalog: &Catalog, topic: GuideTopic) -> Self {
        let (lines, codes) = match topic {
            GuideTopic::Message(id) => match guides::message_guide(id) {
                Some(guide) => message_lines(catalog, guide),
                None => (Vec::new(), Vec::new()),
            },
            GuideTopic::Family(id) => match guides::family_guide(id) {
                Some(guide) => family_lines(catalog, guide),
                None => (Vec::new(), Vec::new()),
            },
        };
        log::debug!("Opened guide {} ({} catalog codes)", topic.id(), codes.len());
        Self {
            topic,
            lines,
            codes,
            selected: 0,
            scroll: 0,
        }
    }

    pub fn topic(&self) -> GuideTopic {
        self.topic
    }

    pub fn title(&self) -> String {
        self.topic.title()
    }

    /// Code that `Enter` would open.
    pub fn selected_code(&self) -> Option<&str> {
        self.codes.get(self.selected).map(String::as_str)
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<GuideResult> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('h')) => {
                return Some(GuideResult::Back);
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => self.scroll_down(1),
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => self.scroll_up(1),
            (KeyModifiers::NONE, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_down(15),
            (KeyModifiers::NONE, KeyCode::PageUp) => self.scroll_up(15),
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => self.scroll = 0,
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
                self.scroll = self.max_scroll();
            }
            (KeyModifiers::NONE, KeyCode::Tab) if !self.codes.is_empty() => {
                self.selected = (self.selected + 1) % self.codes.len();
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) if !self.codes.is_empty() => {
                self.selected = (self.selected + self.codes.len() - 1) % self.codes.len();
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                return Some(match self.selected_code() {
                    Some(code) => GuideResult::OpenDetail(code.to_string()),
                    None => GuideResult::Consumed,
                });
            }
            _ => return None,
        }
        Some(GuideResult::Consumed)
    }

    fn max_scroll(&self) -> usize {
        // Code list adds a blank line and a heading
        let codes = if self.codes.is_empty() { 0 } else { self.codes.len() + 2 };
        (self.lines.len() + codes).saturating_sub(1)
    }

    fn scroll_down(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_add(n).min(self.max_scroll());
    }

    fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self.title();
        let block = theme::block_focused(&title);

        let mut lines = self.lines.clone();
        if !self.codes.is_empty() {
            section(&mut lines, "In the Catalog (Tab to select, Enter to open)");
            for (i, code) in self.codes.iter().enumerate() {
                let style = if i == self.selected {
                    theme::highlight()
                } else {
                    Style::default().fg(theme::TEXT)
                };
                let marker = if i == self.selected { "  ▸ " } else { "    " };
                lines.push(Line::from(vec![
                    Span::styled(marker, theme::key_hint()),
                    Span::styled(code.clone(), style),
                ]));
            }
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
    }
}

fn heading(lines: &mut Vec<Line<'static>>, name: String, subtitle: String) {
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(format!("  {name}"), theme::title())));
    lines.push(Line::from(Span::styled(format!("  {subtitle}"), theme::muted())));
}

fn message_lines(catalog: &Catalog, guide: &MessageGuide) -> (Vec<Line<'static>>, Vec<String>) {
    let mut lines = Vec::new();
    heading(
        &mut lines,
        format!("{}  {}", guide.id, guide.full_name),
        guide.area.to_string(),
    );

    section(&mut lines, "Overview");
    paragraph(&mut lines, guide.description);
    bullets(&mut lines, "Use Cases", guide.use_cases, false);

    section(&mut lines, "Key Fields");
    for field in guide.key_fields {
        let mut name = vec![
            Span::raw("  "),
            Span::styled(
                field.name,
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
        ];
        if field.required {
            name.push(Span::styled(" required", Style::default().fg(theme::WARNING)));
        }
        lines.push(Line::from(name));
        lines.push(Line::from(Span::styled(format!("    {}", field.path), theme::dim())));
        lines.push(Line::from(Span::styled(
            format!("    {}", field.description),
            theme::muted(),
        )));
        for error in field.common_errors {
            lines.push(Line::from(Span::styled(
                format!("    ! {error}"),
                Style::default().fg(theme::ERROR),
            )));
        }
    }

    bullets(&mut lines, "Common Errors", guide.common_errors, false);
    bullets(&mut lines, "Related Messages", guide.related_messages, false);
    section(&mut lines, "Example XPath");
    lines.push(Line::from(Span::styled(
        format!("  {}", guide.example_xpath),
        Style::default().fg(theme::INFO),
    )));

    let codes = guides::records_for_message(catalog, guide.id)
        .iter()
        .map(|r| r.code.clone())
        .collect();
    (lines, codes)
}

fn family_lines(catalog: &Catalog, guide: &FamilyGuide) -> (Vec<Line<'static>>, Vec<String>) {
    let mut lines = Vec::new();
    heading(
        &mut lines,
        guide.name.to_string(),
        format!(
            "Prefixes {} · usually {}",
            guide.prefixes.join(", "),
            guide.severity.as_str()
        ),
    );

    section(&mut lines, "Overview");
    paragraph(&mut lines, guide.description);

    section(&mut lines, "Common Codes");
    for code in guide.common_codes {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<6}", code.code), theme::key_hint()),
            Span::styled(code.name, Style::default().fg(theme::TEXT)),
        ]));
    }

    bullets(&mut lines, "Typical Causes", guide.typical_causes, false);
    section(&mut lines, "Resolution");
    paragraph(&mut lines, guide.resolution);

    let codes = guides::records_for_family(catalog, guide)
        .iter()
        .map(|r| r.code.clone())
        .collect();
    (lines, codes)
}
