//! Detail view: one error code, fully explained.
//!
//! Also renders the not-found state for deep links to unknown codes.

use std::sync::Arc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::catalog::{Catalog, ErrorRecord, LookupMiss};
use crate::core::deep_link;
use crate::core::explain::{explain, Explanation};
use crate::core::guides::{self, GuideTopic};

pub const NOT_FOUND_HINT: &str = "Press Esc to search all errors";

enum DetailContent {
    Record {
        record: Arc<ErrorRecord>,
        explanation: Explanation,
    },
    Missing(LookupMiss),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailResult {
    Consumed,
    /// Return to the search view.
    Back,
    /// Open a reference guide linked from the record.
    OpenGuide(GuideTopic),
}

pub struct DetailViewState {
    content: DetailContent,
    /// Pre-built lines; the record never changes while the view is open.
    lines: Vec<Line<'static>>,
    scroll: usize,
}

impl DetailViewState {
    /// Look `code` up and build the view, or the not-found state on a miss.
    pub fn open(catalog: &Catalog, code: &str) -> Self {
        let content = match catalog.lookup(code) {
            Ok(record) => {
                let explanation = explain(&record);
                DetailContent::Record {
                    record,
                    explanation,
                }
            }
            Err(miss) => {
                log::info!("Detail requested for unknown code {:?}", miss.code);
                DetailContent::Missing(miss)
            }
        };
        let lines = build_lines(&content);
        Self {
            content,
            lines,
            scroll: 0,
        }
    }

    pub fn record(&self) -> Option<&Arc<ErrorRecord>> {
        match &self.content {
            DetailContent::Record { record, .. } => Some(record),
            DetailContent::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.content, DetailContent::Missing(_))
    }

    /// Title for the status bar.
    pub fn title(&self) -> String {
        match &self.content {
            DetailContent::Record { record, .. } => record.code.clone(),
            DetailContent::Missing(miss) => miss.code.clone(),
        }
    }

    // ── Input handling ──────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event) -> Option<DetailResult> {
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
                return Some(DetailResult::Back);
            }
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => self.scroll_down(1),
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => self.scroll_up(1),
            (KeyModifiers::NONE, KeyCode::PageDown | KeyCode::Char(' ')) => self.scroll_down(15),
            (KeyModifiers::NONE, KeyCode::PageUp) => self.scroll_up(15),
            (KeyModifiers::NONE, KeyCode::Char('g') | KeyCode::Home) => self.scroll = 0,
            (KeyModifiers::SHIFT, KeyCode::Char('G')) | (KeyModifiers::NONE, KeyCode::End) => {
                self.scroll = self.max_scroll();
            }
            (KeyModifiers::NONE, KeyCode::Char('m')) => {
                return self.linked_guide(|t| matches!(t, GuideTopic::Message(_)));
            }
            (KeyModifiers::NONE, KeyCode::Char('f')) => {
                return self.linked_guide(|t| matches!(t, GuideTopic::Family(_)));
            }
            _ => return None,
        }
        Some(DetailResult::Consumed)
    }

    /// First guide linked from the record that matches `wanted`.
    fn linked_guide(&self, wanted: impl Fn(&GuideTopic) -> bool) -> Option<DetailResult> {
        let record = self.record()?;
        let topic = guides::topics_for(record).into_iter().find(|t| wanted(t));
        Some(topic.map_or(DetailResult::Consumed, DetailResult::OpenGuide))
    }

    fn max_scroll(&self) -> usize {
        self.lines.len().saturating_sub(1)
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
        let paragraph = Paragraph::new(self.lines.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.min(u16::MAX as usize) as u16, 0));
        frame.render_widget(paragraph, area);
    }
}

fn build_lines(content: &DetailContent) -> Vec<Line<'static>> {
    match content {
        DetailContent::Record {
            record,
            explanation,
        } => record_lines(record, explanation),
        DetailContent::Missing(miss) => vec![
            Line::raw(""),
            Line::from(Span::styled(
                format!("  {miss}"),
                Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::raw("  "),
                Span::styled(NOT_FOUND_HINT, theme::muted()),
            ]),
        ],
    }
}

fn record_lines(record: &ErrorRecord, explanation: &Explanation) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("  {}", record.code), theme::title()),
            Span::raw("  "),
            Span::styled(
                record.name.clone(),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(
                record.category.label(),
                Style::default().fg(theme::category_color(record.category)),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" {} ", record.severity.as_str()),
                theme::severity_badge(record.severity),
            ),
            Span::raw("  "),
            Span::styled(deep_link::route_for(&record.code), theme::dim()),
        ]),
    ];

    section(&mut lines, "Description");
    paragraph(&mut lines, &record.description.short);
    if !record.description.detailed.is_empty() {
        lines.push(Line::raw(""));
        paragraph(&mut lines, &record.description.detailed);
    }

    section(&mut lines, "For Operations");
    paragraph(&mut lines, &explanation.for_operations);

    section(&mut lines, "For Developers");
    paragraph(&mut lines, &explanation.for_developers);

    bullets(&mut lines, "Common Causes", &record.common_causes, false);
    bullets(&mut lines, "How to Fix", &record.how_to_fix.steps, true);
    if let Some(prevention) = &record.how_to_fix.prevention {
        section(&mut lines, "Prevention");
        paragraph(&mut lines, prevention);
    }
    bullets(&mut lines, "XPath Locations", &record.xpath_locations, false);
    bullets(&mut lines, "Message Types", &record.message_types, false);
    bullets(&mut lines, "Market Practices", &record.market_practices, false);

    let topics = guides::topics_for(record);
    if !topics.is_empty() {
        section(&mut lines, "Guides");
        let first_message = topics.iter().find(|t| matches!(t, GuideTopic::Message(_)));
        for topic in &topics {
            let hint = match topic {
                GuideTopic::Family(_) => "  f ",
                GuideTopic::Message(_) if Some(topic) == first_message => "  m ",
                GuideTopic::Message(_) => "    ",
            };
            lines.push(Line::from(vec![
                Span::styled(hint, theme::key_hint()),
                Span::styled(topic.title(), Style::default().fg(theme::TEXT)),
            ]));
        }
    }

    if !record.resources.is_empty() {
        section(&mut lines, "Resources");
        for resource in &record.resources {
            lines.push(Line::from(vec![
                Span::raw("  • "),
                Span::styled(resource.title.clone(), Style::default().fg(theme::TEXT)),
                Span::raw(" "),
                Span::styled(
                    resource.url.clone(),
                    Style::default()
                        .fg(theme::INFO)
                        .add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines
}

pub(super) fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(format!("  {title}"), theme::heading())));
}

pub(super) fn paragraph(lines: &mut Vec<Line<'static>>, text: &str) {
    if !text.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {text}"),
            Style::default().fg(theme::TEXT),
        )));
    }
}

pub(super) fn bullets<S: AsRef<str>>(
    lines: &mut Vec<Line<'static>>,
    title: &str,
    items: &[S],
    numbered: bool,
) {
    if items.is_empty() {
        return;
    }
    section(lines, title);
    for (i, item) in items.iter().enumerate() {
        let bullet = if numbered {
            format!("  {}. ", i + 1)
        } else {
            "  • ".to_string()
        };
        lines.push(Line::from(vec![
            Span::styled(bullet, theme::key_hint()),
            Span::styled(item.as_ref().to_string(), Style::default().fg(theme::TEXT)),
        ]));
    }
}
