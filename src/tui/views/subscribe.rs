//! Subscribe modal: newsletter sign-up with inline email validation.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::super::theme;
use crate::core::subscribe::{subscribe, ValidationError, MAX_EMAIL_LEN};
use crate::tui::widgets::input_buffer::{InputBuffer, InputEdit};

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormStatus {
    Editing,
    Invalid(ValidationError),
    Subscribed(&'static str),
}

/// Result of handling a modal input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeResult {
    Consumed,
    Close,
}

pub struct SubscribeState {
    input: InputBuffer,
    status: FormStatus,
}

impl Default for SubscribeState {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscribeState {
    pub fn new() -> Self {
        Self {
            // One over the limit so TooLong can still be reported
            input: InputBuffer::with_max_chars(MAX_EMAIL_LEN + 1),
            status: FormStatus::Editing,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        matches!(self.status, FormStatus::Subscribed(_))
    }

    fn submit(&mut self) {
        self.status = match subscribe(self.input.text()) {
            Ok(message) => {
                self.input.clear();
                FormStatus::Subscribed(message)
            }
            Err(e) => FormStatus::Invalid(e),
        };
    }

    pub fn handle_input(&mut self, event: &Event) -> SubscribeResult {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return SubscribeResult::Consumed;
        };

        match (*modifiers, *code) {
            (_, KeyCode::Esc) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                SubscribeResult::Close
            }
            (_, KeyCode::Enter) => {
                self.submit();
                SubscribeResult::Consumed
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => {
                if self.input.handle_key(code) == InputEdit::Changed {
                    self.status = FormStatus::Editing;
                }
                SubscribeResult::Consumed
            }
            _ => SubscribeResult::Consumed,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = super::super::app::centered_rect(60, 40, area);

        let input_line = self.input.line(
            Span::styled(" Email: ", theme::key_hint()),
            Style::default().fg(theme::TEXT),
            Style::default().bg(theme::TEXT).fg(theme::BG_BASE),
            "you@example.com",
            theme::dim(),
        );

        let status_line = match &self.status {
            FormStatus::Editing => Line::raw(""),
            FormStatus::Invalid(e) => Line::from(Span::styled(
                format!(" {e}"),
                Style::default().fg(theme::ERROR),
            )),
            FormStatus::Subscribed(message) => Line::from(Span::styled(
                format!(" {message}"),
                Style::default()
                    .fg(theme::SUCCESS)
                    .add_modifier(Modifier::BOLD),
            )),
        };

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Get notified when new error codes and guides are added.",
                theme::muted(),
            )),
            Line::raw(""),
            input_line,
            Line::raw(""),
            status_line,
            Line::raw(""),
            Line::from(vec![
                Span::styled(" Enter", theme::key_hint()),
                Span::raw(":subscribe "),
                Span::styled("Esc", theme::key_hint()),
                Span::raw(":close"),
            ]),
        ];

        let block = Block::default()
            .title(" Subscribe ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            modal,
        );
    }
}
