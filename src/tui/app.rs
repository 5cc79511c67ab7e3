use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers,
    MouseEventKind,
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::theme;
use super::views::command_palette::{
    build_command_registry, CommandPaletteState, PaletteResult,
};
use super::views::detail::{DetailResult, DetailViewState};
use super::views::guide::{GuideResult, GuideViewState};
use super::views::search::{SearchResult, SearchViewState};
use super::views::subscribe::{SubscribeResult, SubscribeState};
use crate::config::SearchConfig;
use crate::core::catalog::{Catalog, CatalogSource};
use crate::core::deep_link;
use crate::core::guides::GuideTopic;
use crate::core::progress::ProgressStore;
use crate::core::search::{NucleoMatcher, SearchPipeline};

pub const LOAD_FAILED: &str = "Failed to load error data";

/// Lifecycle of the one-shot catalog load.
pub enum CatalogState {
    Loading,
    /// Terminal: only quitting is possible.
    Failed(String),
    Ready(Arc<Catalog>),
}

/// Load the catalog in the background and report back over `tx`.
pub fn spawn_catalog_load(source: CatalogSource, tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let event = match Catalog::load(&source).await {
            Ok(catalog) => AppEvent::CatalogLoaded(Arc::new(catalog)),
            Err(e) => {
                log::error!("Catalog load from {} failed: {e}", source.describe());
                AppEvent::CatalogFailed(error_chain(&e))
            }
        };
        // Receiver gone means the app already quit
        let _ = tx.send(event);
    });
}

/// `error: cause: cause ...` on one line.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Currently focused top-level view.
    pub focus: Focus,
    pub catalog: CatalogState,
    /// Present once the catalog is loaded.
    search: Option<SearchViewState>,
    /// Present while a record (or a miss) is open.
    detail: Option<DetailViewState>,
    /// Present while a reference guide is open; drawn over search or detail.
    guide: Option<GuideViewState>,
    progress: ProgressStore,
    /// Deep link from the command line, opened when the catalog arrives.
    pending_link: Option<String>,
    search_config: SearchConfig,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Subscribe modal state (Some when open).
    subscribe: Option<SubscribeState>,
    /// Command palette state (Some when open).
    command_palette: Option<CommandPaletteState>,
    /// Receiver for background events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender handed to background tasks.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        search_config: SearchConfig,
        progress: ProgressStore,
        deep_link: Option<String>,
    ) -> Self {
        Self {
            running: true,
            focus: Focus::Search,
            catalog: CatalogState::Loading,
            search: None,
            detail: None,
            guide: None,
            progress,
            pending_link: deep_link,
            search_config,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            subscribe: None,
            command_palette: None,
            event_rx,
            event_tx,
        }
    }

    /// Kick off the catalog load on the runtime.
    pub fn load_catalog(&self, source: CatalogSource) {
        spawn_catalog_load(source, self.event_tx.clone());
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(normalize_mouse(crossterm_event)),
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::CatalogLoaded(catalog) => self.on_catalog_loaded(catalog),
            AppEvent::CatalogFailed(message) => {
                self.search = None;
                self.detail = None;
                self.guide = None;
                self.catalog = CatalogState::Failed(message);
            }
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn handle_input(&mut self, event: Event) {
        // Priority 1: Command palette consumes all input when open
        if let Some(ref mut palette) = self.command_palette {
            match palette.handle_input(&event) {
                PaletteResult::Consumed => return,
                PaletteResult::Execute(action) => {
                    self.command_palette = None;
                    self.handle_action(action);
                    return;
                }
                PaletteResult::Close => {
                    self.command_palette = None;
                    return;
                }
            }
        }

        // Priority 2: Help modal
        if self.show_help {
            if let Some(action) = self.map_help_input(&event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 3: Subscribe modal
        if let Some(ref mut form) = self.subscribe {
            if form.handle_input(&event) == SubscribeResult::Close {
                self.subscribe = None;
            }
            return;
        }

        // Priority 4: Focused view
        if self.dispatch_view_input(&event) {
            return;
        }

        // Priority 5: Global keybindings
        if let Some(action) = self.map_input_to_action(event) {
            self.handle_action(action);
        }
    }

    /// Dispatch input to the currently focused view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.focus {
            Focus::Search => {
                let Some(search) = self.search.as_mut() else {
                    return false;
                };
                match search.handle_input(event) {
                    Some(SearchResult::Consumed) => true,
                    Some(SearchResult::Open(code)) => {
                        self.handle_action(Action::OpenDetail(code));
                        true
                    }
                    None => false,
                }
            }
            Focus::Detail => {
                let Some(detail) = self.detail.as_mut() else {
                    return false;
                };
                match detail.handle_input(event) {
                    Some(DetailResult::Consumed) => true,
                    Some(DetailResult::Back) => {
                        self.detail = None;
                        self.focus = Focus::Search;
                        true
                    }
                    Some(DetailResult::OpenGuide(topic)) => {
                        self.handle_action(Action::OpenGuide(topic));
                        true
                    }
                    None => false,
                }
            }
            Focus::Guide => {
                let Some(guide) = self.guide.as_mut() else {
                    return false;
                };
                match guide.handle_input(event) {
                    Some(GuideResult::Consumed) => true,
                    Some(GuideResult::Back) => {
                        self.close_guide();
                        true
                    }
                    Some(GuideResult::OpenDetail(code)) => {
                        self.guide = None;
                        self.handle_action(Action::OpenDetail(code));
                        true
                    }
                    None => false,
                }
            }
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(Action::OpenCommandPalette),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(Action::OpenSubscribe),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('/') => Some(Action::FocusSearch),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        // Everything but quitting and help needs a loaded catalog
        if !matches!(self.catalog, CatalogState::Ready(_))
            && !matches!(action, Action::Quit | Action::ShowHelp | Action::CloseHelp)
        {
            return;
        }

        match action {
            Action::Quit => self.running = false,
            Action::FocusSearch => {
                self.detail = None;
                self.guide = None;
                self.focus = Focus::Search;
                if let Some(search) = self.search.as_mut() {
                    search.focus_query();
                }
            }
            Action::OpenDetail(code) => self.open_detail(&code),
            Action::OpenGuide(topic) => self.open_guide(topic),
            Action::ClearFilters => self.with_search(SearchViewState::clear_filters),
            Action::ToggleShowAll => self.with_search(SearchViewState::toggle_show_all),
            Action::NextPage => self.with_search(SearchViewState::next_page),
            Action::PrevPage => self.with_search(SearchViewState::prev_page),
            Action::OpenCommandPalette => {
                let catalog = match &self.catalog {
                    CatalogState::Ready(catalog) => Some(catalog.as_ref()),
                    _ => None,
                };
                self.command_palette =
                    Some(CommandPaletteState::new(build_command_registry(catalog)));
            }
            Action::CloseCommandPalette => self.command_palette = None,
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
            Action::OpenSubscribe => self.subscribe = Some(SubscribeState::new()),
            Action::CloseSubscribe => self.subscribe = None,
            Action::ClearProgress => match self.progress.clear() {
                Ok(()) => self.push_notification(
                    "Viewed progress cleared".to_string(),
                    NotificationLevel::Success,
                ),
                Err(e) => {
                    log::warn!("{e}");
                    self.push_notification(
                        "Could not clear viewed progress".to_string(),
                        NotificationLevel::Warning,
                    );
                }
            },
        }
    }

    /// Run a search command and bring the search view forward.
    fn with_search(&mut self, f: impl FnOnce(&mut SearchViewState)) {
        if let Some(search) = self.search.as_mut() {
            f(search);
            self.detail = None;
            self.guide = None;
            self.focus = Focus::Search;
        }
    }

    fn on_catalog_loaded(&mut self, catalog: Arc<Catalog>) {
        let pipeline =
            SearchPipeline::new(NucleoMatcher::with_threshold(self.search_config.fuzzy_threshold));
        self.search = Some(SearchViewState::new(
            Arc::clone(&catalog),
            pipeline,
            self.search_config.page_size,
        ));
        self.catalog = CatalogState::Ready(catalog);

        if let Some(link) = self.pending_link.take() {
            let code = deep_link::parse(&link).unwrap_or_else(|| link.trim().to_string());
            self.open_detail(&code);
        }
    }

    fn open_detail(&mut self, code: &str) {
        let CatalogState::Ready(catalog) = &self.catalog else {
            return;
        };
        let detail = DetailViewState::open(catalog, code);
        if let Some(record) = detail.record() {
            if let Err(e) = self.progress.mark_viewed(&record.code) {
                log::warn!("Failed to record progress for {}: {e}", record.code);
            }
        }
        self.detail = Some(detail);
        self.guide = None;
        self.focus = Focus::Detail;
    }

    fn open_guide(&mut self, topic: GuideTopic) {
        let CatalogState::Ready(catalog) = &self.catalog else {
            return;
        };
        self.guide = Some(GuideViewState::open(catalog, topic));
        self.focus = Focus::Guide;
    }

    /// Back to the record the guide was opened from, or to search.
    fn close_guide(&mut self) {
        self.guide = None;
        self.focus = if self.detail.is_some() {
            Focus::Detail
        } else {
            Focus::Search
        };
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);

        if let Some(header) = layout.header {
            self.render_header(frame, header);
        }
        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if let Some(ref form) = self.subscribe {
            form.render(frame, area);
        }

        if self.show_help {
            self.render_help_modal(frame, area);
        }

        if let Some(ref palette) = self.command_palette {
            palette.render(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let mut title = vec![
            Span::styled(" ISO 20022 Error Guide ", theme::title()),
            Span::styled("payment rejection codes explained", theme::muted()),
        ];
        let mut summary = Vec::new();

        match &self.catalog {
            CatalogState::Loading => {
                summary.push(Span::styled(" Loading error data...", theme::muted()));
            }
            CatalogState::Failed(_) => {
                summary.push(Span::styled(
                    format!(" {LOAD_FAILED}"),
                    Style::default().fg(theme::ERROR),
                ));
            }
            CatalogState::Ready(catalog) => {
                let metadata = catalog.metadata();
                if !metadata.version.is_empty() {
                    title.push(Span::styled(
                        format!("  v{}", metadata.version),
                        theme::dim(),
                    ));
                    if !metadata.generated.is_empty() {
                        title.push(Span::styled(format!(" ({})", metadata.generated), theme::dim()));
                    }
                }
                summary.push(Span::styled(format!(" {} codes", catalog.len()), theme::muted()));
                for (category, count) in catalog.category_counts() {
                    summary.push(Span::raw(" · "));
                    summary.push(Span::styled(
                        format!("{category} {count}"),
                        Style::default().fg(theme::category_color(category)),
                    ));
                }
            }
        }

        frame.render_widget(
            Paragraph::new(vec![Line::from(title), Line::from(summary)]),
            area,
        );
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        match &self.catalog {
            CatalogState::Loading => self.render_loading(frame, area),
            CatalogState::Failed(message) => self.render_load_failure(frame, area, message),
            CatalogState::Ready(_) => match (self.focus, &self.search, &self.detail, &self.guide) {
                (Focus::Guide, _, _, Some(guide)) => guide.render(frame, area),
                (Focus::Detail, _, Some(detail), _) => detail.render(frame, area),
                (_, Some(search), _, _) => search.render(frame, area, &self.progress),
                _ => {}
            },
        }
    }

    fn render_loading(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("MX Error Guide");
        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled("Loading error data...", theme::muted())),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
    }

    fn render_load_failure(&self, frame: &mut Frame, area: Rect, message: &str) {
        let block = Block::default()
            .title(" MX Error Guide ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ERROR));

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                LOAD_FAILED,
                Style::default()
                    .fg(theme::ERROR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(message.to_string(), theme::muted())),
            Line::raw(""),
            Line::from(vec![
                Span::raw("Press "),
                Span::styled("q", theme::key_hint()),
                Span::raw(" to quit"),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let typing = self.focus == Focus::Search
            && self.search.as_ref().is_some_and(|s| s.is_typing());
        let mode_indicator = if typing {
            Span::styled(" SEARCH ", theme::insert_badge())
        } else {
            Span::raw("")
        };

        let view_label = match (self.focus, &self.detail, &self.guide) {
            (Focus::Detail, Some(detail), _) => format!("{} {}", self.focus.label(), detail.title()),
            (Focus::Guide, _, Some(guide)) => format!("{} {}", self.focus.label(), guide.topic().id()),
            _ => self.focus.label().to_string(),
        };

        let mut spans = vec![
            Span::styled(" MX GUIDE ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                view_label,
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        if let CatalogState::Ready(catalog) = &self.catalog {
            spans.push(Span::raw(" │ "));
            spans.push(Span::styled("Viewed:", theme::key_hint()));
            spans.push(Span::raw(format!(
                " {}/{} ({}%)",
                self.progress.viewed_count(),
                catalog.len(),
                self.progress.completion_percentage(catalog.len())
            )));
        }

        spans.extend([
            Span::raw(" │ "),
            Span::styled("/", theme::key_hint()),
            Span::raw(":search "),
            Span::styled("Enter", theme::key_hint()),
            Span::raw(":open "),
            Span::styled("Esc", theme::key_hint()),
            Span::raw(":back "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("Ctrl+P", theme::key_hint()),
            Span::raw(":cmd "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1.min(area.height.saturating_sub(height));

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).bold()),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("Ctrl+P", "Open command palette"),
            ("Ctrl+S", "Subscribe to updates"),
            ("/", "Search"),
            ("", ""),
            ("Search View:", ""),
            ("/ or i", "Type a query (Esc / Enter to leave)"),
            ("Ctrl+U", "Clear the query"),
            ("j/k", "Select result"),
            ("Enter", "Open selected error"),
            ("n/p", "Next / previous page"),
            ("a", "Toggle show all"),
            ("c / C", "Next / previous category"),
            ("s", "Cycle severity"),
            ("x", "Clear filters"),
            ("", ""),
            ("Detail View:", ""),
            ("j/k", "Scroll"),
            ("Space / PgUp", "Page down / up"),
            ("g / G", "Top / bottom"),
            ("m", "Open message type guide"),
            ("f", "Open error family overview"),
            ("Esc", "Back to search"),
            ("", ""),
            ("Guide View:", ""),
            ("j/k", "Scroll"),
            ("Tab / Shift+Tab", "Select a listed code"),
            ("Enter", "Open selected error"),
            ("Esc", "Back"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<16}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).bold(),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", Style::default().fg(theme::PRIMARY_LIGHT).bold()),
            Span::raw(" or "),
            Span::styled("Esc", Style::default().fg(theme::PRIMARY_LIGHT).bold()),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Wheel scrolling behaves like the arrow keys.
fn normalize_mouse(event: Event) -> Event {
    let code = match &event {
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => KeyCode::Down,
            MouseEventKind::ScrollUp => KeyCode::Up,
            _ => return event,
        },
        _ => return event,
    };
    Event::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    })
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
