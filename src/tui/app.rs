use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::events::{Action, AppEvent, AreaFocus, Notification, NotificationLevel, StepExt};
use super::layout::AppLayout;
use super::services::Services;
use super::sidebar::SidebarState;
use super::theme;
use super::views::analytics::AnalyticsViewState;
use super::views::compose::{ComposeResult, ComposeViewState};
use super::views::recipients::{RecipientsResult, RecipientsViewState};
use super::views::schedule::{ScheduleResult, ScheduleViewState};
use crate::core::catalog::Template;
use crate::core::composer::TemplateRequest;
use crate::core::recipients::Recipient;
use crate::core::workflow::{Step, Transition, Workflow};

/// Maximum notifications visible at once.
const MAX_NOTIFICATIONS: usize = 3;

/// Workflow shell (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    workflow: Workflow,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    pub sidebar: SidebarState,
    compose: ComposeViewState,
    recipients: RecipientsViewState,
    schedule: ScheduleViewState,
    analytics: AnalyticsViewState,
    /// Working set handed over by the last recipients `Proceed`. Dropped on
    /// every return to Recipients, where the set can be edited again.
    last_recipients: Option<Vec<Recipient>>,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    notification_counter: u64,
    pub show_help: bool,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: Services,
}

impl AppState {
    pub fn new(event_rx: mpsc::UnboundedReceiver<AppEvent>, services: Services) -> Self {
        Self {
            running: true,
            workflow: Workflow::new(),
            area_focus: AreaFocus::Main,
            sidebar: SidebarState::new(),
            compose: ComposeViewState::new(&services),
            recipients: RecipientsViewState::new(&services),
            schedule: ScheduleViewState::new(&services),
            analytics: AnalyticsViewState::new(&services),
            last_recipients: None,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
            services,
        }
    }

    pub fn step(&self) -> Step {
        self.workflow.step()
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

        log::info!("Event loop finished");
        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Sidebar input (when focused)
                if self.area_focus == AreaFocus::Sidebar
                    && self.handle_sidebar_input(&crossterm_event)
                {
                    return;
                }

                // Priority 3: Active step view
                if self.dispatch_view_input(&crossterm_event) {
                    return;
                }

                // Priority 4: Global keybindings
                if let Some(action) = self.map_input_to_action(&crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => self.running = false,
        }
    }

    /// Dispatch input to the active step's view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        match self.workflow.step() {
            Step::Compose => match self.compose.handle_input(event) {
                Some(ComposeResult::Consumed) => true,
                Some(ComposeResult::Proceed) => {
                    self.apply_transition(Transition::Proceed);
                    true
                }
                Some(ComposeResult::SaveTemplate(request)) => {
                    self.save_template(request);
                    true
                }
                None => false,
            },
            Step::Recipients => match self.recipients.handle_input(event) {
                Some(RecipientsResult::Consumed) => true,
                Some(RecipientsResult::Back) => {
                    self.apply_transition(Transition::Back);
                    true
                }
                Some(RecipientsResult::Proceed(list)) => {
                    log::info!("Recipients confirmed: {} contacts", list.len());
                    self.last_recipients = Some(list);
                    self.apply_transition(Transition::Proceed);
                    true
                }
                None => false,
            },
            Step::Schedule => match self.schedule.handle_input(event) {
                Some(ScheduleResult::Consumed) => true,
                Some(ScheduleResult::Back) => {
                    self.apply_transition(Transition::Back);
                    true
                }
                Some(ScheduleResult::Send) => {
                    let count = self.schedule.summary().recipients;
                    self.push_notification(
                        format!("Text blast submitted for {count} contacts"),
                        NotificationLevel::Success,
                    );
                    self.apply_transition(Transition::Send);
                    true
                }
                None => false,
            },
            Step::Analytics => self.analytics.handle_input(event),
        }
    }

    /// Handle sidebar-specific input. Returns true if consumed.
    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match code {
            KeyCode::Char('j') | KeyCode::Down => self.sidebar.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.sidebar.select_prev(),
            KeyCode::Enter | KeyCode::Char('l') => {
                let step = self.sidebar.selected_step();
                self.handle_action(step.to_action());
            }
            KeyCode::Char('h') => {
                self.sidebar.user_collapsed = true;
                self.area_focus = AreaFocus::Main;
            }
            KeyCode::Esc => self.area_focus = AreaFocus::Main,
            _ => return false,
        }
        true
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

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
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
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab => Some(Action::TabNext),
                KeyCode::BackTab => Some(Action::TabPrev),
                KeyCode::Char(c) => Step::ALL
                    .iter()
                    .find(|s| s.hotkey() == c)
                    .map(|s| s.to_action()),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusStep(step) => {
                self.apply_transition(Transition::Select(step));
                self.area_focus = AreaFocus::Main;
            }
            Action::TabNext => self.apply_transition(Transition::Select(self.step().next())),
            Action::TabPrev => self.apply_transition(Transition::Select(self.step().prev())),
            Action::ToggleSidebar => {
                self.sidebar.toggle_collapse();
                if !self.sidebar.user_collapsed {
                    self.area_focus = AreaFocus::Sidebar;
                    self.sidebar.sync_to_step(self.step());
                }
            }
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    fn apply_transition(&mut self, transition: Transition) {
        if self.workflow.apply(transition).is_some() {
            self.on_step_changed();
        }
    }

    fn on_step_changed(&mut self) {
        let step = self.step();
        self.sidebar.sync_to_step(step);
        if step == Step::Recipients {
            self.last_recipients = None;
        }
        if step == Step::Schedule {
            let template = self.compose.composer().selected_template_name();
            let count = self
                .last_recipients
                .as_ref()
                .map_or_else(|| self.recipients.selector().total(), Vec::len);
            self.schedule.load(template, count, &self.services);
        }
    }

    fn save_template(&mut self, request: TemplateRequest) {
        let template = Template::new(Uuid::new_v4().to_string(), request.name, request.content);
        log::info!("Saved template '{}' ({})", template.name, template.id);
        self.push_notification(
            format!("Template \"{}\" saved", template.name),
            NotificationLevel::Success,
        );
        self.compose.add_template(template);
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

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (layout, visibility) = AppLayout::compute(area, self.sidebar.user_collapsed);

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar
                .render(frame, sidebar_area, visibility, self.step(), self.area_focus);
        }

        self.render_step_tabs(frame, layout.tabs);
        self.render_content(frame, layout.main);
        if let Some(strip) = layout.strip {
            super::dashboard::render(frame, strip, &self.services.catalog.home);
        }
        self.render_status_bar(frame, layout.status);

        self.render_notifications(frame, area);
        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_step_tabs(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = Step::ALL
            .iter()
            .map(|s| Line::from(format!("{} {}", s.hotkey(), s.label())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.step().index())
            .style(theme::muted())
            .highlight_style(theme::highlight())
            .divider("│")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_default()),
            );
        frame.render_widget(tabs, area);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        match self.step() {
            Step::Compose => self.compose.render(frame, area),
            Step::Recipients => self.recipients.render(frame, area),
            Step::Schedule => self.schedule.render(frame, area),
            Step::Analytics => self.analytics.render(frame, area),
        }
    }

    fn is_typing(&self) -> bool {
        match self.step() {
            Step::Compose => self.compose.is_typing(),
            Step::Recipients => self.recipients.is_typing(),
            Step::Schedule => self.schedule.is_typing(),
            Step::Analytics => false,
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode_indicator = if self.is_typing() {
            Span::styled(" INSERT ", theme::insert_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" AutoBlitz ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.step().title(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("1-4", theme::key_hint()),
            Span::raw(":step "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":next "),
            Span::styled("Ctrl+B", theme::key_hint()),
            Span::raw(":sidebar "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1, max_width, height);

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
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            notification_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("q / Ctrl+C", "Quit"),
            ("?", "Toggle this help"),
            ("Tab / Shift+Tab", "Next / previous step"),
            ("1-4", "Jump to step"),
            ("Ctrl+B", "Toggle sidebar"),
            ("", ""),
            ("Compose:", ""),
            ("i / Enter", "Edit message (Esc to stop)"),
            ("t", "Choose template"),
            ("v", "Insert variable"),
            ("p", "Toggle preview"),
            ("s", "Save as template"),
            ("n", "Next: recipients"),
            ("", ""),
            ("Recipients:", ""),
            ("h/l", "Import / segments tab"),
            ("j/k, Space", "Move / toggle segment"),
            ("a, c", "Pick / clear contact file"),
            ("J/K, x", "Move / remove recipient"),
            ("b / n", "Back / next"),
            ("", ""),
            ("Schedule:", ""),
            ("m", "Toggle delivery mode"),
            ("e", "Edit send time"),
            ("b / s", "Back / send"),
            ("", ""),
            ("Analytics:", ""),
            ("h/l", "Chart tab"),
            ("p", "Time period"),
            ("j/k", "Select campaign"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<18}", key),
                        Style::default().fg(theme::PRIMARY_LIGHT).bold(),
                    ),
                    Span::raw(desc),
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

/// Calculate a centered rect using percentage of parent area.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
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
