//! Schedule step: delivery mode, send-at field and the message summary.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::schedule::{
    DeliveryMode, ScheduleError, ScheduleEvent, SchedulePlan, ScheduleSummary, SEND_AT_FORMAT,
};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleResult {
    Consumed,
    Back,
    Send,
}

impl From<ScheduleEvent> for ScheduleResult {
    fn from(event: ScheduleEvent) -> Self {
        match event {
            ScheduleEvent::Back => ScheduleResult::Back,
            ScheduleEvent::Send => ScheduleResult::Send,
        }
    }
}

pub struct ScheduleViewState {
    plan: SchedulePlan,
    summary: ScheduleSummary,
    send_at_input: Option<InputBuffer>,
    error: Option<String>,
}

impl ScheduleViewState {
    pub fn new(services: &Services) -> Self {
        let plan = SchedulePlan::new();
        let summary = plan.summary(None, 0, services.cost_per_message());
        Self {
            plan,
            summary,
            send_at_input: None,
            error: None,
        }
    }

    /// Refresh the summary from the current draft and recipients.
    pub fn load(&mut self, template: Option<&str>, recipients: usize, services: &Services) {
        self.summary = self
            .plan
            .summary(template, recipients, services.cost_per_message());
    }

    pub fn plan(&self) -> &SchedulePlan {
        &self.plan
    }

    pub fn summary(&self) -> &ScheduleSummary {
        &self.summary
    }

    pub fn is_typing(&self) -> bool {
        self.send_at_input.is_some()
    }

    pub fn handle_input(&mut self, event: &Event) -> Option<ScheduleResult> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if let Some(input) = self.send_at_input.as_mut() {
            match key.code {
                KeyCode::Esc => {
                    self.send_at_input = None;
                    self.error = None;
                }
                KeyCode::Enter => match self.plan.set_send_at(input.text()) {
                    Ok(at) => {
                        log::info!("Send time set to {at}");
                        self.send_at_input = None;
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e.to_string()),
                },
                _ => {
                    if input.handle_key(key) {
                        self.error = None;
                    }
                }
            }
            return Some(ScheduleResult::Consumed);
        }

        if !matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
            return None;
        }
        match key.code {
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                self.plan.toggle_mode();
                self.error = None;
            }
            KeyCode::Char('e') => {
                if self.plan.send_at_editable() {
                    let current = self
                        .plan
                        .send_at()
                        .map(|at| at.format(SEND_AT_FORMAT).to_string())
                        .unwrap_or_default();
                    self.send_at_input = Some(InputBuffer::with_text(current));
                } else {
                    self.error = Some(ScheduleError::NotScheduled.to_string());
                }
            }
            KeyCode::Char('b') => return Some(self.plan.back().into()),
            KeyCode::Char('s') | KeyCode::Char('n') => return Some(self.plan.send().into()),
            _ => return None,
        }
        Some(ScheduleResult::Consumed)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).split(area);
        let cols = Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[0]);

        self.render_delivery(frame, cols[0]);
        self.render_summary(frame, cols[1]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" ← Back ", theme::button(true)),
                Span::styled(" [b]   ", theme::key_hint()),
                Span::styled(" Send Text Blast ", theme::button(true)),
                Span::styled(" [s]", theme::key_hint()),
            ]))
            .alignment(Alignment::Right),
            rows[1],
        );
    }

    fn render_delivery(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Schedule");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(" Delivery  [m] toggle", theme::heading())),
            rows[0],
        );
        for (row, mode) in [DeliveryMode::Immediately, DeliveryMode::Later]
            .into_iter()
            .enumerate()
        {
            let selected = self.plan.mode() == mode;
            let (mark, style) = if selected {
                ("(•)", theme::highlight())
            } else {
                ("( )", theme::muted())
            };
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {mark} {}", mode.label()), style)),
                rows[1 + row],
            );
        }

        let field_title = "Date and time (YYYY-MM-DD HH:MM)  [e]";
        if let Some(input) = &self.send_at_input {
            input.render(frame, rows[4], theme::block_focused(field_title), "", true);
        } else {
            let value = self
                .plan
                .send_at()
                .map(|at| at.format(SEND_AT_FORMAT).to_string())
                .unwrap_or_default();
            let block = if self.plan.send_at_editable() {
                theme::block_default(field_title)
            } else {
                theme::block_default(field_title).border_style(theme::dim())
            };
            InputBuffer::with_text(value).render(
                frame,
                rows[4],
                block,
                if self.plan.send_at_editable() {
                    "Not set"
                } else {
                    "Sending immediately"
                },
                false,
            );
        }

        if let Some(err) = &self.error {
            frame.render_widget(
                Paragraph::new(Span::styled(format!(" {err}"), Style::default().fg(theme::ERROR))),
                rows[5],
            );
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Message Summary");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let row = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!(" {label:<16}"), theme::muted()),
                Span::styled(value, Style::default().fg(theme::TEXT)),
            ])
        };
        let lines = vec![
            Line::raw(""),
            row("Template:", self.summary.template.clone()),
            row("Recipients:", self.summary.recipients_label()),
            row("Estimated cost:", self.summary.cost_label()),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}
