//! Recipients step: contact-file import, segment checklist and the
//! removable working set.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::recipients::{Recipient, RecipientEvent, RecipientSelector, RecipientTab};
use crate::tui::services::Services;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientsResult {
    Consumed,
    Back,
    Proceed(Vec<Recipient>),
}

impl From<RecipientEvent> for RecipientsResult {
    fn from(event: RecipientEvent) -> Self {
        match event {
            RecipientEvent::Back => RecipientsResult::Back,
            RecipientEvent::Proceed(list) => RecipientsResult::Proceed(list),
        }
    }
}

pub struct RecipientsViewState {
    selector: RecipientSelector,
    segment_cursor: usize,
    recipient_cursor: usize,
    /// Open while the user types a contact-file path.
    path_input: Option<InputBuffer>,
}

impl RecipientsViewState {
    pub fn new(services: &Services) -> Self {
        Self::with_initial(services, Vec::new())
    }

    /// Start from an explicit recipient list; empty means the catalog contacts.
    pub fn with_initial(services: &Services, initial: Vec<Recipient>) -> Self {
        let catalog = &services.catalog;
        Self {
            selector: RecipientSelector::new(
                catalog.segments.clone(),
                initial,
                catalog.contacts.clone(),
            ),
            segment_cursor: 0,
            recipient_cursor: 0,
            path_input: None,
        }
    }

    pub fn selector(&self) -> &RecipientSelector {
        &self.selector
    }

    pub fn is_typing(&self) -> bool {
        self.path_input.is_some()
    }

    fn clamp_recipient_cursor(&mut self) {
        self.recipient_cursor = self
            .recipient_cursor
            .min(self.selector.total().saturating_sub(1));
    }

    pub fn handle_input(&mut self, event: &Event) -> Option<RecipientsResult> {
        let Event::Key(key) = event else {
            return None;
        };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if let Some(input) = self.path_input.as_mut() {
            match key.code {
                KeyCode::Esc => self.path_input = None,
                KeyCode::Enter => {
                    if !input.is_empty() {
                        let path = input.take();
                        self.selector.select_import_file(path.trim());
                    }
                    self.path_input = None;
                }
                _ => {
                    input.handle_key(key);
                }
            }
            return Some(RecipientsResult::Consumed);
        }

        self.handle_normal_input(key)
    }

    fn handle_normal_input(&mut self, key: &KeyEvent) -> Option<RecipientsResult> {
        if !matches!(key.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
            return None;
        }
        match key.code {
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Char('l') | KeyCode::Right => {
                self.selector.toggle_tab();
            }
            KeyCode::Char('j') | KeyCode::Down if self.selector.tab() == RecipientTab::Segments => {
                let last = self.selector.segments().len().saturating_sub(1);
                self.segment_cursor = (self.segment_cursor + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up if self.selector.tab() == RecipientTab::Segments => {
                self.segment_cursor = self.segment_cursor.saturating_sub(1);
            }
            KeyCode::Char(' ') if self.selector.tab() == RecipientTab::Segments => {
                let id = self
                    .selector
                    .segments()
                    .get(self.segment_cursor)
                    .map(|s| s.id.clone());
                if let Some(id) = id {
                    let checked = self.selector.toggle_segment(&id);
                    log::info!("Segment '{id}' {}", if checked { "checked" } else { "unchecked" });
                }
            }
            KeyCode::Char('a') if self.selector.tab() == RecipientTab::Import => {
                self.path_input = Some(InputBuffer::new());
            }
            KeyCode::Char('c') if self.selector.tab() == RecipientTab::Import => {
                self.selector.clear_import_file();
            }
            KeyCode::Char('J') => {
                let last = self.selector.total().saturating_sub(1);
                self.recipient_cursor = (self.recipient_cursor + 1).min(last);
            }
            KeyCode::Char('K') => {
                self.recipient_cursor = self.recipient_cursor.saturating_sub(1);
            }
            KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => {
                let id = self
                    .selector
                    .recipient_at(self.recipient_cursor)
                    .map(|r| r.id.clone());
                if let Some(id) = id {
                    if let Some(removed) = self.selector.remove_recipient(&id) {
                        log::info!("Removed recipient '{}' ({})", removed.name, removed.id);
                    }
                    self.clamp_recipient_cursor();
                }
            }
            KeyCode::Char('b') => return Some(self.selector.back().into()),
            KeyCode::Char('n') => {
                return Some(
                    self.selector
                        .proceed()
                        .map_or(RecipientsResult::Consumed, Into::into),
                );
            }
            _ => return None,
        }
        Some(RecipientsResult::Consumed)
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([Constraint::Min(6), Constraint::Length(1)]).split(area);
        let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.render_sources(frame, cols[0]);
        self.render_working_set(frame, cols[1]);

        let enabled = self.selector.can_proceed();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" ← Back ", theme::button(true)),
                Span::styled(" [b]   ", theme::key_hint()),
                Span::styled(" Next: Schedule → ", theme::button(enabled)),
                Span::styled(" [n]", theme::key_hint()),
            ]))
            .alignment(Alignment::Right),
            rows[1],
        );
    }

    fn render_sources(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_focused("Select Recipients");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).split(inner);

        let tab_spans: Vec<Span> = [RecipientTab::Import, RecipientTab::Segments]
            .iter()
            .flat_map(|&tab| {
                let style = if tab == self.selector.tab() {
                    theme::highlight()
                } else {
                    theme::muted()
                };
                [Span::styled(format!(" {} ", tab.label()), style), Span::raw("│")]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(tab_spans)), rows[0]);

        match self.selector.tab() {
            RecipientTab::Import => self.render_import(frame, rows[1]),
            RecipientTab::Segments => self.render_segments(frame, rows[1]),
        }
    }

    fn render_import(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

        let drop_zone = vec![
            Line::from(Span::styled("Upload CSV or Excel file", theme::heading())),
            Line::from(Span::styled("Press [a] and enter a file path", theme::muted())),
        ];
        frame.render_widget(
            Paragraph::new(drop_zone).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::border_default()),
            ),
            rows[1],
        );

        if let Some(input) = &self.path_input {
            input.render(
                frame,
                rows[2],
                theme::block_focused("File path"),
                "contacts.csv",
                true,
            );
        } else if let Some(file) = self.selector.import_file() {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(" ✓ ", Style::default().fg(theme::SUCCESS)),
                    Span::styled(file.name(), Style::default().fg(theme::TEXT)),
                    Span::styled("  [c] remove", theme::key_hint()),
                ]))
                .block(theme::block_default("Selected file")),
                rows[2],
            );
        }
    }

    fn render_segments(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .selector
            .segments()
            .iter()
            .map(|segment| {
                let mark = if self.selector.is_segment_selected(&segment.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{mark} "), Style::default().fg(theme::ACCENT)),
                        Span::styled(segment.label.clone(), Style::default().fg(theme::TEXT)),
                        Span::styled(format!("  {} contacts", segment.count), theme::muted()),
                    ]),
                    Line::from(Span::styled(format!("    {}", segment.description), theme::dim())),
                ])
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(self.segment_cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_working_set(&self, frame: &mut Frame, area: Rect) {
        let title = format!("Recipients ({})", self.selector.total());
        let block = theme::block_default(&title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).split(inner);

        if self.selector.total() == 0 {
            frame.render_widget(
                Paragraph::new(Span::styled(" No recipients selected", theme::muted())),
                rows[0],
            );
            return;
        }

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {}", self.selector.total()), theme::title()),
                Span::styled(" contacts will receive your message", theme::muted()),
            ])),
            rows[0],
        );

        let items: Vec<ListItem> = self
            .selector
            .recipients()
            .map(|r| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<20}", r.name), Style::default().fg(theme::TEXT)),
                    Span::styled(r.phone.clone(), theme::muted()),
                ]))
            })
            .collect();
        let list = List::new(items)
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");
        let mut state = ListState::default().with_selected(Some(self.recipient_cursor));
        frame.render_stateful_widget(list, rows[1], &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::catalog::Catalog;
    use tokio::sync::mpsc;

    fn view() -> RecipientsViewState {
        let (tx, _rx) = mpsc::unbounded_channel();
        RecipientsViewState::new(&Services::new(AppConfig::default(), Catalog::seed(), tx))
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_starts_with_seed_contacts() {
        let v = view();
        assert_eq!(v.selector().total(), 5);
    }

    #[test]
    fn test_remove_keeps_cursor_in_range() {
        let mut v = view();
        for _ in 0..10 {
            v.handle_input(&press(KeyCode::Char('J')));
        }
        assert_eq!(v.recipient_cursor, 4);
        v.handle_input(&press(KeyCode::Char('x')));
        assert_eq!(v.selector().total(), 4);
        assert_eq!(v.recipient_cursor, 3);
    }

    #[test]
    fn test_proceed_disabled_when_empty() {
        let mut v = view();
        for _ in 0..5 {
            v.handle_input(&press(KeyCode::Delete));
        }
        assert_eq!(v.selector().total(), 0);
        assert_eq!(
            v.handle_input(&press(KeyCode::Char('n'))),
            Some(RecipientsResult::Consumed)
        );
        assert_eq!(
            v.handle_input(&press(KeyCode::Char('b'))),
            Some(RecipientsResult::Back)
        );
    }

    #[test]
    fn test_proceed_emits_working_set() {
        let mut v = view();
        match v.handle_input(&press(KeyCode::Char('n'))) {
            Some(RecipientsResult::Proceed(list)) => assert_eq!(list.len(), 5),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_segment_toggle_leaves_recipients() {
        let mut v = view();
        v.handle_input(&press(KeyCode::Right));
        assert_eq!(v.selector().tab(), RecipientTab::Segments);
        v.handle_input(&press(KeyCode::Char(' ')));
        let first = v.selector().segments()[0].id.clone();
        assert!(v.selector().is_segment_selected(&first));
        assert_eq!(v.selector().total(), 5);
        v.handle_input(&press(KeyCode::Char(' ')));
        assert!(!v.selector().is_segment_selected(&first));
    }

    #[test]
    fn test_import_path_records_file() {
        let mut v = view();
        v.handle_input(&press(KeyCode::Char('a')));
        assert!(v.is_typing());
        for c in "/tmp/contacts.csv".chars() {
            v.handle_input(&press(KeyCode::Char(c)));
        }
        v.handle_input(&press(KeyCode::Enter));
        assert!(!v.is_typing());
        assert_eq!(v.selector().import_file().unwrap().name(), "contacts.csv");
        assert_eq!(v.selector().total(), 5);
        v.handle_input(&press(KeyCode::Char('c')));
        assert!(v.selector().import_file().is_none());
    }
}
