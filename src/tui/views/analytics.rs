//! Analytics step: rate cards, placeholder chart tabs and the campaign table.
//!
//! Read-only. The period selector only changes its label; the "Date Range"
//! and "Export Report" hints are inert.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Gauge, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::core::analytics::{AnalyticsDashboard, ChartTab, RateCard};
use crate::tui::services::Services;
use crate::tui::theme;

pub struct AnalyticsViewState {
    dashboard: AnalyticsDashboard,
    selected_row: usize,
}

impl AnalyticsViewState {
    pub fn new(services: &Services) -> Self {
        Self {
            dashboard: AnalyticsDashboard::new(&services.catalog),
            selected_row: 0,
        }
    }

    pub fn dashboard(&self) -> &AnalyticsDashboard {
        &self.dashboard
    }

    pub fn handle_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };
        if *modifiers != KeyModifiers::NONE {
            return false;
        }

        match code {
            KeyCode::Right | KeyCode::Char('l') => self.dashboard.next_chart_tab(),
            KeyCode::Left | KeyCode::Char('h') => self.dashboard.prev_chart_tab(),
            KeyCode::Char('p') => {
                self.dashboard.cycle_period();
                log::debug!("Analytics period: {}", self.dashboard.period().label());
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let last = self.dashboard.campaigns().len().saturating_sub(1);
                self.selected_row = (self.selected_row + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            _ => return false,
        }
        true
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Min(5),
        ])
        .split(area);

        self.render_header(frame, rows[0]);
        self.render_rate_cards(frame, rows[1]);
        self.render_chart(frame, rows[2]);
        self.render_campaigns(frame, rows[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Min(10), Constraint::Length(56)]).split(area);
        frame.render_widget(
            Paragraph::new(Span::styled(" Campaign Analytics", theme::title())),
            cols[0],
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[p] ", theme::key_hint()),
                Span::styled(self.dashboard.period().label(), Style::default().fg(theme::TEXT)),
                Span::styled("  Date Range", theme::dim()),
                Span::styled("  Export Report ", theme::dim()),
            ]))
            .alignment(Alignment::Right),
            cols[1],
        );
    }

    fn render_rate_cards(&self, frame: &mut Frame, area: Rect) {
        let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
        for (card, col) in self.dashboard.rate_cards().iter().zip(cols.iter()) {
            render_rate_card(frame, *col, card);
        }
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect) {
        let block = theme::block_default("Performance");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

        let tab = self.dashboard.chart_tab();
        let tabs = Tabs::new(ChartTab::ALL.iter().map(|t| t.label()).collect::<Vec<_>>())
            .select(tab.index())
            .style(theme::muted())
            .highlight_style(theme::highlight())
            .divider("│");
        frame.render_widget(tabs, rows[0]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {}", tab.title()), theme::heading()),
                Span::styled(format!("  {}", tab.description()), theme::muted()),
            ])),
            rows[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(tab.placeholder(), theme::dim()))
                .alignment(Alignment::Center),
            rows[3],
        );
    }

    fn render_campaigns(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(["Campaign", "Date", "Recipients", "Delivered", "Responses", "Status"])
            .style(theme::heading());

        let rows: Vec<Row> = self
            .dashboard
            .campaigns()
            .iter()
            .map(|c| {
                Row::new(vec![
                    Cell::from(c.name.clone()),
                    Cell::from(c.date.format("%Y-%m-%d").to_string()),
                    Cell::from(c.recipients.to_string()),
                    Cell::from(c.delivered.to_string()),
                    Cell::from(c.responses.to_string()),
                    Cell::from(Span::styled(
                        format!(" {} ", c.status.label()),
                        theme::status_badge(c.status),
                    )),
                ])
            })
            .collect();

        let widths = [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(12),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(theme::block_default("Recent Campaigns"))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default().with_selected(Some(self.selected_row));
        frame.render_stateful_widget(table, area, &mut state);
    }
}

fn render_rate_card(frame: &mut Frame, area: Rect, card: &RateCard) {
    let block = theme::block_default(card.title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", card.display_value()),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )),
        rows[0],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme::PRIMARY_LIGHT).bg(theme::BG_SURFACE))
            .percent(card.percent())
            .label(""),
        rows[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {}", card.description), theme::dim())),
        rows[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::analytics::TimePeriod;
    use crate::core::catalog::Catalog;
    use tokio::sync::mpsc;

    fn view() -> AnalyticsViewState {
        let (tx, _rx) = mpsc::unbounded_channel();
        AnalyticsViewState::new(&Services::new(AppConfig::default(), Catalog::seed(), tx))
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_chart_tab_keys() {
        let mut v = view();
        assert!(v.handle_input(&press(KeyCode::Right)));
        assert_eq!(v.dashboard().chart_tab(), ChartTab::Delivery);
        assert!(v.handle_input(&press(KeyCode::Left)));
        assert!(v.handle_input(&press(KeyCode::Left)));
        assert_eq!(v.dashboard().chart_tab(), ChartTab::Responses);
    }

    #[test]
    fn test_period_key_cycles_label() {
        let mut v = view();
        v.handle_input(&press(KeyCode::Char('p')));
        assert_eq!(v.dashboard().period(), TimePeriod::Last90Days);
    }

    #[test]
    fn test_row_selection_is_bounded() {
        let mut v = view();
        for _ in 0..20 {
            v.handle_input(&press(KeyCode::Char('j')));
        }
        assert_eq!(v.selected_row, v.dashboard().campaigns().len() - 1);
        assert!(!v.handle_input(&press(KeyCode::Char('q'))));
    }
}
