//! Home card strip: recent campaigns, message stats and quick actions.
//!
//! Display only. None of the entries react to input.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::theme;
use crate::core::analytics::{HomeSummary, QUICK_ACTIONS};

pub fn render(frame: &mut Frame, area: Rect, home: &HomeSummary) {
    let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);
    render_recent(frame, cols[0], home);
    render_stats(frame, cols[1], home);
    render_quick_actions(frame, cols[2]);
}

fn render_recent(frame: &mut Frame, area: Rect, home: &HomeSummary) {
    let lines: Vec<Line> = home
        .recent
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!(" {:<22}", entry.name), Style::default().fg(theme::TEXT)),
                Span::styled(
                    entry.state.label(),
                    Style::default().fg(theme::activity_color(entry.state)),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(theme::block_default("Recent Campaigns")),
        area,
    );
}

fn render_stats(frame: &mut Frame, area: Rect, home: &HomeSummary) {
    let stats = &home.stats;
    let value = Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD);
    let row = |label: &'static str, text: String| {
        Line::from(vec![
            Span::styled(format!(" {label:<22}"), theme::muted()),
            Span::styled(text, value),
        ])
    };
    let lines = vec![
        row("Messages Sent (MTD)", stats.sent_label()),
        row("Avg. Response Rate", stats.response_label()),
        row("Active Campaigns", stats.active_campaigns.to_string()),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(theme::block_default("Message Stats")),
        area,
    );
}

fn render_quick_actions(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = QUICK_ACTIONS
        .iter()
        .map(|(icon, label)| {
            Line::from(vec![
                Span::styled(format!(" {icon} "), theme::key_hint()),
                Span::styled(*label, theme::dim()),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(theme::block_default("Quick Actions")),
        area,
    );
}
