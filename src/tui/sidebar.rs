//! Collapsible left sidebar listing the workflow steps.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::{AreaFocus, SidebarGroup, StepExt};
use super::layout::SidebarVisibility;
use super::theme;
use crate::core::workflow::Step;

/// Sidebar navigation state.
pub struct SidebarState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Currently highlighted item index (into Step::ALL).
    pub selected: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            user_collapsed: false,
            selected: 0,
        }
    }

    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % Step::ALL.len();
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + Step::ALL.len() - 1) % Step::ALL.len();
    }

    pub fn selected_step(&self) -> Step {
        Step::ALL[self.selected]
    }

    /// Sync selection to match the active step (e.g., after Tab navigation).
    pub fn sync_to_step(&mut self, step: Step) {
        self.selected = step.index();
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current: Step,
        area_focus: AreaFocus,
    ) {
        match visibility {
            SidebarVisibility::Hidden => {}
            SidebarVisibility::Collapsed => self.render_collapsed(frame, area, current),
            SidebarVisibility::Expanded => self.render_expanded(frame, area, current, area_focus),
        }
    }

    fn render_collapsed(&self, frame: &mut Frame, area: Rect, current: Step) {
        let lines: Vec<Line> = Step::ALL
            .iter()
            .take(area.height as usize)
            .map(|&step| {
                let style = if step == current {
                    theme::highlight()
                } else {
                    theme::muted()
                };
                Line::from(Span::styled(format!(" {}", step.icon()), style))
            })
            .collect();

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }

    fn render_expanded(&self, frame: &mut Frame, area: Rect, current: Step, area_focus: AreaFocus) {
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(" AutoBlitz", theme::title())),
            Line::raw(""),
        ];
        let sidebar_focused = area_focus == AreaFocus::Sidebar;

        for group in SidebarGroup::ALL {
            if lines.len() >= area.height as usize {
                break;
            }

            lines.push(Line::from(Span::styled(
                format!(" {}", group.label()),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            )));

            for &step in group.steps() {
                if lines.len() >= area.height as usize {
                    break;
                }

                let is_current = step == current;
                let is_selected = sidebar_focused && step.index() == self.selected;

                let (prefix, style) = match (is_selected, is_current) {
                    (true, true) => ("▸ ", theme::highlight()),
                    (true, false) => (
                        "▸ ",
                        Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
                    ),
                    (false, true) => ("  ", theme::highlight()),
                    (false, false) => ("  ", theme::muted()),
                };

                let label = format!("{prefix}{} {}", step.icon(), step.title());
                let padded = format!("{:<width$}", label, width = area.width as usize);
                lines.push(Line::from(Span::styled(padded, style)));
            }
            for link in group.links() {
                if lines.len() >= area.height as usize {
                    break;
                }
                lines.push(Line::from(Span::styled(format!("  · {link}"), theme::dim())));
            }
            lines.push(Line::raw(""));
        }

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = SidebarState::new();
        assert!(!state.user_collapsed);
        assert_eq!(state.selected_step(), Step::Compose);
    }

    #[test]
    fn test_select_wraps_both_ways() {
        let mut state = SidebarState::new();
        state.select_prev();
        assert_eq!(state.selected_step(), Step::Analytics);
        state.select_next();
        assert_eq!(state.selected_step(), Step::Compose);
    }

    #[test]
    fn test_sync_to_step() {
        let mut state = SidebarState::new();
        state.sync_to_step(Step::Schedule);
        assert_eq!(state.selected_step(), Step::Schedule);
    }

    #[test]
    fn test_toggle_collapse() {
        let mut state = SidebarState::new();
        state.toggle_collapse();
        assert!(state.user_collapsed);
        state.toggle_collapse();
        assert!(!state.user_collapsed);
    }

    #[test]
    fn test_quick_access_is_not_navigable() {
        let mut state = SidebarState::new();
        for _ in 0..Step::ALL.len() * 2 {
            state.select_next();
            assert!(!SidebarGroup::QuickAccess.steps().contains(&state.selected_step()));
        }
        assert_eq!(SidebarGroup::QuickAccess.links().len(), 3);
    }

    #[test]
    fn test_expanded_lists_quick_access() {
        use ratatui::{backend::TestBackend, Terminal};

        let state = SidebarState::new();
        let mut terminal = Terminal::new(TestBackend::new(24, 20)).unwrap();
        terminal
            .draw(|frame| {
                state.render(
                    frame,
                    frame.area(),
                    SidebarVisibility::Expanded,
                    Step::Compose,
                    AreaFocus::Main,
                )
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("QUICK ACCESS"));
        assert!(text.contains("Saved Templates"));
    }
}
