//! Root layout: sidebar, step tab bar, main content and status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the expanded sidebar (group headers + labeled items).
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 24;
/// Width of the collapsed sidebar (single-char icons).
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 3;
/// Auto-collapse sidebar below this terminal width.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 70;
/// Hide sidebar entirely below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 30;
/// Height of the step tab bar (bordered single row).
pub const TAB_BAR_HEIGHT: u16 = 3;
/// Height of the home card strip under the main content.
pub const DASHBOARD_STRIP_HEIGHT: u16 = 7;
/// Show the card strip only on terminals at least this tall.
pub const DASHBOARD_MIN_HEIGHT: u16 = 36;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Sidebar area (None if hidden).
    pub sidebar: Option<Rect>,
    /// Step tab bar above the main content.
    pub tabs: Rect,
    /// Main content area.
    pub main: Rect,
    /// Home card strip below the main content (None on short terminals).
    pub strip: Option<Rect>,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// Sidebar visibility state derived from terminal width and user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl AppLayout {
    /// Compute layout regions from the terminal area and sidebar state.
    ///
    /// `user_collapsed`: user has toggled collapse with Ctrl+B.
    pub fn compute(area: Rect, user_collapsed: bool) -> (Self, SidebarVisibility) {
        let visibility = if area.width < HIDE_SIDEBAR_THRESHOLD {
            SidebarVisibility::Hidden
        } else if user_collapsed || area.width < AUTO_COLLAPSE_THRESHOLD {
            SidebarVisibility::Collapsed
        } else {
            SidebarVisibility::Expanded
        };

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let content_area = rows[0];
        let status = rows[1];

        let sidebar_width = match visibility {
            SidebarVisibility::Hidden => 0,
            SidebarVisibility::Collapsed => SIDEBAR_COLLAPSED_WIDTH,
            SidebarVisibility::Expanded => SIDEBAR_EXPANDED_WIDTH,
        };

        let (sidebar, right) = if sidebar_width == 0 {
            (None, content_area)
        } else {
            let cols = Layout::horizontal([Constraint::Length(sidebar_width), Constraint::Min(1)])
                .split(content_area);
            (Some(cols[0]), cols[1])
        };

        let right_rows =
            Layout::vertical([Constraint::Length(TAB_BAR_HEIGHT), Constraint::Min(1)]).split(right);

        let (main, strip) = if area.height >= DASHBOARD_MIN_HEIGHT {
            let body = Layout::vertical([
                Constraint::Min(1),
                Constraint::Length(DASHBOARD_STRIP_HEIGHT),
            ])
            .split(right_rows[1]);
            (body[0], Some(body[1]))
        } else {
            (right_rows[1], None)
        };

        (
            AppLayout {
                sidebar,
                tabs: right_rows[0],
                main,
                strip,
                status,
            },
            visibility,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_layout() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, SidebarVisibility::Expanded);
        assert_eq!(layout.sidebar.unwrap().width, SIDEBAR_EXPANDED_WIDTH);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.tabs.height, TAB_BAR_HEIGHT);
    }

    #[test]
    fn test_collapsed_by_user() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, true);
        assert_eq!(vis, SidebarVisibility::Collapsed);
        assert_eq!(layout.sidebar.unwrap().width, SIDEBAR_COLLAPSED_WIDTH);
    }

    #[test]
    fn test_auto_collapse_narrow() {
        let (_, vis) = AppLayout::compute(Rect::new(0, 0, 60, 40), false);
        assert_eq!(vis, SidebarVisibility::Collapsed);
    }

    #[test]
    fn test_hidden_very_narrow() {
        let area = Rect::new(0, 0, 25, 40);
        let (layout, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, SidebarVisibility::Hidden);
        assert!(layout.sidebar.is_none());
        assert_eq!(layout.main.width, 25);
    }

    #[test]
    fn test_tabs_sit_above_main() {
        let area = Rect::new(0, 0, 100, 30);
        let (layout, _) = AppLayout::compute(area, false);
        let sidebar_w = layout.sidebar.map(|s| s.width).unwrap_or(0);
        assert_eq!(sidebar_w + layout.main.width, area.width);
        assert_eq!(layout.tabs.x, layout.main.x);
        assert_eq!(layout.tabs.y + layout.tabs.height, layout.main.y);
        assert_eq!(layout.main.height + TAB_BAR_HEIGHT + 1, area.height);
    }

    #[test]
    fn test_strip_only_on_tall_terminals() {
        let (short, _) = AppLayout::compute(Rect::new(0, 0, 100, 30), false);
        assert!(short.strip.is_none());

        let area = Rect::new(0, 0, 100, 40);
        let (tall, _) = AppLayout::compute(area, false);
        let strip = tall.strip.unwrap();
        assert_eq!(strip.height, DASHBOARD_STRIP_HEIGHT);
        assert_eq!(tall.main.y + tall.main.height, strip.y);
        assert_eq!(strip.x, tall.main.x);
        assert_eq!(
            tall.main.height + DASHBOARD_STRIP_HEIGHT + TAB_BAR_HEIGHT + 1,
            area.height
        );
    }
}
