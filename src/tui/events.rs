use crate::core::workflow::Step;

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper or the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusStep(Step),
    TabNext,
    TabPrev,
    ToggleSidebar,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Whether the sidebar or the main content has input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaFocus {
    Sidebar,
    #[default]
    Main,
}

/// Sidebar sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarGroup {
    TextBlast,
    Reports,
    /// Display-only shortcuts; not part of the navigation cycle.
    QuickAccess,
}

impl SidebarGroup {
    pub const ALL: [SidebarGroup; 3] = [
        SidebarGroup::TextBlast,
        SidebarGroup::Reports,
        SidebarGroup::QuickAccess,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SidebarGroup::TextBlast => "TEXT BLAST",
            SidebarGroup::Reports => "REPORTS",
            SidebarGroup::QuickAccess => "QUICK ACCESS",
        }
    }

    pub fn steps(self) -> &'static [Step] {
        match self {
            SidebarGroup::TextBlast => &[Step::Compose, Step::Recipients, Step::Schedule],
            SidebarGroup::Reports => &[Step::Analytics],
            SidebarGroup::QuickAccess => &[],
        }
    }

    /// Static entries that are listed but cannot be selected.
    pub fn links(self) -> &'static [&'static str] {
        match self {
            SidebarGroup::QuickAccess => &["Recent Campaigns", "Saved Templates", "Contact Lists"],
            _ => &[],
        }
    }
}

/// Presentation helpers for workflow steps.
pub trait StepExt {
    fn icon(self) -> &'static str;
    fn to_action(self) -> Action;
    /// Number key that jumps to this step.
    fn hotkey(self) -> char;
}

impl StepExt for Step {
    fn icon(self) -> &'static str {
        match self {
            Step::Compose => "✉",
            Step::Recipients => "☰",
            Step::Schedule => "◷",
            Step::Analytics => "▤",
        }
    }

    fn to_action(self) -> Action {
        Action::FocusStep(self)
    }

    fn hotkey(self) -> char {
        match self {
            Step::Compose => '1',
            Step::Recipients => '2',
            Step::Schedule => '3',
            Step::Analytics => '4',
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidebar_groups_cover_all_steps() {
        let covered: Vec<Step> = SidebarGroup::ALL
            .iter()
            .flat_map(|g| g.steps().iter().copied())
            .collect();
        assert_eq!(covered, Step::ALL.to_vec());
    }

    #[test]
    fn test_hotkeys_follow_step_order() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.hotkey().to_digit(10), Some(i as u32 + 1));
            assert_eq!(step.to_action(), Action::FocusStep(*step));
            assert!(!step.icon().is_empty());
        }
    }
}
