//! Campaign workflow state machine.
//!
//! Four steps, one active at a time. Step components report `Proceed`, `Back`
//! or `Send`; the sidebar, tab bar and number keys report `Select`. The
//! transition table lives in [`Step::apply`]; any pair not listed there keeps
//! the current step.

/// A screen of the text blast workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    Compose,
    Recipients,
    Schedule,
    Analytics,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Compose, Step::Recipients, Step::Schedule, Step::Analytics];

    /// Short tab label.
    pub fn label(self) -> &'static str {
        match self {
            Step::Compose => "Compose",
            Step::Recipients => "Recipients",
            Step::Schedule => "Schedule",
            Step::Analytics => "Analytics",
        }
    }

    /// Sidebar entry text.
    pub fn title(self) -> &'static str {
        match self {
            Step::Compose => "Compose Message",
            Step::Recipients => "Select Recipients",
            Step::Schedule => "Schedule",
            Step::Analytics => "Analytics",
        }
    }

    pub fn index(self) -> usize {
        Step::ALL.iter().position(|&s| s == self).unwrap_or(0)
    }

    /// Next step in display order, wrapping.
    pub fn next(self) -> Step {
        Step::ALL[(self.index() + 1) % Step::ALL.len()]
    }

    /// Previous step in display order, wrapping.
    pub fn prev(self) -> Step {
        Step::ALL[(self.index() + Step::ALL.len() - 1) % Step::ALL.len()]
    }

    /// Target of `transition` from this step, or `None` if the pair is not
    /// in the table.
    pub fn apply(self, transition: Transition) -> Option<Step> {
        match (self, transition) {
            (_, Transition::Select(target)) => Some(target),
            (Step::Compose, Transition::Proceed) => Some(Step::Recipients),
            (Step::Recipients, Transition::Back) => Some(Step::Compose),
            (Step::Recipients, Transition::Proceed) => Some(Step::Schedule),
            (Step::Schedule, Transition::Back) => Some(Step::Recipients),
            (Step::Schedule, Transition::Send) => Some(Step::Analytics),
            _ => None,
        }
    }
}

/// Inputs to the workflow state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Proceed,
    Back,
    Send,
    /// Direct navigation; always allowed.
    Select(Step),
}

/// Owner of the active step.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    step: Step,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Apply a transition. Returns the new step when the table accepts it;
    /// otherwise the step is unchanged and `None` is returned.
    pub fn apply(&mut self, transition: Transition) -> Option<Step> {
        let Some(target) = self.step.apply(transition) else {
            log::debug!("Ignoring {transition:?} on step {:?}", self.step);
            return None;
        };
        if target != self.step {
            log::info!("Workflow step {:?} -> {:?}", self.step, target);
        }
        self.step = target;
        Some(target)
    }

    pub fn select(&mut self, step: Step) {
        self.apply(Transition::Select(step));
    }

    pub fn select_next(&mut self) {
        self.select(self.step.next());
    }

    pub fn select_prev(&mut self) {
        self.select(self.step.prev());
    }
}
