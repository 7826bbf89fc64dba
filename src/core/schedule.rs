//! Schedule step: delivery mode, send-at time and the message summary.
//!
//! Nothing here sends or queues anything. `send` only tells the shell to move
//! on to the analytics step.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Input format of the send-at field.
pub const SEND_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default per-message price used for the cost estimate.
pub const DEFAULT_COST_PER_MESSAGE: f64 = 0.05;

/// Template label used when the draft did not come from a template.
pub const CUSTOM_MESSAGE_LABEL: &str = "Custom message";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("'{0}' is not a date and time (expected YYYY-MM-DD HH:MM)")]
    InvalidDateTime(String),
    #[error("a send time can only be set when scheduling for later")]
    NotScheduled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Immediately,
    Later,
}

impl DeliveryMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Immediately => "Send Immediately",
            Self::Later => "Schedule for Later",
        }
    }
}

/// Events the schedule step hands to the workflow shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleEvent {
    Back,
    Send,
}

/// Summary card contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    pub template: String,
    pub recipients: usize,
    pub estimated_cost: f64,
}

impl ScheduleSummary {
    pub fn recipients_label(&self) -> String {
        format!("{} contacts", self.recipients)
    }

    pub fn cost_label(&self) -> String {
        format!("${:.2}", self.estimated_cost)
    }
}

/// Estimated send cost for a number of recipients.
pub fn estimate_cost(recipients: usize, cost_per_message: f64) -> f64 {
    recipients as f64 * cost_per_message
}

#[derive(Debug, Clone, Default)]
pub struct SchedulePlan {
    mode: DeliveryMode,
    send_at: Option<NaiveDateTime>,
}

impl SchedulePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn send_at(&self) -> Option<NaiveDateTime> {
        self.send_at
    }

    /// The send-at field only accepts input in `Later` mode.
    pub fn send_at_editable(&self) -> bool {
        self.mode == DeliveryMode::Later
    }

    pub fn set_mode(&mut self, mode: DeliveryMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            DeliveryMode::Immediately => DeliveryMode::Later,
            DeliveryMode::Later => DeliveryMode::Immediately,
        };
    }

    /// Parse and store a send-at time. On error the previous value stays.
    pub fn set_send_at(&mut self, text: &str) -> Result<NaiveDateTime, ScheduleError> {
        if !self.send_at_editable() {
            return Err(ScheduleError::NotScheduled);
        }
        let trimmed = text.trim();
        let parsed = NaiveDateTime::parse_from_str(trimmed, SEND_AT_FORMAT)
            .map_err(|_| ScheduleError::InvalidDateTime(trimmed.to_string()))?;
        self.send_at = Some(parsed);
        Ok(parsed)
    }

    pub fn summary(
        &self,
        template: Option<&str>,
        recipients: usize,
        cost_per_message: f64,
    ) -> ScheduleSummary {
        ScheduleSummary {
            template: template.unwrap_or(CUSTOM_MESSAGE_LABEL).to_string(),
            recipients,
            estimated_cost: estimate_cost(recipients, cost_per_message),
        }
    }

    pub fn back(&self) -> ScheduleEvent {
        ScheduleEvent::Back
    }

    pub fn send(&self) -> ScheduleEvent {
        match (self.mode, self.send_at) {
            (DeliveryMode::Later, Some(at)) => log::info!("Send requested for {at}"),
            (mode, _) => log::info!("Send requested ({})", mode.label()),
        }
        ScheduleEvent::Send
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_immediate() {
        let plan = SchedulePlan::new();
        assert_eq!(plan.mode(), DeliveryMode::Immediately);
        assert!(!plan.send_at_editable());
    }

    #[test]
    fn test_send_at_requires_later_mode() {
        let mut plan = SchedulePlan::new();
        assert_eq!(
            plan.set_send_at("2024-05-01 09:30"),
            Err(ScheduleError::NotScheduled)
        );
        plan.toggle_mode();
        let at = plan.set_send_at(" 2024-05-01 09:30 ").unwrap();
        assert_eq!(at.format(SEND_AT_FORMAT).to_string(), "2024-05-01 09:30");
        assert_eq!(plan.send_at(), Some(at));
    }

    #[test]
    fn test_invalid_send_at_keeps_previous() {
        let mut plan = SchedulePlan::new();
        plan.set_mode(DeliveryMode::Later);
        let at = plan.set_send_at("2024-05-01 09:30").unwrap();
        let err = plan.set_send_at("tomorrow-ish").unwrap_err();
        assert_eq!(err, ScheduleError::InvalidDateTime("tomorrow-ish".into()));
        assert_eq!(plan.send_at(), Some(at));
    }

    #[test]
    fn test_estimated_cost() {
        assert!((estimate_cost(245, DEFAULT_COST_PER_MESSAGE) - 12.25).abs() < 1e-9);
        assert_eq!(estimate_cost(0, DEFAULT_COST_PER_MESSAGE), 0.0);
    }

    #[test]
    fn test_summary_labels() {
        let plan = SchedulePlan::new();
        let summary = plan.summary(Some("Promotional Offer"), 245, DEFAULT_COST_PER_MESSAGE);
        assert_eq!(summary.template, "Promotional Offer");
        assert_eq!(summary.recipients_label(), "245 contacts");
        assert_eq!(summary.cost_label(), "$12.25");

        let custom = plan.summary(None, 5, DEFAULT_COST_PER_MESSAGE);
        assert_eq!(custom.template, CUSTOM_MESSAGE_LABEL);
        assert_eq!(custom.cost_label(), "$0.25");
    }

    #[test]
    fn test_events() {
        let plan = SchedulePlan::new();
        assert_eq!(plan.back(), ScheduleEvent::Back);
        assert_eq!(plan.send(), ScheduleEvent::Send);
    }
}
