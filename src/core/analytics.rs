//! Analytics dashboard data: campaign history, rate metrics and the
//! display-only chart tabs and period selector.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::Catalog;

/// Lifecycle state of a campaign, shown as a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Completed,
    Scheduled,
    Failed,
}

impl CampaignStatus {
    pub const ALL: [CampaignStatus; 3] = [
        CampaignStatus::Completed,
        CampaignStatus::Scheduled,
        CampaignStatus::Failed,
    ];

    /// Wire value (`completed`, `scheduled`, `failed`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Scheduled => "scheduled",
            Self::Failed => "failed",
        }
    }

    /// Badge text: the status with its first letter capitalized.
    pub fn label(self) -> String {
        let raw = self.as_str();
        let mut chars = raw.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// A past or upcoming campaign. Read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub recipients: u32,
    pub delivered: u32,
    pub responses: u32,
    pub status: CampaignStatus,
}

/// Aggregate rates, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateMetrics {
    pub delivery: f64,
    pub response: f64,
    pub engagement: f64,
}

impl Default for RateMetrics {
    fn default() -> Self {
        Self {
            delivery: 98.7,
            response: 14.2,
            engagement: 8.5,
        }
    }
}

/// Clamp a percentage onto the 0..=100 gauge scale.
pub fn gauge_percent(rate: f64) -> u16 {
    if rate.is_nan() {
        return 0;
    }
    rate.clamp(0.0, 100.0).round() as u16
}

/// One of the three rate cards at the top of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct RateCard {
    pub title: &'static str,
    pub value: f64,
    pub description: &'static str,
}

impl RateCard {
    pub fn percent(&self) -> u16 {
        gauge_percent(self.value)
    }

    /// Headline value as shown on the card, e.g. `98.7%`.
    pub fn display_value(&self) -> String {
        format!("{}%", self.value)
    }
}

/// Placeholder chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Overview,
    Delivery,
    Responses,
}

impl ChartTab {
    pub const ALL: [ChartTab; 3] = [ChartTab::Overview, ChartTab::Delivery, ChartTab::Responses];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Delivery => "Delivery Metrics",
            Self::Responses => "Response Analysis",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Overview => "Campaign Performance Overview",
            Self::Delivery => "Delivery Metrics Over Time",
            Self::Responses => "Response Analysis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Overview => "Summary of all text blast campaigns",
            Self::Delivery => "Tracking message delivery success rates",
            Self::Responses => "Breakdown of customer response types",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Overview => "Bar chart visualization would appear here",
            Self::Delivery => "Line chart visualization would appear here",
            Self::Responses => "Pie chart visualization would appear here",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Reporting window. Changes the label only; no data is recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimePeriod {
    Last7Days,
    #[default]
    Last30Days,
    Last90Days,
    LastYear,
    Custom,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 5] = [
        TimePeriod::Last7Days,
        TimePeriod::Last30Days,
        TimePeriod::Last90Days,
        TimePeriod::LastYear,
        TimePeriod::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::Last90Days => "Last 90 days",
            Self::LastYear => "Last year",
            Self::Custom => "Custom range",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Dashboard state. Campaigns and rates never change after construction.
#[derive(Debug, Clone)]
pub struct AnalyticsDashboard {
    campaigns: Vec<Campaign>,
    rates: RateMetrics,
    chart_tab: ChartTab,
    period: TimePeriod,
}

impl AnalyticsDashboard {
    /// Dashboard over the catalog's campaigns and rates.
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_data(None, None, catalog)
    }

    /// Dashboard over explicitly supplied data, with catalog fallbacks for
    /// anything not supplied.
    pub fn with_data(
        campaigns: Option<Vec<Campaign>>,
        rates: Option<RateMetrics>,
        catalog: &Catalog,
    ) -> Self {
        Self {
            campaigns: campaigns.unwrap_or_else(|| catalog.campaigns.clone()),
            rates: rates.unwrap_or(catalog.rates),
            chart_tab: ChartTab::default(),
            period: TimePeriod::default(),
        }
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn rates(&self) -> RateMetrics {
        self.rates
    }

    pub fn rate_cards(&self) -> [RateCard; 3] {
        [
            RateCard {
                title: "Delivery Rate",
                value: self.rates.delivery,
                description: "Messages successfully delivered to recipients",
            },
            RateCard {
                title: "Response Rate",
                value: self.rates.response,
                description: "Recipients who responded to messages",
            },
            RateCard {
                title: "Engagement Rate",
                value: self.rates.engagement,
                description: "Recipients who clicked on links or offers",
            },
        ]
    }

    pub fn chart_tab(&self) -> ChartTab {
        self.chart_tab
    }

    pub fn set_chart_tab(&mut self, tab: ChartTab) {
        self.chart_tab = tab;
    }

    pub fn next_chart_tab(&mut self) {
        self.chart_tab = self.chart_tab.next();
    }

    pub fn prev_chart_tab(&mut self) {
        self.chart_tab = self.chart_tab.prev();
    }

    pub fn period(&self) -> TimePeriod {
        self.period
    }

    pub fn cycle_period(&mut self) {
        self.period = self.period.next();
    }
}

// ── Home summary ────────────────────────────────────────────────────────────

/// Lifecycle label of an entry in the home "Recent Campaigns" card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityState {
    Sent,
    Scheduled,
    Draft,
}

impl ActivityState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sent => "Sent",
            Self::Scheduled => "Scheduled",
            Self::Draft => "Draft",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub name: String,
    pub state: ActivityState,
}

/// Month-to-date figures for the "Message Stats" card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageStats {
    pub sent_mtd: u32,
    pub avg_response_rate: f64,
    pub active_campaigns: u32,
}

impl Default for MessageStats {
    fn default() -> Self {
        Self {
            sent_mtd: 1245,
            avg_response_rate: 12.3,
            active_campaigns: 3,
        }
    }
}

impl MessageStats {
    /// `1245` -> `1,245`.
    pub fn sent_label(&self) -> String {
        let digits = self.sent_mtd.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

    pub fn response_label(&self) -> String {
        format!("{}%", self.avg_response_rate)
    }
}

/// Display-only shortcuts listed in the "Quick Actions" card.
pub const QUICK_ACTIONS: [(&str, &str); 3] = [
    ("+", "New Template"),
    ("+", "Import Contacts"),
    ("↓", "Export Reports"),
];

/// Cards shown under the workflow on every step. Static display data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeSummary {
    pub recent: Vec<RecentActivity>,
    pub stats: MessageStats,
}

impl Default for HomeSummary {
    fn default() -> Self {
        let entry = |name: &str, state| RecentActivity {
            name: name.to_string(),
            state,
        };
        Self {
            recent: vec![
                entry("Summer Sale Promo", ActivityState::Sent),
                entry("Service Reminder", ActivityState::Scheduled),
                entry("New Inventory Alert", ActivityState::Draft),
            ],
            stats: MessageStats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_capitalized() {
        assert_eq!(CampaignStatus::Completed.label(), "Completed");
        assert_eq!(CampaignStatus::Scheduled.label(), "Scheduled");
        assert_eq!(CampaignStatus::Failed.label(), "Failed");
    }

    #[test]
    fn test_status_serde_lowercase() {
        #[derive(Deserialize)]
        struct Row {
            status: CampaignStatus,
        }
        let row: Row = toml::from_str(r#"status = "scheduled""#).unwrap();
        assert_eq!(row.status, CampaignStatus::Scheduled);
    }

    #[test]
    fn test_gauge_percent_clamps() {
        assert_eq!(gauge_percent(-5.0), 0);
        assert_eq!(gauge_percent(98.7), 99);
        assert_eq!(gauge_percent(150.0), 100);
        assert_eq!(gauge_percent(f64::NAN), 0);
    }

    #[test]
    fn test_default_rates() {
        let d = AnalyticsDashboard::new(&Catalog::seed());
        let cards = d.rate_cards();
        assert_eq!(cards[0].display_value(), "98.7%");
        assert_eq!(cards[1].display_value(), "14.2%");
        assert_eq!(cards[2].display_value(), "8.5%");
        assert_eq!(d.campaigns().len(), 5);
    }

    #[test]
    fn test_supplied_data_overrides_catalog() {
        let catalog = Catalog::seed();
        let rates = RateMetrics {
            delivery: 50.0,
            response: 5.0,
            engagement: 1.0,
        };
        let d = AnalyticsDashboard::with_data(Some(Vec::new()), Some(rates), &catalog);
        assert!(d.campaigns().is_empty());
        assert_eq!(d.rates(), rates);
    }

    #[test]
    fn test_chart_tabs_cycle() {
        let mut d = AnalyticsDashboard::new(&Catalog::seed());
        assert_eq!(d.chart_tab(), ChartTab::Overview);
        d.next_chart_tab();
        assert_eq!(d.chart_tab(), ChartTab::Delivery);
        d.next_chart_tab();
        d.next_chart_tab();
        assert_eq!(d.chart_tab(), ChartTab::Overview);
        d.prev_chart_tab();
        assert_eq!(d.chart_tab(), ChartTab::Responses);
    }

    #[test]
    fn test_period_cycles_without_touching_data() {
        let mut d = AnalyticsDashboard::new(&Catalog::seed());
        assert_eq!(d.period().label(), "Last 30 days");
        let before = d.campaigns().to_vec();
        for _ in 0..TimePeriod::ALL.len() {
            d.cycle_period();
        }
        assert_eq!(d.period(), TimePeriod::Last30Days);
        assert_eq!(d.campaigns(), before.as_slice());
    }

    #[test]
    fn test_home_summary_seed() {
        let home = HomeSummary::default();
        let states: Vec<&str> = home.recent.iter().map(|r| r.state.label()).collect();
        assert_eq!(states, ["Sent", "Scheduled", "Draft"]);
        assert_eq!(home.stats.sent_label(), "1,245");
        assert_eq!(home.stats.response_label(), "12.3%");
        assert_eq!(home.stats.active_campaigns, 3);
    }

    #[test]
    fn test_sent_label_grouping() {
        let stats = |sent_mtd| MessageStats {
            sent_mtd,
            ..MessageStats::default()
        };
        assert_eq!(stats(0).sent_label(), "0");
        assert_eq!(stats(999).sent_label(), "999");
        assert_eq!(stats(1_000).sent_label(), "1,000");
        assert_eq!(stats(1_234_567).sent_label(), "1,234,567");
    }
}
