//! Template, variable, segment and seed-data catalog.
//!
//! The console never embeds its content in the workflow logic. Everything the
//! views show at startup comes from a [`Catalog`], produced by a
//! [`CatalogSource`]: either the built-in seed data or a TOML file named in the
//! configuration. A catalog file only needs the sections it overrides; the
//! rest falls back to the seed data.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::analytics::{Campaign, CampaignStatus, HomeSummary, RateMetrics};
use super::composer::START_FROM_SCRATCH;
use super::recipients::Recipient;

// ── Catalog entries ─────────────────────────────────────────────────────────

/// A reusable message body with `{{variable}}` placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A variable that can be appended to a draft as a placeholder token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub id: String,
    pub label: String,
    pub placeholder: String,
}

impl Variable {
    /// Build a variable whose placeholder is `{{id}}`.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            placeholder: format!("{{{{{id}}}}}"),
            id,
            label: label.into(),
        }
    }
}

/// A predefined contact grouping. The member count is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: String,
    pub label: String,
    pub description: String,
    pub count: u32,
}

// ── Errors ──────────────────────────────────────────────────────────────────

/// Failures while loading or validating a catalog.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to read catalog file {path}")]
    #[diagnostic(
        code(autoblitz::catalog::io),
        help("check the `catalog.path` setting in config.toml")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    #[diagnostic(
        code(autoblitz::catalog::parse),
        help("catalog files are TOML with [[templates]], [[variables]], [[segments]], [[contacts]] and [[campaigns]] arrays plus [rates] and [home] tables")
    )]
    Parse(#[from] toml::de::Error),

    #[error("duplicate {kind} id '{id}'")]
    #[diagnostic(code(autoblitz::catalog::duplicate_id))]
    DuplicateId { kind: &'static str, id: String },

    #[error("template id '{0}' is reserved")]
    #[diagnostic(
        code(autoblitz::catalog::reserved_id),
        help("'start-from-scratch' selects an empty draft and cannot name a template")
    )]
    ReservedId(String),
}

// ── Catalog ─────────────────────────────────────────────────────────────────

/// Everything the console is seeded with at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub templates: Vec<Template>,
    pub variables: Vec<Variable>,
    pub segments: Vec<Segment>,
    /// Initial recipient working set.
    pub contacts: Vec<Recipient>,
    /// Campaign history shown on the analytics dashboard.
    pub campaigns: Vec<Campaign>,
    pub rates: RateMetrics,
    /// Cards under the workflow: recent activity and message stats.
    pub home: HomeSummary,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

impl Catalog {
    /// The built-in AutoBlitz seed data.
    pub fn seed() -> Self {
        Self {
            templates: seed_templates(),
            variables: seed_variables(),
            segments: seed_segments(),
            contacts: seed_contacts(),
            campaigns: seed_campaigns(),
            rates: RateMetrics::default(),
            home: HomeSummary::default(),
        }
    }

    /// Parse a catalog from TOML text and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check id uniqueness per section and the reserved template id.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if let Some(t) = self.templates.iter().find(|t| t.id == START_FROM_SCRATCH) {
            return Err(CatalogError::ReservedId(t.id.clone()));
        }
        ensure_unique("template", self.templates.iter().map(|t| t.id.as_str()))?;
        ensure_unique("variable", self.variables.iter().map(|v| v.id.as_str()))?;
        ensure_unique("segment", self.segments.iter().map(|s| s.id.as_str()))?;
        ensure_unique("contact", self.contacts.iter().map(|r| r.id.as_str()))?;
        ensure_unique("campaign", self.campaigns.iter().map(|c| c.id.as_str()))?;
        Ok(())
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

// ── Sources ─────────────────────────────────────────────────────────────────

/// Supplies the catalog the console starts from.
pub trait CatalogSource {
    fn load(&self) -> Result<Catalog, CatalogError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// The compiled-in seed data.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedCatalog;

impl CatalogSource for SeedCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Ok(Catalog::seed())
    }

    fn describe(&self) -> String {
        "built-in seed data".to_string()
    }
}

/// A TOML catalog file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ── Seed data ───────────────────────────────────────────────────────────────

fn seed_templates() -> Vec<Template> {
    vec![
        Template::new(
            "1",
            "Service Reminder",
            "Hi {{name}}, your vehicle is due for service at AutoBlitz. Call us at (555) 123-4567 to schedule.",
        ),
        Template::new(
            "2",
            "Special Promotion",
            "AutoBlitz exclusive: 20% off all services this week for valued customers like you, {{name}}! Book now.",
        ),
        Template::new(
            "3",
            "Follow Up",
            "Thank you {{name}} for visiting AutoBlitz. How was your experience? Reply to share feedback.",
        ),
    ]
}

fn seed_variables() -> Vec<Variable> {
    vec![
        Variable::new("name", "Customer Name"),
        Variable::new("vehicle", "Vehicle Model"),
        Variable::new("date", "Last Service Date"),
        Variable::new("advisor", "Service Advisor"),
    ]
}

fn seed_segments() -> Vec<Segment> {
    let segment = |id: &str, label: &str, description: &str, count: u32| Segment {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        count,
    };
    vec![
        segment(
            "recent-service",
            "Recent Service Customers",
            "Customers who had service in the last 30 days",
            156,
        ),
        segment(
            "new-customers",
            "New Customers",
            "Customers who joined in the last 60 days",
            87,
        ),
        segment(
            "inactive",
            "Inactive Customers",
            "No service in the last 6 months",
            243,
        ),
        segment(
            "premium",
            "Premium Service Customers",
            "Customers enrolled in premium service plans",
            62,
        ),
    ]
}

fn seed_contacts() -> Vec<Recipient> {
    vec![
        Recipient::new("1", "John Doe", "(555) 123-4567").with_segment("Recent Service"),
        Recipient::new("2", "Jane Smith", "(555) 234-5678").with_segment("New Customer"),
        Recipient::new("3", "Robert Johnson", "(555) 345-6789").with_segment("Recent Service"),
        Recipient::new("4", "Emily Davis", "(555) 456-7890").with_segment("New Customer"),
        Recipient::new("5", "Michael Wilson", "(555) 567-8901").with_segment("Recent Service"),
    ]
}

fn seed_campaigns() -> Vec<Campaign> {
    let campaign = |id: &str,
                    name: &str,
                    (y, m, d): (i32, u32, u32),
                    recipients: u32,
                    delivered: u32,
                    responses: u32,
                    status: CampaignStatus| Campaign {
        id: id.to_string(),
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        recipients,
        delivered,
        responses,
        status,
    };
    vec![
        campaign("1", "Summer Service Special", (2023, 6, 15), 1250, 1230, 187, CampaignStatus::Completed),
        campaign("2", "Oil Change Reminder", (2023, 7, 1), 875, 865, 112, CampaignStatus::Completed),
        campaign("3", "Fall Maintenance Promo", (2023, 9, 10), 1500, 1485, 203, CampaignStatus::Completed),
        campaign("4", "Holiday Special", (2023, 12, 1), 2000, 0, 0, CampaignStatus::Scheduled),
        campaign("5", "New Year Discount", (2024, 1, 5), 1800, 0, 0, CampaignStatus::Scheduled),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_valid() {
        let catalog = Catalog::seed();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.templates.len(), 3);
        assert_eq!(catalog.variables.len(), 4);
        assert_eq!(catalog.segments.len(), 4);
        assert_eq!(catalog.contacts.len(), 5);
        assert_eq!(catalog.campaigns.len(), 5);
    }

    #[test]
    fn test_variable_placeholder_wraps_id() {
        let v = Variable::new("vehicle", "Vehicle Model");
        assert_eq!(v.placeholder, "{{vehicle}}");
    }

    #[test]
    fn test_lookup_by_id() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.template("2").map(|t| t.name.as_str()), Some("Special Promotion"));
        assert_eq!(catalog.segment("premium").map(|s| s.count), Some(62));
        assert!(catalog.template("99").is_none());
    }

    #[test]
    fn test_partial_file_falls_back_to_seed() {
        let text = r#"
            [[templates]]
            id = "welcome"
            name = "Welcome"
            content = "Welcome aboard, {{name}}!"
        "#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        assert_eq!(catalog.templates.len(), 1);
        assert_eq!(catalog.templates[0].id, "welcome");
        // Untouched sections keep the seed data
        assert_eq!(catalog.segments, Catalog::seed().segments);
        assert_eq!(catalog.rates, RateMetrics::default());
    }

    #[test]
    fn test_campaign_dates_and_status_parse() {
        let text = r#"
            [[campaigns]]
            id = "c1"
            name = "Spring Tune-Up"
            date = "2024-03-20"
            recipients = 10
            delivered = 9
            responses = 2
            status = "failed"
        "#;
        let catalog = Catalog::from_toml_str(text).unwrap();
        let c = &catalog.campaigns[0];
        assert_eq!(c.date, NaiveDate::from_ymd_opt(2024, 3, 20).unwrap());
        assert_eq!(c.status, CampaignStatus::Failed);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let text = r#"
            [[segments]]
            id = "vip"
            label = "VIP"
            description = "a"
            count = 1

            [[segments]]
            id = "vip"
            label = "VIP again"
            description = "b"
            count = 2
        "#;
        let err = Catalog::from_toml_str(text).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { kind: "segment", .. }));
    }

    #[test]
    fn test_reserved_template_id_rejected() {
        let text = r#"
            [[templates]]
            id = "start-from-scratch"
            name = "Oops"
            content = "x"
        "#;
        let err = Catalog::from_toml_str(text).unwrap_err();
        assert!(matches!(err, CatalogError::ReservedId(_)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Catalog::from_toml_str("templates = 3").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = FileCatalog::new("/nonexistent/autoblitz/catalog.toml");
        let err = source.load().unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_seed_source() {
        let catalog = SeedCatalog.load().unwrap();
        assert_eq!(catalog, Catalog::seed());
        assert_eq!(SeedCatalog.describe(), "built-in seed data");
    }

    #[test]
    fn test_home_table_overrides_stats() {
        let catalog = Catalog::from_toml_str("[home.stats]\nsent_mtd = 10\n").unwrap();
        assert_eq!(catalog.home.stats.sent_mtd, 10);
        assert_eq!(catalog.home.stats.avg_response_rate, 12.3);
        assert_eq!(catalog.home.recent.len(), 3);
    }
}
