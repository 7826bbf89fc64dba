//! Recipient selector: the working set of contacts for a draft campaign.
//!
//! Segments and the working set are independent: checking a segment records
//! the choice but never adds or removes recipients. Importing a contact file
//! only records which file was chosen; its contents are never read here.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::catalog::Segment;

/// A contact in the working set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
}

impl Recipient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            phone: phone.into(),
            segment: None,
        }
    }

    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segment = Some(segment.into());
        self
    }
}

/// Reference to a contact file picked for import. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedFile {
    path: PathBuf,
}

impl ImportedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for display, falling back to the full path.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Import/segments tab inside the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipientTab {
    #[default]
    Import,
    Segments,
}

impl RecipientTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Import => "Import Contacts",
            Self::Segments => "Select Segments",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Import => Self::Segments,
            Self::Segments => Self::Import,
        }
    }
}

/// Events the selector hands to the workflow shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientEvent {
    Back,
    Proceed(Vec<Recipient>),
}

/// Selector state: working set, checked segments and the picked import file.
#[derive(Debug, Clone)]
pub struct RecipientSelector {
    segments: Vec<Segment>,
    recipients: IndexMap<String, Recipient>,
    selected_segments: IndexSet<String>,
    import_file: Option<ImportedFile>,
    tab: RecipientTab,
}

impl RecipientSelector {
    /// Build a selector from an initial recipient list, using `fallback` when
    /// the initial list is empty. Later duplicates of an id are dropped.
    pub fn new(segments: Vec<Segment>, initial: Vec<Recipient>, fallback: Vec<Recipient>) -> Self {
        let source = if initial.is_empty() { fallback } else { initial };
        let mut recipients = IndexMap::with_capacity(source.len());
        for recipient in source {
            if recipients.contains_key(&recipient.id) {
                log::warn!("Dropping duplicate recipient id '{}'", recipient.id);
                continue;
            }
            recipients.insert(recipient.id.clone(), recipient);
        }
        Self {
            segments,
            recipients,
            selected_segments: IndexSet::new(),
            import_file: None,
            tab: RecipientTab::default(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn recipients(&self) -> impl Iterator<Item = &Recipient> {
        self.recipients.values()
    }

    pub fn recipient_at(&self, index: usize) -> Option<&Recipient> {
        self.recipients.get_index(index).map(|(_, r)| r)
    }

    /// Live size of the working set.
    pub fn total(&self) -> usize {
        self.recipients.len()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_segment_selected(&self, id: &str) -> bool {
        self.selected_segments.contains(id)
    }

    /// Checked segment ids in the order they were checked.
    pub fn selected_segments(&self) -> impl Iterator<Item = &str> {
        self.selected_segments.iter().map(String::as_str)
    }

    pub fn import_file(&self) -> Option<&ImportedFile> {
        self.import_file.as_ref()
    }

    pub fn tab(&self) -> RecipientTab {
        self.tab
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Record the chosen contact file. The working set is not touched.
    pub fn select_import_file(&mut self, path: impl Into<PathBuf>) {
        let file = ImportedFile::new(path);
        log::info!("Contact file selected: {}", file.path().display());
        self.import_file = Some(file);
    }

    pub fn clear_import_file(&mut self) {
        self.import_file = None;
    }

    /// Check or uncheck a segment. Returns whether it is now checked.
    /// Ids that are not in the segment list are ignored.
    pub fn toggle_segment(&mut self, id: &str) -> bool {
        if !self.segments.iter().any(|s| s.id == id) {
            log::debug!("Ignoring unknown segment id '{id}'");
            return false;
        }
        if self.selected_segments.shift_remove(id) {
            false
        } else {
            self.selected_segments.insert(id.to_string());
            true
        }
    }

    /// Remove a recipient by id, keeping the order of the rest.
    pub fn remove_recipient(&mut self, id: &str) -> Option<Recipient> {
        self.recipients.shift_remove(id)
    }

    pub fn can_proceed(&self) -> bool {
        !self.recipients.is_empty()
    }

    pub fn back(&self) -> RecipientEvent {
        RecipientEvent::Back
    }

    /// Hand the working set to the shell, if it is not empty.
    pub fn proceed(&self) -> Option<RecipientEvent> {
        self.can_proceed()
            .then(|| RecipientEvent::Proceed(self.recipients.values().cloned().collect()))
    }

    pub fn set_tab(&mut self, tab: RecipientTab) {
        self.tab = tab;
    }

    pub fn toggle_tab(&mut self) {
        self.tab = self.tab.toggle();
    }
}
