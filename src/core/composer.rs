//! Message composer: draft text, length budget, templates and variables.
//!
//! The composer owns the draft for the current campaign. It never talks to the
//! shell directly; operations that the shell must react to return a
//! [`ComposerEvent`] instead.

use super::catalog::{Template, Variable};

/// Character budget of a single text message.
pub const MAX_CHARACTERS: usize = 160;

/// Template selector value that clears the draft.
pub const START_FROM_SCRATCH: &str = "start-from-scratch";

/// Shown in preview mode while the draft is empty.
pub const PREVIEW_PLACEHOLDER: &str = "Your message preview will appear here";

/// Draft message content with its derived length state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftMessage {
    content: String,
}

impl DraftMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Length of the draft in UTF-16 code units, so an emoji outside the
    /// Basic Multilingual Plane counts as two.
    pub fn char_count(&self) -> usize {
        self.content.encode_utf16().count()
    }

    pub fn is_over_limit(&self) -> bool {
        self.char_count() > MAX_CHARACTERS
    }

    /// True when the draft is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Compose/preview tab inside the composer card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComposerTab {
    #[default]
    Compose,
    Preview,
}

impl ComposerTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Compose => "Compose",
            Self::Preview => "Preview",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Compose => Self::Preview,
            Self::Preview => Self::Compose,
        }
    }
}

/// Payload of a save-as-template request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRequest {
    pub name: String,
    pub content: String,
}

/// Events the composer hands to the workflow shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerEvent {
    /// Move on to recipient selection.
    Proceed,
    /// Save the current draft as a named template.
    SaveTemplate(TemplateRequest),
}

/// Composer state for one draft campaign.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    templates: Vec<Template>,
    variables: Vec<Variable>,
    draft: DraftMessage,
    selected_template: Option<String>,
    template_name: String,
    tab: ComposerTab,
}

impl MessageComposer {
    pub fn new(templates: Vec<Template>, variables: Vec<Variable>) -> Self {
        Self {
            templates,
            variables,
            draft: DraftMessage::default(),
            selected_template: None,
            template_name: String::new(),
            tab: ComposerTab::default(),
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn draft(&self) -> &DraftMessage {
        &self.draft
    }

    pub fn content(&self) -> &str {
        self.draft.content()
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Selector value: a template id, [`START_FROM_SCRATCH`], or `None`.
    pub fn selected_template(&self) -> Option<&str> {
        self.selected_template.as_deref()
    }

    /// Name of the selected template, if one is selected.
    pub fn selected_template_name(&self) -> Option<&str> {
        let id = self.selected_template.as_deref()?;
        self.templates
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn tab(&self) -> ComposerTab {
        self.tab
    }

    /// Text for the preview bubble.
    pub fn preview_text(&self) -> &str {
        if self.draft.content().is_empty() {
            PREVIEW_PLACEHOLDER
        } else {
            self.draft.content()
        }
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Replace the draft with a template's content, or clear it for
    /// [`START_FROM_SCRATCH`]. Unknown ids leave everything unchanged.
    ///
    /// Returns `true` if the draft was replaced.
    pub fn select_template(&mut self, id: &str) -> bool {
        if id == START_FROM_SCRATCH {
            self.selected_template = Some(START_FROM_SCRATCH.to_string());
            self.draft = DraftMessage::default();
            return true;
        }
        match self.templates.iter().find(|t| t.id == id) {
            Some(template) => {
                self.draft = DraftMessage::new(template.content.clone());
                self.selected_template = Some(template.id.clone());
                true
            }
            None => {
                log::debug!("Ignoring unknown template id '{id}'");
                false
            }
        }
    }

    /// Append a space and the placeholder to the end of the draft.
    pub fn insert_variable(&mut self, placeholder: &str) {
        let content = format!("{} {}", self.draft.content(), placeholder);
        self.draft = DraftMessage::new(content);
    }

    /// Replace the draft verbatim.
    pub fn edit_content(&mut self, text: impl Into<String>) {
        self.draft = DraftMessage::new(text);
    }

    pub fn set_template_name(&mut self, name: impl Into<String>) {
        self.template_name = name.into();
    }

    /// Request a save of the draft under the current template name.
    ///
    /// Emits only when both name and content are non-empty; the name field is
    /// cleared on emission and the draft is left as is.
    pub fn save_as_template(&mut self) -> Option<ComposerEvent> {
        if self.template_name.is_empty() || self.draft.content().is_empty() {
            return None;
        }
        let name = std::mem::take(&mut self.template_name);
        Some(ComposerEvent::SaveTemplate(TemplateRequest {
            name,
            content: self.draft.content().to_string(),
        }))
    }

    pub fn can_proceed(&self) -> bool {
        !self.draft.is_blank() && !self.draft.is_over_limit()
    }

    pub fn proceed(&self) -> Option<ComposerEvent> {
        self.can_proceed().then_some(ComposerEvent::Proceed)
    }

    pub fn set_tab(&mut self, tab: ComposerTab) {
        self.tab = tab;
    }

    pub fn toggle_tab(&mut self) {
        self.tab = self.tab.toggle();
    }

    /// Make a template saved during this session selectable.
    pub fn add_template(&mut self, template: Template) {
        self.templates.push(template);
    }
}
