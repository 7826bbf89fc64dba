//! Property-based tests for the message composer
//!
//! Tests invariants:
//! - Character count is the UTF-16 length
//! - Proceed gating follows blank/limit rules
//! - Variable insertion appends a single space and the placeholder

use proptest::prelude::*;

use crate::core::catalog::Catalog;
use crate::core::composer::{ComposerEvent, DraftMessage, MessageComposer, MAX_CHARACTERS};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn composer() -> MessageComposer {
    let catalog = Catalog::seed();
    MessageComposer::new(catalog.templates, catalog.variables)
}

/// Message bodies mixing ASCII, whitespace and multi-byte characters
fn arb_message() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            8 => "[a-zA-Z0-9 .,!?]",
            1 => Just("\n".to_string()),
            1 => Just("é".to_string()),
            1 => Just("🚗".to_string()),
        ],
        0..220,
    )
    .prop_map(|parts| parts.concat())
}

fn arb_placeholder() -> impl Strategy<Value = String> {
    "[a-z_]{1,12}".prop_map(|id| format!("{{{{{id}}}}}"))
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: the count is the number of UTF-16 code units, not bytes
    #[test]
    fn prop_char_count_is_utf16_length(text in arb_message()) {
        let draft = DraftMessage::new(text.clone());
        let units = text.encode_utf16().count();
        prop_assert_eq!(draft.char_count(), units);
        prop_assert!(draft.char_count() >= text.chars().count());
        prop_assert_eq!(draft.is_over_limit(), units > MAX_CHARACTERS);
    }

    /// Property: proceed is allowed iff content is non-blank and within the limit
    #[test]
    fn prop_proceed_gating(text in arb_message()) {
        let mut c = composer();
        c.edit_content(text.clone());

        let expected = !text.trim().is_empty() && text.encode_utf16().count() <= MAX_CHARACTERS;
        prop_assert_eq!(c.can_proceed(), expected);
        prop_assert_eq!(c.proceed() == Some(ComposerEvent::Proceed), expected);
    }

    /// Property: inserting a variable appends " " + placeholder and nothing else
    #[test]
    fn prop_insert_variable_appends(text in arb_message(), placeholder in arb_placeholder()) {
        let mut c = composer();
        c.edit_content(text.clone());
        c.insert_variable(&placeholder);
        prop_assert_eq!(c.content(), format!("{text} {placeholder}"));
    }

    /// Property: unknown template ids never touch the draft
    #[test]
    fn prop_unknown_template_is_noop(text in arb_message(), id in "[a-z]{4,16}") {
        let mut c = composer();
        c.edit_content(text.clone());
        prop_assume!(!c.templates().iter().any(|t| t.id == id));
        prop_assume!(id != crate::core::composer::START_FROM_SCRATCH);

        prop_assert!(!c.select_template(&id));
        prop_assert_eq!(c.content(), text.as_str());
        prop_assert_eq!(c.selected_template(), None);
    }

    /// Property: save emits iff both the name and the content are non-empty
    #[test]
    fn prop_save_requires_name_and_content(text in arb_message(), name in "[a-zA-Z ]{0,12}") {
        let mut c = composer();
        c.edit_content(text.clone());
        c.set_template_name(name.clone());

        let saved = c.save_as_template();
        prop_assert_eq!(saved.is_some(), !name.is_empty() && !text.is_empty());
        if saved.is_some() {
            prop_assert_eq!(c.template_name(), "");
            prop_assert_eq!(c.content(), text.as_str());
        }
    }
}
