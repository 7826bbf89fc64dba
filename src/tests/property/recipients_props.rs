//! Property-based tests for recipient selection
//!
//! Tests invariants:
//! - Removal keeps the relative order of the remaining recipients
//! - Segment toggles are involutive
//! - Proceed hands over the working set exactly

use proptest::prelude::*;

use crate::core::catalog::Catalog;
use crate::core::recipients::{Recipient, RecipientEvent, RecipientSelector};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Recipients with unique ids "r0".."rN"
fn arb_recipients() -> impl Strategy<Value = Vec<Recipient>> {
    prop::collection::vec("[A-Z][a-z]{2,8} [A-Z][a-z]{2,8}", 1..30).prop_map(|names| {
        names
            .into_iter()
            .enumerate()
            .map(|(i, name)| Recipient::new(format!("r{i}"), name, format!("(555) 000-{i:04}")))
            .collect()
    })
}

fn selector(initial: Vec<Recipient>) -> RecipientSelector {
    let catalog = Catalog::seed();
    RecipientSelector::new(catalog.segments, initial, catalog.contacts)
}

fn ids(selector: &RecipientSelector) -> Vec<String> {
    selector.recipients().map(|r| r.id.clone()).collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: removing any subset keeps the rest in original order
    #[test]
    fn prop_removal_preserves_order(
        recipients in arb_recipients(),
        removals in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let original: Vec<String> = recipients.iter().map(|r| r.id.clone()).collect();
        let mut s = selector(recipients);

        let mut removed = Vec::new();
        for index in removals {
            let current = ids(&s);
            if current.is_empty() {
                break;
            }
            let id = current[index.index(current.len())].clone();
            prop_assert!(s.remove_recipient(&id).is_some());
            removed.push(id);
        }

        let expected: Vec<String> = original
            .into_iter()
            .filter(|id| !removed.contains(id))
            .collect();
        prop_assert_eq!(ids(&s), expected);
    }

    /// Property: removing an unknown id changes nothing
    #[test]
    fn prop_remove_unknown_is_noop(recipients in arb_recipients(), id in "x[0-9]{1,4}") {
        let mut s = selector(recipients);
        let before = ids(&s);
        prop_assert!(s.remove_recipient(&id).is_none());
        prop_assert_eq!(ids(&s), before);
    }

    /// Property: toggling the same segment twice restores the selection
    #[test]
    fn prop_segment_toggle_involutive(picks in prop::collection::vec(0usize..4, 0..8), target in 0usize..4) {
        let mut s = selector(Vec::new());
        let segment_ids: Vec<String> = s.segments().iter().map(|seg| seg.id.clone()).collect();
        for pick in picks {
            s.toggle_segment(&segment_ids[pick % segment_ids.len()]);
        }
        let before: Vec<String> = s.selected_segments().map(str::to_string).collect();

        let id = &segment_ids[target % segment_ids.len()];
        s.toggle_segment(id);
        s.toggle_segment(id);

        let after: Vec<String> = s.selected_segments().map(str::to_string).collect();
        let mut before_sorted = before.clone();
        let mut after_sorted = after.clone();
        before_sorted.sort();
        after_sorted.sort();
        prop_assert_eq!(after_sorted, before_sorted);
        // The working set never follows segment toggles
        prop_assert_eq!(s.total(), Catalog::seed().contacts.len());
    }

    /// Property: proceed emits exactly the working set, never an empty list
    #[test]
    fn prop_proceed_emits_working_set(recipients in arb_recipients(), drop_all in any::<bool>()) {
        let mut s = selector(recipients);
        if drop_all {
            for id in ids(&s) {
                s.remove_recipient(&id);
            }
        }

        match s.proceed() {
            Some(RecipientEvent::Proceed(list)) => {
                prop_assert!(!list.is_empty());
                let emitted: Vec<String> = list.into_iter().map(|r| r.id).collect();
                prop_assert_eq!(emitted, ids(&s));
            }
            Some(RecipientEvent::Back) => prop_assert!(false, "proceed must not emit Back"),
            None => prop_assert_eq!(s.total(), 0),
        }
    }
}
