//! Property-based tests for the workflow state machine and cost estimate
//!
//! Tests invariants:
//! - Select always lands on its target
//! - Transitions outside the table leave the step unchanged
//! - Cost is non-negative and monotonic in the recipient count

use proptest::prelude::*;

use crate::core::schedule::{estimate_cost, SchedulePlan, CUSTOM_MESSAGE_LABEL};
use crate::core::workflow::{Step, Transition, Workflow};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_step() -> impl Strategy<Value = Step> {
    prop::sample::select(Step::ALL.to_vec())
}

fn arb_transition() -> impl Strategy<Value = Transition> {
    prop_oneof![
        Just(Transition::Proceed),
        Just(Transition::Back),
        Just(Transition::Send),
        arb_step().prop_map(Transition::Select),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: any sequence of transitions keeps the machine consistent
    #[test]
    fn prop_transitions_follow_table(transitions in prop::collection::vec(arb_transition(), 0..50)) {
        let mut workflow = Workflow::new();
        for transition in transitions {
            let before = workflow.step();
            let expected = before.apply(transition);
            let result = workflow.apply(transition);

            prop_assert_eq!(result, expected);
            match result {
                Some(step) => prop_assert_eq!(workflow.step(), step),
                None => prop_assert_eq!(workflow.step(), before),
            }
            if let Transition::Select(target) = transition {
                prop_assert_eq!(workflow.step(), target);
            }
        }
    }

    /// Property: Analytics is only reached from Schedule via Send, or by Select
    #[test]
    fn prop_send_only_from_schedule(step in arb_step()) {
        let target = step.apply(Transition::Send);
        if step == Step::Schedule {
            prop_assert_eq!(target, Some(Step::Analytics));
        } else {
            prop_assert_eq!(target, None);
        }
    }

    /// Property: cost is non-negative and grows with recipients
    #[test]
    fn prop_cost_monotonic(base in 0usize..100_000, extra in 1usize..10_000, rate in 0.0f64..1.0) {
        let low = estimate_cost(base, rate);
        let high = estimate_cost(base + extra, rate);
        prop_assert!(low >= 0.0);
        prop_assert!(high >= low);
    }

    /// Property: summary carries its inputs through unchanged
    #[test]
    fn prop_summary_reflects_inputs(recipients in 0usize..10_000, name in prop::option::of("[A-Za-z ]{1,20}")) {
        let plan = SchedulePlan::new();
        let summary = plan.summary(name.as_deref(), recipients, 0.05);
        prop_assert_eq!(summary.recipients, recipients);
        prop_assert_eq!(summary.template.as_str(), name.as_deref().unwrap_or(CUSTOM_MESSAGE_LABEL));
        prop_assert_eq!(summary.recipients_label(), format!("{recipients} contacts"));
    }
}
