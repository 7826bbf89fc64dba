//! Property-based tests for the AutoBlitz core
//!
//! This module contains property-based tests using the proptest framework.
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! Run all property tests:
//! ```sh
//! cargo test property --release
//! ```
//!
//! Run a specific property test module:
//! ```sh
//! cargo test property::composer_props --release
//! ```
//!
//! ## Test Modules
//!
//! - `composer_props`: Tests for the message composer
//!   - Character count equals the UTF-16 length (emoji count as two)
//!   - Proceed is allowed iff the draft is non-blank and within 160 chars
//!   - Inserting a variable appends exactly " " + placeholder
//!   - Unknown template ids never change the draft
//!
//! - `recipients_props`: Tests for recipient selection
//!   - Removing a recipient keeps the relative order of the rest
//!   - Toggling a segment twice restores the selection
//!   - Proceed emits the working set exactly, and never an empty one
//!
//! - `workflow_props`: Tests for the step state machine and cost estimate
//!   - Direct selection always lands on the requested step
//!   - Rejected transitions never move the step
//!   - Estimated cost is non-negative and grows with recipients
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable:
//!
//! ```sh
//! PROPTEST_CASES=1000 cargo test property --release
//! ```

mod composer_props;
mod recipients_props;
mod workflow_props;
