pub mod logging;

// Campaign workflow
pub mod workflow;
pub mod catalog;
pub mod composer;
pub mod recipients;
pub mod schedule;
pub mod analytics;
