pub mod analytics;
pub mod compose;
pub mod recipients;
pub mod schedule;
