/// AutoBlitz - Text-Blast Marketing Console (TUI Edition)
///
/// Core library providing message composition, recipient selection,
/// delivery scheduling and campaign analytics for dealership text blasts.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
