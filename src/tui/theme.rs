//! Centralized AutoBlitz color theme: indigo primary with an amber accent.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::analytics::{ActivityState, CampaignStatus};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Indigo: primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x4F, 0x46, 0xE5);
/// Light indigo: highlights, hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x81, 0x8C, 0xF8);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Amber: calls to action, the active step.
pub const ACCENT: Color = Color::Rgb(0xF5, 0x9E, 0x0B);

// ── Backgrounds ─────────────────────────────────────────────────────────────

pub const BG_BASE: Color = Color::Rgb(0x0F, 0x11, 0x1A);
/// Sidebar and elevated panels.
pub const BG_SURFACE: Color = Color::Rgb(0x1A, 0x1D, 0x2B);
/// Outgoing message bubble in the preview.
pub const BG_BUBBLE: Color = Color::Rgb(0x31, 0x2E, 0x81);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE5, 0xE7, 0xEB);
pub const TEXT_MUTED: Color = Color::Rgb(0x9C, 0xA3, 0xAF);
pub const TEXT_DIM: Color = Color::Rgb(0x4B, 0x55, 0x63);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x44, 0x44);
pub const SUCCESS: Color = Color::Rgb(0x22, 0xC5, 0x5E);
pub const WARNING: Color = Color::Rgb(0xF9, 0x73, 0x16);
pub const INFO: Color = Color::Rgb(0x3B, 0x82, 0xF6);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Insert mode badge.
pub fn insert_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Character counter: red once the draft is over the limit.
pub fn char_counter(over_limit: bool) -> Style {
    if over_limit {
        Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MUTED)
    }
}

/// Preview bubble text.
pub fn bubble() -> Style {
    Style::default().fg(TEXT).bg(BG_BUBBLE)
}

pub fn activity_color(state: ActivityState) -> Color {
    match state {
        ActivityState::Sent => SUCCESS,
        ActivityState::Scheduled => ACCENT,
        ActivityState::Draft => TEXT_DIM,
    }
}

/// Campaign status badge color.
pub fn status_color(status: CampaignStatus) -> Color {
    match status {
        CampaignStatus::Completed => SUCCESS,
        CampaignStatus::Scheduled => INFO,
        CampaignStatus::Failed => ERROR,
    }
}

/// Campaign status badge: inverted label on the status color.
pub fn status_badge(status: CampaignStatus) -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(status_color(status))
        .add_modifier(Modifier::BOLD)
}

/// Primary button; dimmed when disabled.
pub fn button(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(BG_BASE)
            .bg(PRIMARY_LIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_DIM)
    }
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}
