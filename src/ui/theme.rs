//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── hero ───────────────────────────────────────────────────
    pub fn logo_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn prompt_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn prompt_focused_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn stats_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    /// Approximate `opacity` on a terminal.  Returns `None` when the element
    /// should not be drawn at all.
    pub fn fade(base: Style, opacity: f64) -> Option<Style> {
        if opacity < 0.15 {
            None
        } else if opacity < 0.45 {
            Some(base.fg(Color::DarkGray).remove_modifier(Modifier::BOLD))
        } else if opacity < 0.8 {
            Some(base.fg(Color::Gray))
        } else {
            Some(base)
        }
    }

    // ── feed ───────────────────────────────────────────────────
    pub fn section_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn thread_title_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn thread_meta_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn indicator_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }
}
