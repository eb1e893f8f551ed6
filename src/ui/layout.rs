//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the active view above a one-line status bar.
pub struct AppLayout {
    pub body_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // active view
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            body_area: chunks[0],
            status_area: chunks[1],
        }
    }
}
