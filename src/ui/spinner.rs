//! Busy indicator — a small spinner + label rendered in the top-right corner
//! of a given area.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shown while the home view is auto-scrolling and input is held back.
pub struct SnapIndicator {
    pub visible: bool,
    /// Monotonically increasing frame counter (drives the spinner frame).
    pub tick: u64,
}

impl Widget for SnapIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 16 || area.height == 0 {
            return;
        }

        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let label = format!(" {frame} snapping ");
        let label_width = label.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(label_width + 1);

        let line = Line::from(Span::styled(label, Theme::indicator_style()));
        buf.set_line(x, area.y, &line, label_width);
    }
}
