//! Thread sub-view opened from the feed.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::core::feed::{relative_age, Thread};

use super::theme::Theme;

pub struct ThreadView<'a> {
    pub thread: &'a Thread,
    pub now: DateTime<Utc>,
}

impl<'a> Widget for ThreadView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Thread #{} ", self.thread.id + 1))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());

        let lines = vec![
            Line::from(Span::styled(
                self.thread.title.clone(),
                Theme::logo_style(),
            )),
            Line::from(Span::styled(
                format!(
                    "{} · {} ({})",
                    self.thread.author,
                    relative_age(self.thread.created, self.now),
                    self.thread.created.format("%Y-%m-%d %H:%M UTC"),
                ),
                Theme::thread_meta_style(),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Esc returns to the feed where you left it.",
                Theme::stats_style(),
            )),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
