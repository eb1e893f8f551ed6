//! Search prompt editing and the search results view.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use chrono::{DateTime, Utc};

use crate::core::feed::{relative_age, Thread};
use crate::core::search::SearchHandoff;
use crate::ui::theme::Theme;

// ───────────────────────────────────────── prompt input ──────

/// Single-line text input with a character cursor.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
    /// Cursor position in characters.
    cursor: usize,
}

impl SearchInput {
    pub fn value(&self) -> &str {
        &self.text
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.text.chars().count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.text.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Text that fits in `width` columns, scrolled so the cursor stays in
    /// view, plus the cursor column inside that window.
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let start = self.cursor.saturating_sub(width - 1);
        let shown: String = self.text.chars().skip(start).take(width).collect();
        (shown, self.cursor - start)
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

// ───────────────────────────────────────── results view ──────

/// Sub-view opened by submitting the home prompt.
pub struct SearchView<'a> {
    pub handoff: &'a SearchHandoff,
    pub results: &'a [&'a Thread],
    pub selected: Option<usize>,
    pub now: DateTime<Utc>,
}

impl<'a> Widget for SearchView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Search ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Q: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(self.handoff.question.clone(), Theme::prompt_focused_style()),
            ]),
        ];
        if !self.handoff.contexts.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("context: {}", self.handoff.contexts.join(", ")),
                Theme::thread_meta_style(),
            )));
        }
        lines.push(Line::raw(""));

        if self.results.is_empty() {
            lines.push(Line::from(Span::styled(
                "No threads match this question.",
                Theme::thread_meta_style(),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Related threads ({})", self.results.len()),
                Theme::section_style(),
            )));
            for (i, thread) in self.results.iter().enumerate() {
                let selected = self.selected == Some(i);
                let (marker, style) = if selected {
                    ("> ", Theme::selected_style())
                } else {
                    ("  ", Theme::thread_title_style())
                };
                lines.push(Line::from(vec![
                    Span::styled(format!("{marker}{}", thread.title), style),
                    Span::styled(
                        format!("  {} · {}", thread.author, relative_age(thread.created, self.now)),
                        Theme::thread_meta_style(),
                    ),
                ]));
            }
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_with_multibyte_chars() {
        let mut input = SearchInput::default();
        for c in "héllo".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.value(), "hélo");
        assert_eq!(input.cursor(), 2);
        input.delete();
        assert_eq!(input.value(), "héo");
        input.home();
        input.insert('>');
        assert_eq!(input.value(), ">héo");
        input.end();
        input.right();
        assert_eq!(input.cursor(), 4);
        input.clear();
        assert_eq!(input.value(), "");
        input.backspace();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_visible_window_follows_cursor() {
        let mut input = SearchInput::default();
        for c in "abcdefghij".chars() {
            input.insert(c);
        }
        let (shown, col) = input.visible(4);
        assert_eq!(shown, "hij");
        assert_eq!(col, 3);
        input.home();
        let (shown, col) = input.visible(4);
        assert_eq!(shown, "abcd");
        assert_eq!(col, 0);
    }
}
