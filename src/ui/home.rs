//! Home view: the hero (logo, search prompt, stats) stacked above the thread
//! feed, drawn through a scrolled window.
//!
//! [`HomeLayout`] is the single source of truth for where everything sits in
//! content rows; the coordinator's feed boundary and the hero's intersection
//! span are both derived from it.

use chrono::{DateTime, Utc};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::core::animation::HeroAnimator;
use crate::core::clock::Millis;
use crate::core::feed::{relative_age, Thread};
use crate::core::visibility::Span as PxSpan;

use super::search::SearchInput;
use super::theme::Theme;
use super::viewport::{rows_to_px, ROW_PX};

const LOGO: &[&str] = &[
    r" _                          __               _ ",
    r"| |__   ___  _ __ ___   ___ / _| ___  ___  __| |",
    r"| '_ \ / _ \| '_ ` _ \ / _ \ |_ / _ \/ _ \/ _` |",
    r"| | | | (_) | | | | | |  __/  _|  __/  __/ (_| |",
    r"|_| |_|\___/|_| |_| |_|\___|_|  \___|\___|\__,_|",
];
const COMPACT_LOGO: &[&str] = &["h o m e f e e d"];

const TOP_PAD: u16 = 2;
const GAP: u16 = 1;
const PROMPT_ROWS: u16 = 3;
const STATS_ROWS: u16 = 1;
/// Blank rows between the stats line and the feed.
const HERO_BOTTOM_PAD: u16 = 2;
/// Section title plus one blank row.
const FEED_HEADER_ROWS: u16 = 2;
/// Title, meta line, spacer.
pub const THREAD_ROWS: u16 = 3;
const PROMPT_MAX_WIDTH: u16 = 64;

/// Animated hero elements, in stagger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroElement {
    Logo,
    Prompt,
    Stats,
}

impl HeroElement {
    pub const ALL: &[HeroElement] = &[HeroElement::Logo, HeroElement::Prompt, HeroElement::Stats];
}

/// Row positions of the home content for a given terminal width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeLayout {
    logo: &'static [&'static str],
    /// `(first row, height)` per [`HeroElement::ALL`] entry.
    elements: [(u16, u16); 3],
    hero_rows: u16,
}

impl HomeLayout {
    pub fn measure(width: u16) -> Self {
        let widest = LOGO.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let logo = if usize::from(width) >= widest + 4 {
            LOGO
        } else {
            COMPACT_LOGO
        };

        let logo_rows = logo.len() as u16;
        let logo_at = TOP_PAD;
        let prompt_at = logo_at + logo_rows + GAP;
        let stats_at = prompt_at + PROMPT_ROWS + GAP;
        let hero_rows = stats_at + STATS_ROWS + HERO_BOTTOM_PAD;

        Self {
            logo,
            elements: [
                (logo_at, logo_rows),
                (prompt_at, PROMPT_ROWS),
                (stats_at, STATS_ROWS),
            ],
            hero_rows,
        }
    }

    pub fn hero_rows(&self) -> u16 {
        self.hero_rows
    }

    /// Top of the feed in pixels: the coordinator's snap boundary.
    pub fn boundary_px(&self) -> u32 {
        rows_to_px(self.hero_rows)
    }

    pub fn hero_span(&self) -> PxSpan {
        PxSpan::new(0, self.boundary_px())
    }

    pub fn element_rows(&self, element: HeroElement) -> (u16, u16) {
        match element {
            HeroElement::Logo => self.elements[0],
            HeroElement::Prompt => self.elements[1],
            HeroElement::Stats => self.elements[2],
        }
    }

    /// Content row of a thread's title line.
    pub fn thread_row(&self, index: usize) -> u32 {
        u32::from(self.hero_rows + FEED_HEADER_ROWS) + index as u32 * u32::from(THREAD_ROWS)
    }

    /// Thread under a content row, if any.
    pub fn thread_at_row(&self, row: u32, thread_count: usize) -> Option<usize> {
        let first = self.thread_row(0);
        if row < first {
            return None;
        }
        let index = ((row - first) / u32::from(THREAD_ROWS)) as usize;
        (index < thread_count).then_some(index)
    }

    /// Scrollable height.  Always leaves room to put the feed's top at the
    /// top of the viewport.
    pub fn content_px(&self, thread_count: usize, client_px: u32) -> u32 {
        let feed_end = rows_to_px(self.hero_rows + FEED_HEADER_ROWS)
            + thread_count as u32 * rows_to_px(THREAD_ROWS);
        feed_end.max(self.boundary_px() + client_px)
    }
}

/// The home view, created fresh each frame.
pub struct HomeView<'a> {
    pub layout: &'a HomeLayout,
    pub scroll_top: u32,
    pub animator: &'a HeroAnimator,
    pub now: Millis,
    pub threads: &'a [Thread],
    pub selected: Option<usize>,
    pub input: &'a SearchInput,
    pub input_focused: bool,
    pub today: DateTime<Utc>,
}

impl<'a> HomeView<'a> {
    fn first_row(&self) -> i64 {
        i64::from(self.scroll_top / ROW_PX)
    }

    /// Draw `line` at content row `row` if it falls inside `area`.
    fn put(&self, area: Rect, buf: &mut Buffer, row: i64, line: &Line<'_>, centered: bool) {
        let screen = row - self.first_row();
        if screen < 0 || screen >= i64::from(area.height) {
            return;
        }
        let y = area.y + screen as u16;
        let width = line.width() as u16;
        let x = if centered {
            area.x + area.width.saturating_sub(width) / 2
        } else {
            area.x
        };
        buf.set_line(x, y, line, area.width.saturating_sub(x - area.x));
    }

    fn render_hero(&self, area: Rect, buf: &mut Buffer) {
        for (i, &element) in HeroElement::ALL.iter().enumerate() {
            let Some(frame) = self.animator.frame(i, self.now) else {
                continue;
            };
            let shift = (frame.offset / f64::from(ROW_PX)).round() as i64;
            let (first, _) = self.layout.element_rows(element);
            let top = i64::from(first) + shift;

            match element {
                HeroElement::Logo => {
                    let Some(style) = Theme::fade(Theme::logo_style(), frame.opacity) else {
                        continue;
                    };
                    for (r, text) in self.layout.logo.iter().enumerate() {
                        let line = Line::from(Span::styled(*text, style));
                        self.put(area, buf, top + r as i64, &line, true);
                    }
                }
                HeroElement::Prompt => {
                    let base = if self.input_focused {
                        Theme::prompt_focused_style()
                    } else {
                        Theme::prompt_style()
                    };
                    let Some(style) = Theme::fade(base, frame.opacity) else {
                        continue;
                    };
                    for (r, line) in self.prompt_lines(area.width, style).iter().enumerate() {
                        self.put(area, buf, top + r as i64, line, true);
                    }
                }
                HeroElement::Stats => {
                    let Some(style) = Theme::fade(Theme::stats_style(), frame.opacity) else {
                        continue;
                    };
                    let text = format!(
                        "{} threads · {} authors · / to ask",
                        self.threads.len(),
                        crate::core::feed::author_count(self.threads),
                    );
                    self.put(area, buf, top, &Line::from(Span::styled(text, style)), true);
                }
            }
        }
    }

    /// Bordered single-line prompt, drawn line by line so it clips cleanly
    /// at the viewport edge.
    fn prompt_lines(&self, width: u16, style: Style) -> Vec<Line<'static>> {
        let box_width = width.saturating_sub(4).min(PROMPT_MAX_WIDTH).max(10);
        let inner = usize::from(box_width - 2);
        let horizontal = "─".repeat(inner);

        let field = inner.saturating_sub(3);
        let (shown, cursor) = self.input.visible(field);
        let body = if shown.is_empty() && !self.input_focused {
            format!(" {:<field$} ", "Ask anything…")
        } else if self.input_focused {
            let mut chars: Vec<char> = shown.chars().collect();
            if cursor >= chars.len() {
                chars.push('▏');
            } else {
                chars.insert(cursor, '▏');
            }
            let text: String = chars.into_iter().take(field + 1).collect();
            format!(" {text:<width$}", width = field + 1)
        } else {
            format!(" {shown:<field$} ")
        };

        vec![
            Line::from(Span::styled(format!("╭{horizontal}╮"), style)),
            Line::from(Span::styled(format!("│›{body}│"), style)),
            Line::from(Span::styled(format!("╰{horizontal}╯"), style)),
        ]
    }

    fn render_feed(&self, area: Rect, buf: &mut Buffer) {
        let header_row = i64::from(self.layout.hero_rows);
        let header = Line::from(Span::styled(" Recent threads", Theme::section_style()));
        self.put(area, buf, header_row, &header, false);

        let first_visible = self.first_row();
        let last_visible = first_visible + i64::from(area.height);
        for (i, thread) in self.threads.iter().enumerate() {
            let row = i64::from(self.layout.thread_row(i));
            if row + i64::from(THREAD_ROWS) < first_visible || row > last_visible {
                continue;
            }
            let selected = self.selected == Some(i);
            let (marker, style) = if selected {
                (" ▸ ", Theme::selected_style())
            } else {
                ("   ", Theme::thread_title_style())
            };
            let title = Line::from(Span::styled(format!("{marker}{}", thread.title), style));
            let meta = Line::from(Span::styled(
                format!(
                    "   {} · {}",
                    thread.author,
                    relative_age(thread.created, self.today)
                ),
                Theme::thread_meta_style(),
            ));
            self.put(area, buf, row, &title, false);
            self.put(area, buf, row + 1, &meta, false);
        }
    }
}

impl<'a> Widget for HomeView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.render_hero(area, buf);
        self.render_feed(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::{AnimationDriver, AnimationTiming, HeroVariant};
    use chrono::TimeZone;

    #[test]
    fn test_layout_rows() {
        let wide = HomeLayout::measure(120);
        assert_eq!(wide.element_rows(HeroElement::Logo), (2, 5));
        assert_eq!(wide.element_rows(HeroElement::Prompt), (8, 3));
        assert_eq!(wide.element_rows(HeroElement::Stats), (12, 1));
        assert_eq!(wide.hero_rows(), 15);
        assert_eq!(wide.boundary_px(), 15 * ROW_PX);

        let narrow = HomeLayout::measure(30);
        assert!(narrow.hero_rows() < wide.hero_rows());
    }

    #[test]
    fn test_thread_rows_and_hit_testing() {
        let layout = HomeLayout::measure(120);
        assert_eq!(layout.thread_row(0), 17);
        assert_eq!(layout.thread_row(2), 23);
        assert_eq!(layout.thread_at_row(16, 5), None);
        assert_eq!(layout.thread_at_row(17, 5), Some(0));
        assert_eq!(layout.thread_at_row(19, 5), Some(0));
        assert_eq!(layout.thread_at_row(20, 5), Some(1));
        assert_eq!(layout.thread_at_row(40, 5), None);
    }

    #[test]
    fn test_content_always_reaches_feed() {
        let layout = HomeLayout::measure(120);
        let client = 30 * ROW_PX;
        assert_eq!(layout.content_px(0, client), layout.boundary_px() + client);
        let long = layout.content_px(100, client);
        assert!(long > layout.boundary_px() + client);
    }

    fn render(animator: &HeroAnimator, now: Millis) -> Buffer {
        let layout = HomeLayout::measure(80);
        let threads = vec![Thread {
            id: 0,
            title: "Snapping between hero and feed".to_string(),
            author: "ana".to_string(),
            created: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }];
        let input = SearchInput::default();
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        HomeView {
            layout: &layout,
            scroll_top: 0,
            animator,
            now,
            threads: &threads,
            selected: Some(0),
            input: &input,
            input_focused: false,
            today: Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap(),
        }
        .render(area, &mut buf);
        buf
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_hero_hidden_until_entrance_plays() {
        let mut animator = HeroAnimator::new(3, AnimationTiming::default());
        let buf = render(&animator, 0);
        assert!(row_text(&buf, 3).trim().is_empty());
        // The feed is drawn regardless of the hero's animation state.
        assert!(row_text(&buf, 17).contains("Snapping between hero and feed"));
        assert!(row_text(&buf, 18).contains("ana · 1d ago"));

        let handle = animator.play(HeroVariant::OnScreen, 0);
        let buf = render(&animator, handle.finishes_at);
        assert!(row_text(&buf, 3).contains("|__"));
        assert!(row_text(&buf, 9).contains("Ask anything"));
        assert!(row_text(&buf, 12).contains("1 threads · 1 authors"));
    }
}
