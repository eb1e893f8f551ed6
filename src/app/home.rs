//! Home screen: the coordinator wired to a terminal viewport.
//!
//! Owns one [`Coordinator`] for as long as the home view is mounted.  Every
//! change of the viewport's offset, whether from the user or from a smooth
//! scroll frame, is reported back as a scroll sample, and every layout change
//! re-measures the feed boundary and the hero's visibility.

use std::sync::Arc;

use tracing::debug;

use crate::config::AppConfig;
use crate::core::animation::HeroAnimator;
use crate::core::clock::Clock;
use crate::core::coordinator::{Coordinator, WheelOutcome};
use crate::core::store::ScrollStore;
use crate::core::viewport::{ScrollSample, Viewport};
use crate::core::visibility::{intersection_ratio, IntersectionSignal, Span, HERO_VISIBILITY_THRESHOLD};
use crate::ui::home::{HeroElement, HomeLayout, THREAD_ROWS};
use crate::ui::search::SearchInput;
use crate::ui::viewport::{rows_to_px, ScrollViewport, ROW_PX};

/// Pixels moved by one wheel notch or arrow key.
pub const LINE_SCROLL_PX: i32 = 3 * ROW_PX as i32;

/// Which part of the home view receives typed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomeFocus {
    #[default]
    Feed,
    Prompt,
}

pub struct HomeScreen {
    pub coordinator: Coordinator<ScrollViewport, HeroAnimator>,
    pub layout: HomeLayout,
    pub selected: Option<usize>,
    pub input: SearchInput,
    pub focus: HomeFocus,
    signal: IntersectionSignal,
    thread_count: usize,
}

impl HomeScreen {
    /// Mount the home view into a `width` × `height` cell area.
    pub fn mount(
        width: u16,
        height: u16,
        thread_count: usize,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        store: Arc<dyn ScrollStore>,
    ) -> Self {
        let layout = HomeLayout::measure(width);
        let client_px = rows_to_px(height);
        let viewport = ScrollViewport::new(
            layout.content_px(thread_count, client_px),
            client_px,
            config.frame_ms,
        );
        let animator = HeroAnimator::new(HeroElement::ALL.len(), config.animation_timing());
        let mut coordinator = Coordinator::new(
            viewport,
            animator,
            clock,
            store,
            config.coordinator_config(),
        );
        coordinator.set_boundary(i64::from(layout.boundary_px()));
        coordinator.mount();

        let mut screen = Self {
            coordinator,
            layout,
            selected: (thread_count > 0).then_some(0),
            input: SearchInput::default(),
            focus: HomeFocus::default(),
            signal: IntersectionSignal::new(HERO_VISIBILITY_THRESHOLD),
            thread_count,
        };
        screen.observe_hero();
        screen
    }

    /// Re-measure after a terminal resize.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = HomeLayout::measure(width);
        let client_px = rows_to_px(height);
        let content_px = self.layout.content_px(self.thread_count, client_px);
        let moved = match self.coordinator.viewport_mut() {
            Some(viewport) => {
                let before = viewport.scroll_top();
                viewport.set_metrics(content_px, client_px);
                viewport.scroll_top() != before
            }
            None => return,
        };
        self.coordinator
            .set_boundary(i64::from(self.layout.boundary_px()));
        debug!(state = ?self.coordinator.state(), "home layout re-measured");
        if moved {
            self.report_scroll();
        } else {
            self.observe_hero();
        }
    }

    /// One frame: advance smooth scrolling, then the coordinator's timers.
    pub fn tick(&mut self) {
        let moved = self
            .coordinator
            .viewport_mut()
            .map(|v| v.tick())
            .unwrap_or(false);
        if moved {
            self.report_scroll();
        }
        self.coordinator.advance();
    }

    /// Wheel-style scroll by `delta` pixels.  Returns `false` if the input
    /// was held back by an in-flight snap.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        if self.coordinator.on_wheel(delta) == WheelOutcome::Prevented {
            return false;
        }
        let moved = match self.coordinator.viewport_mut() {
            Some(viewport) => {
                let before = viewport.scroll_top();
                viewport.scroll_by(delta);
                viewport.scroll_top() != before
            }
            None => false,
        };
        if moved {
            self.report_scroll();
        }
        true
    }

    pub fn page(&mut self, down: bool) -> bool {
        let client = self
            .coordinator
            .viewport()
            .map(|v| v.client_height())
            .unwrap_or(0);
        let step = client.saturating_sub(2 * ROW_PX) as i32;
        self.scroll_by(if down { step } else { -step })
    }

    pub fn select_next(&mut self) {
        if self.thread_count == 0 {
            return;
        }
        let next = match self.selected {
            Some(i) => (i + 1).min(self.thread_count - 1),
            None => 0,
        };
        self.select(next);
    }

    pub fn select_prev(&mut self) {
        if self.thread_count == 0 {
            return;
        }
        let prev = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.select(prev);
    }

    /// Select a thread and scroll just enough to show it.
    pub fn select(&mut self, index: usize) {
        if index >= self.thread_count {
            return;
        }
        self.selected = Some(index);

        let Some(viewport) = self.coordinator.viewport() else {
            return;
        };
        let top = viewport.scroll_top();
        let client = viewport.client_height();
        let row_top = self.layout.thread_row(index) * ROW_PX;
        let row_bottom = row_top + u32::from(THREAD_ROWS) * ROW_PX;

        let delta = if row_top < top {
            row_top as i64 - top as i64
        } else if row_bottom > top + client {
            row_bottom as i64 - (top + client) as i64
        } else {
            0
        };
        if delta != 0 {
            self.scroll_by(delta as i32);
        }
    }

    /// Thread under a screen row of the home area, if any.
    pub fn thread_at(&self, screen_row: u16) -> Option<usize> {
        let first = self.coordinator.viewport()?.first_row();
        self.layout
            .thread_at_row(first + u32::from(screen_row), self.thread_count)
    }

    /// Save the scroll position and release the coordinator before leaving
    /// for a sub-view.
    pub fn leave(&mut self, remember_position: bool) {
        if remember_position {
            self.coordinator.persist_position();
        }
        self.coordinator.teardown();
        debug!(remember_position, "home view unmounted");
    }

    pub fn scroll_top(&self) -> u32 {
        self.coordinator
            .viewport()
            .map(|v| v.scroll_top())
            .unwrap_or(0)
    }

    fn report_scroll(&mut self) {
        let Some(sample) = self.coordinator.viewport().map(ScrollSample::of) else {
            return;
        };
        self.coordinator.on_scroll(sample);
        self.observe_hero();
    }

    fn observe_hero(&mut self) {
        let Some(viewport) = self.coordinator.viewport() else {
            return;
        };
        let root = Span::new(viewport.scroll_top(), viewport.client_height());
        let ratio = intersection_ratio(self.layout.hero_span(), root);
        if let Some(visible) = self.signal.observe(ratio) {
            debug!(visible, ratio, "hero visibility changed");
            self.coordinator.on_visibility(visible);
        }
    }
}
