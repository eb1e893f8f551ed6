//! Terminal scroll container measured in virtual pixels.
//!
//! A terminal row is [`ROW_PX`] pixels tall, so the coordinator works with
//! the same magnitudes a browser would report while rendering stays
//! row-aligned.

use crate::core::viewport::{ScrollBehavior, Viewport};

use super::smooth_scroll::SmoothScroll;

/// Virtual pixels per terminal row.
pub const ROW_PX: u32 = 16;

/// Share of the remaining distance left after one reference frame.  A full
/// snap settles in ~540ms at any frame rate, inside the coordinator's
/// suppression window.
const SETTLE_FACTOR: f64 = 0.65;
const REFERENCE_FRAME_MS: f64 = 30.0;

pub fn rows_to_px(rows: u16) -> u32 {
    u32::from(rows) * ROW_PX
}

#[derive(Debug, Clone)]
pub struct ScrollViewport {
    top: f64,
    content_height: u32,
    client_height: u32,
    smooth: SmoothScroll,
}

impl ScrollViewport {
    pub fn new(content_height: u32, client_height: u32, frame_ms: u64) -> Self {
        let frames = frame_ms.max(1) as f64 / REFERENCE_FRAME_MS;
        Self {
            top: 0.0,
            content_height,
            client_height: client_height.max(1),
            smooth: SmoothScroll::new(1.0 - SETTLE_FACTOR.powf(frames)),
        }
    }

    /// Update measurements after layout; the offset is re-clamped.
    pub fn set_metrics(&mut self, content_height: u32, client_height: u32) {
        self.content_height = content_height;
        self.client_height = client_height.max(1);
        self.top = self.clamp(self.top);
        if self.smooth.is_animating() {
            let target = self.clamp(self.smooth.target());
            self.smooth.start(self.top, target);
        }
    }

    pub fn max_scroll(&self) -> u32 {
        self.content_height.saturating_sub(self.client_height)
    }

    /// User-driven scroll.  Interrupts any smooth scroll in flight.
    pub fn scroll_by(&mut self, delta: i32) {
        self.smooth.stop();
        self.top = self.clamp(self.top + f64::from(delta));
    }

    /// Advance a smooth scroll by one frame.  Returns `true` if the offset
    /// moved.
    pub fn tick(&mut self) -> bool {
        if !self.smooth.is_animating() {
            return false;
        }
        let before = self.scroll_top();
        let next = self.smooth.tick();
        self.top = self.clamp(next);
        self.scroll_top() != before
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.smooth.is_animating()
    }

    /// First content row visible at the top of the viewport.
    pub fn first_row(&self) -> u32 {
        self.scroll_top() / ROW_PX
    }

    fn clamp(&self, top: f64) -> f64 {
        top.clamp(0.0, f64::from(self.max_scroll()))
    }
}

impl Viewport for ScrollViewport {
    fn scroll_top(&self) -> u32 {
        self.top.round() as u32
    }

    fn client_height(&self) -> u32 {
        self.client_height
    }

    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) {
        let target = self.clamp(f64::from(offset));
        match behavior {
            ScrollBehavior::Instant => {
                self.smooth.stop();
                self.top = target;
            }
            ScrollBehavior::Smooth => self.smooth.start(self.top, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_by_is_clamped() {
        let mut v = ScrollViewport::new(2_000, 600, 30);
        v.scroll_by(-50);
        assert_eq!(v.scroll_top(), 0);
        v.scroll_by(5_000);
        assert_eq!(v.scroll_top(), 1_400);
        assert_eq!(v.first_row(), 1_400 / ROW_PX);
    }

    #[test]
    fn test_smooth_scroll_reaches_target_over_frames() {
        let mut v = ScrollViewport::new(2_000, 600, 30);
        v.scroll_to(800, ScrollBehavior::Smooth);
        assert_eq!(v.scroll_top(), 0);
        let mut frames = 0;
        while v.is_animating() {
            v.tick();
            frames += 1;
            assert!(frames < 100);
        }
        assert!(frames > 3);
        assert!(frames * 30 < 600);
        assert_eq!(v.scroll_top(), 800);
        assert!(!v.is_animating());
    }

    #[test]
    fn test_user_scroll_interrupts_smooth() {
        let mut v = ScrollViewport::new(2_000, 600, 30);
        v.scroll_to(800, ScrollBehavior::Smooth);
        v.tick();
        v.scroll_by(16);
        assert!(!v.is_animating());
        assert!(!v.tick());
    }

    #[test]
    fn test_tick_clamps_when_content_shrinks_mid_flight() {
        let mut v = ScrollViewport::new(2_000, 600, 30);
        v.scroll_to(1_400, ScrollBehavior::Smooth);
        assert!(v.tick());
        v.set_metrics(900, 600);
        while v.is_animating() {
            v.tick();
            assert!(v.scroll_top() <= v.max_scroll());
        }
        assert_eq!(v.scroll_top(), 300);
    }

    #[test]
    fn test_instant_and_shrinking_content() {
        let mut v = ScrollViewport::new(2_000, 600, 30);
        v.scroll_to(1_200, ScrollBehavior::Instant);
        assert_eq!(v.scroll_top(), 1_200);
        v.set_metrics(1_000, 600);
        assert_eq!(v.scroll_top(), 400);
    }
}
