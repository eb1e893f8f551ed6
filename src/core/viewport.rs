//! Scrollable viewport abstraction and the measurements it reports.
//!
//! All offsets are virtual pixels measured from the top of the scrolled
//! content.

/// How a programmatic scroll should move the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

/// A scroll container the coordinator can read and move.
pub trait Viewport {
    fn scroll_top(&self) -> u32;
    fn client_height(&self) -> u32;
    fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDirection {
    Up,
    Down,
    #[default]
    None,
}

impl ScrollDirection {
    pub fn between(previous: u32, current: u32) -> Self {
        use std::cmp::Ordering::*;
        match current.cmp(&previous) {
            Greater => Self::Down,
            Less => Self::Up,
            Equal => Self::None,
        }
    }
}

/// One scroll event as observed on the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSample {
    pub scroll_top: u32,
    pub client_height: u32,
}

impl ScrollSample {
    pub fn of(viewport: &impl Viewport) -> Self {
        Self {
            scroll_top: viewport.scroll_top(),
            client_height: viewport.client_height(),
        }
    }
}

/// Snapshot of what the coordinator currently knows about the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportState {
    pub scroll_top: u32,
    pub client_height: u32,
    /// Top of the feed region.  Zero or negative while the feed has not been
    /// laid out yet.
    pub boundary_offset: i64,
}
