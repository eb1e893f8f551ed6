//! Intersection of a content region with the viewport.

/// Fraction of the hero region that must be on screen to count as visible.
pub const HERO_VISIBILITY_THRESHOLD: f64 = 0.1;

/// Half-open vertical range `[start, start + len)` in content pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub len: u32,
}

impl Span {
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    pub fn end(self) -> u32 {
        self.start.saturating_add(self.len)
    }
}

/// Share of `target` covered by `root`, in `0.0..=1.0`.  An empty target is
/// never visible.
pub fn intersection_ratio(target: Span, root: Span) -> f64 {
    if target.len == 0 {
        return 0.0;
    }
    let top = target.start.max(root.start);
    let bottom = target.end().min(root.end());
    let overlap = bottom.saturating_sub(top);
    f64::from(overlap) / f64::from(target.len)
}

/// Turns a stream of intersection ratios into "became visible" /
/// "became hidden" edges.
#[derive(Debug, Clone)]
pub struct IntersectionSignal {
    threshold: f64,
    visible: bool,
}

impl IntersectionSignal {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            visible: false,
        }
    }

    #[cfg(test)]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Feed the latest ratio.  Returns the new visibility only when it
    /// changed.
    pub fn observe(&mut self, ratio: f64) -> Option<bool> {
        let visible = ratio > 0.0 && ratio >= self.threshold;
        if visible == self.visible {
            return None;
        }
        self.visible = visible;
        Some(visible)
    }
}
