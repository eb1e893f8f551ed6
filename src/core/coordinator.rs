//! Scroll/animation coordinator for the home view.
//!
//! Raw scroll samples, wheel input and hero visibility go in; programmatic
//! smooth scrolls and hero animations come out.  Two snap rules apply:
//!
//! * scrolling **down** while the viewport sits strictly inside the hero
//!   (`0 < top < boundary`) snaps to the feed boundary and fades the hero
//!   out;
//! * scrolling **up** while within `boundary + tolerance` snaps to the top.
//!
//! Every programmatic scroll opens a suppression window.  While it is open,
//! samples are recorded but never acted on and wheel input is cancelled, so
//! the smooth scroll cannot be fought or re-triggered.  The window closes on
//! a timer, not on scroll completion.
//!
//! Decisions are throttled; the last recorded scroll top is not.

use std::sync::Arc;

use tracing::{debug, info};

use super::animation::{AnimationDriver, HeroVariant};
use super::clock::{Clock, Millis};
use super::scheduler::{Scheduler, TimerId};
use super::store::ScrollStore;
use super::throttle::{Throttle, ThrottleDecision, ThrottleOptions};
use super::viewport::{ScrollBehavior, ScrollDirection, ScrollSample, Viewport, ViewportState};

pub const THROTTLE_WAIT_MS: Millis = 50;
pub const SUPPRESS_MS: Millis = 600;
/// Overshoot above the boundary still treated as "at the boundary" when
/// scrolling up.
pub const SNAP_TOLERANCE_PX: u32 = 20;
/// Settle time between the hero becoming visible and its entrance starting.
pub const REVEAL_DELAY_MS: Millis = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub throttle: ThrottleOptions,
    pub suppress_for: Millis,
    pub snap_tolerance: u32,
    pub reveal_delay: Millis,
    /// When `false` neither snap rule ever fires; animations still play.
    pub snapping: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            throttle: ThrottleOptions::trailing(THROTTLE_WAIT_MS),
            suppress_for: SUPPRESS_MS,
            snap_tolerance: SNAP_TOLERANCE_PX,
            reveal_delay: REVEAL_DELAY_MS,
            snapping: true,
        }
    }
}

/// Whether the caller may apply a wheel event's default scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    Passed,
    Prevented,
}

/// Sample handed to the throttled decision, with the direction it had when
/// it was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Decision {
    sample: ScrollSample,
    direction: ScrollDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    SuppressionExpired,
    ThrottleTrailing,
    RevealHero,
    HideSettled,
}

#[derive(Debug, Default)]
struct Timers {
    suppression: Option<TimerId>,
    throttle: Option<TimerId>,
    reveal: Option<TimerId>,
    hide: Option<TimerId>,
}

impl Timers {
    fn slot(&mut self, timer: Timer) -> &mut Option<TimerId> {
        match timer {
            Timer::SuppressionExpired => &mut self.suppression,
            Timer::ThrottleTrailing => &mut self.throttle,
            Timer::RevealHero => &mut self.reveal,
            Timer::HideSettled => &mut self.hide,
        }
    }
}

pub struct Coordinator<V, A> {
    config: CoordinatorConfig,
    clock: Arc<dyn Clock>,
    store: Arc<dyn ScrollStore>,
    /// `None` once torn down.
    viewport: Option<V>,
    animator: A,
    scheduler: Scheduler<Timer>,
    timers: Timers,
    throttle: Throttle<Decision>,
    last_scroll_top: u32,
    last_direction: ScrollDirection,
    client_height: u32,
    boundary_offset: i64,
    hero_visible: bool,
    restored: bool,
}

impl<V: Viewport, A: AnimationDriver> Coordinator<V, A> {
    pub fn new(
        viewport: V,
        animator: A,
        clock: Arc<dyn Clock>,
        store: Arc<dyn ScrollStore>,
        config: CoordinatorConfig,
    ) -> Self {
        let last_scroll_top = viewport.scroll_top();
        let client_height = viewport.client_height();
        Self {
            config,
            clock,
            store,
            viewport: Some(viewport),
            animator,
            scheduler: Scheduler::new(),
            timers: Timers::default(),
            throttle: Throttle::new(config.throttle),
            last_scroll_top,
            last_direction: ScrollDirection::None,
            client_height,
            boundary_offset: 0,
            hero_visible: false,
            restored: false,
        }
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn viewport(&self) -> Option<&V> {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut V> {
        self.viewport.as_mut()
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    #[cfg(test)]
    pub fn last_scroll_top(&self) -> u32 {
        self.last_scroll_top
    }

    #[cfg(test)]
    pub fn last_direction(&self) -> ScrollDirection {
        self.last_direction
    }

    pub fn is_suppressed(&self) -> bool {
        self.timers.suppression.is_some()
    }

    #[cfg(test)]
    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.scheduler.next_deadline()
    }

    pub fn state(&self) -> ViewportState {
        ViewportState {
            scroll_top: self.last_scroll_top,
            client_height: self.client_height,
            boundary_offset: self.boundary_offset,
        }
    }

    // ── lifecycle ───────────────────────────────────────────────

    /// Apply a persisted scroll position, at most once per coordinator, and
    /// consume it from the store.
    pub fn mount(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let Some(position) = self.store.get() else {
            return;
        };
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        viewport.scroll_to(position, ScrollBehavior::Instant);
        // Record it so the follow-up sample reads as no movement rather than
        // a jump downward from zero.
        self.last_scroll_top = viewport.scroll_top();
        self.store.clear();
        info!(position, "restored home scroll position");
    }

    /// Remember the current offset for when the view is mounted again.
    pub fn persist_position(&self) {
        if let Some(viewport) = &self.viewport {
            self.store.set(viewport.scroll_top());
        }
    }

    /// Cancel every pending callback and detach from the viewport.  All
    /// later calls are no-ops.  Returns the viewport, if still attached.
    pub fn teardown(&mut self) -> Option<V> {
        self.throttle.cancel();
        self.scheduler.clear();
        self.timers = Timers::default();
        debug!("coordinator torn down");
        self.viewport.take()
    }

    /// Top of the feed region, re-measured whenever layout changes.
    pub fn set_boundary(&mut self, offset: i64) {
        if offset != self.boundary_offset {
            debug!(offset, "feed boundary moved");
        }
        self.boundary_offset = offset;
    }

    // ── input ───────────────────────────────────────────────────

    pub fn on_scroll(&mut self, sample: ScrollSample) {
        if self.viewport.is_none() {
            return;
        }

        let direction = ScrollDirection::between(self.last_scroll_top, sample.scroll_top);
        self.last_scroll_top = sample.scroll_top;
        self.last_direction = direction;
        self.client_height = sample.client_height;

        if self.is_suppressed() {
            debug!(
                top = sample.scroll_top,
                direction = ?self.last_direction,
                "scroll sample ignored during programmatic scroll"
            );
            return;
        }

        let now = self.clock.now();
        match self.throttle.call(now, Decision { sample, direction }) {
            ThrottleDecision::Invoke(decision) => self.decide(decision),
            ThrottleDecision::Schedule { at } => {
                self.arm(Timer::ThrottleTrailing, at);
            }
            ThrottleDecision::Coalesced => {}
        }
    }

    /// Gate for wheel-style input.  A prevented event must not move the
    /// viewport.
    pub fn on_wheel(&mut self, delta: i32) -> WheelOutcome {
        if self.viewport.is_none() {
            return WheelOutcome::Prevented;
        }
        if self.is_suppressed() {
            debug!(delta, "wheel input dropped during programmatic scroll");
            return WheelOutcome::Prevented;
        }
        WheelOutcome::Passed
    }

    pub fn on_visibility(&mut self, visible: bool) {
        if self.viewport.is_none() || visible == self.hero_visible {
            return;
        }
        self.hero_visible = visible;
        self.disarm(Timer::RevealHero);
        if visible {
            let at = self.clock.now().saturating_add(self.config.reveal_delay);
            self.arm(Timer::RevealHero, at);
        }
    }

    /// Run every timer that is due.  Call once per frame.
    pub fn advance(&mut self) {
        let now = self.clock.now();
        while let Some((id, timer)) = self.scheduler.pop_due(now) {
            let slot = self.timers.slot(timer);
            if *slot == Some(id) {
                *slot = None;
            }
            match timer {
                Timer::SuppressionExpired => debug!("suppression window closed"),
                Timer::ThrottleTrailing => {
                    if let Some(decision) = self.throttle.on_timer(now) {
                        self.decide(decision);
                    }
                }
                Timer::RevealHero => self.reveal_hero(now),
                Timer::HideSettled => self.animator.reset_offset(),
            }
        }
    }

    // ── decisions ───────────────────────────────────────────────

    fn decide(&mut self, decision: Decision) {
        if !self.config.snapping || self.is_suppressed() || self.boundary_offset <= 0 {
            return;
        }
        let boundary = u32::try_from(self.boundary_offset).unwrap_or(u32::MAX);
        let top = decision.sample.scroll_top;

        match decision.direction {
            ScrollDirection::Down if top > 0 && top < boundary => {
                debug!(top, boundary, "snapping down to feed");
                self.snap_to(boundary);
                self.hide_hero();
            }
            ScrollDirection::Up
                if top > 0 && top <= boundary.saturating_add(self.config.snap_tolerance) =>
            {
                debug!(top, boundary, "snapping up to top");
                self.snap_to(0);
            }
            _ => {}
        }
    }

    fn snap_to(&mut self, offset: u32) {
        if self.viewport.is_none() {
            return;
        }
        // The window must be open before the viewport reports its own
        // motion back to us.
        let at = self.clock.now().saturating_add(self.config.suppress_for);
        self.disarm(Timer::SuppressionExpired);
        self.arm(Timer::SuppressionExpired, at);
        if let Some(viewport) = self.viewport.as_mut() {
            viewport.scroll_to(offset, ScrollBehavior::Smooth);
        }
    }

    fn hide_hero(&mut self) {
        let now = self.clock.now();
        self.animator.stop(now);
        let handle = self.animator.play(HeroVariant::Hidden, now);
        self.disarm(Timer::HideSettled);
        self.arm(Timer::HideSettled, handle.finishes_at);
    }

    fn reveal_hero(&mut self, now: Millis) {
        // An unfinished fade still owes the elements their starting offset.
        if self.disarm(Timer::HideSettled) {
            self.animator.reset_offset();
        }
        self.animator.stop(now);
        let handle = self.animator.play(HeroVariant::OnScreen, now);
        debug!(finishes_at = handle.finishes_at, "hero entrance started");
    }

    // ── timers ──────────────────────────────────────────────────

    fn arm(&mut self, timer: Timer, at: Millis) {
        let id = self.scheduler.schedule(at, timer);
        *self.timers.slot(timer) = Some(id);
    }

    fn disarm(&mut self, timer: Timer) -> bool {
        match self.timers.slot(timer).take() {
            Some(id) => self.scheduler.cancel(id),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::animation::AnimationHandle;
    use crate::core::clock::ManualClock;
    use crate::core::store::MemoryScrollStore;
    use proptest::prelude::*;

    #[derive(Debug, Default)]
    struct FakeViewport {
        top: u32,
        height: u32,
        calls: Vec<(u32, ScrollBehavior)>,
    }

    impl Viewport for FakeViewport {
        fn scroll_top(&self) -> u32 {
            self.top
        }
        fn client_height(&self) -> u32 {
            self.height
        }
        fn scroll_to(&mut self, offset: u32, behavior: ScrollBehavior) {
            self.top = offset;
            self.calls.push((offset, behavior));
        }
    }

    #[derive(Debug, Default)]
    struct FakeAnimator {
        plays: Vec<HeroVariant>,
        resets: usize,
    }

    impl AnimationDriver for FakeAnimator {
        fn play(&mut self, variant: HeroVariant, now: Millis) -> AnimationHandle {
            self.plays.push(variant);
            let finishes_at = match variant {
                HeroVariant::Hidden => now + 100,
                _ => now + 600,
            };
            AnimationHandle {
                variant,
                finishes_at,
            }
        }
        fn stop(&mut self, _now: Millis) {}
        fn reset_offset(&mut self) {
            self.resets += 1;
        }
    }

    struct Harness {
        clock: ManualClock,
        store: Arc<MemoryScrollStore>,
        coord: Coordinator<FakeViewport, FakeAnimator>,
    }

    impl Harness {
        fn new(config: CoordinatorConfig) -> Self {
            let clock = ManualClock::new(0);
            let store = Arc::new(MemoryScrollStore::new());
            let viewport = FakeViewport {
                top: 0,
                height: 600,
                calls: Vec::new(),
            };
            let coord = Coordinator::new(
                viewport,
                FakeAnimator::default(),
                Arc::new(clock.clone()),
                store.clone(),
                config,
            );
            Self { clock, store, coord }
        }

        fn with_boundary(boundary: i64) -> Self {
            let mut h = Self::new(CoordinatorConfig::default());
            h.coord.set_boundary(boundary);
            h
        }

        /// Feed one sample and let the trailing edge fire.
        fn scroll(&mut self, top: u32) {
            self.coord.on_scroll(ScrollSample {
                scroll_top: top,
                client_height: 600,
            });
            self.clock.advance(THROTTLE_WAIT_MS + 10);
            self.coord.advance();
        }

        fn calls(&self) -> Vec<(u32, ScrollBehavior)> {
            self.coord.viewport().map(|v| v.calls.clone()).unwrap_or_default()
        }
    }

    #[test]
    fn test_down_snap_fires_once_and_suppresses() {
        let mut h = Harness::with_boundary(800);
        h.scroll(0);
        h.scroll(400);
        assert_eq!(h.calls(), vec![(800, ScrollBehavior::Smooth)]);
        assert!(h.coord.is_suppressed());

        h.scroll(750);
        assert_eq!(h.calls().len(), 1);
        assert_eq!(h.coord.animator().plays, vec![HeroVariant::Hidden]);
    }

    #[test]
    fn test_coalesced_samples_decide_on_latest() {
        let mut h = Harness::with_boundary(800);
        for top in [0, 400, 750] {
            h.coord.on_scroll(ScrollSample {
                scroll_top: top,
                client_height: 600,
            });
        }
        assert!(h.calls().is_empty());
        h.clock.advance(THROTTLE_WAIT_MS);
        h.coord.advance();
        assert_eq!(h.calls(), vec![(800, ScrollBehavior::Smooth)]);
        assert!(h.coord.is_suppressed());
    }

    #[test]
    fn test_up_snap_within_tolerance() {
        let mut h = Harness::with_boundary(800);
        h.scroll(900);
        assert!(h.calls().is_empty());
        h.scroll(810);
        assert_eq!(h.calls(), vec![(0, ScrollBehavior::Smooth)]);
        assert!(h.coord.animator().plays.is_empty());
    }

    #[test]
    fn test_up_outside_tolerance_does_nothing() {
        let mut h = Harness::with_boundary(800);
        h.scroll(1400);
        h.scroll(1000);
        assert!(h.calls().is_empty());
    }

    #[test]
    fn test_suppressed_samples_never_scroll() {
        let mut h = Harness::with_boundary(800);
        h.scroll(300);
        assert_eq!(h.calls().len(), 1);

        for top in [100, 200, 500, 700, 810, 900] {
            h.scroll(top);
        }
        assert_eq!(h.calls().len(), 1);

        // Window has closed by now; input is acted on again.
        h.clock.advance(SUPPRESS_MS);
        h.coord.advance();
        assert!(!h.coord.is_suppressed());
        h.scroll(805);
        assert_eq!(h.calls().last(), Some(&(0, ScrollBehavior::Smooth)));
    }

    #[test]
    fn test_bookkeeping_updates_while_suppressed() {
        let mut h = Harness::with_boundary(800);
        h.scroll(300);
        assert!(h.coord.is_suppressed());
        h.scroll(640);
        assert_eq!(h.coord.last_scroll_top(), 640);
        assert_eq!(h.coord.last_direction(), ScrollDirection::Down);
        h.scroll(620);
        assert_eq!(h.coord.last_direction(), ScrollDirection::Up);
        assert_eq!(h.coord.state().scroll_top, 620);
    }

    #[test]
    fn test_non_positive_boundary_disables_snapping() {
        for boundary in [0, -40] {
            let mut h = Harness::with_boundary(boundary);
            for top in [0, 10, 300, 900, 810, 5, 0, 1] {
                h.scroll(top);
            }
            assert!(h.calls().is_empty(), "boundary {boundary}");
        }
    }

    #[test]
    fn test_snapping_switch() {
        let mut h = Harness::new(CoordinatorConfig {
            snapping: false,
            ..CoordinatorConfig::default()
        });
        h.coord.set_boundary(800);
        h.scroll(400);
        h.scroll(300);
        assert!(h.calls().is_empty());
    }

    #[test]
    fn test_leading_edge_decides_immediately() {
        let mut h = Harness::new(CoordinatorConfig {
            throttle: ThrottleOptions {
                wait: THROTTLE_WAIT_MS,
                leading: true,
                trailing: true,
            },
            ..CoordinatorConfig::default()
        });
        h.coord.set_boundary(800);
        h.coord.on_scroll(ScrollSample {
            scroll_top: 400,
            client_height: 600,
        });
        assert_eq!(h.calls(), vec![(800, ScrollBehavior::Smooth)]);
    }

    #[test]
    fn test_wheel_prevented_only_while_suppressed() {
        let mut h = Harness::with_boundary(800);
        assert_eq!(h.coord.on_wheel(48), WheelOutcome::Passed);
        h.scroll(200);
        assert_eq!(h.coord.on_wheel(48), WheelOutcome::Prevented);
        assert_eq!(h.coord.on_wheel(-48), WheelOutcome::Prevented);
        h.clock.advance(SUPPRESS_MS);
        h.coord.advance();
        assert_eq!(h.coord.on_wheel(-48), WheelOutcome::Passed);
    }

    #[test]
    fn test_hide_settles_then_resets_offset() {
        let mut h = Harness::with_boundary(800);
        h.scroll(200);
        assert_eq!(h.coord.animator().resets, 0);
        h.clock.advance(100);
        h.coord.advance();
        assert_eq!(h.coord.animator().resets, 1);
    }

    #[test]
    fn test_visibility_reveals_once_per_transition() {
        let mut h = Harness::with_boundary(800);
        h.coord.on_visibility(true);
        assert!(h.coord.animator().plays.is_empty());
        h.clock.advance(REVEAL_DELAY_MS);
        h.coord.advance();
        assert_eq!(h.coord.animator().plays, vec![HeroVariant::OnScreen]);

        h.coord.on_visibility(true);
        h.clock.advance(REVEAL_DELAY_MS * 4);
        h.coord.advance();
        assert_eq!(h.coord.animator().plays.len(), 1);

        h.coord.on_visibility(false);
        h.coord.on_visibility(true);
        h.clock.advance(REVEAL_DELAY_MS);
        h.coord.advance();
        assert_eq!(
            h.coord.animator().plays,
            vec![HeroVariant::OnScreen, HeroVariant::OnScreen]
        );
    }

    #[test]
    fn test_hidden_before_reveal_delay_cancels_reveal() {
        let mut h = Harness::with_boundary(800);
        h.coord.on_visibility(true);
        h.coord.on_visibility(false);
        h.clock.advance(REVEAL_DELAY_MS * 2);
        h.coord.advance();
        assert!(h.coord.animator().plays.is_empty());
    }

    #[test]
    fn test_reveal_during_fade_resets_offset_first() {
        let mut h = Harness::with_boundary(800);
        h.coord.on_visibility(true);
        h.clock.advance(REVEAL_DELAY_MS);
        h.coord.advance();

        // Snap down starts a 100ms fade; the hero comes back before it ends.
        h.coord.on_scroll(ScrollSample {
            scroll_top: 200,
            client_height: 600,
        });
        h.clock.advance(THROTTLE_WAIT_MS);
        h.coord.advance();
        h.coord.on_visibility(false);
        h.coord.on_visibility(true);
        h.clock.advance(REVEAL_DELAY_MS);
        h.coord.advance();

        let animator = h.coord.animator();
        assert_eq!(
            animator.plays,
            vec![
                HeroVariant::OnScreen,
                HeroVariant::Hidden,
                HeroVariant::OnScreen
            ]
        );
        assert_eq!(animator.resets, 1);
        h.clock.advance(1_000);
        h.coord.advance();
        assert_eq!(h.coord.animator().resets, 1);
    }

    #[test]
    fn test_mount_restores_once_and_clears() {
        let mut h = Harness::with_boundary(800);
        h.store.set(1_200);
        h.coord.mount();
        assert_eq!(h.calls(), vec![(1_200, ScrollBehavior::Instant)]);
        assert_eq!(h.store.get(), None);
        assert_eq!(h.coord.last_scroll_top(), 1_200);

        h.store.set(50);
        h.coord.mount();
        assert_eq!(h.calls().len(), 1);
        assert_eq!(h.store.get(), Some(50));
    }

    #[test]
    fn test_mount_without_persisted_position() {
        let mut h = Harness::with_boundary(800);
        h.coord.mount();
        assert!(h.calls().is_empty());
    }

    #[test]
    fn test_persist_position() {
        let mut h = Harness::with_boundary(800);
        h.scroll(1_000);
        if let Some(v) = h.coord.viewport_mut() {
            v.top = 1_000;
        }
        h.coord.persist_position();
        assert_eq!(h.store.get(), Some(1_000));
    }

    #[test]
    fn test_teardown_cancels_pending_throttle() {
        let mut h = Harness::with_boundary(800);
        h.coord.on_scroll(ScrollSample {
            scroll_top: 400,
            client_height: 600,
        });
        assert_eq!(h.coord.pending_timers(), 1);

        let viewport = h.coord.teardown().unwrap();
        assert_eq!(h.coord.pending_timers(), 0);
        h.clock.advance(10_000);
        h.coord.advance();
        assert!(viewport.calls.is_empty());
        assert!(!h.coord.is_mounted());
    }

    #[test]
    fn test_teardown_cancels_suppression_and_animation_timers() {
        let mut h = Harness::with_boundary(800);
        h.scroll(300);
        h.coord.on_visibility(true);
        assert!(h.coord.is_suppressed());
        assert_eq!(h.coord.pending_timers(), 3);

        h.coord.teardown();
        assert_eq!(h.coord.pending_timers(), 0);
        assert!(!h.coord.is_suppressed());

        h.clock.advance(10_000);
        h.coord.advance();
        assert_eq!(h.coord.animator().resets, 0);
        assert_eq!(h.coord.animator().plays, vec![HeroVariant::Hidden]);

        // Torn down: everything is inert.
        h.coord.on_scroll(ScrollSample {
            scroll_top: 100,
            client_height: 600,
        });
        h.coord.on_visibility(false);
        assert_eq!(h.coord.on_wheel(10), WheelOutcome::Prevented);
        assert_eq!(h.coord.pending_timers(), 0);
    }

    proptest! {
        #[test]
        fn prop_last_scroll_top_is_latest_raw(
            steps in prop::collection::vec((0u32..3_000, 0u64..200), 1..60),
            boundary in -100i64..1_500,
        ) {
            let mut h = Harness::with_boundary(boundary);
            for (top, dt) in steps {
                h.coord.on_scroll(ScrollSample { scroll_top: top, client_height: 600 });
                prop_assert_eq!(h.coord.last_scroll_top(), top);
                h.clock.advance(dt);
                h.coord.advance();
                prop_assert_eq!(h.coord.last_scroll_top(), top);
            }
        }

        #[test]
        fn prop_no_snaps_without_boundary(
            tops in prop::collection::vec(0u32..3_000, 1..60),
            boundary in -1_000i64..=0,
        ) {
            let mut h = Harness::with_boundary(boundary);
            for top in tops {
                h.scroll(top);
            }
            prop_assert!(h.calls().is_empty());
        }
    }
}
