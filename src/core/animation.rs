//! Hero entrance animation.
//!
//! Each hero element carries an opacity and a vertical offset.  Three
//! variants exist: `Initial` (transparent, pushed down), `OnScreen` (opaque,
//! in place, staggered per element) and `Hidden` (quick fade, offset kept).
//! The driver reports when a variant finishes so the caller can chain the
//! next step, e.g. pushing the elements back down once a fade completes.

use super::clock::Millis;

/// Gap between consecutive elements starting their entrance.
pub const STAGGER_MS: Millis = 50;
pub const ENTER_MS: Millis = 500;
pub const HIDE_MS: Millis = 100;
/// Vertical offset, in pixels, that elements start from.
pub const INITIAL_OFFSET_PX: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeroVariant {
    #[default]
    Initial,
    Hidden,
    OnScreen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTiming {
    pub stagger: Millis,
    pub enter: Millis,
    pub hide: Millis,
    pub initial_offset: f64,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            stagger: STAGGER_MS,
            enter: ENTER_MS,
            hide: HIDE_MS,
            initial_offset: INITIAL_OFFSET_PX,
        }
    }
}

/// Completion signal of a started animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHandle {
    pub variant: HeroVariant,
    pub finishes_at: Millis,
}

pub trait AnimationDriver {
    fn play(&mut self, variant: HeroVariant, now: Millis) -> AnimationHandle;
    /// Freeze every element where it currently is.
    fn stop(&mut self, now: Millis);
    /// Put the vertical offset back to its initial value without touching
    /// opacity.
    fn reset_offset(&mut self);
}

/// Visual state of one element at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementFrame {
    pub opacity: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: ElementFrame,
    to: ElementFrame,
    start: Millis,
    duration: Millis,
}

impl Tween {
    fn at_rest(frame: ElementFrame) -> Self {
        Self {
            from: frame,
            to: frame,
            start: 0,
            duration: 0,
        }
    }

    fn sample(&self, now: Millis) -> ElementFrame {
        if now <= self.start {
            return self.from;
        }
        if self.duration == 0 || now >= self.start + self.duration {
            return self.to;
        }
        let t = (now - self.start) as f64 / self.duration as f64;
        let k = ease_out(t);
        ElementFrame {
            opacity: lerp(self.from.opacity, self.to.opacity, k),
            offset: lerp(self.from.offset, self.to.offset, k),
        }
    }
}

fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

fn lerp(a: f64, b: f64, k: f64) -> f64 {
    a + (b - a) * k
}

/// Tween-based [`AnimationDriver`] for a fixed number of hero elements.
#[derive(Debug, Clone)]
pub struct HeroAnimator {
    timing: AnimationTiming,
    variant: HeroVariant,
    tweens: Vec<Tween>,
}

impl HeroAnimator {
    pub fn new(elements: usize, timing: AnimationTiming) -> Self {
        let initial = ElementFrame {
            opacity: 0.0,
            offset: timing.initial_offset,
        };
        Self {
            timing,
            variant: HeroVariant::Initial,
            tweens: vec![Tween::at_rest(initial); elements],
        }
    }

    #[cfg(test)]
    pub fn variant(&self) -> HeroVariant {
        self.variant
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn frame(&self, element: usize, now: Millis) -> Option<ElementFrame> {
        self.tweens.get(element).map(|t| t.sample(now))
    }

    #[cfg(test)]
    /// `true` while any element is still moving.
    pub fn is_animating(&self, now: Millis) -> bool {
        self.tweens
            .iter()
            .any(|t| t.duration > 0 && now < t.start + t.duration)
    }
}

impl AnimationDriver for HeroAnimator {
    fn play(&mut self, variant: HeroVariant, now: Millis) -> AnimationHandle {
        let timing = self.timing;
        let mut finishes_at = now;
        for (i, tween) in self.tweens.iter_mut().enumerate() {
            let current = tween.sample(now);
            *tween = match variant {
                HeroVariant::Initial => Tween::at_rest(ElementFrame {
                    opacity: 0.0,
                    offset: timing.initial_offset,
                }),
                HeroVariant::Hidden => Tween {
                    from: current,
                    to: ElementFrame {
                        opacity: 0.0,
                        offset: current.offset,
                    },
                    start: now,
                    duration: timing.hide,
                },
                HeroVariant::OnScreen => Tween {
                    from: current,
                    to: ElementFrame {
                        opacity: 1.0,
                        offset: 0.0,
                    },
                    start: now + timing.stagger * i as Millis,
                    duration: timing.enter,
                },
            };
            finishes_at = finishes_at.max(tween.start + tween.duration);
        }
        self.variant = variant;
        AnimationHandle {
            variant,
            finishes_at,
        }
    }

    fn stop(&mut self, now: Millis) {
        for tween in &mut self.tweens {
            *tween = Tween::at_rest(tween.sample(now));
        }
    }

    fn reset_offset(&mut self) {
        let offset = self.timing.initial_offset;
        for tween in &mut self.tweens {
            tween.from.offset = offset;
            tween.to.offset = offset;
        }
    }
}
