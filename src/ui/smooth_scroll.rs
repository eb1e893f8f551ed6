//! Pixel-level smooth scroll with exponential ease-out.
//!
//! When a smooth scroll starts, the distance to the target becomes a
//! displacement.  Each tick the displacement decays toward zero, so the
//! viewport covers most of the distance in the first frames and then
//! decelerates onto the target.

/// Exponential ease-out toward a target offset.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    target: f64,
    /// Remaining distance: `position = target - displacement`.
    displacement: f64,
    /// Damping: `displacement *= (1 - speed)` each tick.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            target: 0.0,
            displacement: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Start moving from `from` toward `target`.
    pub fn start(&mut self, from: f64, target: f64) {
        self.target = target;
        self.displacement = target - from;
    }

    /// Decay one frame.  Returns the new position.
    pub fn tick(&mut self) -> f64 {
        self.displacement *= 1.0 - self.speed;
        if self.displacement.abs() < 0.5 {
            self.displacement = 0.0;
        }
        self.position()
    }

    pub fn position(&self) -> f64 {
        self.target - self.displacement
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn stop(&mut self) {
        self.target = self.position();
        self.displacement = 0.0;
    }

    /// True while there is still visible motion left.
    pub fn is_animating(&self) -> bool {
        self.displacement != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decelerates_onto_target() {
        let mut s = SmoothScroll::new(0.3);
        s.start(0.0, 800.0);
        let first = s.tick();
        let second = s.tick();
        assert!(first > 0.0 && first < 800.0);
        assert!(second - first < first, "later frames move less");

        for _ in 0..40 {
            s.tick();
        }
        assert!(!s.is_animating());
        assert_eq!(s.position(), 800.0);
    }

    #[test]
    fn test_stop_keeps_position() {
        let mut s = SmoothScroll::new(0.5);
        s.start(800.0, 0.0);
        let at = s.tick();
        s.stop();
        assert!(!s.is_animating());
        assert_eq!(s.position(), at);
    }
}
