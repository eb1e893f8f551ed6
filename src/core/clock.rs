//! Millisecond clocks.
//!
//! Every timer-driven piece of the core reads time through [`Clock`] so tests
//! can drive it by hand instead of sleeping.

#[cfg(test)]
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(test)]
use std::sync::Arc;
use std::time::Instant;

/// Milliseconds since the clock's origin.
pub type Millis = u64;

/// Monotonic time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> Millis;
}

/// Wall clock backed by [`Instant`], counting from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock.  Clones share the same time.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start)),
        }
    }

    pub fn advance(&self, by: Millis) {
        self.now.fetch_add(by, Ordering::SeqCst);
    }

    pub fn set(&self, at: Millis) {
        self.now.store(at, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.load(Ordering::SeqCst)
    }
}
