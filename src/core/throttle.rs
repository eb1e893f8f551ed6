//! Rate limiter for high-frequency input.
//!
//! [`Throttle`] is a plain state object: it never owns a timer.  Each call
//! returns a [`ThrottleDecision`] telling the owner whether to run the
//! callback now, arm a timer for the trailing edge, or do nothing.  When that
//! timer fires the owner calls [`Throttle::on_timer`] to collect the most
//! recent arguments.

use super::clock::Millis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleOptions {
    /// Length of the coalescing window.
    pub wait: Millis,
    /// Invoke on the first call of a quiet period.
    pub leading: bool,
    /// Invoke once more at the end of a busy window with the latest args.
    pub trailing: bool,
}

impl ThrottleOptions {
    pub fn trailing(wait: Millis) -> Self {
        Self {
            wait,
            leading: false,
            trailing: true,
        }
    }
}

/// What the owner must do after [`Throttle::call`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleDecision<A> {
    /// Run the callback immediately with these args.
    Invoke(A),
    /// Arm a timer for `at` and call [`Throttle::on_timer`] when it fires.
    Schedule { at: Millis },
    /// The args were folded into an already-armed trailing edge (or dropped
    /// when trailing is off).
    Coalesced,
}

#[derive(Debug, Clone)]
pub struct Throttle<A> {
    options: ThrottleOptions,
    last_invoked_at: Option<Millis>,
    pending_deadline: Option<Millis>,
    trailing_args: Option<A>,
}

impl<A> Throttle<A> {
    pub fn new(options: ThrottleOptions) -> Self {
        Self {
            options,
            last_invoked_at: None,
            pending_deadline: None,
            trailing_args: None,
        }
    }

    #[cfg(test)]
    pub fn options(&self) -> ThrottleOptions {
        self.options
    }

    pub fn call(&mut self, now: Millis, args: A) -> ThrottleDecision<A> {
        if self.pending_deadline.is_some() {
            if self.options.trailing {
                self.trailing_args = Some(args);
            }
            return ThrottleDecision::Coalesced;
        }

        let window_open = match self.last_invoked_at {
            None => true,
            Some(last) => now >= last.saturating_add(self.options.wait),
        };

        if window_open && self.options.leading {
            self.last_invoked_at = Some(now);
            return ThrottleDecision::Invoke(args);
        }
        if !self.options.trailing {
            return ThrottleDecision::Coalesced;
        }

        let at = match self.last_invoked_at {
            Some(last) if !window_open => last.saturating_add(self.options.wait),
            _ => now.saturating_add(self.options.wait),
        };
        self.pending_deadline = Some(at);
        self.trailing_args = Some(args);
        ThrottleDecision::Schedule { at }
    }

    /// Trailing edge.  Returns the latest args if the window has closed and
    /// anything was coalesced into it.
    pub fn on_timer(&mut self, now: Millis) -> Option<A> {
        match self.pending_deadline {
            Some(at) if at <= now => {
                self.pending_deadline = None;
                let args = self.trailing_args.take();
                if args.is_some() {
                    self.last_invoked_at = Some(now);
                }
                args
            }
            _ => None,
        }
    }

    /// Fire the pending trailing edge right away.
    pub fn flush(&mut self, now: Millis) -> Option<A> {
        self.pending_deadline.take()?;
        let args = self.trailing_args.take();
        if args.is_some() {
            self.last_invoked_at = Some(now);
        }
        args
    }

    /// Drop any pending trailing edge and forget the last invocation.
    /// Returns `true` if a trailing edge was pending.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.pending_deadline.take().is_some();
        self.trailing_args = None;
        self.last_invoked_at = None;
        was_pending
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending_deadline.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_only_coalesces_to_latest_args() {
        let mut t = Throttle::new(ThrottleOptions::trailing(50));
        assert_eq!(t.call(0, 1), ThrottleDecision::Schedule { at: 50 });
        assert_eq!(t.call(10, 2), ThrottleDecision::Coalesced);
        assert_eq!(t.call(20, 3), ThrottleDecision::Coalesced);

        assert_eq!(t.on_timer(49), None);
        assert!(t.is_pending());
        assert_eq!(t.on_timer(50), Some(3));
        assert!(!t.is_pending());
    }

    #[test]
    fn test_leading_edge_invokes_then_trails() {
        let mut t = Throttle::new(ThrottleOptions {
            wait: 50,
            leading: true,
            trailing: true,
        });
        assert_eq!(t.call(0, "a"), ThrottleDecision::Invoke("a"));
        // Inside the window the trailing edge is anchored to the last call.
        assert_eq!(t.call(20, "b"), ThrottleDecision::Schedule { at: 50 });
        assert_eq!(t.call(30, "c"), ThrottleDecision::Coalesced);
        assert_eq!(t.on_timer(50), Some("c"));
        // Quiet period elapsed: next call is a fresh leading edge.
        assert_eq!(t.call(200, "d"), ThrottleDecision::Invoke("d"));
    }

    #[test]
    fn test_leading_without_trailing_drops_calls_in_window() {
        let mut t = Throttle::new(ThrottleOptions {
            wait: 50,
            leading: true,
            trailing: false,
        });
        assert_eq!(t.call(0, 1), ThrottleDecision::Invoke(1));
        assert_eq!(t.call(10, 2), ThrottleDecision::Coalesced);
        assert!(!t.is_pending());
        assert_eq!(t.call(60, 3), ThrottleDecision::Invoke(3));
    }

    #[test]
    fn test_cancel_and_flush() {
        let mut t = Throttle::new(ThrottleOptions::trailing(50));
        t.call(0, 1);
        assert_eq!(t.flush(5), Some(1));
        assert_eq!(t.flush(6), None);

        t.call(100, 2);
        assert!(t.cancel());
        assert_eq!(t.on_timer(1_000), None);
        assert!(!t.cancel());
    }
}
