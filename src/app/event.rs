//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Ticks
//! keep a fixed cadence even while input streams in, since smooth scrolling
//! and the coordinator's timers advance on them.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tracing::{error, warn};

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Consecutive poll failures after which the reader gives up.
const MAX_POLL_FAILURES: u32 = 50;

/// What the reader does after a failed poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollFailure {
    /// Sleep out the rest of the frame, then retry.
    Retry { first: bool },
    GiveUp,
}

/// Counts consecutive poll failures; any success resets it.
#[derive(Debug, Default)]
struct PollFailures {
    consecutive: u32,
}

impl PollFailures {
    fn failed(&mut self) -> PollFailure {
        self.consecutive += 1;
        if self.consecutive >= MAX_POLL_FAILURES {
            PollFailure::GiveUp
        } else {
            PollFailure::Retry {
                first: self.consecutive == 1,
            }
        }
    }

    fn succeeded(&mut self) {
        self.consecutive = 0;
    }
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel, interleaved with a `Tick` every `frame`.
pub fn spawn_event_reader(frame: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        let mut next_tick = Instant::now() + frame;
        let mut failures = PollFailures::default();
        loop {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            let has_event = match event::poll(timeout) {
                Ok(ready) => {
                    failures.succeeded();
                    ready
                }
                Err(err) => match failures.failed() {
                    PollFailure::Retry { first } => {
                        if first {
                            warn!(%err, "terminal poll failed, retrying each frame");
                        }
                        std::thread::sleep(timeout);
                        false
                    }
                    // Dropping the sender ends the main loop.
                    PollFailure::GiveUp => {
                        error!(%err, failures = MAX_POLL_FAILURES, "terminal poll keeps failing, stopping input");
                        break;
                    }
                },
            };
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => Some(AppEvent::Key(k)),
                        CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
                        CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if tx.send(app_event).is_err() {
                            break; // receiver dropped
                        }
                    }
                }
            }

            if Instant::now() >= next_tick {
                if tx.send(AppEvent::Tick).is_err() {
                    break;
                }
                next_tick += frame;
                // Fell behind (suspended terminal, slow draw): resync rather
                // than burst.
                let now = Instant::now();
                if next_tick < now {
                    next_tick = now + frame;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_failures_warn_once_then_give_up() {
        let mut failures = PollFailures::default();
        assert_eq!(failures.failed(), PollFailure::Retry { first: true });
        for _ in 2..MAX_POLL_FAILURES {
            assert_eq!(failures.failed(), PollFailure::Retry { first: false });
        }
        assert_eq!(failures.failed(), PollFailure::GiveUp);
    }

    #[test]
    fn test_poll_success_resets_failure_count() {
        let mut failures = PollFailures::default();
        for _ in 1..MAX_POLL_FAILURES {
            failures.failed();
        }
        failures.succeeded();
        assert_eq!(failures.failed(), PollFailure::Retry { first: true });
    }
}
