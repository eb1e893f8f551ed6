//! Deadline-ordered timer queue.
//!
//! Callers schedule a task for a point in time and keep the returned
//! [`TimerId`] so the task can be cancelled before it fires.  Nothing runs on
//! its own: the owner polls [`Scheduler::pop_due`] from its frame tick.

use std::collections::BTreeMap;

use super::clock::Millis;

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    /// Keyed by (deadline, id) so iteration order is firing order; ties fire
    /// in scheduling order.
    entries: BTreeMap<(Millis, TimerId), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    pub fn schedule(&mut self, at: Millis, task: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.insert((at, id), task);
        id
    }

    /// Remove a pending task.  Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(_, tid), _| *tid != id);
        self.entries.len() != before
    }

    /// Take the earliest task whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TimerId, T)> {
        let key = *self.entries.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.entries.remove(&key).map(|task| (key.1, task))
    }

    #[cfg(test)]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.entries.keys().next().map(|(at, _)| *at)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(30, "c");
        s.schedule(10, "a");
        s.schedule(20, "b");

        assert!(s.pop_due(5).is_none());
        assert_eq!(s.pop_due(25).map(|(_, t)| t), Some("a"));
        assert_eq!(s.pop_due(25).map(|(_, t)| t), Some("b"));
        assert!(s.pop_due(25).is_none());
        assert_eq!(s.next_deadline(), Some(30));
    }

    #[test]
    fn test_same_deadline_fires_in_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(10, 1);
        s.schedule(10, 2);
        assert_eq!(s.pop_due(10).map(|(_, t)| t), Some(1));
        assert_eq!(s.pop_due(10).map(|(_, t)| t), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let keep = s.schedule(10, "keep");
        let drop = s.schedule(5, "drop");
        assert!(s.cancel(drop));
        assert!(!s.cancel(drop));
        assert_eq!(s.len(), 1);
        assert_eq!(s.pop_due(100), Some((keep, "keep")));
        assert!(s.is_empty());
    }
}
