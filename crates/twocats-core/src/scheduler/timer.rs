use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`], used to cancel a pending timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer whose deadline has been reached
#[derive(Debug, Clone, PartialEq)]
pub struct Due<T> {
    pub id: TimerId,
    pub deadline: Duration,
    pub task: T,
}

/// One-shot timers keyed by absolute deadline
///
/// Timers sharing a deadline fire in the order they were scheduled.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    next_id: u64,
    entries: BTreeMap<(Duration, u64), T>,
    deadlines: HashMap<u64, Duration>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `task` to run at the absolute time `deadline`
    pub fn schedule(&mut self, deadline: Duration, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        TimerId(id)
    }

    /// Schedule `task` to run `delay` after `now`
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, task: T) -> TimerId {
        self.schedule(now + delay, task)
    }

    /// Cancel a pending timer, returning its task if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id.0)?;
        self.entries.remove(&(deadline, id.0))
    }

    /// Whether the timer is still pending
    pub fn contains(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id.0)
    }

    /// Remove and return the earliest timer due at or before `now`
    pub fn pop_due(&mut self, now: Duration) -> Option<Due<T>> {
        let (&(deadline, id), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        let task = self.entries.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some(Due {
            id: TimerId(id),
            deadline,
            task,
        })
    }

    /// Deadline of the earliest pending timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_pops_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(300), "c");
        timers.schedule(ms(100), "a");
        timers.schedule(ms(200), "b");

        let mut fired = Vec::new();
        while let Some(due) = timers.pop_due(ms(1000)) {
            fired.push(due.task);
        }
        assert_eq!(fired, vec!["a", "b", "c"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_same_deadline_keeps_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(ms(50), 1);
        timers.schedule(ms(50), 2);
        timers.schedule(ms(50), 3);

        assert_eq!(timers.pop_due(ms(50)).map(|d| d.task), Some(1));
        assert_eq!(timers.pop_due(ms(50)).map(|d| d.task), Some(2));
        assert_eq!(timers.pop_due(ms(50)).map(|d| d.task), Some(3));
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = TimerQueue::new();
        timers.schedule_after(ms(10), ms(90), ());
        assert!(timers.pop_due(ms(99)).is_none());
        assert_eq!(timers.next_deadline(), Some(ms(100)));
        let due = timers.pop_due(ms(100)).unwrap();
        assert_eq!(due.deadline, ms(100));
    }

    #[test]
    fn test_cancel() {
        let mut timers = TimerQueue::new();
        let keep = timers.schedule(ms(10), "keep");
        let drop = timers.schedule(ms(10), "drop");

        assert_eq!(timers.cancel(drop), Some("drop"));
        assert_eq!(timers.cancel(drop), None);
        assert!(!timers.contains(drop));
        assert!(timers.contains(keep));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.pop_due(ms(10)).map(|d| d.task), Some("keep"));
    }
}
