//! Toast notifications with a single display slot
//!
//! Only one notification exists at a time. A new one preempts the current one,
//! which is removed on the spot together with its pending timers. A notification
//! that retires on its own (timeout or dismissal) slides out first and is removed
//! once the transition has finished.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::TimingConfig;
use crate::scheduler::{TimerId, TimerQueue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    #[default]
    Info,
    Warning,
}

impl NotificationKind {
    /// Icon class shown next to the message
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "fas fa-check-circle",
            Self::Error => "fas fa-exclamation-circle",
            Self::Info => "fas fa-info-circle",
            Self::Warning => "fas fa-exclamation-triangle",
        }
    }

    /// Single-character icon for text surfaces
    pub fn glyph(&self) -> char {
        match self {
            Self::Success => '✔',
            Self::Error => '✖',
            Self::Info => 'ℹ',
            Self::Warning => '⚠',
        }
    }

    pub fn background(&self) -> &'static str {
        match self {
            Self::Success => "linear-gradient(135deg, #10b981, #059669)",
            Self::Error => "linear-gradient(135deg, #ef4444, #dc2626)",
            Self::Info => "linear-gradient(135deg, #3b82f6, #2563eb)",
            Self::Warning => "linear-gradient(135deg, #f59e0b, #d97706)",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
            Self::Warning => "warning",
        };
        f.pad(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    /// Page time the notification was created
    pub created_at: Duration,
}

/// Where the notification is in its slide-in / slide-out lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Inserted off-screen, about to slide in
    Entering,
    Visible,
    /// Sliding out, removed when the transition ends
    Leaving,
}

/// Timer payloads the manager needs delivered back to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTimer {
    SlideIn(NotificationId),
    AutoDismiss(NotificationId),
    Remove(NotificationId),
}

impl NotificationTimer {
    fn id(&self) -> NotificationId {
        match self {
            Self::SlideIn(id) | Self::AutoDismiss(id) | Self::Remove(id) => *id,
        }
    }
}

#[derive(Debug, Clone)]
struct Live {
    record: NotificationRecord,
    phase: NotificationPhase,
    timers: Vec<TimerId>,
}

#[derive(Debug, Clone)]
pub struct NotificationManager {
    enter_delay: Duration,
    display: Duration,
    exit: Duration,
    current: Option<Live>,
}

impl NotificationManager {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            enter_delay: timing.notification_enter(),
            display: timing.notification_display(),
            exit: timing.notification_exit(),
            current: None,
        }
    }

    /// Show `message`, replacing whatever is on screen
    pub fn notify<T>(
        &mut self,
        timers: &mut TimerQueue<T>,
        now: Duration,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId
    where
        T: From<NotificationTimer>,
    {
        if let Some(previous) = self.current.take() {
            debug!(id = %previous.record.id, "notification preempted");
            for timer in previous.timers {
                timers.cancel(timer);
            }
        }

        let record = NotificationRecord {
            id: NotificationId::new(),
            message: message.into(),
            kind,
            created_at: now,
        };
        let id = record.id;
        debug!(%id, %kind, message = %record.message, "notification shown");

        let slide_in = timers.schedule_after(now, self.enter_delay, NotificationTimer::SlideIn(id).into());
        let auto = timers.schedule_after(now, self.display, NotificationTimer::AutoDismiss(id).into());

        self.current = Some(Live {
            record,
            phase: NotificationPhase::Entering,
            timers: vec![slide_in, auto],
        });
        id
    }

    /// User closed or clicked the notification. Returns false if there was nothing to dismiss.
    pub fn dismiss<T>(&mut self, timers: &mut TimerQueue<T>, now: Duration) -> bool
    where
        T: From<NotificationTimer>,
    {
        self.retire(timers, now)
    }

    /// Handle a timer scheduled by this manager. Timers for a notification that
    /// is no longer current are ignored.
    pub fn on_timer<T>(&mut self, timers: &mut TimerQueue<T>, now: Duration, timer: NotificationTimer)
    where
        T: From<NotificationTimer>,
    {
        let is_current = self
            .current
            .as_ref()
            .is_some_and(|live| live.record.id == timer.id());
        if !is_current {
            return;
        }

        match timer {
            NotificationTimer::SlideIn(_) => {
                if let Some(live) = self.current.as_mut() {
                    if live.phase == NotificationPhase::Entering {
                        live.phase = NotificationPhase::Visible;
                    }
                }
            }
            NotificationTimer::AutoDismiss(_) => {
                self.retire(timers, now);
            }
            NotificationTimer::Remove(id) => {
                debug!(%id, "notification removed");
                self.current = None;
            }
        }
    }

    fn retire<T>(&mut self, timers: &mut TimerQueue<T>, now: Duration) -> bool
    where
        T: From<NotificationTimer>,
    {
        let Some(live) = self.current.as_mut() else {
            return false;
        };
        if live.phase == NotificationPhase::Leaving {
            return false;
        }

        for timer in live.timers.drain(..) {
            timers.cancel(timer);
        }
        live.phase = NotificationPhase::Leaving;
        let remove = timers.schedule_after(now, self.exit, NotificationTimer::Remove(live.record.id).into());
        live.timers.push(remove);
        debug!(id = %live.record.id, "notification retiring");
        true
    }

    pub fn current(&self) -> Option<&NotificationRecord> {
        self.current.as_ref().map(|live| &live.record)
    }

    pub fn phase(&self) -> Option<NotificationPhase> {
        self.current.as_ref().map(|live| live.phase)
    }

    /// Number of notification elements in the document (0 or 1)
    pub fn present_count(&self) -> usize {
        usize::from(self.current.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn manager() -> (NotificationManager, TimerQueue<NotificationTimer>) {
        (NotificationManager::new(&TimingConfig::default()), TimerQueue::new())
    }

    fn run_until(
        manager: &mut NotificationManager,
        timers: &mut TimerQueue<NotificationTimer>,
        now: Duration,
    ) {
        while let Some(due) = timers.pop_due(now) {
            manager.on_timer(timers, due.deadline, due.task);
        }
    }

    #[test]
    fn test_lifecycle_with_auto_dismiss() {
        let (mut manager, mut timers) = manager();
        manager.notify(&mut timers, ms(0), "Saved", NotificationKind::Success);
        assert_eq!(manager.phase(), Some(NotificationPhase::Entering));

        run_until(&mut manager, &mut timers, ms(100));
        assert_eq!(manager.phase(), Some(NotificationPhase::Visible));

        run_until(&mut manager, &mut timers, ms(5999));
        assert_eq!(manager.phase(), Some(NotificationPhase::Visible));

        run_until(&mut manager, &mut timers, ms(6000));
        assert_eq!(manager.phase(), Some(NotificationPhase::Leaving));

        run_until(&mut manager, &mut timers, ms(6399));
        assert_eq!(manager.present_count(), 1);

        run_until(&mut manager, &mut timers, ms(6400));
        assert_eq!(manager.present_count(), 0);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_second_notify_preempts() {
        let (mut manager, mut timers) = manager();
        let first = manager.notify(&mut timers, ms(0), "first", NotificationKind::Info);
        run_until(&mut manager, &mut timers, ms(3000));
        let second = manager.notify(&mut timers, ms(3000), "second", NotificationKind::Error);

        assert_ne!(first, second);
        assert_eq!(manager.present_count(), 1);
        assert_eq!(manager.current().map(|r| r.message.as_str()), Some("second"));

        // The first notification's auto-dismiss at 6000ms must not touch the second
        for t in (3000..9000).step_by(50) {
            run_until(&mut manager, &mut timers, ms(t));
            assert_eq!(manager.present_count(), 1);
            assert_eq!(manager.current().map(|r| r.id), Some(second));
        }
        run_until(&mut manager, &mut timers, ms(9400));
        assert_eq!(manager.present_count(), 0);
    }

    #[test]
    fn test_preempting_a_leaving_notification_removes_it() {
        let (mut manager, mut timers) = manager();
        manager.notify(&mut timers, ms(0), "first", NotificationKind::Info);
        assert!(manager.dismiss(&mut timers, ms(200)));
        manager.notify(&mut timers, ms(250), "second", NotificationKind::Warning);

        assert_eq!(manager.present_count(), 1);
        run_until(&mut manager, &mut timers, ms(700));
        // The first one's removal was cancelled with it
        assert_eq!(manager.current().map(|r| r.message.as_str()), Some("second"));
    }

    #[test]
    fn test_dismiss_cancels_auto_timer() {
        let (mut manager, mut timers) = manager();
        manager.notify(&mut timers, ms(0), "hello", NotificationKind::Info);
        run_until(&mut manager, &mut timers, ms(150));

        assert!(manager.dismiss(&mut timers, ms(1000)));
        assert!(!manager.dismiss(&mut timers, ms(1100)));
        assert_eq!(manager.phase(), Some(NotificationPhase::Leaving));
        assert_eq!(timers.len(), 1);

        run_until(&mut manager, &mut timers, ms(1400));
        assert_eq!(manager.present_count(), 0);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_dismiss_without_notification() {
        let (mut manager, mut timers) = manager();
        assert!(!manager.dismiss(&mut timers, ms(0)));
    }

    #[test]
    fn test_kind_presentation() {
        assert_eq!(NotificationKind::Warning.icon(), "fas fa-exclamation-triangle");
        assert_eq!(NotificationKind::Error.to_string(), "error");
        assert!(NotificationKind::Success.background().contains("#10b981"));
    }
}
