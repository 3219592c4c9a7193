use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use twocats_core::{EventSource, TimedEvent, UiEvent};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    /// Shorter poll used while the page still has frames or timers to run
    frame_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self::with_animation_fps(tick_rate_ms, 60)
    }

    pub fn with_animation_fps(tick_rate_ms: u64, fps: u32) -> Self {
        let fps = fps.clamp(1, 240);
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
            frame_rate: Duration::from_micros(1_000_000 / fps as u64),
        }
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.frame_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events, ignore release events
                    if key.kind == KeyEventKind::Press {
                        Ok(Some(AppEvent::Key(key)))
                    } else {
                        Ok(None)
                    }
                }
                Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
                _ => Ok(None),
            }
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Nothing happened within the poll window
    Tick,
}

/// Page events produced by key handling, waiting to be dispatched
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<TimedEvent>,
}

impl InputQueue {
    pub fn push(&mut self, at: Duration, event: UiEvent) {
        self.events.push_back(TimedEvent::new(at, event));
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for InputQueue {
    fn poll(&mut self, now: Duration) -> Option<TimedEvent> {
        if self.events.front()?.at() <= now {
            self.events.pop_front()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_queue_is_fifo() {
        let mut queue = InputQueue::default();
        queue.push(Duration::from_millis(5), UiEvent::Submit);
        queue.push(Duration::from_millis(5), UiEvent::NotificationClose);
        assert_eq!(queue.len(), 2);

        assert!(queue.poll(Duration::from_millis(4)).is_none());
        assert_eq!(queue.poll(Duration::from_millis(5)).map(|e| e.event), Some(UiEvent::Submit));
        assert_eq!(
            queue.poll(Duration::from_millis(5)).map(|e| e.event),
            Some(UiEvent::NotificationClose)
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_frame_rate_from_fps() {
        let handler = EventHandler::with_animation_fps(250, 50);
        assert_eq!(handler.frame_rate, Duration::from_millis(20));
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }
}
