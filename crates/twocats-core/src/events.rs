//! User input as typed events
//!
//! Surfaces translate whatever they receive (key presses, a scripted scenario)
//! into [`UiEvent`]s and hand them to the site together with the page time
//! they happened at.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::form::FieldName;
use crate::notification::NotificationKind;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Scroll {
        offset: f64,
    },
    Resize {
        viewport_height: f64,
    },
    /// A `#section` link was followed
    AnchorClick {
        href: String,
    },
    Focus {
        field: FieldName,
    },
    Blur {
        field: FieldName,
    },
    Input {
        field: FieldName,
        value: String,
    },
    Submit,
    NotificationClose,
    NotificationClick,
    /// Show a notification directly
    Notify {
        message: String,
        #[serde(default)]
        kind: NotificationKind,
    },
}

/// An event stamped with the page time it happened at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: UiEvent,
}

impl TimedEvent {
    pub fn new(at: Duration, event: UiEvent) -> Self {
        Self {
            at_ms: at.as_millis() as u64,
            event,
        }
    }

    #[inline]
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// Anything that produces user input for the site
pub trait EventSource {
    /// Next event that happened at or before `now`, if any
    fn poll(&mut self, now: Duration) -> Option<TimedEvent>;

    /// No more events will ever arrive
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// A fixed list of events replayed in time order
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    queue: VecDeque<TimedEvent>,
}

impl ScriptedEvents {
    pub fn new(mut events: Vec<TimedEvent>) -> Self {
        // Stable, so events at the same instant keep their authored order
        events.sort_by_key(|e| e.at_ms);
        Self {
            queue: events.into(),
        }
    }

    /// Page time of the last event
    pub fn last_at(&self) -> Option<Duration> {
        self.queue.back().map(TimedEvent::at)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, now: Duration) -> Option<TimedEvent> {
        if self.queue.front()?.at() <= now {
            self.queue.pop_front()
        } else {
            None
        }
    }

    fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}

fn default_frame_ms() -> u64 {
    16
}

/// A replayable interaction script, stored as TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Page time to run until; defaults to shortly after everything settles
    #[serde(default)]
    pub until_ms: Option<u64>,
    /// Spacing of animation frames
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default, rename = "event")]
    pub events: Vec<TimedEvent>,
}

impl Scenario {
    pub fn from_toml(content: &str) -> Result<Self> {
        let scenario: Self =
            toml::from_str(content).map_err(|e| Error::Config(format!("invalid scenario: {}", e)))?;
        if scenario.frame_ms == 0 {
            return Err(Error::Config("frame_ms must be at least 1".to_string()));
        }
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn source(&self) -> ScriptedEvents {
        ScriptedEvents::new(self.events.clone())
    }
}
