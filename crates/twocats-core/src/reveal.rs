//! Intersection-driven reveal
//!
//! A [`RevealObserver`] plays the role of an `IntersectionObserver`: targets are
//! registered, visible fractions are fed in as the page scrolls, and a target
//! triggers when it crosses into the threshold. Crossing is edge-triggered, so
//! a target that stays on screen does not keep firing.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

/// Presentation state of a revealable element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    /// Not under observation; rendered as-is
    #[default]
    Static,
    /// Observed and waiting to be seen ("fade-in")
    Pending,
    /// Seen at least once ("fade-in appear")
    Appeared,
}

/// How long a target stays observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObserveMode {
    /// Keep watching for the life of the page
    Persistent,
    /// Stop watching after the first trigger
    Once,
}

#[derive(Debug, Clone)]
struct Watched {
    intersecting: bool,
}

#[derive(Debug, Clone)]
pub struct RevealObserver<K> {
    threshold: f64,
    mode: ObserveMode,
    watched: HashMap<K, Watched>,
    states: HashMap<K, RevealState>,
}

impl<K> RevealObserver<K>
where
    K: Clone + Eq + Hash,
{
    pub fn new(threshold: f64, mode: ObserveMode) -> Self {
        Self {
            threshold,
            mode,
            watched: HashMap::new(),
            states: HashMap::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start watching `key`. A target that has not appeared yet becomes pending.
    pub fn observe(&mut self, key: K) {
        let state = self.states.entry(key.clone()).or_default();
        if *state == RevealState::Static {
            *state = RevealState::Pending;
        }
        self.watched.insert(key, Watched { intersecting: false });
    }

    pub fn unobserve(&mut self, key: &K) {
        self.watched.remove(key);
    }

    pub fn is_observed(&self, key: &K) -> bool {
        self.watched.contains_key(key)
    }

    /// Feed the current visible fraction of `key`.
    ///
    /// Returns true when the target crosses into the threshold. In `Once` mode
    /// the target is unobserved as part of the trigger.
    pub fn measure(&mut self, key: &K, fraction: f64) -> bool {
        let Some(watched) = self.watched.get_mut(key) else {
            return false;
        };

        let now_intersecting = fraction > 0.0 && fraction >= self.threshold;
        let crossed = now_intersecting && !watched.intersecting;
        watched.intersecting = now_intersecting;

        if crossed && self.mode == ObserveMode::Once {
            self.watched.remove(key);
        }
        crossed
    }

    /// Mark `key` as appeared. Returns false when it already was.
    pub fn mark_appeared(&mut self, key: &K) -> bool {
        let state = self.states.entry(key.clone()).or_default();
        if *state == RevealState::Appeared {
            return false;
        }
        *state = RevealState::Appeared;
        true
    }

    pub fn state(&self, key: &K) -> RevealState {
        self.states.get(key).copied().unwrap_or_default()
    }
}

/// Start offsets for revealing `members` one after another, `per_index` apart
pub fn stagger<K: Clone>(members: &[K], per_index: Duration) -> Vec<(Duration, K)> {
    members
        .iter()
        .enumerate()
        .map(|(index, key)| (per_index * index as u32, key.clone()))
        .collect()
}
