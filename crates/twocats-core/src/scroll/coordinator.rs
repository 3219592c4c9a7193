//! Frame-throttled scroll effect recomputation
//!
//! Scroll events arrive far more often than frames are painted. The coordinator
//! records the newest offset on every event but only asks for one animation
//! frame at a time; the frame then recomputes every effect from whatever
//! offset is current when it runs.

use tracing::trace;

use super::nav::active_section;
use super::parallax::{ParallaxLayer, Transform};
use crate::geometry::{Span, Viewport};

/// Whether a recomputation frame is already on its way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameState {
    #[default]
    Idle,
    Scheduled,
}

#[derive(Debug, Clone, Default)]
pub struct ScrollCoordinator {
    state: FrameState,
    latest: f64,
}

impl ScrollCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw scroll event.
    ///
    /// Returns true when the caller must request an animation frame, which only
    /// happens on the transition from idle.
    pub fn on_scroll(&mut self, offset: f64) -> bool {
        self.latest = offset;
        match self.state {
            FrameState::Idle => {
                self.state = FrameState::Scheduled;
                true
            }
            FrameState::Scheduled => false,
        }
    }

    /// The frame is running: clear the flag and hand back the newest offset
    pub fn run_frame(&mut self) -> f64 {
        self.state = FrameState::Idle;
        trace!(offset = self.latest, "scroll frame");
        self.latest
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Most recent offset seen
    pub fn offset(&self) -> f64 {
        self.latest
    }
}

/// Page geometry needed to recompute scroll effects
#[derive(Debug, Clone, Default)]
pub struct ScrollInputs<'a> {
    pub viewport_height: f64,
    pub document_height: f64,
    /// Sections with an id, in document order
    pub sections: Vec<(&'a str, Span)>,
    /// Hero graphic, always follows the scroll
    pub hero: Option<ParallaxLayer>,
    /// About graphic and the section that owns it
    pub about: Option<(ParallaxLayer, Span)>,
    pub navbar_threshold: f64,
    pub active_link_margin: f64,
}

/// Everything a scroll frame decides
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollEffects {
    pub offset: f64,
    pub hero: Option<Transform>,
    /// `None` while the about section is off screen: the previous transform stays
    pub about: Option<Transform>,
    pub active_section: Option<String>,
    pub navbar_scrolled: bool,
    /// Scroll progress in percent
    pub progress: f64,
}

impl ScrollEffects {
    pub fn compute(offset: f64, inputs: &ScrollInputs<'_>) -> Self {
        let viewport = Viewport::new(offset, inputs.viewport_height);

        let hero = inputs.hero.map(|layer| layer.transform(offset));
        let about = inputs
            .about
            .filter(|(_, section)| viewport.intersects(section))
            .map(|(layer, _)| layer.transform(offset));

        let active = active_section(
            inputs.sections.iter().map(|(id, span)| (*id, span.top)),
            offset,
            inputs.active_link_margin,
        )
        .map(str::to_string);

        let scrollable = inputs.document_height - inputs.viewport_height;
        let progress = if scrollable > 0.0 {
            (offset / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Self {
            offset,
            hero,
            about,
            active_section: active,
            navbar_scrolled: offset > inputs.navbar_threshold,
            progress,
        }
    }
}
