//! Smooth anchor scrolling
//!
//! Combines easing functions and timing utilities into the animator used when a
//! `#section` link is followed. The duration scales with distance so short hops
//! feel snappy while long jumps are capped.

use std::time::Duration;

use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};
use crate::config::ScrollConfig;

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    /// Page time the animation started
    start: Duration,
    /// Starting scroll position
    from: f64,
    /// Target scroll position
    to: f64,
    /// Animation duration
    duration: Duration,
    /// Easing function
    easing: EasingType,
}

/// Anchor scroll animator
///
/// Call `scroll_to()` to begin an animation, then `update()` every frame to get
/// the interpolated scroll position.
#[derive(Debug, Clone)]
pub struct AnchorScroll {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
}

impl Default for AnchorScroll {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl AnchorScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final position of the running animation
    pub fn target(&self) -> Option<f64> {
        self.animation.as_ref().map(|a| a.to)
    }

    /// Half a millisecond per pixel travelled, capped by `max_smooth_duration_ms`
    pub fn duration_for(&self, distance: f64) -> Duration {
        let ms = (distance.abs() / 2.0).min(self.config.max_smooth_duration_ms as f64);
        Duration::from_secs_f64(ms / 1000.0)
    }

    /// Start scrolling from `from` towards `target`.
    ///
    /// Returns the position to jump to right away when no animation is needed
    /// (smooth scrolling disabled, or already there). Otherwise the movement is
    /// delivered through `update()`.
    pub fn scroll_to(
        &mut self,
        from: f64,
        target: f64,
        max_scroll: f64,
        now: Duration,
    ) -> Option<f64> {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        let duration = self.duration_for(target - from);

        if !self.config.smooth_enabled || duration.is_zero() {
            self.animation = None;
            return Some(target);
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from,
            to: target,
            duration,
            easing: self.config.easing,
        });
        None
    }

    /// Advance the animation and return the position for this frame.
    ///
    /// Returns `None` when idle. The frame that completes the animation returns
    /// exactly the target and clears the animation.
    pub fn update(&mut self, now: Duration) -> Option<f64> {
        let anim = self.animation.as_ref()?;
        if is_complete(anim.start, now, anim.duration) {
            let to = anim.to;
            self.animation = None;
            return Some(to);
        }
        let t = progress(anim.start, now, anim.duration);
        Some(lerp(anim.from, anim.to, anim.easing.apply(t)))
    }

    /// Stop where we are
    pub fn cancel(&mut self) {
        self.animation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_instant_jump_when_disabled() {
        let config = ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let mut anchor = AnchorScroll::new(config);
        assert_eq!(anchor.scroll_to(0.0, 900.0, 5000.0, ms(0)), Some(900.0));
        assert!(!anchor.is_animating());
    }

    #[test]
    fn test_duration_scales_and_caps() {
        let anchor = AnchorScroll::default();
        assert_eq!(anchor.duration_for(400.0), ms(200));
        assert_eq!(anchor.duration_for(-400.0), ms(200));
        assert_eq!(anchor.duration_for(10_000.0), ms(1000));
    }

    #[test]
    fn test_animation_reaches_target_exactly() {
        let mut anchor = AnchorScroll::default();
        assert_eq!(anchor.scroll_to(0.0, 800.0, 5000.0, ms(0)), None);
        assert_eq!(anchor.target(), Some(800.0));

        let halfway = anchor.update(ms(200)).unwrap();
        assert!((halfway - 400.0).abs() < 1e-6);

        let mut last = halfway;
        for t in [250, 300, 350] {
            let pos = anchor.update(ms(t)).unwrap();
            assert!(pos >= last);
            last = pos;
        }
        assert_eq!(anchor.update(ms(400)), Some(800.0));
        assert!(!anchor.is_animating());
        assert_eq!(anchor.update(ms(500)), None);
    }

    #[test]
    fn test_target_clamped_to_document() {
        let mut anchor = AnchorScroll::default();
        anchor.scroll_to(0.0, 9000.0, 1200.0, ms(0));
        assert_eq!(anchor.target(), Some(1200.0));
        assert_eq!(anchor.scroll_to(0.0, -80.0, 1200.0, ms(0)), Some(0.0));
    }
}
