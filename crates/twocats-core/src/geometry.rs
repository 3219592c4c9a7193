//! Vertical layout math shared by scroll effects and reveal observation.
//!
//! All positions are document pixels measured from the top of the page.

use serde::{Deserialize, Serialize};

/// Vertical extent of an element in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    pub top: f64,
    pub height: f64,
}

impl Span {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll: f64, height: f64) -> Self {
        Self { scroll, height }
    }

    /// Whether any part of `span` is on screen.
    ///
    /// Mirrors a bounding rect check: `rect.top < viewport_height && rect.bottom > 0`.
    pub fn intersects(&self, span: &Span) -> bool {
        let top = span.top - self.scroll;
        let bottom = span.bottom() - self.scroll;
        top < self.height && bottom > 0.0
    }

    /// Fraction of `span` inside the viewport after trimming `bottom_margin` off its bottom edge.
    ///
    /// Zero-height spans count as fully visible when their position is inside the window.
    pub fn visible_fraction(&self, span: &Span, bottom_margin: f64) -> f64 {
        let window_top = self.scroll;
        let window_bottom = self.scroll + (self.height - bottom_margin).max(0.0);

        if span.height <= 0.0 {
            let inside = span.top >= window_top && span.top < window_bottom;
            return if inside { 1.0 } else { 0.0 };
        }

        let visible = (span.bottom().min(window_bottom) - span.top.max(window_top)).max(0.0);
        (visible / span.height).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let viewport = Viewport::new(500.0, 800.0);
        assert!(viewport.intersects(&Span::new(600.0, 100.0)));
        assert!(viewport.intersects(&Span::new(0.0, 501.0)));
        assert!(!viewport.intersects(&Span::new(0.0, 500.0)));
        assert!(!viewport.intersects(&Span::new(1300.0, 100.0)));
    }

    #[test]
    fn test_visible_fraction_with_margin() {
        let viewport = Viewport::new(0.0, 1000.0);
        // Window is [0, 950) once the 50px bottom margin is trimmed
        assert!((viewport.visible_fraction(&Span::new(900.0, 100.0), 50.0) - 0.5).abs() < 1e-9);
        assert_eq!(viewport.visible_fraction(&Span::new(950.0, 100.0), 50.0), 0.0);
        assert_eq!(viewport.visible_fraction(&Span::new(100.0, 100.0), 50.0), 1.0);
    }

    #[test]
    fn test_visible_fraction_partially_above() {
        let viewport = Viewport::new(250.0, 1000.0);
        let fraction = viewport.visible_fraction(&Span::new(0.0, 500.0), 0.0);
        assert!((fraction - 0.5).abs() < 1e-9);
    }
}
