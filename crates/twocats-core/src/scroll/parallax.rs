//! Offset transforms for decorative graphics

use std::fmt;

/// A vertical offset with optional rotation, rendered as a CSS transform
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub translate_y: f64,
    pub rotate_deg: Option<f64>,
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translateY({}px)", self.translate_y)?;
        if let Some(deg) = self.rotate_deg {
            write!(f, " rotate({}deg)", deg)?;
        }
        Ok(())
    }
}

/// A graphic whose offset is a linear function of scroll position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Pixels of offset per scrolled pixel
    pub speed: f64,
    /// Degrees of rotation per scrolled pixel
    pub rotation: Option<f64>,
}

impl ParallaxLayer {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            rotation: None,
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[inline]
    pub fn transform(&self, scroll: f64) -> Transform {
        Transform {
            translate_y: scroll * self.speed,
            rotate_deg: self.rotation.map(|r| scroll * r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_offset() {
        let layer = ParallaxLayer::new(0.2);
        let t = layer.transform(500.0);
        assert!((t.translate_y - 100.0).abs() < 1e-9);
        assert_eq!(t.rotate_deg, None);
        assert_eq!(t.to_string(), "translateY(100px)");
    }

    #[test]
    fn test_rotation() {
        let layer = ParallaxLayer::new(0.5).with_rotation(0.25);
        let t = layer.transform(400.0);
        assert_eq!(t.to_string(), "translateY(200px) rotate(100deg)");
    }
}
