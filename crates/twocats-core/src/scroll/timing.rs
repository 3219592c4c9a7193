//! Time calculation utilities for animations driven by page time.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0)
///
/// # Arguments
/// * `start` - Page time the animation started
/// * `now` - Current page time
/// * `duration` - Total animation duration
///
/// # Returns
/// Progress value clamped to [0.0, 1.0]
#[inline]
pub fn progress(start: Duration, now: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Duration, now: Duration, duration: Duration) -> bool {
    now.saturating_sub(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(200.0, 100.0, 1.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_progress() {
        let start = Duration::from_millis(100);
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, Duration::from_millis(50), duration), 0.0);
        assert!((progress(start, Duration::from_millis(200), duration) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, Duration::from_millis(900), duration), 1.0);
        assert!(is_complete(start, Duration::from_millis(300), duration));
        assert!(!is_complete(start, Duration::from_millis(299), duration));
    }

    #[test]
    fn test_progress_zero_duration() {
        let at = Duration::from_millis(5);
        assert!((progress(at, at, Duration::ZERO) - 1.0).abs() < 0.001);
    }
}
