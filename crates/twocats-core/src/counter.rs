//! Counting animation for numeric stats ("150+", "98%")

use std::time::Duration;

/// A stat's text split into its number and everything else
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatText {
    pub number: u64,
    pub suffix: String,
}

/// Split stat text like `"150+"` into `150` and `"+"`.
///
/// All digits are concatenated into the number and all other characters form
/// the suffix. Returns `None` when there is nothing to count up to (no digits,
/// a zero, or a number too large to hold).
pub fn parse_stat(text: &str) -> Option<StatText> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let number: u64 = digits.parse().ok()?;
    if number == 0 {
        return None;
    }
    let suffix = text.chars().filter(|c| !c.is_ascii_digit()).collect();
    Some(StatText { number, suffix })
}

/// Result of advancing a counter by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterStep {
    pub value: u64,
    pub done: bool,
}

/// Per-stat counter state, advanced once per tick until it lands on the target
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    suffix: String,
    increment: f64,
    total_ticks: u64,
    ticks: u64,
    current: u64,
}

impl CounterAnimation {
    /// Count from 0 to `target` over `duration`, one step per `tick`.
    ///
    /// Each tick adds `target / (duration / tick)`. The last tick lands exactly
    /// on `target` regardless of floating point drift.
    pub fn new(target: u64, duration: Duration, tick: Duration, suffix: impl Into<String>) -> Self {
        let tick_count = if tick.is_zero() {
            0.0
        } else {
            duration.as_secs_f64() / tick.as_secs_f64()
        };
        let (increment, total_ticks) = if tick_count > 0.0 {
            (target as f64 / tick_count, tick_count.ceil() as u64)
        } else {
            (target as f64, 1)
        };

        Self {
            target,
            suffix: suffix.into(),
            increment,
            total_ticks: total_ticks.max(1),
            ticks: 0,
            current: 0,
        }
    }

    pub fn tick(&mut self) -> CounterStep {
        if self.is_done() {
            return CounterStep {
                value: self.current,
                done: true,
            };
        }

        self.ticks += 1;
        let raw = self.increment * self.ticks as f64;
        let done = self.ticks >= self.total_ticks || raw >= self.target as f64;
        self.current = if done {
            self.target
        } else {
            (raw.floor() as u64).min(self.target)
        };

        CounterStep {
            value: self.current,
            done,
        }
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.ticks > 0 && self.current == self.target
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Text to show right now, e.g. `"42+"`
    pub fn display(&self) -> String {
        format!("{}{}", self.current, self.suffix)
    }
}

/// Every value a counter shows, starting with the initial 0
pub fn counter_values(target: u64, duration: Duration, tick: Duration) -> Vec<u64> {
    let mut animation = CounterAnimation::new(target, duration, tick, "");
    let mut values = vec![0];
    loop {
        let step = animation.tick();
        values.push(step.value);
        if step.done {
            break;
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_parse_stat() {
        assert_eq!(
            parse_stat("150+"),
            Some(StatText {
                number: 150,
                suffix: "+".to_string()
            })
        );
        assert_eq!(
            parse_stat("1,200 users"),
            Some(StatText {
                number: 1200,
                suffix: ", users".to_string()
            })
        );
        assert_eq!(parse_stat("0%"), None);
        assert_eq!(parse_stat("many"), None);
    }

    #[test]
    fn test_ends_exactly_on_target() {
        for (target, duration) in [(100, 2000), (150, 2000), (7, 2030), (98, 1999), (1_000_003, 2000)] {
            let values = counter_values(target, ms(duration), ms(50));
            assert_eq!(values.first(), Some(&0));
            assert_eq!(values.last(), Some(&target), "target {}", target);
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "target {}", target);
        }
    }

    #[test]
    fn test_tick_count_follows_duration() {
        // 2000ms at 50ms per tick: 40 ticks plus the initial 0
        assert_eq!(counter_values(100, ms(2000), ms(50)).len(), 41);
        assert_eq!(counter_values(100, ms(2000), ms(50))[1], 2);
    }

    #[test]
    fn test_zero_duration_jumps() {
        assert_eq!(counter_values(50, Duration::ZERO, ms(50)), vec![0, 50]);
    }

    #[test]
    fn test_display_keeps_suffix() {
        let mut counter = CounterAnimation::new(10, ms(100), ms(50), "%");
        assert_eq!(counter.display(), "0%");
        counter.tick();
        assert_eq!(counter.display(), "5%");
        let last = counter.tick();
        assert!(last.done);
        assert_eq!(counter.display(), "10%");
        assert_eq!(counter.tick(), CounterStep { value: 10, done: true });
    }
}
