use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (logs from the terminal preview land here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Fixed delays used by the interaction runtime, all in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long a notification stays before it retires itself
    #[serde(default = "default_notification_display")]
    pub notification_display_ms: u64,
    /// Delay between inserting a notification and sliding it in
    #[serde(default = "default_notification_enter")]
    pub notification_enter_ms: u64,
    /// Slide-out transition length before a retired notification is removed
    #[serde(default = "default_notification_exit")]
    pub notification_exit_ms: u64,
    /// Simulated acknowledgment delay for the contact form
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,
    /// Debounce window for the trailing scroll recomputation
    #[serde(default = "default_debounce")]
    pub scroll_debounce_ms: u64,
    /// Counter animation tick
    #[serde(default = "default_counter_tick")]
    pub counter_tick_ms: u64,
    /// Counter animation total duration
    #[serde(default = "default_counter_duration")]
    pub counter_duration_ms: u64,
    /// Per-index start delay between stat counters
    #[serde(default = "default_counter_stagger")]
    pub counter_stagger_ms: u64,
    /// Per-index reveal delay between grid siblings
    #[serde(default = "default_card_stagger")]
    pub card_stagger_ms: u64,
    /// Length of the scale pulse after a counter lands
    #[serde(default = "default_pulse")]
    pub pulse_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            notification_display_ms: default_notification_display(),
            notification_enter_ms: default_notification_enter(),
            notification_exit_ms: default_notification_exit(),
            submit_delay_ms: default_submit_delay(),
            scroll_debounce_ms: default_debounce(),
            counter_tick_ms: default_counter_tick(),
            counter_duration_ms: default_counter_duration(),
            counter_stagger_ms: default_counter_stagger(),
            card_stagger_ms: default_card_stagger(),
            pulse_ms: default_pulse(),
        }
    }
}

impl TimingConfig {
    pub fn notification_display(&self) -> Duration {
        Duration::from_millis(self.notification_display_ms)
    }

    pub fn notification_enter(&self) -> Duration {
        Duration::from_millis(self.notification_enter_ms)
    }

    pub fn notification_exit(&self) -> Duration {
        Duration::from_millis(self.notification_exit_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn scroll_debounce(&self) -> Duration {
        Duration::from_millis(self.scroll_debounce_ms)
    }

    /// Counter tick, never zero
    pub fn counter_tick(&self) -> Duration {
        Duration::from_millis(self.counter_tick_ms.max(1))
    }

    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    pub fn counter_stagger(&self) -> Duration {
        Duration::from_millis(self.counter_stagger_ms)
    }

    pub fn card_stagger(&self) -> Duration {
        Duration::from_millis(self.card_stagger_ms)
    }

    pub fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }
}

/// Easing curve for smooth anchor scrolling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end on the last frame
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
    /// Quadratic ease-in-out, the page's original anchor curve
    #[default]
    QuadInOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Offset past which the navbar switches to its "scrolled" look
    #[serde(default = "default_navbar_threshold")]
    pub navbar_threshold: f64,
    /// A section counts as reached once scroll is within this margin of its top
    #[serde(default = "default_active_margin")]
    pub active_link_margin: f64,
    /// Fixed navbar height subtracted from anchor targets
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,
    /// Animate anchor jumps instead of snapping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Upper bound for an anchor animation
    #[serde(default = "default_max_smooth_duration")]
    pub max_smooth_duration_ms: u64,
    /// Easing function for anchor animations
    #[serde(default)]
    pub easing: EasingType,
    /// Animation frame rate used by surfaces that drive frames
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            navbar_threshold: default_navbar_threshold(),
            active_link_margin: default_active_margin(),
            anchor_offset: default_anchor_offset(),
            smooth_enabled: default_true(),
            max_smooth_duration_ms: default_max_smooth_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Visible fraction at which a target appears
    #[serde(default = "default_reveal_threshold")]
    pub threshold: f64,
    /// Pixels trimmed from the bottom of the viewport before measuring
    #[serde(default = "default_reveal_margin")]
    pub bottom_margin: f64,
    /// Visible fraction of the stats region that starts the counters
    #[serde(default = "default_stats_threshold")]
    pub stats_threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: default_reveal_threshold(),
            bottom_margin: default_reveal_margin(),
            stats_threshold: default_stats_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_hero_speed")]
    pub hero_speed: f64,
    /// Degrees of rotation per scrolled pixel
    #[serde(default = "default_hero_rotation")]
    pub hero_rotation: f64,
    #[serde(default = "default_about_speed")]
    pub about_speed: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            hero_speed: default_hero_speed(),
            hero_rotation: default_hero_rotation(),
            about_speed: default_about_speed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixels scrolled per key press in the preview
    #[serde(default = "default_scroll_step")]
    pub scroll_step: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            scroll_step: default_scroll_step(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("twocats")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_notification_display() -> u64 {
    6000
}

fn default_notification_enter() -> u64 {
    100
}

fn default_notification_exit() -> u64 {
    400
}

fn default_submit_delay() -> u64 {
    1500
}

fn default_debounce() -> u64 {
    10
}

fn default_counter_tick() -> u64 {
    50
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_counter_stagger() -> u64 {
    200
}

fn default_card_stagger() -> u64 {
    100
}

fn default_pulse() -> u64 {
    200
}

fn default_navbar_threshold() -> f64 {
    50.0
}

fn default_active_margin() -> f64 {
    100.0
}

fn default_anchor_offset() -> f64 {
    80.0
}

fn default_max_smooth_duration() -> u64 {
    1000
}

fn default_animation_fps() -> u32 {
    60
}

fn default_reveal_threshold() -> f64 {
    0.1
}

fn default_reveal_margin() -> f64 {
    50.0
}

fn default_stats_threshold() -> f64 {
    0.5
}

fn default_hero_speed() -> f64 {
    0.3
}

fn default_hero_rotation() -> f64 {
    0.1
}

fn default_about_speed() -> f64 {
    0.2
}

fn default_tick_rate() -> u64 {
    16
}

fn default_scroll_step() -> f64 {
    40.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl SiteConfig {
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it is absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/twocats/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("twocats")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Log file written by the terminal preview
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("twocats.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.timing.notification_display(), Duration::from_millis(6000));
        assert_eq!(config.timing.notification_exit(), Duration::from_millis(400));
        assert_eq!(config.timing.submit_delay(), Duration::from_millis(1500));
        assert_eq!(config.timing.scroll_debounce(), Duration::from_millis(10));
        assert_eq!(config.timing.counter_tick(), Duration::from_millis(50));
        assert_eq!(config.scroll.easing, EasingType::QuadInOut);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [timing]
            notification_display_ms = 3000

            [scroll]
            easing = "cubic"
            "#,
        )
        .unwrap();
        assert_eq!(config.timing.notification_display_ms, 3000);
        assert_eq!(config.timing.submit_delay_ms, 1500);
        assert_eq!(config.scroll.easing, EasingType::Cubic);
        assert!((config.reveal.threshold - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = SiteConfig::default();
        config.parallax.about_speed = 0.5;
        config.save_to(&path).unwrap();

        let loaded = SiteConfig::load_from(&path).unwrap();
        assert!((loaded.parallax.about_speed - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SiteConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded.timing.counter_duration_ms, 2000);
    }

    #[test]
    fn test_zero_tick_is_clamped() {
        let mut timing = TimingConfig::default();
        timing.counter_tick_ms = 0;
        assert_eq!(timing.counter_tick(), Duration::from_millis(1));
    }
}
