//! Timing profiles for reel stops, frame cadence and result presentation

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ww_core::{REEL_COUNT, WwError, WwResult};

/// Timing profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Cabinet timing: reels stop at 5s / 7s / 9s
    Normal,
    /// Fast mode
    Turbo,
    /// Short spins with enough gap between stops to follow each reel
    Studio,
    /// Scaled or hand-edited timing
    Custom,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self::Normal
    }
}

impl TimingProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
            Self::Studio => "Studio",
            Self::Custom => "Custom",
        }
    }
}

/// Detailed timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Stop time of each reel after spin start (ms), strictly increasing
    pub reel_stop_ms: [u64; REEL_COUNT],

    /// Animation frame cadence (ms)
    pub tick_interval_ms: u64,

    /// Pause between the last reel stop and the result (ms)
    pub settle_delay_ms: u64,

    /// How long the result banner stays up (ms)
    pub banner_duration_ms: u64,
}

impl TimingConfig {
    /// Normal gameplay timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            reel_stop_ms: [5000, 7000, 9000],
            tick_interval_ms: 200,
            settle_delay_ms: 1000,
            banner_duration_ms: 5000,
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            reel_stop_ms: [1500, 2000, 2500],
            tick_interval_ms: 100,
            settle_delay_ms: 300,
            banner_duration_ms: 1500,
        }
    }

    /// Studio mode
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            reel_stop_ms: [2000, 3000, 4000],
            tick_interval_ms: 150,
            settle_delay_ms: 500,
            banner_duration_ms: 2000,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| ((ms as f64 * factor).round() as u64).max(1);
        Self {
            profile: TimingProfile::Custom,
            reel_stop_ms: self.reel_stop_ms.map(scale),
            tick_interval_ms: scale(self.tick_interval_ms),
            settle_delay_ms: scale(self.settle_delay_ms),
            banner_duration_ms: scale(self.banner_duration_ms),
        }
    }

    #[inline]
    pub fn reel_stop_time(&self, reel_index: usize) -> Duration {
        Duration::from_millis(self.reel_stop_ms[reel_index])
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[inline]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[inline]
    pub fn banner_duration(&self) -> Duration {
        Duration::from_millis(self.banner_duration_ms)
    }

    /// Animation frames a reel shows before it stops
    pub fn frames_before_stop(&self, reel_index: usize) -> u64 {
        self.reel_stop_ms[reel_index].div_ceil(self.tick_interval_ms.max(1))
    }

    /// Lower bound for one spin from start to trigger re-enable
    pub fn min_spin_duration(&self) -> Duration {
        Duration::from_millis(
            self.reel_stop_ms[REEL_COUNT - 1] + self.settle_delay_ms + self.banner_duration_ms,
        )
    }

    pub fn validate(&self) -> WwResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(WwError::InvalidConfig("tick interval must be non-zero".into()));
        }
        if self.reel_stop_ms[0] == 0 {
            return Err(WwError::InvalidConfig("first reel must stop after spin start".into()));
        }
        if !self.reel_stop_ms.windows(2).all(|w| w[0] < w[1]) {
            return Err(WwError::InvalidConfig(format!(
                "reel stop times must be strictly increasing, got {:?}",
                self.reel_stop_ms
            )));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_profiles() {
        let normal = TimingConfig::normal();
        let turbo = TimingConfig::turbo();
        let studio = TimingConfig::studio();

        assert_eq!(normal.reel_stop_ms, [5000, 7000, 9000]);
        assert_eq!(normal.tick_interval(), Duration::from_millis(200));

        assert!(turbo.min_spin_duration() < studio.min_spin_duration());
        assert!(studio.min_spin_duration() < normal.min_spin_duration());

        for config in [normal, turbo, studio] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_stop_order() {
        let config = TimingConfig::normal();
        assert!(config.reel_stop_time(0) < config.reel_stop_time(1));
        assert!(config.reel_stop_time(1) < config.reel_stop_time(2));
    }

    #[test]
    fn test_frames_before_stop() {
        let config = TimingConfig::normal();
        assert_eq!(config.frames_before_stop(0), 25);
        assert_eq!(config.frames_before_stop(2), 45);
    }

    #[test]
    fn test_scaled_keeps_order() {
        let fast = TimingConfig::normal().scaled(0.1);
        assert_eq!(fast.profile, TimingProfile::Custom);
        assert_eq!(fast.reel_stop_ms, [500, 700, 900]);
        assert_eq!(fast.tick_interval_ms, 20);
        assert!(fast.validate().is_ok());
    }

    #[test]
    fn test_invalid_timing_rejected() {
        let mut config = TimingConfig::normal();
        config.reel_stop_ms = [5000, 5000, 9000];
        assert!(config.validate().is_err());

        let mut config = TimingConfig::normal();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }
}
