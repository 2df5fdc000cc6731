//! Slot machine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use ww_audio::SoundBank;
use ww_core::{WwError, WwResult};

use crate::probability::ProbabilityConfig;
use crate::symbols::SymbolSet;
use crate::timing::{TimingConfig, TimingProfile};

/// Complete machine configuration, fixed after startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    pub symbols: SymbolSet,
    pub probability: ProbabilityConfig,
    pub timing: TimingConfig,
    pub sounds: SoundBank,
}

impl SlotConfig {
    /// Swap in a timing profile
    pub fn with_timing(mut self, profile: TimingProfile) -> Self {
        self.timing = TimingConfig::from_profile(profile);
        self
    }

    pub fn with_probability(mut self, win_chance: f64, jackpot_chance: f64) -> Self {
        self.probability = ProbabilityConfig {
            win_chance,
            jackpot_chance,
        };
        self
    }

    /// Reject anything that would fail mid-spin
    pub fn validate(&self) -> WwResult<()> {
        self.symbols.validate()?;
        self.probability.validate()?;
        self.timing.validate()?;
        self.sounds.validate()?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> WwResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| WwError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> WwResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| WwError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> WwResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            _ => Err(WwError::InvalidConfig(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> WwResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| WwError::Serialization(e.to_string()))
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolSet::wild_west(),
            probability: ProbabilityConfig::default(),
            timing: TimingConfig::normal(),
            sounds: SoundBank::default(),
        }
    }
}
