//! Named sounds used by the machine

use std::fmt;

use serde::{Deserialize, Serialize};

use ww_core::{WwError, WwResult};

/// Name of a sound asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(pub String);

impl SoundId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SoundId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Sounds the machine triggers during a spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundBank {
    /// Ambient loop started with every spin
    pub spinning: SoundId,
    pub win: SoundId,
    pub jackpot: SoundId,
    /// Loss variants, played round-robin
    pub loss: Vec<SoundId>,
}

impl SoundBank {
    /// Loss variant at `index`
    pub fn loss_variant(&self, index: usize) -> WwResult<&SoundId> {
        self.loss
            .get(index)
            .ok_or_else(|| WwError::AssetMissing(format!("loss sound variant {}", index)))
    }

    pub fn validate(&self) -> WwResult<()> {
        if self.loss.is_empty() {
            return Err(WwError::AssetMissing("no loss sound variants configured".into()));
        }
        Ok(())
    }
}

impl Default for SoundBank {
    fn default() -> Self {
        Self {
            spinning: "spinning".into(),
            win: "jackpot".into(),
            jackpot: "jackpot".into(),
            loss: vec![
                "plankton_loss".into(),
                "rot_loss".into(),
                "pipe_loss".into(),
                "kitty_loss".into(),
                "fart_loss".into(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bank_has_five_loss_variants() {
        let bank = SoundBank::default();
        assert_eq!(bank.loss.len(), 5);
        assert!(bank.validate().is_ok());
        assert_eq!(bank.loss_variant(4).unwrap().as_str(), "fart_loss");
    }

    #[test]
    fn test_missing_variant() {
        let bank = SoundBank::default();
        assert!(matches!(bank.loss_variant(5), Err(WwError::AssetMissing(_))));
    }

    #[test]
    fn test_empty_loss_list_rejected() {
        let bank = SoundBank {
            loss: Vec::new(),
            ..SoundBank::default()
        };
        assert!(bank.validate().is_err());
    }

    #[test]
    fn test_sound_id_serializes_as_string() {
        let json = serde_json::to_string(&SoundId::new("spinning")).unwrap();
        assert_eq!(json, "\"spinning\"");
    }
}
