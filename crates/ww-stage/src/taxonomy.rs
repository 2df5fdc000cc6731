//! Stage taxonomy — outcome and frame classifications

use serde::{Deserialize, Serialize};

/// Result of a completed spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// All three reels show the same non-jackpot symbol
    Win,
    /// All three reels show the jackpot symbol
    Jackpot,
    /// Anything else
    Loss,
}

impl OutcomeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Win => "VICTORY",
            Self::Jackpot => "JACKPOT",
            Self::Loss => "YOU LOSE",
        }
    }

    /// Win and jackpot both count as hits
    pub fn is_hit(&self) -> bool {
        !matches!(self, Self::Loss)
    }
}

/// Which row of a reel window a rendered symbol occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameRole {
    /// Compressed preview of the upcoming symbol
    TransientTop,
    /// Full-size symbol on the payline
    Current,
    /// Compressed trail of the previous symbol
    TransientBottom,
}

impl FrameRole {
    pub const ALL: [FrameRole; 3] = [Self::TransientTop, Self::Current, Self::TransientBottom];
}
