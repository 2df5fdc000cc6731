//! Probability engine — per-reel jackpot forcing and match coupling
//!
//! The configured chances are targets for the composite three-reel event.
//! Each reel rolls its own adjusted probability at its stop moment:
//!
//! - jackpot: `jackpot_chance^(1/3)` per reel, checked independently on every reel
//! - match:   `sqrt(win_chance)` per coupled reel (reels 1 and 2)
//!
//! Reel 1 copies reel 0 on a match roll. Reel 2 copies reel 0 only when
//! reels 0 and 1 already agree. The composition is approximate; see
//! [`ProbabilityModel::expected_rates`] for what it actually produces.

use rand::Rng;
use serde::{Deserialize, Serialize};

use ww_core::{SymbolId, WwError, WwResult};

/// Target probabilities, immutable after startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityConfig {
    /// Target chance that all reels align on a non-jackpot symbol
    pub win_chance: f64,
    /// Target chance of a jackpot
    pub jackpot_chance: f64,
}

impl ProbabilityConfig {
    pub fn validate(&self) -> WwResult<()> {
        for (name, value) in [
            ("win_chance", self.win_chance),
            ("jackpot_chance", self.jackpot_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WwError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            win_chance: 0.20,
            jackpot_chance: 0.001,
        }
    }
}

/// Why a reel ended on its symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalizeReason {
    /// Kept the last transient symbol
    Natural,
    /// Forced to the jackpot symbol
    Jackpot,
    /// Copied reel 0's symbol
    Matched,
}

/// Final symbol chosen for a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finalization {
    pub symbol: SymbolId,
    pub reason: FinalizeReason,
}

impl Finalization {
    #[inline]
    pub fn is_forced(&self) -> bool {
        self.reason != FinalizeReason::Natural
    }
}

/// Per-reel adjusted probabilities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbabilityModel {
    jackpot_per_reel: f64,
    match_per_reel: f64,
}

impl ProbabilityModel {
    pub fn new(config: &ProbabilityConfig) -> Self {
        Self {
            jackpot_per_reel: config.jackpot_chance.cbrt(),
            match_per_reel: config.win_chance.sqrt(),
        }
    }

    #[inline]
    pub fn jackpot_per_reel(&self) -> f64 {
        self.jackpot_per_reel
    }

    #[inline]
    pub fn match_per_reel(&self) -> f64 {
        self.match_per_reel
    }

    /// Decide the final symbol of `reel_index` at its stop moment
    ///
    /// `candidate` is the reel's last transient symbol and `prior` holds the
    /// already-final symbols of every earlier reel, in index order.
    pub fn finalize<R: Rng>(
        &self,
        reel_index: u8,
        candidate: SymbolId,
        prior: &[SymbolId],
        jackpot: SymbolId,
        rng: &mut R,
    ) -> Finalization {
        if rng.random::<f64>() < self.jackpot_per_reel {
            return Finalization {
                symbol: jackpot,
                reason: FinalizeReason::Jackpot,
            };
        }

        let natural = Finalization {
            symbol: candidate,
            reason: FinalizeReason::Natural,
        };

        if reel_index == 0 {
            return natural;
        }
        let Some(&leader) = prior.first() else {
            return natural;
        };

        let roll = rng.random::<f64>();
        // Reel 1 always couples; later reels only while every earlier reel agrees
        let match_in_progress = prior.windows(2).all(|w| w[0] == w[1]);
        if match_in_progress && roll < self.match_per_reel {
            Finalization {
                symbol: leader,
                reason: FinalizeReason::Matched,
            }
        } else {
            natural
        }
    }

    /// Analytic win and jackpot rates of the three-reel composition
    ///
    /// Assumes each reel's last transient symbol is uniform over the
    /// `symbol_count - 1` non-jackpot symbols.
    pub fn expected_rates(&self, symbol_count: u32) -> ExpectedRates {
        let pj = self.jackpot_per_reel;
        let pm = self.match_per_reel;
        let transient = symbol_count.saturating_sub(1).max(1) as f64;

        // Later reels land on jackpot by their own roll or by copying it
        let follow_jackpot = pj + (1.0 - pj) * pm;
        // Later reels land on reel 0's symbol by copying or by chance
        let follow_symbol = (1.0 - pj) * (pm + (1.0 - pm) / transient);

        ExpectedRates {
            win: (1.0 - pj) * follow_symbol * follow_symbol,
            jackpot: pj * follow_jackpot * follow_jackpot,
        }
    }
}

/// Long-run outcome rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedRates {
    pub win: f64,
    pub jackpot: f64,
}

impl ExpectedRates {
    #[inline]
    pub fn loss(&self) -> f64 {
        1.0 - self.win - self.jackpot
    }
}
