//! Outcome resolver — jackpot / win / loss and the loss sound rotation

use serde::{Deserialize, Serialize};

use ww_audio::{SoundBank, SoundId};
use ww_core::{REEL_COUNT, SymbolId, WwError, WwResult};
use ww_stage::OutcomeKind;

/// Classify three final symbols
///
/// Exhaustive and mutually exclusive: jackpot iff all equal the jackpot
/// symbol, win iff all equal something else, loss otherwise.
pub fn classify(symbols: &[SymbolId; REEL_COUNT], jackpot: SymbolId) -> OutcomeKind {
    let first = symbols[0];
    if symbols.iter().all(|&s| s == first) {
        if first == jackpot {
            OutcomeKind::Jackpot
        } else {
            OutcomeKind::Win
        }
    } else {
        OutcomeKind::Loss
    }
}

/// Resolved spin result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub kind: OutcomeKind,
    pub symbols: [SymbolId; REEL_COUNT],
    /// Loss sound variant, only set for losses
    pub loss_variant: Option<usize>,
}

impl Resolution {
    /// Sound to play for this result
    pub fn sound<'a>(&self, bank: &'a SoundBank) -> WwResult<&'a SoundId> {
        match (self.kind, self.loss_variant) {
            (OutcomeKind::Jackpot, _) => Ok(&bank.jackpot),
            (OutcomeKind::Win, _) => Ok(&bank.win),
            (OutcomeKind::Loss, Some(variant)) => bank.loss_variant(variant),
            (OutcomeKind::Loss, None) => {
                Err(WwError::AssetMissing("loss without a sound variant".into()))
            }
        }
    }
}

/// Resolver owning the process-wide loss rotation
///
/// The rotation persists across spins and only resets with the process.
#[derive(Debug, Clone)]
pub struct OutcomeResolver {
    loss_variants: usize,
    next_loss_variant: usize,
    losses: u64,
}

impl OutcomeResolver {
    pub fn new(loss_variants: usize) -> WwResult<Self> {
        if loss_variants == 0 {
            return Err(WwError::InvalidConfig(
                "at least one loss sound variant is required".into(),
            ));
        }
        Ok(Self {
            loss_variants,
            next_loss_variant: 0,
            losses: 0,
        })
    }

    /// Classify and, for a loss, advance the rotation
    pub fn resolve(&mut self, symbols: [SymbolId; REEL_COUNT], jackpot: SymbolId) -> Resolution {
        let kind = classify(&symbols, jackpot);
        let loss_variant = if kind == OutcomeKind::Loss {
            let variant = self.next_loss_variant;
            self.next_loss_variant = (self.next_loss_variant + 1) % self.loss_variants;
            self.losses += 1;
            Some(variant)
        } else {
            None
        };

        Resolution {
            kind,
            symbols,
            loss_variant,
        }
    }

    /// Variant the next loss will use
    pub fn next_loss_variant(&self) -> usize {
        self.next_loss_variant
    }

    pub fn loss_variants(&self) -> usize {
        self.loss_variants
    }

    /// Losses resolved during the process lifetime
    pub fn losses(&self) -> u64 {
        self.losses
    }
}
