//! Stage — the canonical phases of one spin
//!
//! A Stage is the SEMANTIC MEANING of a moment in the spin, not an
//! animation frame. Transient reel frames are never recorded as stages.

use serde::{Deserialize, Serialize};

use ww_core::SymbolId;

use crate::taxonomy::OutcomeKind;

/// Canonical spin stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stage {
    // ═══════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Start accepted, trigger disabled
    SpinStart,

    /// Ambient spinning sound dispatched
    ReelSpinLoop,

    /// Reel finalized on its symbol
    ReelStop {
        /// Which reel stopped (0-indexed)
        reel_index: u8,
        /// Final symbol
        symbol: SymbolId,
        /// Symbol was forced by the probability engine
        #[serde(default)]
        forced: bool,
    },

    /// All reels stopped, settle delay running
    Settle,

    /// Final symbols handed to the resolver
    EvaluateOutcome {
        symbols: Vec<SymbolId>,
    },

    /// Spin complete, trigger re-enabled
    SpinEnd,

    // ═══════════════════════════════════════════════════════════════════════
    // PRESENTATION
    // ═══════════════════════════════════════════════════════════════════════
    /// Outcome decided, result sound dispatched
    OutcomeReveal {
        kind: OutcomeKind,
        /// Loss sound variant, only for losses
        #[serde(default, skip_serializing_if = "Option::is_none")]
        loss_variant: Option<usize>,
    },

    /// Full-screen banner up
    BannerShow {
        kind: OutcomeKind,
        duration_ms: u64,
    },

    /// Banner dismissed
    BannerHide,
}

impl Stage {
    pub fn type_name(&self) -> &'static str {
        match self {
            Stage::SpinStart => "spin_start",
            Stage::ReelSpinLoop => "reel_spin_loop",
            Stage::ReelStop { .. } => "reel_stop",
            Stage::Settle => "settle",
            Stage::EvaluateOutcome { .. } => "evaluate_outcome",
            Stage::SpinEnd => "spin_end",
            Stage::OutcomeReveal { .. } => "outcome_reveal",
            Stage::BannerShow { .. } => "banner_show",
            Stage::BannerHide => "banner_hide",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_serialization() {
        let stage = Stage::ReelStop {
            reel_index: 2,
            symbol: 9,
            forced: true,
        };
        let json = serde_json::to_string(&stage).unwrap();
        assert!(json.contains("\"type\":\"reel_stop\""));

        let parsed: Stage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, stage);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Stage::SpinStart.type_name(), "spin_start");
        assert_eq!(Stage::BannerHide.type_name(), "banner_hide");
        assert_eq!(
            Stage::OutcomeReveal {
                kind: OutcomeKind::Win,
                loss_variant: None
            }
            .type_name(),
            "outcome_reveal"
        );
    }
}
