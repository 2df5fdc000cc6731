//! Session statistics

use serde::{Deserialize, Serialize};

use ww_stage::OutcomeKind;

use crate::probability::FinalizeReason;

/// Counters over the machine's lifetime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_spins: u64,
    pub wins: u64,
    pub jackpots: u64,
    pub losses: u64,
    /// Reels forced to the jackpot symbol
    pub jackpot_forces: u64,
    /// Reels that copied reel 0
    pub match_couplings: u64,
}

impl SessionStats {
    pub fn record_outcome(&mut self, kind: OutcomeKind) {
        self.total_spins += 1;
        match kind {
            OutcomeKind::Win => self.wins += 1,
            OutcomeKind::Jackpot => self.jackpots += 1,
            OutcomeKind::Loss => self.losses += 1,
        }
    }

    pub fn record_finalization(&mut self, reason: FinalizeReason) {
        match reason {
            FinalizeReason::Jackpot => self.jackpot_forces += 1,
            FinalizeReason::Matched => self.match_couplings += 1,
            FinalizeReason::Natural => {}
        }
    }

    /// Counters accumulated since `earlier` was taken
    pub fn delta_since(&self, earlier: &SessionStats) -> SessionStats {
        SessionStats {
            total_spins: self.total_spins.saturating_sub(earlier.total_spins),
            wins: self.wins.saturating_sub(earlier.wins),
            jackpots: self.jackpots.saturating_sub(earlier.jackpots),
            losses: self.losses.saturating_sub(earlier.losses),
            jackpot_forces: self.jackpot_forces.saturating_sub(earlier.jackpot_forces),
            match_couplings: self.match_couplings.saturating_sub(earlier.match_couplings),
        }
    }

    fn rate(&self, count: u64) -> f64 {
        if self.total_spins > 0 {
            count as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }

    /// Fraction of spins ending in a (non-jackpot) win
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn jackpot_rate(&self) -> f64 {
        self.rate(self.jackpots)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Hit rate in percent (wins + jackpots)
    pub fn hit_rate(&self) -> f64 {
        self.rate(self.wins + self.jackpots) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::default();
        assert_eq!(stats.win_rate(), 0.0);
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_rates() {
        let mut stats = SessionStats::default();
        stats.record_outcome(OutcomeKind::Win);
        stats.record_outcome(OutcomeKind::Jackpot);
        stats.record_outcome(OutcomeKind::Loss);
        stats.record_outcome(OutcomeKind::Loss);

        assert_eq!(stats.total_spins, 4);
        assert_eq!(stats.win_rate(), 0.25);
        assert_eq!(stats.jackpot_rate(), 0.25);
        assert_eq!(stats.loss_rate(), 0.5);
        assert_eq!(stats.hit_rate(), 50.0);
    }

    #[test]
    fn test_finalization_counters() {
        let mut stats = SessionStats::default();
        stats.record_finalization(FinalizeReason::Jackpot);
        stats.record_finalization(FinalizeReason::Matched);
        stats.record_finalization(FinalizeReason::Matched);
        stats.record_finalization(FinalizeReason::Natural);
        assert_eq!(stats.jackpot_forces, 1);
        assert_eq!(stats.match_couplings, 2);
    }

    #[test]
    fn test_delta_since() {
        let mut stats = SessionStats::default();
        stats.record_outcome(OutcomeKind::Win);
        let snapshot = stats.clone();
        stats.record_outcome(OutcomeKind::Loss);
        stats.record_outcome(OutcomeKind::Loss);

        let delta = stats.delta_since(&snapshot);
        assert_eq!(delta.total_spins, 2);
        assert_eq!(delta.wins, 0);
        assert_eq!(delta.losses, 2);
    }
}
