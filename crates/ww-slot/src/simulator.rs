//! Batch simulator — many spins on a virtual clock
//!
//! Runs the real state machine (frames, settle, banner) with a
//! [`ManualClock`] so thousands of spins finish in well under a second of
//! wall time.

use serde::Serialize;

use ww_audio::AudioDispatcher;
use ww_core::{Clock, ManualClock, WwError, WwResult};

use crate::config::SlotConfig;
use crate::machine::SlotMachine;
use crate::presenter::NullPresenter;
use crate::probability::ExpectedRates;
use crate::stats::SessionStats;

/// Headless machine plus the clock that drives it
pub struct Simulator {
    machine: SlotMachine<NullPresenter>,
    clock: ManualClock,
}

impl Simulator {
    /// Muted, untraced machine seeded from the OS
    pub fn new(config: SlotConfig) -> WwResult<Self> {
        let mut machine = SlotMachine::new(config, NullPresenter, AudioDispatcher::muted())?;
        machine.set_trace_recording(false);
        Ok(Self {
            machine,
            clock: ManualClock::new(),
        })
    }

    pub fn seeded(config: SlotConfig, seed: u64) -> WwResult<Self> {
        let mut sim = Self::new(config)?;
        sim.machine.seed(seed);
        Ok(sim)
    }

    /// Run `spins` complete spins back to back
    pub fn run(&mut self, spins: u64) -> WwResult<SimulationReport> {
        let before = self.machine.stats().clone();

        for _ in 0..spins {
            self.machine.start(self.clock.now())?;
            if self.machine.finish_spin(&self.clock).is_none() {
                return Err(WwError::InvalidConfig("spin did not complete".into()));
            }
        }

        let stats = self.machine.stats().delta_since(&before);
        log::info!(
            "Simulated {} spins: win {:.4}, jackpot {:.4}",
            spins,
            stats.win_rate(),
            stats.jackpot_rate()
        );

        let expected = self
            .machine
            .model()
            .expected_rates(self.machine.config().symbols.len());
        Ok(SimulationReport::new(stats, expected))
    }

    /// Virtual time consumed so far
    pub fn elapsed(&self) -> std::time::Duration {
        self.clock.now()
    }

    pub fn machine(&self) -> &SlotMachine<NullPresenter> {
        &self.machine
    }
}

/// Observed against analytic outcome rates
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub spins: u64,
    pub stats: SessionStats,
    pub expected: ExpectedRates,
    pub observed_win_rate: f64,
    pub observed_jackpot_rate: f64,
}

impl SimulationReport {
    pub fn new(stats: SessionStats, expected: ExpectedRates) -> Self {
        Self {
            spins: stats.total_spins,
            observed_win_rate: stats.win_rate(),
            observed_jackpot_rate: stats.jackpot_rate(),
            stats,
            expected,
        }
    }

    /// Standard deviation of an observed rate with probability `p`
    fn sigma(&self, p: f64) -> f64 {
        if self.spins == 0 {
            return 0.0;
        }
        (p * (1.0 - p) / self.spins as f64).sqrt()
    }

    fn z(&self, observed: f64, expected: f64) -> f64 {
        let sigma = self.sigma(expected);
        if sigma == 0.0 {
            return 0.0;
        }
        (observed - expected) / sigma
    }

    pub fn win_z_score(&self) -> f64 {
        self.z(self.observed_win_rate, self.expected.win)
    }

    pub fn jackpot_z_score(&self) -> f64 {
        self.z(self.observed_jackpot_rate, self.expected.jackpot)
    }

    /// Both rates within `k` standard deviations of expectation
    pub fn within_sigma(&self, k: f64) -> bool {
        self.win_z_score().abs() <= k && self.jackpot_z_score().abs() <= k
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::TimingProfile;

    #[test]
    fn test_simulator_counts_spins() {
        let mut sim = Simulator::seeded(SlotConfig::default(), 7).unwrap();
        let report = sim.run(50).unwrap();

        assert_eq!(report.spins, 50);
        assert_eq!(
            report.stats.wins + report.stats.jackpots + report.stats.losses,
            50
        );
        assert_eq!(sim.machine().spin_count(), 50);
    }

    #[test]
    fn test_simulator_advances_virtual_time() {
        let config = SlotConfig::default().with_timing(TimingProfile::Turbo);
        let per_spin = config.timing.min_spin_duration();
        let mut sim = Simulator::seeded(config, 7).unwrap();
        sim.run(10).unwrap();

        assert_eq!(sim.elapsed(), per_spin * 10);
    }

    #[test]
    fn test_same_seed_same_report() {
        let a = Simulator::seeded(SlotConfig::default(), 99)
            .unwrap()
            .run(500)
            .unwrap();
        let b = Simulator::seeded(SlotConfig::default(), 99)
            .unwrap()
            .run(500)
            .unwrap();
        assert_eq!(a.stats, b.stats);
    }

    #[test]
    fn test_consecutive_runs_report_own_spins() {
        let mut sim = Simulator::seeded(SlotConfig::default(), 3).unwrap();
        sim.run(20).unwrap();
        let second = sim.run(30).unwrap();
        assert_eq!(second.spins, 30);
        assert_eq!(sim.machine().stats().total_spins, 50);
    }

    #[test]
    fn test_report_serializes() {
        let report = Simulator::seeded(SlotConfig::default(), 1)
            .unwrap()
            .run(10)
            .unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("observed_win_rate"));
        assert!(json.contains("expected"));
    }
}
