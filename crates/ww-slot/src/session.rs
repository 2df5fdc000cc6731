//! Spin session — reel ownership and the timed phases of one spin

use std::time::Duration;

use rand::Rng;

use ww_core::{REEL_COUNT, SymbolId};
use ww_stage::{Stage, StageEvent, StageTrace};

use crate::presenter::Presenter;
use crate::probability::{Finalization, ProbabilityModel};
use crate::reel::{Reel, ReelTick};
use crate::resolver::Resolution;
use crate::symbols::SymbolSet;
use crate::timing::TimingConfig;

/// Externally visible session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Trigger enabled, nothing running
    Idle,
    /// At least one reel still animating
    Spinning,
    /// All reels stopped, waiting before the result
    Settling,
    /// Banner up
    Presenting,
}

impl SessionPhase {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Spinning => "Spinning",
            Self::Settling => "Settling",
            Self::Presenting => "Presenting",
        }
    }
}

/// Phase with its deadline
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PhaseState {
    Idle,
    Spinning { next_frame_at: Duration },
    Settling { until: Duration },
    Presenting { until: Duration, resolution: Resolution },
}

/// State of the spin in progress
///
/// One session lives as long as the machine; each spin resets its reels.
#[derive(Debug, Clone)]
pub struct SpinSession {
    reels: [Reel; REEL_COUNT],
    pub(crate) state: PhaseState,
    start_time: Duration,
    spin_number: u64,
    trace: Option<StageTrace>,
}

impl SpinSession {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            reels: std::array::from_fn(|i| Reel::new(i as u8, timing.reel_stop_time(i))),
            state: PhaseState::Idle,
            start_time: Duration::ZERO,
            spin_number: 0,
            trace: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state {
            PhaseState::Idle => SessionPhase::Idle,
            PhaseState::Spinning { .. } => SessionPhase::Spinning,
            PhaseState::Settling { .. } => SessionPhase::Settling,
            PhaseState::Presenting { .. } => SessionPhase::Presenting,
        }
    }

    /// True from start until the banner is dismissed
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state != PhaseState::Idle
    }

    pub fn reels(&self) -> &[Reel; REEL_COUNT] {
        &self.reels
    }

    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    pub fn spin_number(&self) -> u64 {
        self.spin_number
    }

    #[inline]
    pub fn elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.start_time)
    }

    pub fn all_stopped(&self) -> bool {
        self.reels.iter().all(|r| !r.is_running())
    }

    /// Symbols currently on the payline
    pub fn symbols(&self) -> [SymbolId; REEL_COUNT] {
        self.reels.each_ref().map(Reel::current_symbol)
    }

    /// When the session next needs a tick; `None` while idle
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            PhaseState::Idle => None,
            PhaseState::Spinning { next_frame_at } => Some(next_frame_at),
            PhaseState::Settling { until } | PhaseState::Presenting { until, .. } => Some(until),
        }
    }

    /// Reset every reel and enter Spinning with a frame due at `now`
    pub(crate) fn begin(&mut self, now: Duration, spin_number: u64, record_trace: bool) {
        for reel in &mut self.reels {
            reel.reset();
        }
        self.start_time = now;
        self.spin_number = spin_number;
        self.state = PhaseState::Spinning { next_frame_at: now };
        self.trace = record_trace.then(|| StageTrace::new(spin_number));
    }

    /// Tick every running reel in index order
    ///
    /// Returns the reels that finalized on this frame.
    pub(crate) fn run_frame<R: Rng, P: Presenter + ?Sized>(
        &mut self,
        elapsed: Duration,
        model: &ProbabilityModel,
        symbols: &SymbolSet,
        rng: &mut R,
        presenter: &mut P,
    ) -> Vec<(u8, Finalization)> {
        let mut stopped = Vec::new();

        for i in 0..REEL_COUNT {
            // Earlier reels stop first, so these are already final
            let prior = self.symbols();
            let reel = &mut self.reels[i];

            match reel.tick(elapsed, &prior[..i], model, symbols, rng) {
                ReelTick::Idle => {}
                ReelTick::Spinning(frame) => {
                    log::trace!("Reel {} → {}", i, frame.current);
                    presenter.render_frame(i as u8, &frame);
                }
                ReelTick::Stopped {
                    frame,
                    finalization,
                } => {
                    presenter.render_frame(i as u8, &frame);
                    stopped.push((i as u8, finalization));
                }
            }
        }

        stopped
    }

    /// Record a stage at `now`, if tracing
    pub(crate) fn record(&mut self, stage: Stage, now: Duration) {
        let at = self.elapsed(now).as_millis() as u64;
        if let Some(trace) = &mut self.trace {
            trace.push(StageEvent::new(stage, at));
        }
    }

    pub(crate) fn take_trace(&mut self) -> Option<StageTrace> {
        self.trace.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::NullPresenter;
    use crate::probability::ProbabilityConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_new_session_idle() {
        let session = SpinSession::new(&TimingConfig::normal());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.is_active());
        assert_eq!(session.next_deadline(), None);
        assert_eq!(session.reels()[2].stop_time(), Duration::from_secs(9));
    }

    #[test]
    fn test_begin_resets_reels() {
        let mut session = SpinSession::new(&TimingConfig::normal());
        session.begin(Duration::from_secs(3), 1, true);

        assert_eq!(session.phase(), SessionPhase::Spinning);
        assert_eq!(session.next_deadline(), Some(Duration::from_secs(3)));
        assert!(session.reels().iter().all(Reel::is_running));
        assert_eq!(session.symbols(), [0, 0, 0]);
        assert_eq!(session.elapsed(Duration::from_secs(8)), Duration::from_secs(5));
    }

    #[test]
    fn test_frames_stop_reels_in_order() {
        let timing = TimingConfig::normal();
        let model = ProbabilityModel::new(&ProbabilityConfig::default());
        let symbols = SymbolSet::wild_west();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut presenter = NullPresenter;

        let mut session = SpinSession::new(&timing);
        session.begin(Duration::ZERO, 1, false);

        let mut stop_order = Vec::new();
        let mut ms = 0;
        while !session.all_stopped() {
            let stopped = session.run_frame(
                Duration::from_millis(ms),
                &model,
                &symbols,
                &mut rng,
                &mut presenter,
            );
            for (reel, _) in stopped {
                stop_order.push((reel, ms));
            }
            ms += timing.tick_interval_ms;
        }

        assert_eq!(stop_order, vec![(0, 5000), (1, 7000), (2, 9000)]);
    }
}
