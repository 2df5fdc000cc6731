//! Reel — one animated symbol column

use std::time::Duration;

use rand::Rng;

use ww_core::SymbolId;
use ww_stage::FrameRole;

use crate::probability::{Finalization, ProbabilityModel};
use crate::symbols::SymbolSet;

/// Symbols shown in a reel window for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReelFrame {
    /// Cosmetic preview of the upcoming symbol
    pub top: SymbolId,
    pub current: SymbolId,
    /// Trail of the previous symbol
    pub bottom: SymbolId,
}

impl ReelFrame {
    pub fn symbol(&self, role: FrameRole) -> SymbolId {
        match role {
            FrameRole::TransientTop => self.top,
            FrameRole::Current => self.current,
            FrameRole::TransientBottom => self.bottom,
        }
    }

    /// Rows in render order
    pub fn rows(&self) -> [(FrameRole, SymbolId); 3] {
        FrameRole::ALL.map(|role| (role, self.symbol(role)))
    }
}

/// What a reel did on one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelTick {
    /// Already stopped
    Idle,
    /// Advanced to a new transient symbol
    Spinning(ReelFrame),
    /// Crossed its stop time and finalized
    Stopped {
        frame: ReelFrame,
        finalization: Finalization,
    },
}

/// One reel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reel {
    index: u8,
    current: SymbolId,
    previous: SymbolId,
    stop_time: Duration,
    running: bool,
}

impl Reel {
    /// Create a stopped reel showing symbol 0
    pub fn new(index: u8, stop_time: Duration) -> Self {
        Self {
            index,
            current: 0,
            previous: 0,
            stop_time,
            running: false,
        }
    }

    /// Prepare for a new spin
    pub fn reset(&mut self) {
        self.running = true;
        self.current = 0;
        self.previous = 0;
    }

    /// Advance by one frame at `elapsed` since spin start
    ///
    /// `prior` must hold the final symbols of every earlier reel.
    pub fn tick<R: Rng>(
        &mut self,
        elapsed: Duration,
        prior: &[SymbolId],
        model: &ProbabilityModel,
        symbols: &SymbolSet,
        rng: &mut R,
    ) -> ReelTick {
        if !self.running {
            return ReelTick::Idle;
        }

        if elapsed >= self.stop_time {
            self.running = false;
            let finalization =
                model.finalize(self.index, self.current, prior, symbols.jackpot(), rng);
            // Last transient trails below the final symbol
            self.previous = self.current;
            self.current = finalization.symbol;

            return ReelTick::Stopped {
                frame: self.frame(symbols, rng),
                finalization,
            };
        }

        // The first draw after reset also avoids symbol 0 so frame one moves
        let next = symbols.draw_transient(rng, self.current);
        self.previous = self.current;
        self.current = next;

        ReelTick::Spinning(self.frame(symbols, rng))
    }

    fn frame<R: Rng>(&self, symbols: &SymbolSet, rng: &mut R) -> ReelFrame {
        ReelFrame {
            top: symbols.draw_transient(rng, self.current),
            current: self.current,
            bottom: self.previous,
        }
    }

    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    #[inline]
    pub fn current_symbol(&self) -> SymbolId {
        self.current
    }

    #[inline]
    pub fn previous_symbol(&self) -> SymbolId {
        self.previous
    }

    #[inline]
    pub fn stop_time(&self) -> Duration {
        self.stop_time
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::{FinalizeReason, ProbabilityConfig};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn setup(win_chance: f64, jackpot_chance: f64) -> (ProbabilityModel, SymbolSet, ChaCha8Rng) {
        let model = ProbabilityModel::new(&ProbabilityConfig {
            win_chance,
            jackpot_chance,
        });
        (model, SymbolSet::wild_west(), ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_reset() {
        let mut reel = Reel::new(1, Duration::from_secs(7));
        assert!(!reel.is_running());
        reel.reset();
        assert!(reel.is_running());
        assert_eq!(reel.current_symbol(), 0);
        assert_eq!(reel.previous_symbol(), 0);
    }

    #[test]
    fn test_first_frame_moves_off_zero() {
        let (model, symbols, mut rng) = setup(0.2, 0.001);
        let mut reel = Reel::new(0, Duration::from_secs(5));
        reel.reset();

        match reel.tick(Duration::ZERO, &[], &model, &symbols, &mut rng) {
            ReelTick::Spinning(frame) => {
                assert_ne!(frame.current, 0);
                assert_eq!(frame.bottom, 0);
            }
            other => panic!("expected spinning frame, got {:?}", other),
        }
    }

    #[test]
    fn test_animation_shifts_previous() {
        let (model, symbols, mut rng) = setup(0.2, 0.001);
        let mut reel = Reel::new(0, Duration::from_secs(5));
        reel.reset();

        for step in 0..24u64 {
            let before = reel.current_symbol();
            let tick = reel.tick(
                Duration::from_millis(step * 200),
                &[],
                &model,
                &symbols,
                &mut rng,
            );
            let ReelTick::Spinning(frame) = tick else {
                panic!("reel stopped early at step {}", step);
            };
            assert_eq!(reel.previous_symbol(), before);
            assert_ne!(reel.current_symbol(), before);
            assert!(frame.current < symbols.jackpot());
            assert!(frame.top < symbols.jackpot());
        }
    }

    #[test]
    fn test_stops_exactly_once_at_stop_time() {
        let (model, symbols, mut rng) = setup(0.2, 0.001);
        let mut reel = Reel::new(0, Duration::from_secs(5));
        reel.reset();

        let tick = reel.tick(Duration::from_millis(4999), &[], &model, &symbols, &mut rng);
        assert!(matches!(tick, ReelTick::Spinning(_)));
        let last_transient = reel.current_symbol();

        let tick = reel.tick(Duration::from_secs(5), &[], &model, &symbols, &mut rng);
        let ReelTick::Stopped { frame, finalization } = tick else {
            panic!("expected stop, got {:?}", tick);
        };
        assert!(!reel.is_running());
        assert_eq!(frame.current, finalization.symbol);
        assert_eq!(frame.bottom, last_transient);
        assert_eq!(reel.current_symbol(), finalization.symbol);

        let frozen = reel.clone();
        for later in [6u64, 9, 60] {
            let tick = reel.tick(Duration::from_secs(later), &[], &model, &symbols, &mut rng);
            assert_eq!(tick, ReelTick::Idle);
            assert_eq!(reel, frozen);
        }
    }

    #[test]
    fn test_forced_jackpot_on_stop() {
        let (model, symbols, mut rng) = setup(0.0, 1.0);
        let mut reel = Reel::new(2, Duration::from_secs(9));
        reel.reset();

        let tick = reel.tick(Duration::from_secs(9), &[1, 1], &model, &symbols, &mut rng);
        let ReelTick::Stopped { finalization, .. } = tick else {
            panic!("expected stop");
        };
        assert_eq!(finalization.reason, FinalizeReason::Jackpot);
        assert_eq!(reel.current_symbol(), symbols.jackpot());
    }

    #[test]
    fn test_frame_rows() {
        let frame = ReelFrame {
            top: 1,
            current: 2,
            bottom: 3,
        };
        assert_eq!(
            frame.rows(),
            [
                (FrameRole::TransientTop, 1),
                (FrameRole::Current, 2),
                (FrameRole::TransientBottom, 3),
            ]
        );
    }
}
