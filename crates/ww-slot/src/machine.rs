//! Slot machine — process-wide context driving the spin state machine
//!
//! ```text
//!   start()            all reels stopped      settle elapsed       banner elapsed
//! Idle ──────▶ Spinning ──────────────▶ Settling ──────────▶ Presenting ──────────▶ Idle
//!               │  ▲ frame every tick_interval
//!               └──┘
//! ```
//!
//! Every transition happens inside [`SlotMachine::tick`]; nothing blocks.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use ww_audio::AudioDispatcher;
use ww_core::{ManualClock, REEL_COUNT, SymbolId, WwError, WwResult};
use ww_stage::{OutcomeKind, Stage, StageTrace};

use crate::config::SlotConfig;
use crate::presenter::Presenter;
use crate::probability::ProbabilityModel;
use crate::reel::Reel;
use crate::resolver::{OutcomeResolver, Resolution};
use crate::session::{PhaseState, SessionPhase, SpinSession};
use crate::stats::SessionStats;

/// Summary of a completed spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpinRecord {
    pub spin_number: u64,
    pub symbols: [SymbolId; REEL_COUNT],
    pub outcome: OutcomeKind,
    pub loss_variant: Option<usize>,
}

/// The machine
pub struct SlotMachine<P: Presenter> {
    config: SlotConfig,
    model: ProbabilityModel,
    /// Owns the loss rotation, which outlives individual spins
    resolver: OutcomeResolver,
    rng: ChaCha8Rng,
    audio: AudioDispatcher,
    presenter: P,
    session: SpinSession,
    stats: SessionStats,
    spin_count: u64,
    record_traces: bool,
    traces: Vec<StageTrace>,
    last_record: Option<SpinRecord>,
}

impl<P: Presenter> SlotMachine<P> {
    /// Validate `config` and build an idle machine
    pub fn new(config: SlotConfig, presenter: P, audio: AudioDispatcher) -> WwResult<Self> {
        config.validate()?;

        let model = ProbabilityModel::new(&config.probability);
        let resolver = OutcomeResolver::new(config.sounds.loss.len())?;
        let session = SpinSession::new(&config.timing);

        log::info!(
            "Slot machine ready: {} symbols, win {:.3}, jackpot {:.4}, timing {}",
            config.symbols.len(),
            config.probability.win_chance,
            config.probability.jackpot_chance,
            config.timing.profile.display_name()
        );

        let mut machine = Self {
            config,
            model,
            resolver,
            rng: ChaCha8Rng::from_os_rng(),
            audio,
            presenter,
            session,
            stats: SessionStats::default(),
            spin_count: 0,
            record_traces: true,
            traces: Vec::new(),
            last_record: None,
        };
        machine.presenter.set_trigger_enabled(true);
        Ok(machine)
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed(seed);
        self
    }

    /// Keep a [`StageTrace`] per spin (on by default)
    ///
    /// Traces accumulate until [`Self::take_traces`]; hosts that never
    /// drain them should turn recording off.
    pub fn set_trace_recording(&mut self, enabled: bool) {
        self.record_traces = enabled;
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // SPIN LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════════

    /// Start a spin at `now`
    ///
    /// Rejected with [`WwError::AlreadyRunning`] while a spin is active;
    /// the running spin is left untouched.
    pub fn start(&mut self, now: Duration) -> WwResult<u64> {
        if self.session.is_active() {
            log::warn!(
                "Start rejected: spin {} is {}",
                self.session.spin_number(),
                self.session.phase().display_name()
            );
            return Err(WwError::AlreadyRunning);
        }

        self.spin_count += 1;
        let spin_number = self.spin_count;
        self.last_record = None;

        self.session.begin(now, spin_number, self.record_traces);
        self.presenter.set_trigger_enabled(false);
        self.session.record(Stage::SpinStart, now);

        self.audio.play(&self.config.sounds.spinning);
        self.session.record(Stage::ReelSpinLoop, now);

        log::info!("Spin {} started", spin_number);

        // First frame renders immediately
        self.spin_frame(now);
        Ok(spin_number)
    }

    /// Advance the state machine to `now`
    ///
    /// At most one transition per call; call again at [`Self::next_deadline`].
    pub fn tick(&mut self, now: Duration) -> SessionPhase {
        match self.session.state {
            PhaseState::Idle => {}
            PhaseState::Spinning { next_frame_at } => {
                if now >= next_frame_at {
                    self.spin_frame(now);
                }
            }
            PhaseState::Settling { until } => {
                if now >= until {
                    self.present(now);
                }
            }
            PhaseState::Presenting { until, resolution } => {
                if now >= until {
                    self.finish(now, resolution);
                }
            }
        }
        self.session.phase()
    }

    /// Drive the active spin to completion on a virtual clock
    ///
    /// Returns `None` when no spin is active.
    pub fn finish_spin(&mut self, clock: &ManualClock) -> Option<SpinRecord> {
        if !self.session.is_active() {
            return None;
        }
        while let Some(deadline) = self.next_deadline() {
            let now = clock.set(deadline);
            self.tick(now);
        }
        self.last_record
    }

    fn spin_frame(&mut self, now: Duration) {
        let elapsed = self.session.elapsed(now);
        let stopped = self.session.run_frame(
            elapsed,
            &self.model,
            &self.config.symbols,
            &mut self.rng,
            &mut self.presenter,
        );

        for (reel_index, finalization) in stopped {
            self.stats.record_finalization(finalization.reason);
            self.session.record(
                Stage::ReelStop {
                    reel_index,
                    symbol: finalization.symbol,
                    forced: finalization.is_forced(),
                },
                now,
            );
            log::debug!(
                "Reel {} stopped on {} ({:?}) at {} ms",
                reel_index,
                self.config.symbols.name(finalization.symbol).unwrap_or("?"),
                finalization.reason,
                elapsed.as_millis()
            );
        }

        if self.session.all_stopped() {
            self.session.state = PhaseState::Settling {
                until: now + self.config.timing.settle_delay(),
            };
            self.session.record(Stage::Settle, now);
            log::debug!("Spin {} settling", self.session.spin_number());
        } else {
            self.session.state = PhaseState::Spinning {
                next_frame_at: now + self.config.timing.tick_interval(),
            };
        }
    }

    fn present(&mut self, now: Duration) {
        let symbols = self.session.symbols();
        self.session.record(
            Stage::EvaluateOutcome {
                symbols: symbols.to_vec(),
            },
            now,
        );

        let resolution = self.resolver.resolve(symbols, self.config.symbols.jackpot());
        self.stats.record_outcome(resolution.kind);

        match resolution.sound(&self.config.sounds) {
            Ok(sound) => self.audio.play(sound),
            Err(e) => log::error!("No sound for {:?}: {}", resolution.kind, e),
        }
        self.session.record(
            Stage::OutcomeReveal {
                kind: resolution.kind,
                loss_variant: resolution.loss_variant,
            },
            now,
        );

        let duration = self.config.timing.banner_duration();
        self.presenter.show_banner(resolution.kind, duration);
        self.session.record(
            Stage::BannerShow {
                kind: resolution.kind,
                duration_ms: self.config.timing.banner_duration_ms,
            },
            now,
        );

        log::info!(
            "Spin {}: {} {:?}",
            self.session.spin_number(),
            resolution.kind.display_name(),
            symbols
        );

        self.session.state = PhaseState::Presenting {
            until: now + duration,
            resolution,
        };
    }

    fn finish(&mut self, now: Duration, resolution: Resolution) {
        self.presenter.hide_banner();
        self.session.record(Stage::BannerHide, now);
        self.session.record(Stage::SpinEnd, now);

        if let Some(trace) = self.session.take_trace() {
            let profile = self.config.timing.profile.display_name();
            self.traces
                .push(trace.with_metadata("timing_profile", serde_json::json!(profile)));
        }
        self.last_record = Some(SpinRecord {
            spin_number: self.session.spin_number(),
            symbols: resolution.symbols,
            outcome: resolution.kind,
            loss_variant: resolution.loss_variant,
        });

        self.session.state = PhaseState::Idle;
        self.presenter.set_trigger_enabled(true);
        log::debug!("Spin {} complete", self.session.spin_number());
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    /// Start is only accepted while idle
    pub fn is_trigger_enabled(&self) -> bool {
        !self.session.is_active()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.session.next_deadline()
    }

    pub fn reels(&self) -> &[Reel; REEL_COUNT] {
        self.session.reels()
    }

    pub fn session(&self) -> &SpinSession {
        &self.session
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn model(&self) -> &ProbabilityModel {
        &self.model
    }

    pub fn resolver(&self) -> &OutcomeResolver {
        &self.resolver
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }

    pub fn last_record(&self) -> Option<SpinRecord> {
        self.last_record
    }

    /// Drain the traces of completed spins
    pub fn take_traces(&mut self) -> Vec<StageTrace> {
        std::mem::take(&mut self.traces)
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn audio(&self) -> &AudioDispatcher {
        &self.audio
    }
}
