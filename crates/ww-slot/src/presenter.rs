//! Presentation seam — what the machine asks of the window

use std::time::Duration;

use ww_core::SymbolId;
use ww_stage::{FrameRole, OutcomeKind};

use crate::reel::ReelFrame;

/// Rendering surface owned by the host
pub trait Presenter {
    /// Show `symbol` in one row of the reel at `position`
    fn render_reel(&mut self, position: u8, symbol: SymbolId, role: FrameRole);

    /// Put the full-screen banner up; the machine hides it after `duration`
    fn show_banner(&mut self, kind: OutcomeKind, duration: Duration);

    fn hide_banner(&mut self);

    /// Enable or disable the start control
    fn set_trigger_enabled(&mut self, _enabled: bool) {}

    /// Render every row of a reel frame
    fn render_frame(&mut self, position: u8, frame: &ReelFrame) {
        for (role, symbol) in frame.rows() {
            self.render_reel(position, symbol, role);
        }
    }
}

/// Presenter that draws nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn render_reel(&mut self, _position: u8, _symbol: SymbolId, _role: FrameRole) {}
    fn show_banner(&mut self, _kind: OutcomeKind, _duration: Duration) {}
    fn hide_banner(&mut self) {}
}

/// A call received by [`RecordingPresenter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCall {
    Render {
        position: u8,
        symbol: SymbolId,
        role: FrameRole,
    },
    ShowBanner {
        kind: OutcomeKind,
        duration: Duration,
    },
    HideBanner,
    Trigger(bool),
}

/// Presenter that records every call
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub calls: Vec<PresenterCall>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Symbols rendered on the payline row of `position`, in order
    pub fn current_symbols(&self, position: u8) -> Vec<SymbolId> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                PresenterCall::Render {
                    position: p,
                    symbol,
                    role: FrameRole::Current,
                } if p == position => Some(symbol),
                _ => None,
            })
            .collect()
    }

    pub fn banners(&self) -> Vec<(OutcomeKind, Duration)> {
        self.calls
            .iter()
            .filter_map(|call| match *call {
                PresenterCall::ShowBanner { kind, duration } => Some((kind, duration)),
                _ => None,
            })
            .collect()
    }

    /// Last trigger state pushed, if any
    pub fn trigger_enabled(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|call| match *call {
            PresenterCall::Trigger(enabled) => Some(enabled),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render_reel(&mut self, position: u8, symbol: SymbolId, role: FrameRole) {
        self.calls.push(PresenterCall::Render {
            position,
            symbol,
            role,
        });
    }

    fn show_banner(&mut self, kind: OutcomeKind, duration: Duration) {
        self.calls.push(PresenterCall::ShowBanner { kind, duration });
    }

    fn hide_banner(&mut self) {
        self.calls.push(PresenterCall::HideBanner);
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        self.calls.push(PresenterCall::Trigger(enabled));
    }
}
