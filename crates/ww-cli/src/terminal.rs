//! Terminal presenter — one payline redrawn in place

use std::io::{self, Write};
use std::time::Duration;

use ww_core::{REEL_COUNT, SymbolId};
use ww_slot::{Presenter, SymbolSet};
use ww_stage::{FrameRole, OutcomeKind};

pub struct TerminalPresenter {
    symbols: SymbolSet,
    payline: [SymbolId; REEL_COUNT],
}

impl TerminalPresenter {
    pub fn new(symbols: SymbolSet) -> Self {
        Self {
            symbols,
            payline: [0; REEL_COUNT],
        }
    }

    fn redraw(&self) {
        let names: Vec<&str> = self
            .payline
            .iter()
            .map(|&s| self.symbols.name(s).unwrap_or("?"))
            .collect();
        let mut out = io::stdout().lock();
        // Terminal output is best effort
        let _ = write!(
            out,
            "\r  [ {:^13} | {:^13} | {:^13} ]",
            names[0], names[1], names[2]
        );
        let _ = out.flush();
    }
}

impl Presenter for TerminalPresenter {
    fn render_reel(&mut self, position: u8, symbol: SymbolId, role: FrameRole) {
        if role != FrameRole::Current {
            return;
        }
        if let Some(slot) = self.payline.get_mut(position as usize) {
            *slot = symbol;
            self.redraw();
        }
    }

    fn show_banner(&mut self, kind: OutcomeKind, duration: Duration) {
        let text = match kind {
            OutcomeKind::Jackpot => "*** JACKPOT ***",
            OutcomeKind::Win => "*** WINNER ***",
            OutcomeKind::Loss => "no luck, partner",
        };
        println!();
        println!("  {}  ({:.1}s)", text, duration.as_secs_f64());
    }

    fn hide_banner(&mut self) {
        println!();
    }

    fn set_trigger_enabled(&mut self, enabled: bool) {
        log::debug!("Trigger {}", if enabled { "enabled" } else { "disabled" });
    }
}
