//! StageTrace — the full stage timeline of one spin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ww_core::{REEL_COUNT, SymbolId};

use crate::event::StageEvent;
use crate::stage::Stage;
use crate::taxonomy::OutcomeKind;

/// A complete trace of stage events for one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTrace {
    /// Unique identifier for this trace
    pub trace_id: String,

    /// Spin number within the process lifetime (1-based)
    pub spin_number: u64,

    /// All events in chronological order
    pub events: Vec<StageEvent>,

    /// When this trace was recorded
    pub recorded_at: DateTime<Utc>,

    /// Custom metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl StageTrace {
    pub fn new(spin_number: u64) -> Self {
        Self {
            trace_id: format!("spin-{:06}", spin_number),
            spin_number,
            events: Vec::new(),
            recorded_at: Utc::now(),
            metadata: serde_json::Map::new(),
        }
    }

    /// Add an event to the trace
    pub fn push(&mut self, event: StageEvent) {
        self.events.push(event);
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Total duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        match (self.events.first(), self.events.last()) {
            (Some(first), Some(last)) => last.timestamp_ms.saturating_sub(first.timestamp_ms),
            _ => 0,
        }
    }

    pub fn events_by_type(&self, type_name: &str) -> Vec<&StageEvent> {
        self.events
            .iter()
            .filter(|e| e.stage.type_name() == type_name)
            .collect()
    }

    pub fn has_stage(&self, type_name: &str) -> bool {
        self.events.iter().any(|e| e.stage.type_name() == type_name)
    }

    pub fn reel_stops(&self) -> Vec<&StageEvent> {
        self.events_by_type("reel_stop")
    }

    /// Final symbols in reel stop order
    pub fn final_symbols(&self) -> Vec<SymbolId> {
        self.events
            .iter()
            .filter_map(|e| match &e.stage {
                Stage::ReelStop { symbol, .. } => Some(*symbol),
                _ => None,
            })
            .collect()
    }

    /// Outcome revealed in this spin, if it got that far
    pub fn outcome(&self) -> Option<OutcomeKind> {
        self.events.iter().find_map(|e| match &e.stage {
            Stage::OutcomeReveal { kind, .. } => Some(*kind),
            _ => None,
        })
    }

    /// Validate ordering of the recorded stages
    pub fn validate(&self) -> TraceValidation {
        let reel_order: Vec<u8> = self
            .events
            .iter()
            .filter_map(|e| match &e.stage {
                Stage::ReelStop { reel_index, .. } => Some(*reel_index),
                _ => None,
            })
            .collect();

        let position = |name: &str| self.events.iter().position(|e| e.type_name() == name);
        let banner_ordered = match (position("banner_show"), position("banner_hide")) {
            (Some(show), Some(hide)) => show < hide,
            _ => false,
        };

        TraceValidation {
            starts_with_spin_start: self
                .events
                .first()
                .is_some_and(|e| matches!(e.stage, Stage::SpinStart)),
            ends_with_spin_end: self
                .events
                .last()
                .is_some_and(|e| matches!(e.stage, Stage::SpinEnd)),
            reel_stop_count: reel_order.len() as u8,
            reels_in_order: reel_order.iter().enumerate().all(|(i, r)| *r as usize == i),
            timestamps_monotonic: self
                .events
                .windows(2)
                .all(|w| w[0].timestamp_ms <= w[1].timestamp_ms),
            has_outcome: self.has_stage("evaluate_outcome") && self.has_stage("outcome_reveal"),
            banner_ordered,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Validation result for a trace
#[derive(Debug, Clone, Default)]
pub struct TraceValidation {
    pub starts_with_spin_start: bool,
    pub ends_with_spin_end: bool,
    pub reel_stop_count: u8,
    pub reels_in_order: bool,
    pub timestamps_monotonic: bool,
    pub has_outcome: bool,
    pub banner_ordered: bool,
}

impl TraceValidation {
    /// Check if trace is valid (has all required elements)
    pub fn is_valid(&self) -> bool {
        self.starts_with_spin_start
            && self.ends_with_spin_end
            && self.reel_stop_count as usize == REEL_COUNT
            && self.reels_in_order
            && self.timestamps_monotonic
            && self.has_outcome
            && self.banner_ordered
    }

    /// Get list of warnings
    pub fn warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();

        if !self.starts_with_spin_start {
            warnings.push("Missing SPIN_START event");
        }
        if !self.ends_with_spin_end {
            warnings.push("Missing SPIN_END event");
        }
        if self.reel_stop_count as usize != REEL_COUNT {
            warnings.push("Not all reels have stop events");
        }
        if !self.reels_in_order {
            warnings.push("Reels stopped out of order");
        }
        if !self.timestamps_monotonic {
            warnings.push("Timestamps go backwards");
        }
        if !self.has_outcome {
            warnings.push("Outcome never revealed");
        }
        if !self.banner_ordered {
            warnings.push("Banner not shown and hidden in order");
        }

        warnings
    }
}
