//! StageEvent — a stage occurrence with its timestamp

use serde::{Deserialize, Serialize};

use crate::stage::Stage;

/// A stage with its timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEvent {
    /// The canonical stage
    pub stage: Stage,

    /// Milliseconds since spin start
    pub timestamp_ms: u64,
}

impl StageEvent {
    pub fn new(stage: Stage, timestamp_ms: u64) -> Self {
        Self {
            stage,
            timestamp_ms,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.stage.type_name()
    }
}
