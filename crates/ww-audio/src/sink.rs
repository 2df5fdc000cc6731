//! Sound sinks — where the audio worker hands sounds off

use std::sync::Arc;

use parking_lot::Mutex;

use ww_core::WwResult;

use crate::bank::SoundId;

/// Backend that actually plays a sound
///
/// Runs on the audio worker thread; it may block.
pub trait SoundSink: Send + 'static {
    fn play(&mut self, sound: &SoundId) -> WwResult<()>;
}

/// Logs every sound instead of playing it
#[derive(Debug, Default)]
pub struct LogSink;

impl SoundSink for LogSink {
    fn play(&mut self, sound: &SoundId) -> WwResult<()> {
        log::info!("♪ {}", sound);
        Ok(())
    }
}

/// Records played sounds; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    played: Arc<Mutex<Vec<SoundId>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything played so far
    pub fn played(&self) -> Vec<SoundId> {
        self.played.lock().clone()
    }
}

impl SoundSink for RecordingSink {
    fn play(&mut self, sound: &SoundId) -> WwResult<()> {
        self.played.lock().push(sound.clone());
        Ok(())
    }
}
