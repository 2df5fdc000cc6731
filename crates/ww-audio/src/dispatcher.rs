//! Audio dispatcher — one-way command queue to the audio worker

use std::thread::JoinHandle;

use crossbeam_channel::{Sender, bounded, unbounded};

use ww_core::{WwError, WwResult};

use crate::bank::SoundId;
use crate::sink::SoundSink;

/// Commands accepted by the audio worker
#[derive(Debug)]
pub enum AudioCommand {
    Play(SoundId),
    /// Reply once every earlier command has been handled
    Flush(Sender<()>),
    Shutdown,
}

/// Handle for triggering sounds
///
/// Dropping the dispatcher shuts the worker down and joins it.
pub struct AudioDispatcher {
    tx: Option<Sender<AudioCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl AudioDispatcher {
    /// Spawn a worker thread owning `sink`
    pub fn spawn<S: SoundSink>(mut sink: S) -> WwResult<Self> {
        let (tx, rx) = unbounded::<AudioCommand>();

        let worker = std::thread::Builder::new()
            .name("ww-audio".into())
            .spawn(move || {
                for command in rx {
                    match command {
                        AudioCommand::Play(sound) => {
                            if let Err(e) = sink.play(&sound) {
                                log::warn!("Sound '{}' failed: {}", sound, e);
                            }
                        }
                        AudioCommand::Flush(reply) => {
                            let _ = reply.send(());
                        }
                        AudioCommand::Shutdown => break,
                    }
                }
                log::debug!("Audio worker stopped");
            })?;

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Dispatcher with no worker; every sound is dropped
    pub fn muted() -> Self {
        Self {
            tx: None,
            worker: None,
        }
    }

    pub fn is_muted(&self) -> bool {
        self.tx.is_none()
    }

    /// Trigger a sound; never blocks, never reports failure
    pub fn play(&self, sound: &SoundId) {
        let Some(tx) = &self.tx else {
            log::trace!("Muted: {}", sound);
            return;
        };
        if tx.send(AudioCommand::Play(sound.clone())).is_err() {
            log::warn!("Audio worker gone, dropping '{}'", sound);
        }
    }

    /// Block until the worker has handled every sound sent so far
    pub fn flush(&self) -> WwResult<()> {
        let Some(tx) = &self.tx else {
            return Ok(());
        };
        let (reply_tx, reply_rx) = bounded(1);
        tx.send(AudioCommand::Flush(reply_tx))
            .map_err(|_| WwError::AudioUnavailable)?;
        reply_rx.recv().map_err(|_| WwError::AudioUnavailable)
    }

    /// Stop the worker after it drains the queue
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(AudioCommand::Shutdown);
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("Audio worker panicked");
            }
        }
    }
}

impl Drop for AudioDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AudioDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDispatcher")
            .field("muted", &self.is_muted())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;

    struct FailingSink;

    impl SoundSink for FailingSink {
        fn play(&mut self, sound: &SoundId) -> WwResult<()> {
            Err(WwError::AssetMissing(sound.to_string()))
        }
    }

    #[test]
    fn test_sounds_reach_sink_in_order() {
        let sink = RecordingSink::new();
        let dispatcher = AudioDispatcher::spawn(sink.clone()).unwrap();

        dispatcher.play(&"spinning".into());
        dispatcher.play(&"rot_loss".into());
        dispatcher.flush().unwrap();

        assert_eq!(
            sink.played(),
            vec![SoundId::new("spinning"), SoundId::new("rot_loss")]
        );
    }

    #[test]
    fn test_sink_failure_not_surfaced() {
        let dispatcher = AudioDispatcher::spawn(FailingSink).unwrap();
        dispatcher.play(&"missing".into());
        assert!(dispatcher.flush().is_ok());
    }

    #[test]
    fn test_muted_dispatcher_drops_sounds() {
        let dispatcher = AudioDispatcher::muted();
        assert!(dispatcher.is_muted());
        dispatcher.play(&"jackpot".into());
        assert!(dispatcher.flush().is_ok());
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let sink = RecordingSink::new();
        let mut dispatcher = AudioDispatcher::spawn(sink.clone()).unwrap();
        for _ in 0..10 {
            dispatcher.play(&"spinning".into());
        }
        dispatcher.shutdown();
        assert_eq!(sink.played().len(), 10);

        // Play after shutdown is dropped quietly
        dispatcher.play(&"spinning".into());
        assert_eq!(sink.played().len(), 10);
    }
}
