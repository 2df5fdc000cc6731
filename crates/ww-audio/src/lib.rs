//! Wild West Slots audio dispatch
//!
//! Sound playback never runs on the thread driving the reels:
//!
//! ```text
//! ┌──────────────────┐   AudioCommand   ┌──────────────────┐
//! │ SpinSession      │ ───────────────▶ │ audio worker     │
//! │ dispatcher.play()│  (one-way queue) │ SoundSink::play()│
//! └──────────────────┘                  └──────────────────┘
//! ```
//!
//! `play` is fire-and-forget: no reply, and sink failures are only logged.

pub mod bank;
pub mod dispatcher;
pub mod sink;

pub use bank::{SoundBank, SoundId};
pub use dispatcher::{AudioCommand, AudioDispatcher};
pub use sink::{LogSink, RecordingSink, SoundSink};
