//! # ww-stage — Spin lifecycle stages
//!
//! Every spin passes through the same semantic phases:
//! - Spin starts → Reels stop one by one → Outcome evaluated → Banner shown
//!
//! This crate names those phases and records them as a [`StageTrace`]
//! so a spin can be inspected, validated, or exported after the fact.

pub mod event;
pub mod stage;
pub mod taxonomy;
pub mod trace;

pub use event::*;
pub use stage::*;
pub use taxonomy::*;
pub use trace::*;
