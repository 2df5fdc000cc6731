//! # ww-slot — Wild West Slots reel engine
//!
//! Three reels animate independently, stop on a staggered schedule and
//! resolve into a win, jackpot or loss.
//!
//! ## Architecture
//!
//! ```text
//! SlotMachine (process-wide: config, rng, loss rotation, stats)
//!     │
//!     ├── SpinSession  Idle → Spinning → Settling → Presenting → Idle
//!     │       └── Reel ×3 ── ProbabilityModel (finalize at stop time)
//!     │
//!     ├── OutcomeResolver (jackpot / win / loss + loss sound rotation)
//!     ├── Presenter       (render reels, show banner)
//!     └── AudioDispatcher (fire-and-forget sounds)
//! ```
//!
//! The machine never sleeps. Hosts call [`SlotMachine::tick`] with a
//! reading from a [`ww_core::Clock`] and wait until
//! [`SlotMachine::next_deadline`].

pub mod config;
pub mod machine;
pub mod presenter;
pub mod probability;
pub mod reel;
pub mod resolver;
pub mod session;
pub mod simulator;
pub mod stats;
pub mod symbols;
pub mod timing;

pub use config::*;
pub use machine::*;
pub use presenter::*;
pub use probability::*;
pub use reel::*;
pub use resolver::*;
pub use session::*;
pub use simulator::*;
pub use stats::*;
pub use symbols::*;
pub use timing::*;
