//! Wild West Slots Core Library
//!
//! Shared types used by every crate in the workspace:
//! error type, symbol identifiers and the clock abstraction the
//! spin session is driven by.

pub mod error;
pub mod time;

pub use error::*;
pub use time::*;

/// Index of a reel symbol in `[0, N-1]`; `N-1` is the jackpot symbol.
pub type SymbolId = u32;

/// Number of reels on the machine
pub const REEL_COUNT: usize = 3;
