//! Symbol set — the N reel symbols, the last one reserved for the jackpot

use rand::Rng;
use serde::{Deserialize, Serialize};

use ww_core::{SymbolId, WwError, WwResult};

/// Ordered symbol names; the id of a symbol is its index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolSet {
    names: Vec<String>,
}

impl SymbolSet {
    /// Smallest usable set: two transient symbols plus the jackpot
    pub const MIN_SYMBOLS: usize = 3;

    pub fn new<I, S>(names: I) -> WwResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Self {
            names: names.into_iter().map(Into::into).collect(),
        };
        set.validate()?;
        Ok(set)
    }

    /// The cabinet's ten symbols
    pub fn wild_west() -> Self {
        Self {
            names: [
                "revolver",
                "sheriff_star",
                "cowboy_hat",
                "horseshoe",
                "cactus",
                "whiskey",
                "wanted_poster",
                "boots",
                "dynamite",
                "gold_rush",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }

    pub fn validate(&self) -> WwResult<()> {
        if self.names.len() < Self::MIN_SYMBOLS {
            return Err(WwError::InvalidConfig(format!(
                "need at least {} symbols, got {}",
                Self::MIN_SYMBOLS,
                self.names.len()
            )));
        }
        Ok(())
    }

    /// Total symbols, jackpot included
    #[inline]
    pub fn len(&self) -> u32 {
        self.names.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The reserved top symbol
    #[inline]
    pub fn jackpot(&self) -> SymbolId {
        self.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_jackpot(&self, symbol: SymbolId) -> bool {
        symbol == self.jackpot()
    }

    #[inline]
    pub fn contains(&self, symbol: SymbolId) -> bool {
        symbol < self.len()
    }

    /// Symbols a spinning reel may show
    #[inline]
    pub fn transient_count(&self) -> u32 {
        self.jackpot()
    }

    pub fn name(&self, symbol: SymbolId) -> Option<&str> {
        self.names.get(symbol as usize).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Uniform draw from `[0, N-2]`, redrawn until it differs from `avoid`
    pub fn draw_transient<R: Rng>(&self, rng: &mut R, avoid: SymbolId) -> SymbolId {
        loop {
            let symbol = rng.random_range(0..self.transient_count());
            if symbol != avoid {
                return symbol;
            }
        }
    }
}

impl Default for SymbolSet {
    fn default() -> Self {
        Self::wild_west()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_wild_west_set() {
        let set = SymbolSet::wild_west();
        assert_eq!(set.len(), 10);
        assert_eq!(set.jackpot(), 9);
        assert_eq!(set.name(9), Some("gold_rush"));
        assert_eq!(set.name(10), None);
        assert!(set.is_jackpot(9));
        assert!(!set.is_jackpot(8));
    }

    #[test]
    fn test_too_few_symbols_rejected() {
        assert!(SymbolSet::new(["a", "b"]).is_err());
        assert!(SymbolSet::new(Vec::<String>::new()).is_err());
        assert!(SymbolSet::new(["a", "b", "jackpot"]).is_ok());
    }

    #[test]
    fn test_transient_never_jackpot_nor_repeat() {
        let set = SymbolSet::wild_west();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut previous = 0;
        for _ in 0..10_000 {
            let next = set.draw_transient(&mut rng, previous);
            assert!(next < set.jackpot());
            assert_ne!(next, previous);
            previous = next;
        }
    }

    #[test]
    fn test_transient_with_minimal_set_alternates() {
        let set = SymbolSet::new(["a", "b", "jackpot"]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(set.draw_transient(&mut rng, 0), 1);
        assert_eq!(set.draw_transient(&mut rng, 1), 0);
    }
}
