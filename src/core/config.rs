//! Game configuration.
//!
//! Games are configured at construction by a `GameConfig`:
//! - The symbol set (one pair of cards is dealt per symbol)
//! - The mismatch observation delay and the timer interval
//! - The move thresholds at which stars are lost
//!
//! `GameConfig::default()` is the classic 16-card game.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::card::CardIdentity;

/// The classic eight symbols, dealt as 16 cards.
pub const DEFAULT_SYMBOLS: [&str; 8] = [
    "fa-diamond",
    "fa-paper-plane-o",
    "fa-anchor",
    "fa-bolt",
    "fa-cube",
    "fa-leaf",
    "fa-bomb",
    "fa-bicycle",
];

/// How long a mismatched pair stays face up, in milliseconds.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 500;

/// Timer resolution, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Move counts at which a star is lost.
pub const DEFAULT_STAR_THRESHOLDS: [u32; 2] = [14, 18];

/// Stars awarded before any are lost.
pub const DEFAULT_STARTING_STARS: u8 = 3;

/// Configuration rejected by `GameConfig::validate`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("deck needs at least one symbol")]
    NoSymbols,

    #[error("symbol `{0}` appears more than once")]
    DuplicateSymbol(String),

    #[error("{0} symbols exceed the deck size limit")]
    TooManySymbols(usize),

    #[error("{name} must be greater than zero")]
    ZeroDelay { name: &'static str },

    #[error("{thresholds} star thresholds would exhaust {stars} starting stars")]
    TooManyThresholds { thresholds: usize, stars: u8 },

    #[error("star thresholds must be positive move counts")]
    ZeroThreshold,

    #[error("star thresholds must be strictly increasing")]
    UnorderedThresholds,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Distinct symbols; a pair is dealt for each.
    pub symbols: Vec<String>,

    /// Delay before a mismatched pair is turned back down.
    pub mismatch_delay_ms: u64,

    /// Interval between timer ticks.
    pub tick_interval_ms: u64,

    /// Move counts at which a star is lost. Compared by exact equality.
    pub star_thresholds: Vec<u32>,

    /// Stars held at the start of a game.
    pub starting_stars: u8,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| (*s).to_string()).collect(),
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            star_thresholds: DEFAULT_STAR_THRESHOLDS.to_vec(),
            starting_stars: DEFAULT_STARTING_STARS,
        }
    }
}

impl GameConfig {
    /// Create the classic configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the symbol set.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mismatch observation delay.
    #[must_use]
    pub fn with_mismatch_delay_ms(mut self, delay: u64) -> Self {
        self.mismatch_delay_ms = delay;
        self
    }

    /// Set the timer interval.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    /// Set the star-loss thresholds.
    #[must_use]
    pub fn with_star_thresholds(mut self, thresholds: impl Into<Vec<u32>>) -> Self {
        self.star_thresholds = thresholds.into();
        self
    }

    /// Set the starting star count.
    #[must_use]
    pub fn with_starting_stars(mut self, stars: u8) -> Self {
        self.starting_stars = stars;
        self
    }

    /// Number of distinct identities (pairs) in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    /// Number of cards dealt.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.symbols.len() * 2
    }

    /// Symbol name for an identity.
    #[must_use]
    pub fn symbol(&self, identity: CardIdentity) -> Option<&str> {
        self.symbols.get(identity.raw() as usize).map(String::as_str)
    }

    /// All identities in symbol order.
    pub fn identities(&self) -> impl Iterator<Item = CardIdentity> {
        // validate() bounds the symbol count to u16
        (0..self.symbols.len()).map(|i| CardIdentity::new(i as u16))
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::NoSymbols);
        }
        // Positions are u16, so the dealt deck must fit.
        if self.card_count() > usize::from(u16::MAX) {
            return Err(ConfigError::TooManySymbols(self.symbols.len()));
        }
        let mut seen = FxHashSet::default();
        for symbol in &self.symbols {
            if !seen.insert(symbol.as_str()) {
                return Err(ConfigError::DuplicateSymbol(symbol.clone()));
            }
        }

        if self.mismatch_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay { name: "mismatch delay" });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroDelay { name: "tick interval" });
        }

        // At least one star must survive every threshold.
        if self.star_thresholds.len() >= usize::from(self.starting_stars) {
            return Err(ConfigError::TooManyThresholds {
                thresholds: self.star_thresholds.len(),
                stars: self.starting_stars,
            });
        }
        if self.star_thresholds.contains(&0) {
            return Err(ConfigError::ZeroThreshold);
        }
        if self.star_thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnorderedThresholds);
        }

        Ok(())
    }
}
