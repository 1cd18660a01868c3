//! Core types: cards, score, RNG, configuration.
//!
//! These are the plain data types the state machine is built from.

pub mod card;
pub mod config;
pub mod rng;
pub mod score;

pub use card::{Card, CardIdentity, CardPos, CardState};
pub use config::{ConfigError, GameConfig, DEFAULT_SYMBOLS};
pub use rng::GameRng;
pub use score::{ElapsedTime, GameSummary, ScoreState};
