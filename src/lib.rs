//! # memory-match
//!
//! Turn state machine for a memory-matching ("concentration") card game.
//!
//! A grid of face-down cards is dealt; the player turns up two at a time.
//! Matching pairs stay face up, mismatches turn back down after a short
//! delay. The game counts moves, runs a clock from the first selection,
//! takes away stars at fixed move counts, and reports a summary once every
//! pair is matched.
//!
//! ## Design Principles
//!
//! 1. **Rendering-Agnostic**: The state machine never inspects rendering
//!    details. The presentation layer sends typed commands and receives
//!    notifications through the `Presenter` trait.
//!
//! 2. **Deterministic**: Deals come from a seeded ChaCha8 stream and
//!    deferred work runs on a virtual clock, so a game replays exactly.
//!
//! 3. **No Stale Callbacks**: Deferred callbacks carry the epoch they were
//!    scheduled in. A reset bumps the epoch, so nothing from an abandoned
//!    game can fire against the new one.
//!
//! ## Modules
//!
//! - `core`: Cards, score, RNG, configuration
//! - `deck`: Dealing and the Fisher–Yates shuffle
//! - `schedule`: Virtual-clock task queue and timer handles
//! - `game`: The state machine, presenter hooks and snapshots

pub mod core;
pub mod deck;
pub mod schedule;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Card, CardIdentity, CardPos, CardState,
    ConfigError, GameConfig,
    GameRng,
    ElapsedTime, GameSummary, ScoreState,
};

pub use crate::deck::Deck;

pub use crate::schedule::{Epoch, ScheduledTask, Scheduler, TaskId, TaskKind, TimerHandle};

pub use crate::game::{
    EventLog, GameEvent, GameSnapshot, IgnoreReason, MemoryGame,
    NullPresenter, Phase, Presenter, SelectOutcome,
};
