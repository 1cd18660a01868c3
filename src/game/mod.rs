//! The memory-matching turn state machine.
//!
//! ## States
//!
//! ```text
//! Idle --select--> OneOpen --select--> Resolving
//!  ^                                     |
//!  +-----------match / conceal-----------+
//!  |
//!  +--all pairs matched--> Completed (terminal until reset)
//! ```
//!
//! A matched pair leaves `Resolving` immediately; a mismatched pair waits
//! for the conceal delay with both cards open, so the two-open guard
//! rejects further selections in the meantime. Every resolved pair is one
//! move.
//!
//! ## Example Usage
//!
//! ```
//! use memory_match::core::GameConfig;
//! use memory_match::game::{EventLog, MemoryGame, Phase, SelectOutcome};
//!
//! let config = GameConfig::new().with_symbols(["A", "B"]);
//! let mut game = MemoryGame::with_presenter(config, 7, EventLog::new()).unwrap();
//!
//! let first = game.deck().iter().next().unwrap().position;
//! assert_eq!(game.select_card(first), SelectOutcome::Opened);
//! assert_eq!(game.phase(), Phase::OneOpen);
//! assert!(game.timer_running());
//!
//! game.reset_game();
//! assert_eq!(game.phase(), Phase::Idle);
//! assert_eq!(game.moves(), 0);
//! ```

mod machine;
mod phase;
mod presenter;
mod rating;
mod snapshot;

pub use machine::MemoryGame;
pub use phase::{IgnoreReason, Phase, SelectOutcome};
pub use presenter::{EventLog, GameEvent, NullPresenter, Presenter};
pub use rating::loses_star;
pub use snapshot::GameSnapshot;
