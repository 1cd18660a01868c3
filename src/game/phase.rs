//! Turn phases and selection outcomes.

use serde::{Deserialize, Serialize};

use crate::core::{CardIdentity, GameSummary};

/// Where the turn state machine stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No cards open.
    Idle,
    /// One card open, waiting for the second.
    OneOpen,
    /// Two cards open. Only a mismatch stays here, until its conceal fires.
    Resolving,
    /// Every pair matched. Terminal until reset.
    Completed,
}

impl Phase {
    /// Can a card be selected in this phase?
    #[must_use]
    pub fn accepts_selection(self) -> bool {
        matches!(self, Phase::Idle | Phase::OneOpen)
    }
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The game is over.
    Completed,
    /// No card at that position.
    UnknownCard,
    /// The card is already open or matched.
    NotHidden,
    /// Two cards are already open.
    SelectionFull,
}

/// Result of `MemoryGame::select_card`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// No-op; nothing observable changed.
    Ignored(IgnoreReason),
    /// First card of a pair is face up.
    Opened,
    /// The pair matched.
    Matched(CardIdentity),
    /// The pair differed; both stay open until the conceal delay passes.
    Mismatched,
    /// The pair matched and completed the game.
    Completed(GameSummary),
}

impl SelectOutcome {
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, SelectOutcome::Ignored(_))
    }

    /// Did this selection resolve a pair (counting a move)?
    #[must_use]
    pub fn resolved_pair(&self) -> bool {
        matches!(
            self,
            SelectOutcome::Matched(_) | SelectOutcome::Mismatched | SelectOutcome::Completed(_)
        )
    }
}
