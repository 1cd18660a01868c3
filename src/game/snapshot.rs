//! Serializable view of a game.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{Card, CardIdentity, CardPos, GameSummary, ScoreState};
use crate::schedule::Epoch;

use super::phase::Phase;

/// Everything a presentation layer can observe about a game.
///
/// Taking a snapshot is cheap: the card list shares structure with the
/// live deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub cards: Vector<Card>,
    /// Unresolved open cards, in selection order.
    pub open: Vec<CardPos>,
    /// Matched identities, sorted.
    pub matched: Vec<CardIdentity>,
    pub score: ScoreState,
    pub stars_remaining: u8,
    pub now_ms: u64,
    pub timer_running: bool,
    pub epoch: Epoch,
    pub summary: Option<GameSummary>,
}

impl GameSnapshot {
    /// Number of cards face up (open or matched).
    #[must_use]
    pub fn face_up_count(&self) -> usize {
        self.cards.iter().filter(|c| !c.is_hidden()).count()
    }
}
