//! Cards on the table.
//!
//! A `Card` pairs an opaque `CardIdentity` with its `CardPos` in the dealt
//! sequence and its current face state. Exactly two cards share each
//! identity.

use serde::{Deserialize, Serialize};

/// Opaque symbol identity. Two cards in a deck share each identity.
///
/// The engine only compares identities for equality; the symbol name
/// lives in `GameConfig::symbols`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardIdentity(pub u16);

impl CardIdentity {
    /// Create a new identity.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({})", self.0)
    }
}

/// Index of a card in the shuffled sequence.
///
/// This is how the presentation layer refers to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardPos(pub u16);

impl CardPos {
    /// Create a new position.
    #[must_use]
    pub const fn new(pos: u16) -> Self {
        Self(pos)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// The position as a slice index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Face state of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down, selectable.
    #[default]
    Hidden,
    /// Face up, part of the unresolved selection.
    Open,
    /// Face up for the rest of the game.
    Matched,
}

/// A card in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub identity: CardIdentity,
    pub position: CardPos,
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(identity: CardIdentity, position: CardPos) -> Self {
        Self {
            identity,
            position,
            state: CardState::Hidden,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CardState::Hidden
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == CardState::Open
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.state == CardState::Matched
    }

    /// Does this card form a pair with `other`?
    ///
    /// A card never pairs with itself.
    #[must_use]
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.position != other.position && self.identity == other.identity
    }
}
