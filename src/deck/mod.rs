//! Dealing the paired deck.
//!
//! A deal doubles every configured identity, shuffles the result with
//! [`GameRng::shuffle`], and lays the cards out face down at positions
//! `0..n`. Every deal from the same config holds the same multiset of
//! identities; only the arrangement changes.
//!
//! Cards are stored in an `im::Vector` so snapshots of the table clone in
//! O(1).

use im::Vector;

use crate::core::{Card, CardIdentity, CardPos, CardState, GameConfig, GameRng};

/// The cards on the table, indexed by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Deal a freshly shuffled deck for `config`.
    ///
    /// `config` is expected to have passed `GameConfig::validate`.
    pub fn deal(config: &GameConfig, rng: &mut GameRng) -> Self {
        let mut identities: Vec<CardIdentity> = config
            .identities()
            .flat_map(|identity| [identity, identity])
            .collect();
        rng.shuffle(&mut identities);
        Self::from_identities(identities)
    }

    /// Lay out cards face down in the given order.
    ///
    /// Callers keep the count within `u16` positions; `GameConfig::validate`
    /// bounds dealt decks.
    pub(crate) fn from_identities(identities: impl IntoIterator<Item = CardIdentity>) -> Self {
        let cards = identities
            .into_iter()
            .enumerate()
            .map(|(i, identity)| Card::new(identity, CardPos::new(i as u16)))
            .collect();
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, pos: CardPos) -> Option<&Card> {
        self.cards.get(pos.index())
    }

    /// Change a card's face state. Unknown positions are ignored.
    pub fn set_state(&mut self, pos: CardPos, state: CardState) -> Option<Card> {
        let card = self.cards.get_mut(pos.index())?;
        card.state = state;
        Some(*card)
    }

    /// The underlying persistent vector. Cloning it is O(1).
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards currently matched.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_matched()).count()
    }

    /// Copy out the cards in position order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.iter().copied().collect()
    }

    /// Identities in position order.
    #[must_use]
    pub fn identities(&self) -> Vec<CardIdentity> {
        self.cards.iter().map(|c| c.identity).collect()
    }
}
