//! Render hooks for the presentation layer.
//!
//! The state machine never touches rendering. It reports every visible
//! change through a `Presenter`, and the presentation layer decides how to
//! draw it. All hooks default to no-ops so a presenter only implements
//! what it draws.

use serde::{Deserialize, Serialize};

use crate::core::{Card, ElapsedTime, GameSummary};

/// Notifications from the game to the presentation layer.
pub trait Presenter {
    /// A card turned face up.
    fn on_card_opened(&mut self, _card: &Card) {}

    /// A mismatched card turned back face down.
    fn on_card_closed(&mut self, _card: &Card) {}

    /// A card was locked in as part of a matched pair.
    fn on_card_matched(&mut self, _card: &Card) {}

    /// The move counter changed.
    fn on_move_count_changed(&mut self, _moves: u32) {}

    /// The clock changed. `ElapsedTime` displays as `mm:ss`.
    fn on_time_changed(&mut self, _time: ElapsedTime) {}

    /// A star was lost. `stars_lost` is the running total for this game.
    fn on_star_lost(&mut self, _stars_lost: u8) {}

    /// Every pair is matched.
    fn on_game_completed(&mut self, _summary: &GameSummary) {}

    /// A fresh deck was dealt, face down, in position order.
    fn on_deck_dealt(&mut self, _cards: &[Card]) {}
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn on_card_opened(&mut self, card: &Card) {
        (**self).on_card_opened(card);
    }

    fn on_card_closed(&mut self, card: &Card) {
        (**self).on_card_closed(card);
    }

    fn on_card_matched(&mut self, card: &Card) {
        (**self).on_card_matched(card);
    }

    fn on_move_count_changed(&mut self, moves: u32) {
        (**self).on_move_count_changed(moves);
    }

    fn on_time_changed(&mut self, time: ElapsedTime) {
        (**self).on_time_changed(time);
    }

    fn on_star_lost(&mut self, stars_lost: u8) {
        (**self).on_star_lost(stars_lost);
    }

    fn on_game_completed(&mut self, summary: &GameSummary) {
        (**self).on_game_completed(summary);
    }

    fn on_deck_dealt(&mut self, cards: &[Card]) {
        (**self).on_deck_dealt(cards);
    }
}

/// Presenter that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// A notification, as recorded by [`EventLog`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    CardOpened(Card),
    CardClosed(Card),
    CardMatched(Card),
    MoveCountChanged(u32),
    TimeChanged(ElapsedTime),
    StarLost(u8),
    GameCompleted(GameSummary),
    DeckDealt { cards: usize },
}

/// Presenter that records every notification in order.
///
/// Useful for headless hosts that replay events into their own renderer,
/// and for tests.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Presenter for EventLog {
    fn on_card_opened(&mut self, card: &Card) {
        self.events.push(GameEvent::CardOpened(*card));
    }

    fn on_card_closed(&mut self, card: &Card) {
        self.events.push(GameEvent::CardClosed(*card));
    }

    fn on_card_matched(&mut self, card: &Card) {
        self.events.push(GameEvent::CardMatched(*card));
    }

    fn on_move_count_changed(&mut self, moves: u32) {
        self.events.push(GameEvent::MoveCountChanged(moves));
    }

    fn on_time_changed(&mut self, time: ElapsedTime) {
        self.events.push(GameEvent::TimeChanged(time));
    }

    fn on_star_lost(&mut self, stars_lost: u8) {
        self.events.push(GameEvent::StarLost(stars_lost));
    }

    fn on_game_completed(&mut self, summary: &GameSummary) {
        self.events.push(GameEvent::GameCompleted(*summary));
    }

    fn on_deck_dealt(&mut self, cards: &[Card]) {
        self.events.push(GameEvent::DeckDealt { cards: cards.len() });
    }
}
