//! Turn flow integration tests.
//!
//! These tests drive whole games through the public command interface and
//! check moves, matches, stars and completion.

use memory_match::core::{CardIdentity, CardPos, ElapsedTime, GameConfig, GameSummary};
use memory_match::game::{EventLog, GameEvent, IgnoreReason, MemoryGame, Phase, SelectOutcome};

fn game_with(symbols: &[&str], seed: u64) -> MemoryGame<EventLog> {
    let config = GameConfig::new().with_symbols(symbols.iter().copied());
    MemoryGame::with_presenter(config, seed, EventLog::new()).expect("valid config")
}

fn pair(game: &MemoryGame<EventLog>, identity: u16) -> (CardPos, CardPos) {
    let positions: Vec<_> = game
        .deck()
        .iter()
        .filter(|c| c.identity == CardIdentity::new(identity))
        .map(|c| c.position)
        .collect();
    assert_eq!(positions.len(), 2, "identity {} should be dealt twice", identity);
    (positions[0], positions[1])
}

/// Play one deliberate mismatch and wait it out.
fn miss(game: &mut MemoryGame<EventLog>) {
    let (a, _) = pair(game, 0);
    let (b, _) = pair(game, 1);
    assert_eq!(game.select_card(a), SelectOutcome::Opened);
    assert_eq!(game.select_card(b), SelectOutcome::Mismatched);
    game.advance(500);
    assert_eq!(game.phase(), Phase::Idle);
}

/// Two pairs, matched in order: the reference scenario.
#[test]
fn test_two_pair_scenario() {
    let mut game = game_with(&["A", "B"], 42);
    let (a1, a2) = pair(&game, 0);
    let (b1, b2) = pair(&game, 1);

    assert_eq!(game.select_card(a1), SelectOutcome::Opened);
    assert_eq!(game.phase(), Phase::OneOpen);

    assert_eq!(game.select_card(a2), SelectOutcome::Matched(CardIdentity::new(0)));
    assert_eq!(game.moves(), 1);
    assert_eq!(game.matched(), vec![CardIdentity::new(0)]);

    assert_eq!(game.select_card(b1), SelectOutcome::Opened);
    assert_eq!(game.phase(), Phase::OneOpen);

    let outcome = game.select_card(b2);
    let summary = GameSummary {
        time: ElapsedTime::ZERO,
        moves: 2,
        stars_remaining: 3,
    };
    assert_eq!(outcome, SelectOutcome::Completed(summary));
    assert_eq!(game.matched(), vec![CardIdentity::new(0), CardIdentity::new(1)]);
    assert_eq!(game.phase(), Phase::Completed);
    assert_eq!(game.summary(), Some(summary));

    let completions: Vec<_> = game
        .presenter()
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::GameCompleted(_)))
        .collect();
    assert_eq!(completions, vec![&GameEvent::GameCompleted(summary)]);
}

/// A mismatch counts one move and leaves the matched set alone.
#[test]
fn test_mismatch_scenario() {
    let mut game = game_with(&["A", "B"], 42);
    let (a1, _) = pair(&game, 0);
    let (b1, _) = pair(&game, 1);

    game.select_card(a1);
    game.select_card(b1);
    game.presenter_mut().clear();

    game.advance(500);

    assert!(game.card(a1).unwrap().is_hidden());
    assert!(game.card(b1).unwrap().is_hidden());
    assert!(game.open_selection().is_empty());
    assert_eq!(game.moves(), 1);
    assert!(game.matched().is_empty());

    let closed: Vec<_> = game
        .presenter()
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::CardClosed(card) => Some(card.position),
            _ => None,
        })
        .collect();
    assert_eq!(closed, vec![a1, b1]);
}

/// The presenter sees each step of a match in order.
#[test]
fn test_match_notifications() {
    let mut game = game_with(&["A", "B"], 9);
    let (a1, a2) = pair(&game, 0);
    game.presenter_mut().clear();

    game.select_card(a1);
    game.select_card(a2);

    let events = game.presenter().events();
    assert_eq!(events.len(), 5);
    assert!(matches!(events[0], GameEvent::CardOpened(c) if c.position == a1));
    assert!(matches!(events[1], GameEvent::CardOpened(c) if c.position == a2));
    assert!(matches!(events[2], GameEvent::CardMatched(c) if c.position == a1 && c.is_matched()));
    assert!(matches!(events[3], GameEvent::CardMatched(c) if c.position == a2 && c.is_matched()));
    assert_eq!(events[4], GameEvent::MoveCountChanged(1));

    // A lone first card notifies only its opening.
    game.presenter_mut().clear();
    let (b1, _) = pair(&game, 1);
    game.select_card(b1);
    assert_eq!(game.presenter().events().len(), 1);
}

/// Selecting matched cards is a no-op.
#[test]
fn test_matched_card_is_ignored() {
    let mut game = game_with(&["A", "B", "C"], 3);
    let (a1, a2) = pair(&game, 0);
    game.select_card(a1);
    game.select_card(a2);

    let before = game.snapshot();
    let events = game.presenter().len();

    assert_eq!(game.select_card(a1), SelectOutcome::Ignored(IgnoreReason::NotHidden));
    assert_eq!(game.select_card(a2), SelectOutcome::Ignored(IgnoreReason::NotHidden));

    assert_eq!(game.snapshot(), before);
    assert_eq!(game.presenter().len(), events);
}

/// Every selection is ignored once the game is complete.
#[test]
fn test_completed_game_ignores_selection() {
    let mut game = game_with(&["A"], 1);
    let (a1, a2) = pair(&game, 0);
    game.select_card(a1);
    assert!(matches!(game.select_card(a2), SelectOutcome::Completed(_)));

    assert_eq!(
        game.select_card(a1),
        SelectOutcome::Ignored(IgnoreReason::Completed)
    );
    assert_eq!(
        game.select_card(CardPos::new(50)),
        SelectOutcome::Ignored(IgnoreReason::Completed)
    );
}

/// Stars drop exactly at 14 and 18 moves, and nowhere else.
#[test]
fn test_star_thresholds() {
    let mut game = game_with(&["A", "B", "C"], 5);

    for _ in 0..13 {
        miss(&mut game);
    }
    assert_eq!(game.moves(), 13);
    assert_eq!(game.stars_remaining(), 3);

    miss(&mut game);
    assert_eq!(game.moves(), 14);
    assert_eq!(game.stars_remaining(), 2);

    for _ in 0..3 {
        miss(&mut game);
    }
    assert_eq!(game.stars_remaining(), 2);

    miss(&mut game);
    assert_eq!(game.moves(), 18);
    assert_eq!(game.stars_remaining(), 1);

    for _ in 0..20 {
        miss(&mut game);
    }
    assert_eq!(game.stars_remaining(), 1);

    let star_events: Vec<_> = game
        .presenter()
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::StarLost(_)))
        .cloned()
        .collect();
    assert_eq!(star_events, vec![GameEvent::StarLost(1), GameEvent::StarLost(2)]);
}

/// The summary reports the stars left after late completion.
#[test]
fn test_summary_after_losing_stars() {
    let mut game = game_with(&["A", "B"], 11);
    for _ in 0..15 {
        miss(&mut game);
    }

    let (a1, a2) = pair(&game, 0);
    let (b1, b2) = pair(&game, 1);
    game.select_card(a1);
    game.select_card(a2);
    game.select_card(b1);

    match game.select_card(b2) {
        SelectOutcome::Completed(summary) => {
            assert_eq!(summary.moves, 17);
            assert_eq!(summary.stars_remaining, 2);
        }
        other => panic!("expected completion, got {:?}", other),
    }
}

/// Custom thresholds and starting stars flow through.
#[test]
fn test_custom_rating() {
    let config = GameConfig::new()
        .with_symbols(["A", "B"])
        .with_starting_stars(5)
        .with_star_thresholds(vec![1, 2, 3]);
    let mut game = MemoryGame::with_presenter(config, 2, EventLog::new()).unwrap();

    for _ in 0..3 {
        miss(&mut game);
    }
    assert_eq!(game.stars_remaining(), 2);
}

/// The classic game can be played through to completion.
#[test]
fn test_full_classic_game() {
    let mut game = MemoryGame::with_presenter(GameConfig::default(), 2024, EventLog::new()).unwrap();
    assert_eq!(game.deck().len(), 16);

    for identity in 0..8 {
        let (p1, p2) = pair(&game, identity);
        game.select_card(p1);
        game.select_card(p2);
        game.advance(1000);
    }

    let summary = game.summary().expect("all pairs matched");
    assert_eq!(summary.moves, 8);
    assert_eq!(summary.stars_remaining, 3);
    // Seven full seconds pass between the first and last selections.
    assert_eq!(summary.time, ElapsedTime::from_secs(7));
    assert!(game.deck().iter().all(|c| c.is_matched()));
    assert_eq!(game.snapshot().face_up_count(), 16);
}
