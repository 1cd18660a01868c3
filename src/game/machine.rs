//! The turn state machine.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{
    Card, CardIdentity, CardPos, CardState, ConfigError, ElapsedTime, GameConfig, GameRng,
    GameSummary, ScoreState,
};
use crate::deck::Deck;
use crate::schedule::{Epoch, ScheduledTask, Scheduler, TaskId, TaskKind, TimerHandle};

use super::phase::{IgnoreReason, Phase, SelectOutcome};
use super::presenter::{NullPresenter, Presenter};
use super::rating;
use super::snapshot::GameSnapshot;

/// A memory-matching game.
///
/// Owns all mutable game state: the dealt cards, the open selection, the
/// matched set, the score, the timer and the queue of deferred callbacks.
/// The presentation layer drives it through [`select_card`](Self::select_card),
/// [`reset_game`](Self::reset_game) and either [`advance`](Self::advance)
/// (virtual clock) or [`tick`](Self::tick) (host-owned interval), and hears
/// back through its [`Presenter`].
///
/// ## Deferred work
///
/// Two things happen later: the repeating timer tick, and turning a
/// mismatched pair back face down. Both are tasks on an internal
/// [`Scheduler`] stamped with the current [`Epoch`]. A reset bumps the
/// epoch and clears the queue, and every task is checked against the
/// epoch before it runs, so nothing scheduled before a reset can touch the
/// new game.
pub struct MemoryGame<P: Presenter = NullPresenter> {
    config: GameConfig,
    rng: GameRng,
    deck: Deck,
    /// Unresolved open cards, in selection order. Never more than two.
    open: SmallVec<[Card; 2]>,
    matched: FxHashSet<CardIdentity>,
    score: ScoreState,
    scheduler: Scheduler,
    epoch: Epoch,
    timer: Option<TimerHandle>,
    timer_started: bool,
    pending_conceal: Option<TaskId>,
    summary: Option<GameSummary>,
    presenter: P,
}

impl MemoryGame<NullPresenter> {
    /// Create a game with no presenter attached.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_presenter(config, seed, NullPresenter)
    }
}

impl<P: Presenter> MemoryGame<P> {
    /// Create a game and deal the first deck.
    ///
    /// The presenter is told about the deal before this returns.
    pub fn with_presenter(config: GameConfig, seed: u64, presenter: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = GameRng::new(seed).for_context("deal");
        let deck = Deck::deal(&config, &mut rng);

        let mut game = Self {
            config,
            rng,
            deck,
            open: SmallVec::new(),
            matched: FxHashSet::default(),
            score: ScoreState::default(),
            scheduler: Scheduler::new(),
            epoch: Epoch::default(),
            timer: None,
            timer_started: false,
            pending_conceal: None,
            summary: None,
            presenter,
        };
        game.announce_deal();
        Ok(game)
    }

    // === Commands ===

    /// Turn a card face up.
    ///
    /// Ignored (with no observable effect) when the game is complete, the
    /// position is unknown, the card is not face down, or two cards are
    /// already open. The first accepted selection of a game starts the
    /// timer. A second open card resolves the pair on the spot.
    pub fn select_card(&mut self, pos: CardPos) -> SelectOutcome {
        if let Err(reason) = self.check_selectable(pos) {
            log::debug!("ignoring selection of {}: {:?}", pos, reason);
            return SelectOutcome::Ignored(reason);
        }

        let Some(card) = self.deck.set_state(pos, CardState::Open) else {
            return SelectOutcome::Ignored(IgnoreReason::UnknownCard);
        };

        self.start_timer();
        self.open.push(card);
        self.presenter.on_card_opened(&card);

        if self.open.len() < 2 {
            return SelectOutcome::Opened;
        }
        self.resolve_pair()
    }

    /// Abandon the current game and deal a new one.
    ///
    /// Stops the timer, invalidates every pending callback, zeroes the
    /// score and reshuffles. Allowed from any phase.
    pub fn reset_game(&mut self) {
        self.stop_timer();
        self.epoch = self.epoch.next();
        self.scheduler.clear();
        self.pending_conceal = None;

        self.open.clear();
        self.matched.clear();
        self.score = ScoreState::default();
        self.timer_started = false;
        self.summary = None;
        self.deck = Deck::deal(&self.config, &mut self.rng);

        log::debug!("reset game, now epoch {}", self.epoch.0);
        self.announce_deal();
        self.presenter.on_move_count_changed(0);
        self.presenter.on_time_changed(ElapsedTime::ZERO);
    }

    /// Count one timer interval.
    ///
    /// Has no effect unless the timer is running. Returns whether the
    /// clock moved.
    ///
    /// Hosts that own their own interval call this directly; hosts that
    /// use [`advance`](Self::advance) get ticks from the scheduler and
    /// should not also call this.
    pub fn tick(&mut self) -> bool {
        if self.timer.is_none() {
            return false;
        }
        self.score.elapsed = self.score.elapsed.next();
        self.presenter.on_time_changed(self.score.elapsed);
        true
    }

    /// Let `ms` of virtual time pass, running every callback that falls due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
        }
        self.scheduler.set_now(until);
    }

    // === Queries ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.summary.is_some() {
            return Phase::Completed;
        }
        match self.open.len() {
            0 => Phase::Idle,
            1 => Phase::OneOpen,
            _ => Phase::Resolving,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Cards in position order.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn card(&self, pos: CardPos) -> Option<&Card> {
        self.deck.get(pos)
    }

    /// Positions of the unresolved open cards, in selection order.
    #[must_use]
    pub fn open_selection(&self) -> Vec<CardPos> {
        self.open.iter().map(|c| c.position).collect()
    }

    #[must_use]
    pub fn is_matched(&self, identity: CardIdentity) -> bool {
        self.matched.contains(&identity)
    }

    /// Matched identities, sorted.
    #[must_use]
    pub fn matched(&self) -> Vec<CardIdentity> {
        let mut matched: Vec<_> = self.matched.iter().copied().collect();
        matched.sort_unstable();
        matched
    }

    #[must_use]
    pub fn score(&self) -> ScoreState {
        self.score
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.score.moves
    }

    #[must_use]
    pub fn elapsed(&self) -> ElapsedTime {
        self.score.elapsed
    }

    #[must_use]
    pub fn stars_remaining(&self) -> u8 {
        self.score.stars_remaining(self.config.starting_stars)
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.summary.is_some()
    }

    /// The final result, once every pair is matched.
    #[must_use]
    pub fn summary(&self) -> Option<GameSummary> {
        self.summary
    }

    #[must_use]
    pub fn timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Number of deferred callbacks waiting to run.
    #[must_use]
    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Serializable view of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase(),
            cards: self.deck.cards().clone(),
            open: self.open_selection(),
            matched: self.matched(),
            score: self.score,
            stars_remaining: self.stars_remaining(),
            now_ms: self.scheduler.now_ms(),
            timer_running: self.timer_running(),
            epoch: self.epoch,
            summary: self.summary,
        }
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    // === Transitions ===

    fn check_selectable(&self, pos: CardPos) -> Result<(), IgnoreReason> {
        if self.summary.is_some() {
            return Err(IgnoreReason::Completed);
        }
        let card = self.deck.get(pos).ok_or(IgnoreReason::UnknownCard)?;
        if !card.is_hidden() {
            return Err(IgnoreReason::NotHidden);
        }
        if self.open.len() >= 2 {
            return Err(IgnoreReason::SelectionFull);
        }
        Ok(())
    }

    fn resolve_pair(&mut self) -> SelectOutcome {
        let (first, second) = (self.open[0], self.open[1]);

        if first.pairs_with(&second) {
            self.open.clear();
            self.matched.insert(first.identity);
            for card in [first, second] {
                if let Some(matched) = self.deck.set_state(card.position, CardState::Matched) {
                    self.presenter.on_card_matched(&matched);
                }
            }
            log::debug!("{} and {} matched", first.position, second.position);
            self.record_move();

            if self.matched.len() == self.config.pair_count() {
                return SelectOutcome::Completed(self.complete());
            }
            SelectOutcome::Matched(first.identity)
        } else {
            // Both stay open, so the selection guard holds off further
            // picks until the conceal runs.
            self.pending_conceal = self.scheduler.schedule(
                self.config.mismatch_delay_ms,
                self.epoch,
                TaskKind::ConcealMismatch,
            );
            log::debug!(
                "{} and {} mismatched, concealing in {}ms",
                first.position,
                second.position,
                self.config.mismatch_delay_ms
            );
            self.record_move();
            // The clock has no room left for the delay.
            if self.pending_conceal.is_none() {
                self.conceal_mismatch();
            }
            SelectOutcome::Mismatched
        }
    }

    fn record_move(&mut self) {
        self.score.moves += 1;
        self.presenter.on_move_count_changed(self.score.moves);

        if rating::loses_star(&self.config.star_thresholds, self.score.moves) {
            self.score.stars_lost += 1;
            log::debug!(
                "star lost at {} moves ({} lost)",
                self.score.moves,
                self.score.stars_lost
            );
            self.presenter.on_star_lost(self.score.stars_lost);
        }
    }

    fn complete(&mut self) -> GameSummary {
        self.stop_timer();
        let summary = GameSummary {
            time: self.score.elapsed,
            moves: self.score.moves,
            stars_remaining: self.stars_remaining(),
        };
        self.summary = Some(summary);
        log::debug!("game completed: {}", summary);
        self.presenter.on_game_completed(&summary);
        summary
    }

    fn conceal_mismatch(&mut self) {
        self.pending_conceal = None;
        for card in std::mem::take(&mut self.open) {
            if let Some(hidden) = self.deck.set_state(card.position, CardState::Hidden) {
                self.presenter.on_card_closed(&hidden);
            }
        }
    }

    fn start_timer(&mut self) {
        if self.timer_started {
            return;
        }
        self.timer_started = true;
        let interval_ms = self.config.tick_interval_ms;
        let Some(task) = self.scheduler.schedule(interval_ms, self.epoch, TaskKind::Tick) else {
            log::debug!("timer not started: clock exhausted");
            return;
        };
        self.timer = Some(TimerHandle {
            task,
            epoch: self.epoch,
            interval_ms,
        });
        log::debug!("timer started");
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.scheduler.cancel(handle.task);
            log::debug!("timer stopped at {}", self.score.elapsed);
        }
    }

    fn run_task(&mut self, task: ScheduledTask) {
        if task.epoch != self.epoch {
            log::trace!("dropping stale {} from epoch {}", task.id, task.epoch.0);
            return;
        }

        match task.kind {
            TaskKind::Tick => {
                let Some(handle) = self.timer.filter(|h| h.owns(&task)) else {
                    log::trace!("dropping orphaned tick {}", task.id);
                    return;
                };
                self.tick();
                log::trace!("tick at {}ms, elapsed {}", task.due_ms, self.score.elapsed);
                // A tick that cannot be rescheduled ends the timer; the
                // clock has nowhere later to go.
                self.timer = self
                    .scheduler
                    .schedule(handle.interval_ms, self.epoch, TaskKind::Tick)
                    .map(|next| TimerHandle { task: next, ..handle });
                if self.timer.is_none() {
                    log::debug!("timer stopped at {}: clock exhausted", self.score.elapsed);
                }
            }
            TaskKind::ConcealMismatch => {
                if self.pending_conceal == Some(task.id) {
                    self.conceal_mismatch();
                } else {
                    log::trace!("dropping orphaned conceal {}", task.id);
                }
            }
        }
    }

    fn announce_deal(&mut self) {
        let cards = self.deck.to_vec();
        self.presenter.on_deck_dealt(&cards);
    }
}

impl<P: Presenter + std::fmt::Debug> std::fmt::Debug for MemoryGame<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryGame")
            .field("phase", &self.phase())
            .field("score", &self.score)
            .field("open", &self.open_selection())
            .field("matched", &self.matched())
            .field("epoch", &self.epoch)
            .field("presenter", &self.presenter)
            .finish()
    }
}
