//! Game engine - owns the live round
//!
//! Ties the deck, the selection buffer, the counters and the deferred-task
//! scheduler together. Every intent goes through one of the methods here; an
//! intent whose preconditions do not hold is ignored and reported as `false`.
//!
//! Two transitions are deferred rather than applied on the spot: resolving a
//! revealed pair and raising the win flag. Both are queued on the
//! [`Scheduler`] tagged with the round generation, and both are cancelled
//! whenever a new round is dealt.

use std::collections::vec_deque::{self, VecDeque};

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::card::Card;
use crate::deck::build_deck_into;
use crate::rng::DeckRng;
use crate::scheduler::{Deferred, DueTask, Scheduler};
use crate::snapshot::{RoundPhase, RoundSnapshot};
use crate::types::{CardId, Difficulty, GameEvent, Intent, Timings};

/// Events kept for a consumer that never drains them.
const MAX_QUEUED_EVENTS: usize = 64;

/// The memory-game state machine.
#[derive(Debug, Clone)]
pub struct GameEngine {
    difficulty: Difficulty,
    cards: Vec<Card>,
    selection: ArrayVec<CardId, 2>,
    move_count: u32,
    match_count: u32,
    elapsed_seconds: u32,
    running: bool,
    paused: bool,
    won: bool,
    /// Monotonic round id (increments on every deal).
    generation: u64,
    /// Monotonic change counter (increments on every state change).
    revision: u64,
    scheduler: Scheduler,
    rng: DeckRng,
    timings: Timings,
    events: VecDeque<GameEvent>,
}

impl GameEngine {
    /// Create an idle engine with the given deck seed
    pub fn new(seed: u64, timings: Timings) -> Self {
        Self {
            difficulty: Difficulty::default(),
            cards: Vec::new(),
            selection: ArrayVec::new(),
            move_count: 0,
            match_count: 0,
            elapsed_seconds: 0,
            running: false,
            paused: false,
            won: false,
            generation: 0,
            revision: 0,
            scheduler: Scheduler::new(),
            rng: DeckRng::new(seed),
            timings: timings.normalized(),
            events: VecDeque::new(),
        }
    }

    pub fn from_entropy(timings: Timings) -> Self {
        Self::new(DeckRng::entropy_seed(), timings)
    }

    /// Deal the first round at the current difficulty.
    ///
    /// Does nothing once a round has been dealt; use [`reset`](Self::reset)
    /// or [`start_round`](Self::start_round) for that.
    pub fn start(&mut self) {
        if self.generation == 0 {
            self.start_round(self.difficulty);
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn match_count(&self) -> u32 {
        self.match_count
    }

    pub fn pair_count(&self) -> u32 {
        (self.cards.len() / 2) as u32
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Deferred tasks still waiting on the scheduler.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending_len()
    }

    /// Milliseconds until the next deferred task comes due.
    pub fn next_due_in(&self) -> Option<u64> {
        self.scheduler.next_due_in()
    }

    /// Whether the external clock driver should be ticking.
    pub fn clock_should_run(&self) -> bool {
        self.running && !self.paused
    }

    pub fn phase(&self) -> RoundPhase {
        if self.won {
            RoundPhase::Won
        } else if self.running && self.paused {
            RoundPhase::Paused
        } else if self.running {
            RoundPhase::Running
        } else if self.generation > 0 && self.match_count == self.pair_count() {
            RoundPhase::Finishing
        } else {
            RoundPhase::Idle
        }
    }

    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.generation = self.generation;
        out.revision = self.revision;
        out.difficulty = self.difficulty;
        out.cards.clear();
        out.cards.extend_from_slice(&self.cards);
        out.selection.clone_from(&self.selection);
        out.move_count = self.move_count;
        out.match_count = self.match_count;
        out.pair_count = self.pair_count();
        out.elapsed_seconds = self.elapsed_seconds;
        out.is_running = self.running;
        out.is_paused = self.paused;
        out.is_won = self.won;
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take the notifications produced since the last drain.
    pub fn drain_events(&mut self) -> vec_deque::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Apply a player intent
    pub fn apply(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Select { id } => self.select_card(id),
            Intent::TogglePause => self.toggle_pause(),
            Intent::StartRound { difficulty } => {
                self.start_round(difficulty);
                true
            }
            Intent::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Discard the current round and deal a new one.
    pub fn start_round(&mut self, difficulty: Difficulty) {
        let cancelled = self.scheduler.cancel_all();
        self.generation = self.generation.wrapping_add(1);
        self.difficulty = difficulty;
        build_deck_into(difficulty, &mut self.rng, &mut self.cards);

        self.selection.clear();
        self.move_count = 0;
        self.match_count = 0;
        self.elapsed_seconds = 0;
        self.running = true;
        self.paused = false;
        self.won = false;

        debug!(
            generation = self.generation,
            difficulty = difficulty.as_str(),
            cancelled,
            "round started"
        );
        self.emit(GameEvent::RoundStarted {
            difficulty,
            pair_count: difficulty.pair_count(),
        });
        self.touch();
    }

    /// Deal a new round at the current difficulty.
    pub fn reset(&mut self) {
        self.start_round(self.difficulty);
    }

    /// Reveal a card.
    ///
    /// Ignored when two cards are already pending, the card is already
    /// selected or matched, the id is unknown, or the round is paused or no
    /// longer running.
    pub fn select_card(&mut self, id: CardId) -> bool {
        if !self.running || self.paused {
            return false;
        }
        if self.selection.is_full() || self.selection.contains(&id) {
            return false;
        }
        let Some(card) = self.cards.get_mut(id) else {
            return false;
        };
        if !card.is_selectable() {
            return false;
        }

        card.is_revealed = true;
        let first_of_pair = self.selection.is_empty();
        self.selection.push(id);
        if first_of_pair {
            self.move_count += 1;
        }

        if self.selection.is_full() {
            self.schedule_resolution();
        }

        self.touch();
        true
    }

    /// Pause or resume the running round.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.paused = !self.paused;
        self.emit(if self.paused {
            GameEvent::GamePaused
        } else {
            GameEvent::GameResumed
        });
        self.touch();
        true
    }

    /// One elapsed-time unit from the clock driver.
    pub fn tick(&mut self) -> bool {
        if !self.clock_should_run() {
            return false;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        self.touch();
        true
    }

    /// Advance deferred-task time and run whatever came due.
    ///
    /// Tasks run one deadline at a time with virtual time set to their due
    /// time, so a task queued by another (the win flag after the final match)
    /// is timed from that deadline and can fire within the same step.
    ///
    /// Returns whether any task changed the round.
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        let end = self.scheduler.now_ms() + u64::from(elapsed_ms);
        let mut changed = false;
        while let Some(DueTask { generation, task }) = self.scheduler.pop_due(end) {
            if generation != self.generation {
                debug!(
                    stale = generation,
                    current = self.generation,
                    ?task,
                    "dropping deferred task from a previous round"
                );
                continue;
            }
            changed |= match task {
                Deferred::ResolveSelection => self.resolve_selection(),
                Deferred::FinalizeWin => self.finalize_win(),
            };
        }
        self.scheduler.advance_to(end);
        changed
    }

    fn schedule_resolution(&mut self) {
        let delay = if self.selection_matches() {
            self.timings.match_delay_ms
        } else {
            self.timings.mismatch_delay_ms
        };
        if !self
            .scheduler
            .schedule(delay, self.generation, Deferred::ResolveSelection)
        {
            warn!("deferred queue full, resolving selection immediately");
            self.resolve_selection();
        }
    }

    fn selection_matches(&self) -> bool {
        match self.selection.as_slice() {
            [a, b] => self.cards[*a].symbol == self.cards[*b].symbol,
            _ => false,
        }
    }

    fn resolve_selection(&mut self) -> bool {
        let (a, b) = match self.selection.as_slice() {
            [a, b] => (*a, *b),
            _ => return false,
        };
        let symbol = self.cards[a].symbol;
        let matched = symbol == self.cards[b].symbol;

        for id in [a, b] {
            let card = &mut self.cards[id];
            card.is_revealed = false;
            if matched {
                card.is_matched = true;
            }
        }
        self.selection.clear();

        if matched {
            self.match_count += 1;
            debug!(
                generation = self.generation,
                symbol = symbol.index(),
                matches = self.match_count,
                "match found"
            );
            self.emit(GameEvent::MatchFound { symbol });
            self.check_win();
        } else {
            debug!(generation = self.generation, a, b, "mismatch");
        }

        self.touch();
        true
    }

    fn check_win(&mut self) {
        if !self.running || self.match_count < self.pair_count() {
            return;
        }
        self.running = false;
        self.paused = false;
        if !self.scheduler.schedule(
            self.timings.win_delay_ms,
            self.generation,
            Deferred::FinalizeWin,
        ) {
            self.finalize_win();
        }
    }

    fn finalize_win(&mut self) -> bool {
        if self.won {
            return false;
        }
        self.won = true;
        debug!(
            generation = self.generation,
            moves = self.move_count,
            seconds = self.elapsed_seconds,
            "round won"
        );
        self.emit(GameEvent::GameWon {
            moves: self.move_count,
            elapsed_seconds: self.elapsed_seconds,
        });
        self.touch();
        true
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_QUEUED_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(1, Timings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Symbol;

    fn started(difficulty: Difficulty) -> GameEngine {
        let mut engine = GameEngine::new(12345, Timings::default());
        engine.start_round(difficulty);
        engine.drain_events().for_each(drop);
        engine
    }

    fn pair_for(engine: &GameEngine, symbol: Symbol) -> (CardId, CardId) {
        let ids: Vec<CardId> = engine
            .cards
            .iter()
            .filter(|c| c.symbol == symbol)
            .map(|c| c.id)
            .collect();
        (ids[0], ids[1])
    }

    fn mismatched(engine: &GameEngine) -> (CardId, CardId) {
        let first = engine.cards[0];
        let other = engine
            .cards
            .iter()
            .find(|c| c.symbol != first.symbol)
            .unwrap();
        (first.id, other.id)
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = GameEngine::new(1, Timings::default());
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert!(engine.cards().is_empty());
        assert_eq!(engine.generation(), 0);
        assert!(!engine.clock_should_run());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut engine = GameEngine::new(1, Timings::default());
        engine.start();
        let generation = engine.generation();
        engine.start();
        assert_eq!(engine.generation(), generation);
        assert_eq!(engine.phase(), RoundPhase::Running);
    }

    #[test]
    fn test_start_round_resets_everything() {
        let mut engine = started(Difficulty::Easy);
        let (a, _) = mismatched(&engine);
        engine.select_card(a);
        engine.tick();
        engine.toggle_pause();

        engine.start_round(Difficulty::Hard);
        assert_eq!(engine.cards().len(), 24);
        assert!(engine.selection().is_empty());
        assert_eq!(engine.move_count(), 0);
        assert_eq!(engine.match_count(), 0);
        assert_eq!(engine.elapsed_seconds(), 0);
        assert!(engine.running());
        assert!(!engine.paused());
        assert!(!engine.won());
        assert!(engine.cards().iter().all(Card::is_selectable));
    }

    #[test]
    fn test_first_card_of_pair_counts_a_move() {
        let mut engine = started(Difficulty::Easy);
        let (a, b) = mismatched(&engine);

        assert!(engine.select_card(a));
        assert_eq!(engine.move_count(), 1);
        assert!(engine.card(a).unwrap().is_revealed);

        assert!(engine.select_card(b));
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.selection(), &[a, b]);
    }

    #[test]
    fn test_selecting_same_card_twice_is_noop() {
        let mut engine = started(Difficulty::Easy);
        assert!(engine.select_card(0));
        let revision = engine.revision();

        assert!(!engine.select_card(0));
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.selection(), &[0]);
        assert_eq!(engine.revision(), revision);
    }

    #[test]
    fn test_third_selection_is_ignored() {
        let mut engine = started(Difficulty::Easy);
        let (a, b) = mismatched(&engine);
        let c = (0..engine.cards().len()).find(|&i| i != a && i != b).unwrap();

        engine.select_card(a);
        engine.select_card(b);
        assert!(!engine.select_card(c));
        assert_eq!(engine.selection().len(), 2);
        assert!(!engine.card(c).unwrap().is_revealed);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut engine = started(Difficulty::Easy);
        assert!(!engine.select_card(999));
        assert_eq!(engine.move_count(), 0);
    }

    #[test]
    fn test_match_resolves_after_match_delay() {
        let mut engine = started(Difficulty::Easy);
        let (a, b) = pair_for(&engine, Symbol::new(0).unwrap());

        engine.select_card(a);
        engine.select_card(b);
        assert!(!engine.advance(499));
        assert_eq!(engine.match_count(), 0);

        assert!(engine.advance(1));
        assert!(engine.card(a).unwrap().is_matched);
        assert!(engine.card(b).unwrap().is_matched);
        assert_eq!(engine.match_count(), 1);
        assert_eq!(engine.move_count(), 1);
        assert!(engine.selection().is_empty());

        let events: Vec<GameEvent> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::MatchFound {
                symbol: Symbol::new(0).unwrap()
            }]
        );
    }

    #[test]
    fn test_mismatch_hides_after_mismatch_delay() {
        let mut engine = started(Difficulty::Easy);
        let (a, c) = mismatched(&engine);

        engine.select_card(a);
        engine.select_card(c);
        engine.advance(500);
        assert!(engine.card(a).unwrap().is_revealed);
        assert_eq!(engine.selection().len(), 2);

        engine.advance(500);
        for id in [a, c] {
            let card = engine.card(id).unwrap();
            assert!(!card.is_revealed);
            assert!(!card.is_matched);
        }
        assert!(engine.selection().is_empty());
        assert_eq!(engine.move_count(), 1);
        assert_eq!(engine.match_count(), 0);
        assert_eq!(engine.drain_events().count(), 0);
    }

    #[test]
    fn test_matched_card_cannot_be_selected_again() {
        let mut engine = started(Difficulty::Easy);
        let (a, b) = pair_for(&engine, Symbol::new(1).unwrap());
        engine.select_card(a);
        engine.select_card(b);
        engine.advance(500);

        assert!(!engine.select_card(a));
        assert!(!engine.select_card(b));
        assert!(engine.selection().is_empty());
    }

    #[test]
    fn test_pause_blocks_selection_and_tick() {
        let mut engine = started(Difficulty::Easy);
        assert!(engine.toggle_pause());
        assert!(!engine.select_card(0));
        for _ in 0..5 {
            assert!(!engine.tick());
        }
        assert_eq!(engine.elapsed_seconds(), 0);

        assert!(engine.toggle_pause());
        for _ in 0..5 {
            assert!(engine.tick());
        }
        assert_eq!(engine.elapsed_seconds(), 5);

        let events: Vec<GameEvent> = engine.drain_events().collect();
        assert_eq!(events, vec![GameEvent::GamePaused, GameEvent::GameResumed]);
    }

    #[test]
    fn test_toggle_pause_ignored_when_not_running() {
        let mut engine = GameEngine::new(1, Timings::default());
        assert!(!engine.toggle_pause());
        assert!(!engine.paused());
    }

    #[test]
    fn test_full_game_reaches_won() {
        let mut engine = started(Difficulty::Easy);
        for index in 0..6 {
            let (a, b) = pair_for(&engine, Symbol::new(index).unwrap());
            engine.tick();
            assert!(engine.select_card(a));
            assert!(engine.select_card(b));
            engine.advance(500);
        }

        assert_eq!(engine.match_count(), 6);
        assert!(!engine.running());
        assert!(!engine.won());
        assert_eq!(engine.phase(), RoundPhase::Finishing);
        assert!(!engine.select_card(0));

        engine.advance(499);
        assert!(!engine.won());
        engine.advance(1);
        assert!(engine.won());
        assert_eq!(engine.phase(), RoundPhase::Won);
        assert!(!engine.tick());

        let last = engine.drain_events().last();
        assert_eq!(
            last,
            Some(GameEvent::GameWon {
                moves: 6,
                elapsed_seconds: 6
            })
        );
    }

    #[test]
    fn test_win_delay_runs_from_final_match_within_one_step() {
        let mut engine = started(Difficulty::Easy);
        for index in 0..5 {
            let (a, b) = pair_for(&engine, Symbol::new(index).unwrap());
            engine.select_card(a);
            engine.select_card(b);
            engine.advance(500);
        }
        let (a, b) = pair_for(&engine, Symbol::new(5).unwrap());
        engine.select_card(a);
        engine.select_card(b);

        // 500ms match delay + 500ms win delay in a single step.
        assert!(engine.advance(1000));
        assert_eq!(engine.match_count(), 6);
        assert!(engine.won());
        assert_eq!(engine.pending_tasks(), 0);
        assert_eq!(engine.next_due_in(), None);
    }

    #[test]
    fn test_win_not_early_within_one_step() {
        let mut engine = started(Difficulty::Easy);
        for index in 0..6 {
            let (a, b) = pair_for(&engine, Symbol::new(index).unwrap());
            engine.select_card(a);
            engine.select_card(b);
            if index < 5 {
                engine.advance(500);
            }
        }
        engine.advance(999);
        assert_eq!(engine.match_count(), 6);
        assert!(!engine.won());
        assert_eq!(engine.next_due_in(), Some(1));
        engine.advance(1);
        assert!(engine.won());
    }

    #[test]
    fn test_event_queue_drops_oldest_when_full() {
        let mut engine = started(Difficulty::Easy);
        engine.drain_events().for_each(drop);
        for _ in 0..(MAX_QUEUED_EVENTS + 1) {
            engine.toggle_pause();
        }
        let events: Vec<GameEvent> = engine.drain_events().collect();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        // The very first GamePaused was dropped.
        assert_eq!(events[0], GameEvent::GameResumed);
    }

    #[test]
    fn test_final_match_while_paused_still_wins() {
        let mut engine = started(Difficulty::Easy);
        for index in 0..5 {
            let (a, b) = pair_for(&engine, Symbol::new(index).unwrap());
            engine.select_card(a);
            engine.select_card(b);
            engine.advance(500);
        }
        let (a, b) = pair_for(&engine, Symbol::new(5).unwrap());
        engine.select_card(a);
        engine.select_card(b);
        engine.toggle_pause();

        engine.advance(500);
        assert!(!engine.paused());
        assert!(!engine.running());
        engine.advance(500);
        assert!(engine.won());
    }

    #[test]
    fn test_reset_cancels_pending_resolution() {
        let mut engine = started(Difficulty::Easy);
        let (a, c) = mismatched(&engine);
        engine.select_card(a);
        engine.select_card(c);
        assert_eq!(engine.pending_tasks(), 1);

        engine.reset();
        assert_eq!(engine.pending_tasks(), 0);
        let fresh = engine.snapshot();

        engine.advance(5_000);
        let after = engine.snapshot();
        assert_eq!(after.cards, fresh.cards);
        assert_eq!(after.revision, fresh.revision);
    }

    #[test]
    fn test_stale_task_is_dropped() {
        let mut engine = started(Difficulty::Easy);
        let stale = engine.generation();
        engine.reset();

        let (a, b) = pair_for(&engine, Symbol::new(0).unwrap());
        engine.select_card(a);
        engine.select_card(b);
        engine.scheduler.cancel_all();
        engine
            .scheduler
            .schedule(0, stale, Deferred::ResolveSelection);
        engine.scheduler.schedule(0, stale, Deferred::FinalizeWin);

        assert!(!engine.advance(0));
        assert_eq!(engine.selection(), &[a, b]);
        assert_eq!(engine.match_count(), 0);
        assert!(!engine.won());
    }

    #[test]
    fn test_round_started_event() {
        let mut engine = GameEngine::new(1, Timings::default());
        engine.apply(Intent::StartRound {
            difficulty: Difficulty::Medium,
        });
        let events: Vec<GameEvent> = engine.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::RoundStarted {
                difficulty: Difficulty::Medium,
                pair_count: 8
            }]
        );
    }

    #[test]
    fn test_reset_keeps_difficulty_and_bumps_generation() {
        let mut engine = started(Difficulty::Hard);
        let generation = engine.generation();
        assert!(engine.apply(Intent::Reset));
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.generation(), generation + 1);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let a = started(Difficulty::Hard);
        let b = started(Difficulty::Hard);
        assert_eq!(a.cards(), b.cards());
    }

    #[test]
    fn test_snapshot_mirrors_engine() {
        let mut engine = started(Difficulty::Easy);
        engine.select_card(3);
        engine.tick();
        let snap = engine.snapshot();

        assert_eq!(snap.cards.len(), 12);
        assert_eq!(snap.selection.as_slice(), &[3]);
        assert_eq!(snap.move_count, 1);
        assert_eq!(snap.pair_count, 6);
        assert_eq!(snap.elapsed_seconds, 1);
        assert_eq!(snap.generation, engine.generation());
        assert_eq!(snap.revision, engine.revision());
        assert_eq!(snap.phase(), RoundPhase::Running);
    }

    #[test]
    fn test_mismatch_delay_never_shorter_than_match_delay() {
        let engine = GameEngine::new(
            1,
            Timings {
                match_delay_ms: 700,
                mismatch_delay_ms: 10,
                ..Timings::default()
            },
        );
        assert_eq!(engine.timings().mismatch_delay_ms, 700);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Select(usize),
            Pause,
            Tick,
            Advance(u32),
            Reset,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                6 => (0usize..30).prop_map(Op::Select),
                1 => Just(Op::Pause),
                2 => Just(Op::Tick),
                3 => (0u32..1500).prop_map(Op::Advance),
                1 => Just(Op::Reset),
            ]
        }

        fn check_invariants(engine: &GameEngine) {
            assert!(engine.selection().len() <= 2);
            for &id in engine.selection() {
                let card = engine.card(id).unwrap();
                assert!(card.is_revealed && !card.is_matched);
            }
            assert!(engine.match_count() <= engine.pair_count());
            if engine.won() {
                assert_eq!(engine.match_count(), engine.pair_count());
            }
            let matched = engine.cards().iter().filter(|c| c.is_matched).count() as u32;
            assert_eq!(matched, engine.match_count() * 2);
        }

        proptest! {
            #[test]
            fn invariants_hold_for_any_intent_sequence(
                seed in any::<u64>(),
                ops in proptest::collection::vec(op(), 0..200),
            ) {
                let mut engine = GameEngine::new(seed, Timings::default());
                engine.start_round(Difficulty::Easy);
                for op in ops {
                    let moves_before = engine.move_count();
                    let selected_before = engine.selection().len();
                    match op {
                        Op::Select(id) => {
                            let already = engine.selection().contains(&id);
                            engine.select_card(id);
                            if already {
                                prop_assert_eq!(engine.move_count(), moves_before);
                            }
                            if engine.move_count() > moves_before {
                                prop_assert_eq!(selected_before, 0);
                            }
                        }
                        Op::Pause => { engine.toggle_pause(); }
                        Op::Tick => { engine.tick(); }
                        Op::Advance(ms) => { engine.advance(ms); }
                        Op::Reset => engine.reset(),
                    }
                    check_invariants(&engine);
                }
            }
        }
    }
}
