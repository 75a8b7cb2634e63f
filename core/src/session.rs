use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

const TICK: Duration = Duration::from_secs(1);

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    NotStarted,
    Running,
    Ended,
}

/// Everything that lives for a whole session and is reset by a new one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub standing: Standing,
    pub score: u32,
    pub countdown: Countdown,
    pub phase: SessionPhase,
    pub rounds_played: u32,
}

impl SessionState {
    pub fn new(rules: &Rules) -> Self {
        let difficulty = rules.starting_difficulty();
        let level = match rules.level {
            LevelProgression::FollowsDifficulty => difficulty,
            LevelProgression::EveryRound => 1,
        };
        Self {
            standing: Standing { difficulty, level },
            score: 0,
            countdown: Countdown::new(rules.session_secs),
            phase: SessionPhase::NotStarted,
            rounds_played: 0,
        }
    }

    pub fn reset(&mut self, rules: &Rules) {
        *self = Self::new(rules);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Task {
    Tick,
    Cue(PlaybackCue),
    NextRound,
}

/// Runs timed sessions of rounds against one scheduler timeline.
#[derive(Clone, Debug)]
pub struct Session<G = RandomSequenceGenerator> {
    rules: Rules,
    generator: G,
    state: SessionState,
    board: Board,
    round: Option<Round>,
    hint: Hint,
    scheduler: Scheduler<Task>,
    events: Vec<SessionEvent>,
}

impl<G: SequenceGenerator> Session<G> {
    pub fn new(rules: Rules, generator: G) -> Self {
        let state = SessionState::new(&rules);
        let board = Board::new(rules.grid.shape(state.standing.difficulty));
        Self {
            rules,
            generator,
            state,
            board,
            round: None,
            hint: Hint::Blank,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase
    }

    pub fn level(&self) -> u32 {
        self.state.standing.level
    }

    pub fn difficulty(&self) -> u32 {
        self.state.standing.difficulty
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn remaining_time(&self) -> u32 {
        self.state.countdown.remaining()
    }

    pub fn remaining_time_formatted(&self) -> String {
        self.state.countdown.formatted()
    }

    pub fn hint(&self) -> Hint {
        self.hint
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, index: CellIndex) -> Option<CellView> {
        self.board.cell(index)
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_phase(&self) -> RoundPhase {
        self.round.as_ref().map_or(RoundPhase::Idle, Round::phase)
    }

    pub fn is_accepting_input(&self) -> bool {
        self.state.phase == SessionPhase::Running
            && self.round.as_ref().is_some_and(Round::is_accepting_input)
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next timed task is due, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        core::mem::take(&mut self.events)
    }

    /// Resets all session state and begins round one; any pending timers are dropped first.
    pub fn start(&mut self) {
        let stale = self.scheduler.cancel_all();
        if stale > 0 {
            log::debug!("dropped {} pending tasks from the previous session", stale);
        }

        self.state.reset(&self.rules);
        self.state.phase = SessionPhase::Running;
        self.round = None;
        self.rebuild_board();
        self.emit(SessionEvent::ScoreChanged { score: 0 });
        self.emit(SessionEvent::ClockChanged {
            remaining: self.state.countdown.remaining(),
        });

        if self.state.countdown.is_expired() {
            log::warn!("session length is zero, ending at once");
            self.end_session();
            return;
        }

        let first_tick = self.scheduler.now() + TICK;
        self.scheduler.schedule_at(first_tick, Task::Tick);
        log::debug!(
            "session started: {}s, difficulty {}",
            self.rules.session_secs,
            self.state.standing.difficulty
        );

        self.start_round();
    }

    pub fn restart(&mut self) {
        self.start();
    }

    /// Ends the session now, as if the clock had run out.
    pub fn end(&mut self) {
        self.end_session();
    }

    /// Clicks that are out of range, repeated, stray (when ignored) or made outside the player's turn are no-ops.
    pub fn handle_cell_click(&mut self, index: CellIndex) -> ClickOutcome {
        match self.try_click(index) {
            Ok(outcome) => outcome,
            Err(err) => {
                log::debug!("click on cell {} ignored: {}", index, err);
                ClickOutcome::NoChange
            }
        }
    }

    /// Runs every task due up to `now`, in order.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((id, task)) = self.scheduler.pop_due(now) {
            self.run_task(id.due(), task);
        }
        self.scheduler.advance_to(now);
    }

    pub fn advance_by(&mut self, dt: Duration) {
        self.advance_to(self.scheduler.now().saturating_add(dt));
    }

    fn try_click(&mut self, index: CellIndex) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        self.check_running()?;
        let index = self.board.validate_index(index)?;
        let stray = self.rules.stray_click;
        let round = self.round.as_mut().ok_or(GameError::NotAcceptingInput)?;
        let outcome = round.click(index, stray)?;
        let (done, total) = (round.progress(), round.sequence().len());

        match outcome {
            NoChange => {}
            Correct { .. } => {
                self.mark(index, CellVisual::Correct);
                self.award_click();
                if self.rules.hint == HintStyle::Progress {
                    self.set_hint(Hint::Progress { done, total });
                }
            }
            Completed => {
                self.mark(index, CellVisual::Correct);
                self.award_click();
                self.finish_round(RoundOutcome::Success);
            }
            Wrong => {
                self.mark(index, CellVisual::Incorrect);
                self.finish_round(RoundOutcome::Failure);
            }
        }

        Ok(outcome)
    }

    fn run_task(&mut self, due: Duration, task: Task) {
        log::trace!("{:?} due at {:?}", task, due);
        match task {
            Task::Tick => self.tick(due),
            Task::Cue(cue) => self.play_cue(cue),
            Task::NextRound => self.start_round(),
        }
    }

    fn tick(&mut self, due: Duration) {
        match self.state.countdown.tick() {
            CountdownTick::Running(remaining) => {
                self.emit(SessionEvent::ClockChanged { remaining });
                self.scheduler.schedule_at(due + TICK, Task::Tick);
            }
            CountdownTick::Expired => {
                self.emit(SessionEvent::ClockChanged { remaining: 0 });
                self.end_session();
            }
            CountdownTick::AlreadyExpired => {}
        }
    }

    fn start_round(&mut self) {
        if self.state.phase != SessionPhase::Running {
            return;
        }

        if self.rules.grid.rebuilds_each_round() && self.state.rounds_played > 0 {
            self.rebuild_board();
        } else {
            for index in self.board.clear() {
                self.emit(SessionEvent::CellChanged {
                    index,
                    cell: CellView::default(),
                });
            }
        }

        let total = self.board.total_cells();
        let length = self
            .rules
            .sequence_length(self.state.standing.difficulty, total);
        let sequence = self.generator.generate(total, length);
        log::debug!(
            "round {}: difficulty {}, {} of {} cells",
            self.state.rounds_played + 1,
            self.state.standing.difficulty,
            length,
            total
        );

        let plan = PlaybackPlan::new(self.rules.reveal, sequence.len());
        let playback_start = self.scheduler.now() + self.rules.lead_in();
        for &(offset, cue) in plan.cues() {
            self.scheduler
                .schedule_at(playback_start + offset, Task::Cue(cue));
        }

        self.round = Some(Round::new(sequence, total));
        self.set_hint(match self.rules.hint {
            HintStyle::Progress => Hint::Memorize,
            HintStyle::YourTurn => Hint::Blank,
        });
    }

    fn play_cue(&mut self, cue: PlaybackCue) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let changed = apply_cue(cue, round.sequence(), &mut self.board);
        let total = round.sequence().len();
        if cue == PlaybackCue::Finish {
            round.begin_input();
        }

        for (index, cell) in changed {
            self.emit(SessionEvent::CellChanged { index, cell });
        }

        if cue == PlaybackCue::Finish {
            self.set_hint(match self.rules.hint {
                HintStyle::Progress => Hint::Progress { done: 0, total },
                HintStyle::YourTurn => Hint::YourTurn,
            });
            self.emit(SessionEvent::PlayerTurn);
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        let shown = match self.round.as_ref() {
            Some(round) if outcome == RoundOutcome::Failure => reveal_answer(
                self.rules.reveal,
                round.sequence(),
                round.progress(),
                &mut self.board,
            ),
            _ => Vec::new(),
        };
        for (index, cell) in shown {
            self.emit(SessionEvent::CellChanged { index, cell });
        }

        let before = self.state.standing;
        let settlement = settle(&self.rules, before, outcome, self.board.shape().rows);
        self.state.standing = settlement.standing;
        self.state.rounds_played += 1;
        if settlement.score_delta > 0 {
            self.add_score(settlement.score_delta);
        }
        log::debug!(
            "round {:?}: difficulty {} -> {}, level {} -> {}, score {}",
            outcome,
            before.difficulty,
            settlement.standing.difficulty,
            before.level,
            settlement.standing.level,
            self.state.score
        );

        self.set_hint(match outcome {
            RoundOutcome::Success => Hint::RoundWon,
            RoundOutcome::Failure => Hint::RoundLost,
        });
        self.emit(SessionEvent::RoundEnded(outcome));
        self.scheduler
            .schedule_in(self.rules.round_delay(outcome), Task::NextRound);
    }

    fn end_session(&mut self) {
        if self.state.phase != SessionPhase::Running {
            return;
        }

        self.state.phase = SessionPhase::Ended;
        self.scheduler.cancel_all();
        if let Some(round) = self.round.as_mut() {
            round.abort();
        }
        log::debug!(
            "session ended after {} rounds with score {}",
            self.state.rounds_played,
            self.state.score
        );
        self.emit(SessionEvent::SessionEnded {
            final_score: self.state.score,
        });
    }

    fn rebuild_board(&mut self) {
        let shape = self.rules.grid.shape(self.state.standing.difficulty);
        self.board = Board::new(shape);
        self.emit(SessionEvent::GridNeeded { shape });
    }

    fn award_click(&mut self) {
        let reward = click_reward(&self.rules.scoring, self.state.standing.level);
        if reward > 0 {
            self.add_score(reward);
        }
    }

    fn add_score(&mut self, delta: u32) {
        self.state.score = self.state.score.saturating_add(delta);
        self.emit(SessionEvent::ScoreChanged {
            score: self.state.score,
        });
    }

    fn mark(&mut self, index: CellIndex, visual: CellVisual) {
        if let Some(cell) = self.board.set_visual(index, visual) {
            self.emit(SessionEvent::CellChanged { index, cell });
        }
    }

    fn set_hint(&mut self, hint: Hint) {
        if self.hint != hint {
            self.hint = hint;
            self.emit(SessionEvent::HintChanged(hint));
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    fn check_running(&self) -> Result<()> {
        if self.state.phase == SessionPhase::Running {
            Ok(())
        } else {
            Err(GameError::SessionNotRunning)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_depends_on_level_progression() {
        let grids = SessionState::new(&Rules::memory_grids());
        assert_eq!(grids.standing, Standing { difficulty: 2, level: 1 });
        assert_eq!(grids.countdown.remaining(), 60);
        assert_eq!(grids.phase, SessionPhase::NotStarted);

        let sprint = SessionState::new(&Rules::sequence_sprint().with_session_secs(30));
        assert_eq!(sprint.standing, Standing { difficulty: 1, level: 1 });
        assert_eq!(sprint.countdown.remaining(), 30);
    }

    #[test]
    fn new_session_waits_for_start() {
        let mut session = Session::new(Rules::default(), RandomSequenceGenerator::new(1));
        assert_eq!(session.next_deadline(), None);
        assert_eq!(session.handle_cell_click(0), ClickOutcome::NoChange);

        session.advance_by(Duration::from_secs(120));
        assert_eq!(session.phase(), SessionPhase::NotStarted);
        assert!(session.take_events().is_empty());
    }

    #[test]
    fn ending_twice_reports_once() {
        let mut session = Session::new(Rules::default(), RandomSequenceGenerator::new(1));
        session.start();
        session.take_events();

        session.end();
        session.end();
        let ended = session
            .take_events()
            .into_iter()
            .filter(|event| matches!(event, SessionEvent::SessionEnded { .. }))
            .count();
        assert_eq!(ended, 1);
        assert_eq!(session.next_deadline(), None);
    }
}
