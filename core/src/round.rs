use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round in progress: between rounds, before the first one, or after the session ended.
    #[default]
    Idle,
    /// The sequence is being played back, clicks are ignored.
    Revealing,
    /// Waiting for the player to reproduce the sequence.
    Playing,
    Succeeded,
    Failed,
}

impl RoundPhase {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Stray or repeated click, nothing changed.
    NoChange,
    /// Next expected cell; `progress` cells are now done.
    Correct { progress: usize },
    /// Last expected cell, the round is won.
    Completed,
    /// Wrong cell, the round is lost.
    Wrong,
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Order-checking state machine for a single round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    sequence: Sequence,
    total_cells: CellCount,
    progress: usize,
    phase: RoundPhase,
}

impl Round {
    /// Starts in [`RoundPhase::Revealing`].
    pub fn new(sequence: Sequence, total_cells: CellCount) -> Self {
        assert!(
            sequence.len() <= usize::from(total_cells),
            "sequence longer than the grid"
        );
        Self {
            sequence,
            total_cells,
            progress: 0,
            phase: RoundPhase::Revealing,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Cells clicked correctly so far, in click order.
    pub fn accepted(&self) -> &[CellIndex] {
        &self.sequence.as_slice()[..self.progress]
    }

    pub fn is_accepting_input(&self) -> bool {
        matches!(self.phase, RoundPhase::Playing)
    }

    /// Playback is over; clicks count from now on.
    pub fn begin_input(&mut self) {
        if matches!(self.phase, RoundPhase::Revealing) {
            self.phase = RoundPhase::Playing;
        }
    }

    /// Stops the round without an outcome, e.g. when the clock runs out.
    pub fn abort(&mut self) {
        if !self.phase.is_finished() {
            self.phase = RoundPhase::Idle;
        }
    }

    pub fn click(&mut self, index: CellIndex, stray: StrayClick) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        if index >= self.total_cells {
            return Err(GameError::InvalidCell);
        }
        self.check_playing()?;

        if self.accepted().contains(&index) {
            return Ok(NoChange);
        }

        if self.sequence.get(self.progress) == Some(index) {
            self.progress += 1;
            if self.progress == self.sequence.len() {
                self.phase = RoundPhase::Succeeded;
                return Ok(Completed);
            }
            return Ok(Correct {
                progress: self.progress,
            });
        }

        match (self.sequence.contains(index), stray) {
            (false, StrayClick::Ignore) => Ok(NoChange),
            (true, _) | (false, StrayClick::Fail) => {
                self.phase = RoundPhase::Failed;
                Ok(Wrong)
            }
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.is_accepting_input() {
            Ok(())
        } else {
            Err(GameError::NotAcceptingInput)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(indices: &[CellIndex], total: CellCount) -> Round {
        let mut round = Round::new(Sequence::from_distinct(indices.iter().copied()), total);
        round.begin_input();
        round
    }

    #[test]
    fn clicks_during_playback_are_rejected() {
        let mut round = Round::new(Sequence::from_distinct([1, 2]), 4);

        assert_eq!(
            round.click(1, StrayClick::Fail),
            Err(GameError::NotAcceptingInput)
        );
        assert_eq!(round.progress(), 0);
        assert_eq!(round.phase(), RoundPhase::Revealing);
    }

    #[test]
    fn in_order_clicks_complete_once() {
        let mut round = playing(&[4, 0, 2], 6);

        assert_eq!(
            round.click(4, StrayClick::Fail),
            Ok(ClickOutcome::Correct { progress: 1 })
        );
        assert_eq!(
            round.click(0, StrayClick::Fail),
            Ok(ClickOutcome::Correct { progress: 2 })
        );
        assert_eq!(round.click(2, StrayClick::Fail), Ok(ClickOutcome::Completed));
        assert_eq!(round.phase(), RoundPhase::Succeeded);
        assert_eq!(round.accepted(), &[4, 0, 2]);
        assert_eq!(
            round.click(1, StrayClick::Fail),
            Err(GameError::NotAcceptingInput)
        );
    }

    #[test]
    fn out_of_order_member_fails_and_locks_input() {
        let mut round = playing(&[4, 0, 2], 6);

        round.click(4, StrayClick::Ignore).unwrap();
        assert_eq!(round.click(2, StrayClick::Ignore), Ok(ClickOutcome::Wrong));
        assert_eq!(round.phase(), RoundPhase::Failed);
        assert_eq!(
            round.click(0, StrayClick::Ignore),
            Err(GameError::NotAcceptingInput)
        );
        assert_eq!(round.progress(), 1);
    }

    #[test]
    fn repeated_click_on_accepted_cell_is_ignored() {
        let mut round = playing(&[3, 1], 4);

        round.click(3, StrayClick::Fail).unwrap();
        assert_eq!(round.click(3, StrayClick::Fail), Ok(ClickOutcome::NoChange));
        assert_eq!(round.progress(), 1);
        assert_eq!(round.phase(), RoundPhase::Playing);
    }

    #[test]
    fn stray_click_follows_policy() {
        let mut lenient = playing(&[3, 1], 4);
        let ignored = lenient.click(0, StrayClick::Ignore);
        assert_eq!(ignored, Ok(ClickOutcome::NoChange));
        assert!(!ClickOutcome::NoChange.has_update());
        assert!(lenient.is_accepting_input());

        let mut strict = playing(&[3, 1], 4);
        assert_eq!(strict.click(0, StrayClick::Fail), Ok(ClickOutcome::Wrong));
        assert!(ClickOutcome::Wrong.has_update());
        assert_eq!(strict.phase(), RoundPhase::Failed);
    }

    #[test]
    fn out_of_range_click_is_an_error_without_state_change() {
        let mut round = playing(&[0], 2);

        assert_eq!(round.click(2, StrayClick::Fail), Err(GameError::InvalidCell));
        assert!(round.is_accepting_input());
    }

    #[test]
    fn abort_keeps_finished_phase() {
        let mut running = playing(&[0, 1], 2);
        running.abort();
        assert_eq!(running.phase(), RoundPhase::Idle);

        let mut done = playing(&[0], 2);
        done.click(0, StrayClick::Fail).unwrap();
        done.abort();
        assert_eq!(done.phase(), RoundPhase::Succeeded);
    }
}
