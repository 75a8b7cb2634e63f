//! Timed reveal of a round's sequence.
//!
//! A [`PlaybackPlan`] is a list of cues with offsets from the moment playback starts. The session schedules every
//! cue on its timeline and applies them with [`apply_cue`] as they come due. Input stays disabled until
//! [`PlaybackCue::Finish`] runs.

use core::time::Duration;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackCue {
    /// Light up the cell at this sequence position and leave it lit.
    Highlight(usize),
    /// Show the 1-based position label on the cell at this sequence position.
    ShowLabel(usize),
    /// Remove the label again, leaving a plain revealed mark.
    HideLabel(usize),
    /// Turn every cell back to neutral.
    ClearAll,
    /// Playback is over, hand over to the player.
    Finish,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackPlan {
    cues: Vec<(Duration, PlaybackCue)>,
}

impl PlaybackPlan {
    pub fn new(style: RevealStyle, len: usize) -> Self {
        let mut cues = Vec::with_capacity(2 * len + 2);

        match style {
            RevealStyle::Cumulative { step_ms, settle_ms } => {
                let step = Duration::from_millis(step_ms.into());
                for pos in 0..len {
                    cues.push((step * (pos as u32 + 1), PlaybackCue::Highlight(pos)));
                }
                let done = step * (len as u32 + 1) + Duration::from_millis(settle_ms.into());
                cues.push((done, PlaybackCue::ClearAll));
                cues.push((done, PlaybackCue::Finish));
            }
            RevealStyle::Flash { step_ms } => {
                let step = Duration::from_millis(step_ms.into());
                for pos in 0..len {
                    cues.push((step * pos as u32, PlaybackCue::ShowLabel(pos)));
                    cues.push((step * (pos as u32 + 1), PlaybackCue::HideLabel(pos)));
                }
                cues.push((step * len as u32, PlaybackCue::Finish));
            }
        }

        Self { cues }
    }

    /// Cues in the order they must run, offsets relative to playback start.
    pub fn cues(&self) -> &[(Duration, PlaybackCue)] {
        &self.cues
    }
}

/// Applies one cue to the board, returning the cells whose view changed.
pub fn apply_cue(
    cue: PlaybackCue,
    sequence: &Sequence,
    board: &mut Board,
) -> Vec<(CellIndex, CellView)> {
    let at = |pos: usize| sequence.get(pos);

    let changed = match cue {
        PlaybackCue::Highlight(pos) => at(pos).and_then(|index| {
            board
                .set_visual(index, CellVisual::Revealing)
                .map(|view| (index, view))
        }),
        PlaybackCue::ShowLabel(pos) => at(pos).and_then(|index| {
            let view = CellView {
                visual: CellVisual::Revealing,
                label: Some(pos as u16 + 1),
            };
            board.set(index, view).map(|view| (index, view))
        }),
        PlaybackCue::HideLabel(pos) => at(pos).and_then(|index| {
            let view = CellView {
                visual: CellVisual::Revealed,
                label: None,
            };
            board.set(index, view).map(|view| (index, view))
        }),
        PlaybackCue::ClearAll => {
            return board
                .clear()
                .into_iter()
                .map(|index| (index, board[index]))
                .collect();
        }
        PlaybackCue::Finish => None,
    };

    changed.into_iter().collect()
}

/// Shows the player the answer after a failed round.
///
/// Cumulative style marks every member that was not clicked yet; flash style labels every member with its
/// position. Cells marked incorrect keep that mark.
pub fn reveal_answer(
    style: RevealStyle,
    sequence: &Sequence,
    progress: usize,
    board: &mut Board,
) -> Vec<(CellIndex, CellView)> {
    let mut changed = Vec::new();

    for (pos, index) in sequence.iter().enumerate() {
        let Some(current) = board.cell(index) else {
            continue;
        };
        let view = match style {
            RevealStyle::Cumulative { .. } if pos < progress => continue,
            RevealStyle::Cumulative { .. } if current.visual == CellVisual::Incorrect => continue,
            RevealStyle::Cumulative { .. } => CellView {
                visual: CellVisual::Revealed,
                ..current
            },
            RevealStyle::Flash { .. } => CellView {
                label: Some(pos as u16 + 1),
                ..current
            },
        };
        if let Some(view) = board.set(index, view) {
            changed.push((index, view));
        }
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUMULATIVE: RevealStyle = RevealStyle::Cumulative {
        step_ms: 400,
        settle_ms: 500,
    };
    const FLASH: RevealStyle = RevealStyle::Flash { step_ms: 500 };

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn cumulative_plan_matches_step_timing() {
        let plan = PlaybackPlan::new(CUMULATIVE, 3);

        assert_eq!(
            plan.cues(),
            &[
                (ms(400), PlaybackCue::Highlight(0)),
                (ms(800), PlaybackCue::Highlight(1)),
                (ms(1200), PlaybackCue::Highlight(2)),
                (ms(2100), PlaybackCue::ClearAll),
                (ms(2100), PlaybackCue::Finish),
            ]
        );
    }

    #[test]
    fn flash_plan_hides_before_showing_next() {
        let plan = PlaybackPlan::new(FLASH, 2);

        assert_eq!(
            plan.cues(),
            &[
                (ms(0), PlaybackCue::ShowLabel(0)),
                (ms(500), PlaybackCue::HideLabel(0)),
                (ms(500), PlaybackCue::ShowLabel(1)),
                (ms(1000), PlaybackCue::HideLabel(1)),
                (ms(1000), PlaybackCue::Finish),
            ]
        );
    }

    #[test]
    fn cumulative_highlights_stay_until_cleared() {
        let sequence = Sequence::from_distinct([3, 1]);
        let mut board = Board::new(GridShape::new(2, 2));

        for &(_, cue) in PlaybackPlan::new(CUMULATIVE, 2).cues() {
            if cue == PlaybackCue::ClearAll {
                assert_eq!(board[3].visual, CellVisual::Revealing);
                assert_eq!(board[1].visual, CellVisual::Revealing);
            }
            apply_cue(cue, &sequence, &mut board);
        }

        assert!(board.iter().all(|(_, view)| view.is_neutral()));
    }

    #[test]
    fn flash_leaves_revealed_marks_without_labels() {
        let sequence = Sequence::from_distinct([2, 0]);
        let mut board = Board::new(GridShape::new(1, 3));

        let shown = apply_cue(PlaybackCue::ShowLabel(1), &sequence, &mut board);
        assert_eq!(
            shown,
            vec![(
                0,
                CellView {
                    visual: CellVisual::Revealing,
                    label: Some(2)
                }
            )]
        );

        for &(_, cue) in PlaybackPlan::new(FLASH, 2).cues() {
            apply_cue(cue, &sequence, &mut board);
        }
        assert_eq!(board[2].visual, CellVisual::Revealed);
        assert_eq!(board[0].label, None);
        assert!(board[1].is_neutral());
    }

    #[test]
    fn cumulative_answer_skips_clicked_and_incorrect_cells() {
        let sequence = Sequence::from_distinct([0, 1, 2, 3]);
        let mut board = Board::new(GridShape::new(2, 2));
        board.set_visual(0, CellVisual::Correct);
        board.set_visual(2, CellVisual::Incorrect);

        let changed = reveal_answer(CUMULATIVE, &sequence, 1, &mut board);

        let indices: Vec<_> = changed.iter().map(|&(index, _)| index).collect();
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(board[0].visual, CellVisual::Correct);
        assert_eq!(board[2].visual, CellVisual::Incorrect);
    }

    #[test]
    fn flash_answer_labels_every_position() {
        let sequence = Sequence::from_distinct([4, 2, 0]);
        let mut board = Board::new(GridShape::new(1, 5));

        reveal_answer(FLASH, &sequence, 1, &mut board);

        assert_eq!(board[4].label, Some(1));
        assert_eq!(board[2].label, Some(2));
        assert_eq!(board[0].label, Some(3));
        assert_eq!(board[1].label, None);
    }
}
