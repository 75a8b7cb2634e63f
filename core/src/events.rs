use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Text shown under the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    #[default]
    Blank,
    Memorize,
    Progress {
        done: usize,
        total: usize,
    },
    YourTurn,
    RoundWon,
    RoundLost,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank => Ok(()),
            Self::Memorize => f.write_str("Memorize..."),
            Self::Progress { done, total } => write!(f, "{done} / {total}"),
            Self::YourTurn => f.write_str("Your turn!"),
            Self::RoundWon => f.write_str("Success!"),
            Self::RoundLost => f.write_str("Try again!"),
        }
    }
}

/// Notifications for the presentation layer, drained with [`Session::take_events`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new grid must be built; every cell starts neutral.
    GridNeeded { shape: GridShape },
    CellChanged { index: CellIndex, cell: CellView },
    HintChanged(Hint),
    /// Playback finished, clicks are accepted.
    PlayerTurn,
    ClockChanged { remaining: u32 },
    ScoreChanged { score: u32 },
    RoundEnded(RoundOutcome),
    SessionEnded { final_score: u32 },
}
