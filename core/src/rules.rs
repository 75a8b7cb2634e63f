use core::str::FromStr;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// How the grid shape is chosen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GridRule {
    /// Same grid for the whole session, built once at session start.
    Fixed { rows: Dim, cols: Dim },
    /// `n × (n + 1)` with `n` the current difficulty, rebuilt every round.
    ByDifficulty,
}

impl GridRule {
    pub fn shape(self, difficulty: u32) -> GridShape {
        match self {
            Self::Fixed { rows, cols } => GridShape::new(rows, cols),
            Self::ByDifficulty => {
                let n = difficulty.clamp(1, u32::from(Dim::MAX - 1)) as Dim;
                GridShape::new(n, n + 1)
            }
        }
    }

    pub const fn rebuilds_each_round(self) -> bool {
        matches!(self, Self::ByDifficulty)
    }
}

/// Whether the level shown to the player is its own counter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelProgression {
    /// Level and difficulty are one quantity.
    FollowsDifficulty,
    /// Level goes up by one after every round, won or lost.
    EveryRound,
}

/// What a click on a cell outside the sequence does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrayClick {
    Ignore,
    Fail,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RevealStyle {
    /// Cells light up one after another and stay lit until the whole sequence was shown.
    Cumulative { step_ms: u32, settle_ms: u32 },
    /// Each cell flashes its 1-based position, then keeps a plain "revealed" mark.
    Flash { step_ms: u32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintStyle {
    /// "Memorize..." during playback, then "done / total" while the player clicks.
    Progress,
    /// Nothing during playback, then "Your turn!".
    YourTurn,
}

/// Score constants; every multiplier is the level at the time of the award.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    pub per_click: u32,
    pub per_round: u32,
    /// Round bonus per grid row.
    pub per_row: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub grid: GridRule,
    pub initial_difficulty: u32,
    pub difficulty_floor: u32,
    /// Sequence length is `difficulty + sequence_offset`, capped at the cell count.
    pub sequence_offset: u32,
    pub level: LevelProgression,
    pub stray_click: StrayClick,
    pub scoring: Scoring,
    pub reveal: RevealStyle,
    pub hint: HintStyle,
    pub lead_in_ms: u32,
    pub success_delay_ms: u32,
    pub failure_delay_ms: u32,
    pub session_secs: u32,
}

impl Rules {
    pub const fn memory_grids() -> Self {
        Self {
            grid: GridRule::ByDifficulty,
            initial_difficulty: 2,
            difficulty_floor: 2,
            sequence_offset: 1,
            level: LevelProgression::EveryRound,
            stray_click: StrayClick::Fail,
            scoring: Scoring {
                per_click: 10,
                per_round: 0,
                per_row: 50,
            },
            reveal: RevealStyle::Cumulative {
                step_ms: 400,
                settle_ms: 500,
            },
            hint: HintStyle::Progress,
            lead_in_ms: 1000,
            success_delay_ms: 1500,
            failure_delay_ms: 2000,
            session_secs: 60,
        }
    }

    pub const fn sequence_sprint() -> Self {
        Self {
            grid: GridRule::Fixed { rows: 5, cols: 6 },
            initial_difficulty: 1,
            difficulty_floor: 1,
            sequence_offset: 4,
            level: LevelProgression::FollowsDifficulty,
            stray_click: StrayClick::Ignore,
            scoring: Scoring {
                per_click: 0,
                per_round: 10,
                per_row: 0,
            },
            reveal: RevealStyle::Flash { step_ms: 500 },
            hint: HintStyle::YourTurn,
            lead_in_ms: 1000,
            success_delay_ms: 1500,
            failure_delay_ms: 2000,
            session_secs: 60,
        }
    }

    pub const fn with_session_secs(mut self, session_secs: u32) -> Self {
        self.session_secs = session_secs;
        self
    }

    /// Difficulty a fresh session starts at, never below the floor.
    pub fn starting_difficulty(&self) -> u32 {
        self.initial_difficulty.max(self.difficulty_floor)
    }

    pub fn sequence_length(&self, difficulty: u32, total_cells: CellCount) -> CellCount {
        let wanted = difficulty.saturating_add(self.sequence_offset);
        if wanted > u32::from(total_cells) {
            log::warn!(
                "sequence length {} capped at grid size {}",
                wanted,
                total_cells
            );
        }
        wanted.min(u32::from(total_cells)) as CellCount
    }

    pub const fn lead_in(&self) -> Duration {
        Duration::from_millis(self.lead_in_ms as u64)
    }

    pub const fn round_delay(&self, outcome: RoundOutcome) -> Duration {
        let ms = match outcome {
            RoundOutcome::Success => self.success_delay_ms,
            RoundOutcome::Failure => self.failure_delay_ms,
        };
        Duration::from_millis(ms as u64)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::sequence_sprint()
    }
}

/// The minigames available in the launcher.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    MemoryGrids,
    SequenceSprint,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::SequenceSprint, Variant::MemoryGrids];

    pub const fn id(self) -> &'static str {
        match self {
            Self::MemoryGrids => "memory_grids",
            Self::SequenceSprint => "sequence_sprint",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MemoryGrids => "Memory Grids",
            Self::SequenceSprint => "Sequence Sprint",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::MemoryGrids => "🔲",
            Self::SequenceSprint => "🧩",
        }
    }

    pub const fn rules(self) -> Rules {
        match self {
            Self::MemoryGrids => Rules::memory_grids(),
            Self::SequenceSprint => Rules::sequence_sprint(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown game id {0:?}")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.id() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}
