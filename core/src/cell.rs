use serde::{Deserialize, Serialize};

/// Visual state of a single cell as the presentation layer should draw it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellVisual {
    #[default]
    Neutral,
    /// Currently being shown as part of the sequence playback.
    Revealing,
    /// Shown earlier in this round and still marked.
    Revealed,
    Correct,
    Incorrect,
}

impl CellVisual {
    pub const fn class_name(self) -> &'static str {
        use CellVisual::*;
        match self {
            Neutral => "neutral",
            Revealing => "revealing",
            Revealed => "revealed",
            Correct => "correct",
            Incorrect => "incorrect",
        }
    }
}

/// Everything the presentation layer needs to draw one cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub visual: CellVisual,
    /// 1-based position in the sequence, when it is being displayed.
    pub label: Option<u16>,
}

impl CellView {
    pub const fn is_neutral(self) -> bool {
        matches!(self.visual, CellVisual::Neutral) && self.label.is_none()
    }
}
