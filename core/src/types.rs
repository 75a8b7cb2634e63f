use serde::{Deserialize, Serialize};

/// Index of a single cell, counted row-major from the top-left corner.
pub type CellIndex = u16;

/// Count type used for grid sizes and sequence lengths.
pub type CellCount = u16;

/// Row or column dimension of a grid.
pub type Dim = u8;

/// Rows × columns of a board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: Dim,
    pub cols: Dim,
}

impl GridShape {
    pub const fn new(rows: Dim, cols: Dim) -> Self {
        Self { rows, cols }
    }

    pub const fn total_cells(self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub fn contains(self, index: CellIndex) -> bool {
        index < self.total_cells()
    }

    /// Row-major `(row, col)` of `index`, `None` when outside the grid.
    pub fn position(self, index: CellIndex) -> Option<(Dim, Dim)> {
        if !self.contains(index) || self.cols == 0 {
            return None;
        }
        let cols = CellIndex::from(self.cols);
        Some(((index / cols) as Dim, (index % cols) as Dim))
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for (Dim, Dim) {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Dim, b: Dim) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
