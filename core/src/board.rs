use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Per-cell visual state for the grid the player is looking at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    shape: GridShape,
    cells: Array2<CellView>,
}

impl Board {
    pub fn new(shape: GridShape) -> Self {
        assert!(shape.total_cells() > 0, "board must have at least one cell");
        Self {
            shape,
            cells: Array2::default([shape.rows.into(), shape.cols.into()]),
        }
    }

    pub fn shape(&self) -> GridShape {
        self.shape
    }

    pub fn total_cells(&self) -> CellCount {
        self.shape.total_cells()
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if self.shape.contains(index) {
            Ok(index)
        } else {
            Err(GameError::InvalidCell)
        }
    }

    pub fn cell(&self, index: CellIndex) -> Option<CellView> {
        let pos = self.shape.position(index)?;
        Some(self.cells[pos.to_nd_index()])
    }

    /// Replaces the cell at `index`, returning the new view when anything changed.
    pub fn set(&mut self, index: CellIndex, view: CellView) -> Option<CellView> {
        let pos = self.shape.position(index)?;
        let cell = &mut self.cells[pos.to_nd_index()];
        if *cell == view {
            return None;
        }
        *cell = view;
        Some(view)
    }

    pub fn set_visual(&mut self, index: CellIndex, visual: CellVisual) -> Option<CellView> {
        let current = self.cell(index)?;
        self.set(index, CellView { visual, ..current })
    }

    /// Resets every cell to neutral, returning the indices that changed.
    pub fn clear(&mut self) -> Vec<CellIndex> {
        let changed: Vec<CellIndex> = self
            .iter()
            .filter(|(_, view)| !view.is_neutral())
            .map(|(index, _)| index)
            .collect();
        self.cells.fill(CellView::default());
        changed
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, CellView)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, &view)| (index as CellIndex, view))
    }
}

impl Index<CellIndex> for Board {
    type Output = CellView;

    fn index(&self, index: CellIndex) -> &Self::Output {
        let pos = self
            .shape
            .position(index)
            .unwrap_or_else(|| panic!("cell index {index} outside {:?}", self.shape));
        &self.cells[pos.to_nd_index()]
    }
}
