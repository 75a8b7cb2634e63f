use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the target sequence for a round.
pub trait SequenceGenerator {
    /// Returns `length` distinct cell indices from `0..total_cells`, in reveal order.
    ///
    /// Panics when `length > total_cells` or the grid is empty, both are caller bugs.
    fn generate(&mut self, total_cells: CellCount, length: CellCount) -> Sequence;
}

impl<G: SequenceGenerator + ?Sized> SequenceGenerator for Box<G> {
    fn generate(&mut self, total_cells: CellCount, length: CellCount) -> Sequence {
        (**self).generate(total_cells, length)
    }
}

fn check_request(total_cells: CellCount, length: CellCount) {
    assert!(total_cells > 0, "cannot draw a sequence from an empty grid");
    assert!(
        length <= total_cells,
        "sequence of {length} cells requested from a grid of {total_cells}"
    );
}
