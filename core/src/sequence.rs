use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Ordered, duplicate-free list of target cells for one round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence(SmallVec<[CellIndex; 16]>);

impl Sequence {
    /// Panics if `indices` contains a repeat.
    pub fn from_distinct(indices: impl IntoIterator<Item = CellIndex>) -> Self {
        let indices: SmallVec<[CellIndex; 16]> = indices.into_iter().collect();
        for (pos, index) in indices.iter().enumerate() {
            assert!(
                !indices[..pos].contains(index),
                "cell {index} repeats in sequence"
            );
        }
        Self(indices)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<CellIndex> {
        self.0.get(pos).copied()
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.0.contains(&index)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[CellIndex] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_position_and_value() {
        let sequence = Sequence::from_distinct([4, 0, 2]);

        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get(1), Some(0));
        assert_eq!(sequence.get(3), None);
        assert!(!sequence.contains(1));
    }

    #[test]
    #[should_panic(expected = "repeats in sequence")]
    fn repeats_are_rejected() {
        Sequence::from_distinct([1, 2, 1]);
    }
}
