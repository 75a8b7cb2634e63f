use super::*;

/// Replays scripted sequences, cycling through them round after round.
///
/// A script longer than the requested length is cut short; a shorter one is topped up with the lowest unused
/// indices. Useful for replays and for tests that need to know the targets in advance.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedSequenceGenerator {
    scripts: Vec<Vec<CellIndex>>,
    next: usize,
}

impl FixedSequenceGenerator {
    pub fn new(scripts: Vec<Vec<CellIndex>>) -> Self {
        Self { scripts, next: 0 }
    }

    pub fn rounds_generated(&self) -> usize {
        self.next
    }
}

impl SequenceGenerator for FixedSequenceGenerator {
    fn generate(&mut self, total_cells: CellCount, length: CellCount) -> Sequence {
        check_request(total_cells, length);

        let script = match self.scripts.len() {
            0 => &[][..],
            len => self.scripts[self.next % len].as_slice(),
        };
        self.next += 1;

        let mut picked: Vec<CellIndex> = Vec::with_capacity(length.into());
        let scripted = script.iter().copied().filter(|&index| index < total_cells);
        for index in scripted.chain(0..total_cells) {
            if picked.len() == usize::from(length) {
                break;
            }
            if !picked.contains(&index) {
                picked.push(index);
            }
        }

        Sequence::from_distinct(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_cycle_and_adapt_to_length() {
        let mut generator = FixedSequenceGenerator::new(vec![vec![5, 1, 3], vec![2]]);

        assert_eq!(generator.generate(6, 2).as_slice(), &[5, 1]);
        assert_eq!(generator.generate(6, 3).as_slice(), &[2, 0, 1]);
        assert_eq!(generator.generate(6, 3).as_slice(), &[5, 1, 3]);
        assert_eq!(generator.rounds_generated(), 3);
    }

    #[test]
    fn out_of_range_script_entries_are_skipped() {
        let mut generator = FixedSequenceGenerator::new(vec![vec![9, 0]]);

        assert_eq!(generator.generate(4, 2).as_slice(), &[0, 1]);
    }
}
