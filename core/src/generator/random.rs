use rand::prelude::*;

use super::*;

/// Uniform sampling without replacement from a seeded small RNG.
///
/// Every call continues the same RNG stream, so consecutive rounds get fresh sequences while a fixed seed still
/// replays a whole session.
#[derive(Clone, Debug)]
pub struct RandomSequenceGenerator {
    rng: SmallRng,
}

impl RandomSequenceGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl SequenceGenerator for RandomSequenceGenerator {
    fn generate(&mut self, total_cells: CellCount, length: CellCount) -> Sequence {
        check_request(total_cells, length);

        // partial Fisher-Yates: the first `length` slots end up as the sample, in draw order
        let mut pool: Vec<CellIndex> = (0..total_cells).collect();
        for i in 0..usize::from(length) {
            let j = self.rng.random_range(i..pool.len());
            pool.swap(i, j);
        }
        pool.truncate(length.into());

        log::trace!("generated sequence {:?} from {} cells", pool, total_cells);
        Sequence::from_distinct(pool)
    }
}
