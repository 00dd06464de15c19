//! Random starting patterns.

use rand::Rng;

use crate::cell::{Cell, GridBounds};
use crate::stepper::LiveSet;

/// Builds a live set from `count` uniform draws over the grid.
///
/// Draws are taken with replacement and collapse under set semantics, so the
/// population is at most `count`. This targets an approximate density rather
/// than an exact number of cells.
///
/// # Arguments
///
/// * `rng` - The random source; a seeded generator makes the result reproducible
/// * `bounds` - The grid extent to sample from
/// * `count` - Number of coordinate pairs to draw
pub fn generate<R: Rng + ?Sized>(rng: &mut R, bounds: GridBounds, count: usize) -> LiveSet {
    if bounds.width() <= 0 || bounds.height() <= 0 {
        return LiveSet::new();
    }
    (0..count)
        .map(|_| {
            Cell::new(
                rng.gen_range(0..bounds.width()),
                rng.gen_range(0..bounds.height()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn same_seed_same_pattern() {
        let bounds = GridBounds::new(40, 30);
        let a = generate(&mut Pcg64::seed_from_u64(7), bounds, 200);
        let b = generate(&mut Pcg64::seed_from_u64(7), bounds, 200);
        assert_eq!(a, b);
    }

    #[test]
    fn population_bounded_by_draws() {
        let bounds = GridBounds::new(5, 5);
        let mut rng = Pcg64::seed_from_u64(1);
        let live = generate(&mut rng, bounds, 100);
        assert!(live.len() <= 25);
        assert!(live.iter().all(|&c| bounds.contains(c)));

        let sparse = generate(&mut rng, GridBounds::new(200, 200), 10);
        assert!(sparse.len() <= 10);
    }

    #[test]
    fn zero_draws_is_empty() {
        let mut rng = Pcg64::seed_from_u64(3);
        assert!(generate(&mut rng, GridBounds::new(10, 10), 0).is_empty());
        assert!(generate(&mut rng, GridBounds::new(0, 10), 50).is_empty());
    }
}
