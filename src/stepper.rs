//! Generation advance for the classic B3/S23 rule.

use std::collections::HashSet;

use crate::cell::{Cell, GridBounds};

/// The set of currently alive cells.
pub type LiveSet = HashSet<Cell>;

/// Computes the next generation of `live` according to Conway's Game of Life rules:
///
/// * Any live cell with fewer than two live neighbors dies (underpopulation)
/// * Any live cell with two or three live neighbors survives
/// * Any live cell with more than three live neighbors dies (overpopulation)
/// * Any dead cell with exactly three live neighbors becomes alive (reproduction)
///
/// Only live cells and their neighbors are visited, so the cost scales with
/// the population rather than the grid area.
///
/// # Arguments
///
/// * `live` - The current generation, never modified
/// * `bounds` - The grid extent used to clip neighborhoods
///
/// # Returns
///
/// A freshly built set holding the next generation.
pub fn step(live: &LiveSet, bounds: GridBounds) -> LiveSet {
    let mut next = LiveSet::with_capacity(live.len());
    let mut frontier = HashSet::with_capacity(live.len() * 8);

    // Survivors. Every visited neighbor becomes a birth candidate.
    for &cell in live {
        let mut count = 0u8;
        for neighbor in bounds.neighbors(cell) {
            if live.contains(&neighbor) {
                count += 1;
            }
            frontier.insert(neighbor);
        }
        if matches!(count, 2 | 3) {
            next.insert(cell);
        }
    }

    // Births, counted against the current generation only.
    for cell in frontier {
        if live_neighbors(live, bounds, cell) == 3 {
            next.insert(cell);
        }
    }

    next
}

/// Counts how many of `cell`'s neighbors are in `live`.
pub fn live_neighbors(live: &LiveSet, bounds: GridBounds, cell: Cell) -> usize {
    bounds
        .neighbors(cell)
        .filter(|neighbor| live.contains(neighbor))
        .count()
}

/// Cells gained and lost between two generations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationDelta {
    /// Cells alive in the new generation but not the old one
    pub births: u64,
    /// Cells alive in the old generation but not the new one
    pub deaths: u64,
}

impl GenerationDelta {
    /// Compares `before` with `after`.
    pub fn between(before: &LiveSet, after: &LiveSet) -> Self {
        GenerationDelta {
            births: after.difference(before).count() as u64,
            deaths: before.difference(after).count() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bounds() -> GridBounds {
        GridBounds::new(20, 20)
    }

    fn set(cells: &[(i32, i32)]) -> LiveSet {
        cells.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn empty_set_is_fixed_point() {
        assert!(step(&LiveSet::new(), bounds()).is_empty());
    }

    #[test]
    fn block_is_still_life() {
        let block = set(&[(3, 3), (4, 3), (3, 4), (4, 4)]);
        assert_eq!(step(&block, bounds()), block);
    }

    #[test]
    fn blinker_has_period_two() {
        let horizontal = set(&[(4, 5), (5, 5), (6, 5)]);
        let vertical = step(&horizontal, bounds());
        assert_eq!(vertical, set(&[(5, 4), (5, 5), (5, 6)]));
        assert_ne!(vertical, horizontal);
        assert_eq!(step(&vertical, bounds()), horizontal);
    }

    #[test]
    fn lone_cells_die() {
        assert!(step(&set(&[(1, 1)]), bounds()).is_empty());
        assert!(step(&set(&[(1, 1), (2, 1)]), bounds()).is_empty());
    }

    #[test]
    fn glider_translates_after_four_generations() {
        let glider = set(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        let mut current = glider.clone();
        for _ in 0..4 {
            current = step(&current, bounds());
        }
        let shifted: LiveSet = glider.iter().map(|c| Cell::new(c.col + 1, c.row + 1)).collect();
        assert_eq!(current, shifted);
    }

    #[test]
    fn births_never_leave_the_grid() {
        // Blinker along the top edge would grow a row above it on an unbounded plane.
        let edge = set(&[(4, 0), (5, 0), (6, 0)]);
        let next = step(&edge, bounds());
        assert_eq!(next, set(&[(5, 0), (5, 1)]));
    }

    #[test]
    fn off_grid_cells_at_extremes_die_quietly() {
        let live = set(&[(i32::MAX, i32::MAX), (i32::MIN, 0)]);
        assert!(step(&live, bounds()).is_empty());
        assert_eq!(live_neighbors(&live, bounds(), Cell::new(i32::MAX, 0)), 0);
    }

    #[test]
    fn delta_counts_births_and_deaths() {
        let horizontal = set(&[(4, 5), (5, 5), (6, 5)]);
        let vertical = step(&horizontal, bounds());
        let delta = GenerationDelta::between(&horizontal, &vertical);
        assert_eq!(delta, GenerationDelta { births: 2, deaths: 2 });
    }

    proptest! {
        #[test]
        fn step_ignores_insertion_order(cells in prop::collection::vec((0i32..20, 0i32..20), 0..80)) {
            let forward: LiveSet = cells.iter().map(|&c| Cell::from(c)).collect();
            let mut reversed = LiveSet::new();
            for &c in cells.iter().rev() {
                reversed.insert(Cell::from(c));
            }
            prop_assert_eq!(step(&forward, bounds()), step(&reversed, bounds()));
        }

        #[test]
        fn next_generation_stays_on_grid(cells in prop::collection::vec((0i32..20, 0i32..20), 0..80)) {
            let live: LiveSet = cells.into_iter().map(Cell::from).collect();
            let next = step(&live, bounds());
            prop_assert!(next.iter().all(|&c| bounds().contains(c)));
        }

        #[test]
        fn survivors_and_births_follow_rule(cells in prop::collection::vec((0i32..20, 0i32..20), 0..80)) {
            let live: LiveSet = cells.into_iter().map(Cell::from).collect();
            let next = step(&live, bounds());
            for col in 0..20 {
                for row in 0..20 {
                    let cell = Cell::new(col, row);
                    let n = live_neighbors(&live, bounds(), cell);
                    let expected = match (live.contains(&cell), n) {
                        (true, 2) | (true, 3) => true,
                        (false, 3) => true,
                        _ => false,
                    };
                    prop_assert_eq!(next.contains(&cell), expected);
                }
            }
        }
    }
}
