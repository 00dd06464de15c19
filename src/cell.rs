//! Grid coordinates and neighborhood enumeration.

use std::fmt;

/// A single grid coordinate, addressed by column and row.
///
/// Coordinates are signed so that neighbor offsets can step off the grid
/// before being filtered by [`GridBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// Horizontal position, 0 at the left edge
    pub col: i32,
    /// Vertical position, 0 at the top edge
    pub row: i32,
}

impl Cell {
    /// Creates a cell at the given column and row.
    pub const fn new(col: i32, row: i32) -> Self {
        Cell { col, row }
    }
}

impl From<(i32, i32)> for Cell {
    fn from((col, row): (i32, i32)) -> Self {
        Cell::new(col, row)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Offsets of the eight Moore neighbors, `(0, 0)` excluded.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The extent of the playable grid.
///
/// Bounds are exclusive on both axes: a cell is inside when
/// `0 <= col < width` and `0 <= row < height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    width: i32,
    height: i32,
}

impl GridBounds {
    /// Creates bounds for a grid of `width` columns and `height` rows.
    pub fn new(width: u32, height: u32) -> Self {
        GridBounds {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
        }
    }

    /// Number of columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Total number of cells on the grid.
    pub fn area(&self) -> u64 {
        self.width.max(0) as u64 * self.height.max(0) as u64
    }

    /// Returns true when `cell` lies on the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.col) && (0..self.height).contains(&cell.row)
    }

    /// Yields the up-to-8 grid-adjacent cells of `cell`.
    ///
    /// Offsets that would leave the grid are dropped; every other offset is
    /// always produced, so corner cells yield 3 neighbors, edge cells 5 and
    /// interior cells 8. Offsets past the `i32` range are dropped as well, so
    /// off-grid input cells never overflow.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dc, dr)| {
                Some(Cell::new(cell.col.checked_add(dc)?, cell.row.checked_add(dr)?))
            })
            .filter(move |n| self.contains(*n))
    }
}
