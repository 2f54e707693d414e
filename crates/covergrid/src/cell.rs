use crate::GridSize;

/// Represents a location in the grid using row, col coordinates
/// Coordinates are signed so neighbour offsets can be applied before bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub const fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    /// The cell displaced by the given row and column offsets, the result is not bounds checked
    pub const fn offset(&self, row_offset: i32, col_offset: i32) -> Cell {
        Cell::from_row_col(self.row + row_offset, self.col + col_offset)
    }

    /// King move distance: the ring radius at which `other` is encountered when searching from this cell
    pub fn chebyshev_distance(&self, other: &Cell) -> usize {
        let dr = (other.row - self.row).unsigned_abs();
        let dc = (other.col - self.col).unsigned_abs();
        dr.max(dc) as usize
    }

    pub fn squared_distance(&self, other: &Cell) -> u64 {
        let dr = (other.row - self.row).unsigned_abs() as u64;
        let dc = (other.col - self.col).unsigned_abs() as u64;
        dr * dr + dc * dc
    }

    pub fn increment(&mut self, cols_in_grid: i32) {
        self.col += 1;
        if self.col >= cols_in_grid {
            self.col = 0;
            self.row += 1;
        }
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(row: {}, col: {})", self.row, self.col)
    }
}

/// Iterator over the cells in a grid
/// Iteration occurs from the top-left cell to the bottom-right cell in row-major order,
/// matching the layout of the grid buffer.
pub struct CellIterator {
    rows: i32,
    cols: i32,
    current: Cell,
}

impl CellIterator {
    pub fn for_grid_with_size(size: GridSize) -> Self {
        CellIterator {
            rows: size.rows as i32,
            cols: size.cols as i32,
            current: Cell::from_row_col(0, 0),
        }
    }
}

impl Iterator for CellIterator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cols == 0 || self.current.row >= self.rows {
            return None;
        }

        let current = self.current;
        self.current.increment(self.cols);
        Some(current)
    }
}
