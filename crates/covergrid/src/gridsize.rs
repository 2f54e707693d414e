use crate::Cell;

/// Grid size represented by rows and columns.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn with_rows_cols(rows: usize, cols: usize) -> Self {
        GridSize { rows, cols }
    }

    pub const fn square(size: usize) -> Self {
        GridSize { rows: size, cols: size }
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// The number of cells, `None` when it does not fit in a `usize`
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    /// The largest search radius that can still reach a cell inside a grid of this size
    pub fn max_dimension(&self) -> usize {
        self.rows.max(self.cols)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.is_valid() && (cell.row as usize) < self.rows && (cell.col as usize) < self.cols
    }

    /// Row-major buffer index of the cell, `None` when the cell lies outside of the grid
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.cols + cell.col as usize)
        } else {
            None
        }
    }

    pub fn cell_at_index(&self, index: usize) -> Cell {
        debug_assert!(index < self.cell_count());
        Cell::from_row_col((index / self.cols) as i32, (index % self.cols) as i32)
    }

    pub(crate) fn as_tuple(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(rows: {}, cols: {})", self.rows, self.cols)
    }
}

impl std::fmt::Debug for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_of_rejects_out_of_bounds_cells() {
        let size = GridSize::with_rows_cols(2, 3);
        assert_eq!(size.index_of(Cell::from_row_col(1, 2)), Some(5));
        assert_eq!(size.index_of(Cell::from_row_col(0, 0)), Some(0));
        assert_eq!(size.index_of(Cell::from_row_col(-1, 0)), None);
        assert_eq!(size.index_of(Cell::from_row_col(0, -1)), None);
        assert_eq!(size.index_of(Cell::from_row_col(2, 0)), None);
        assert_eq!(size.index_of(Cell::from_row_col(0, 3)), None);
    }

    #[test]
    fn cell_at_index() {
        let size = GridSize::with_rows_cols(2, 3);
        assert_eq!(size.cell_at_index(4), Cell::from_row_col(1, 1));
    }

    #[test]
    fn max_dimension() {
        assert_eq!(GridSize::with_rows_cols(2, 7).max_dimension(), 7);
        assert_eq!(GridSize::square(4).max_dimension(), 4);
        assert!(GridSize::with_rows_cols(0, 3).is_empty());
    }

    #[test]
    fn checked_cell_count() {
        assert_eq!(GridSize::with_rows_cols(2, 3).checked_cell_count(), Some(6));
        assert_eq!(GridSize::with_rows_cols(usize::MAX / 2, 3).checked_cell_count(), None);
    }
}
