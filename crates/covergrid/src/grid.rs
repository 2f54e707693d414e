use crate::{Cell, Error, GridHeader, GridSize, Result};

/// Grid of categorical class codes stored in a dense row-major buffer.
/// Missing cells hold the nodata sentinel of the header in the same buffer,
/// so no additional data is allocated for tracking them.
///
/// A grid is not modified once constructed, operations that change cell values return a new grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    header: GridHeader,
    data: Vec<i32>,
}

impl Grid {
    /// Create a new grid with the given header and data buffer.
    /// Fails when the grid has no cells or the buffer length does not match the header dimensions.
    pub fn new(header: GridHeader, data: Vec<i32>) -> Result<Self> {
        let cell_count = checked_cell_count(header.size())?;
        if data.len() != cell_count {
            return Err(Error::InvalidArgument(format!(
                "Grid data length ({}) does not match the grid size {}",
                data.len(),
                header.size()
            )));
        }

        Ok(Grid { header, data })
    }

    /// Create a new grid with the given header and filled with the provided value.
    pub fn filled_with(val: i32, header: GridHeader) -> Result<Self> {
        Grid::new(header, vec![val; checked_cell_count(header.size())?])
    }

    /// Create a new grid where every cell is missing.
    pub fn filled_with_nodata(header: GridHeader) -> Result<Self> {
        Grid::filled_with(header.nodata(), header)
    }

    pub fn header(&self) -> &GridHeader {
        &self.header
    }

    pub fn size(&self) -> GridSize {
        self.header.size()
    }

    pub fn rows(&self) -> usize {
        self.header.rows()
    }

    pub fn columns(&self) -> usize {
        self.header.columns()
    }

    pub fn nodata(&self) -> i32 {
        self.header.nodata()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.data.iter()
    }

    /// Iterator over the grid values where missing cells are represented as `None`
    pub fn iter_opt(&self) -> impl Iterator<Item = Option<i32>> + '_ {
        let nodata = self.nodata();
        self.data.iter().map(move |&v| if v == nodata { None } else { Some(v) })
    }

    /// Iterator over the rows of the grid buffer
    pub fn rows_iter(&self) -> std::slice::Chunks<'_, i32> {
        self.data.chunks(self.columns())
    }

    pub fn into_raw_parts(self) -> (GridHeader, Vec<i32>) {
        (self.header, self.data)
    }

    /// The stored code of the cell, this can be the nodata sentinel.
    pub fn get(&self, cell: Cell) -> Result<i32> {
        match self.size().index_of(cell) {
            Some(index) => Ok(self.data[index]),
            None => Err(Error::OutOfBounds { cell, size: self.size() }),
        }
    }

    /// The classified value of the cell, `None` when the cell is missing or lies outside of the grid.
    /// Use this for probing neighbourhoods, an invalid cell is never dereferenced.
    pub fn value(&self, cell: Cell) -> Option<i32> {
        self.size().index_of(cell).and_then(|index| self.index_value(index))
    }

    /// The classified value at the buffer index, `None` when the cell is missing.
    pub fn index_value(&self, index: usize) -> Option<i32> {
        let val = self.data[index];
        if val == self.nodata() { None } else { Some(val) }
    }

    pub fn index_is_nodata(&self, index: usize) -> bool {
        self.data[index] == self.nodata()
    }

    pub fn cell_is_nodata(&self, cell: Cell) -> Result<bool> {
        Ok(self.get(cell)? == self.nodata())
    }

    /// Returns a new grid identical to this one except for the value of the provided cell.
    pub fn with_cell(&self, cell: Cell, code: i32) -> Result<Grid> {
        let index = self
            .size()
            .index_of(cell)
            .ok_or_else(|| Error::OutOfBounds { cell, size: self.size() })?;

        let mut data = self.data.clone();
        data[index] = code;
        Ok(Grid {
            header: self.header,
            data,
        })
    }

    /// Returns the grid expressed with a different nodata sentinel.
    /// Fails when the new sentinel is already used as a class code, missing and classified cells
    /// would no longer be distinguishable.
    pub fn with_nodata(&self, nodata: i32) -> Result<Grid> {
        let current = self.nodata();
        if nodata == current {
            return Ok(self.clone());
        }

        if self.data.contains(&nodata) {
            return Err(Error::InvalidArgument(format!(
                "Nodata value {nodata} is used as a class code in the grid"
            )));
        }

        let data = self.data.iter().map(|&v| if v == current { nodata } else { v }).collect();
        Grid::new(self.header.copy_with_nodata(nodata), data)
    }

    /// Returns the number of missing cells in the grid
    pub fn nodata_count(&self) -> usize {
        let nodata = self.nodata();
        self.data.iter().filter(|&&v| v == nodata).count()
    }

    /// Returns true if any of the cells in the grid is classified
    pub fn contains_data(&self) -> bool {
        let nodata = self.nodata();
        self.data.iter().any(|&v| v != nodata)
    }
}

/// Cell count of a valid grid size: at least one row and column and addressable in memory
pub(crate) fn checked_cell_count(size: GridSize) -> Result<usize> {
    if size.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "A grid needs at least one row and one column {size}"
        )));
    }

    size.checked_cell_count()
        .ok_or_else(|| Error::InvalidArgument(format!("Grid size {size} exceeds the addressable cell count")))
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
