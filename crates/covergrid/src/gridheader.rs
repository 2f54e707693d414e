use approx::relative_eq;

use crate::{GridSize, Point};

/// Conventional sentinel for cells without a classification.
pub const DEFAULT_NODATA: i32 = -9999;

/// Spatial metadata of a grid: its dimensions, the lower left corner, the (square) cell size
/// and the sentinel value that marks missing cells.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridHeader {
    size: GridSize,
    lower_left: Point,
    cell_size: f64,
    nodata: i32,
}

impl GridHeader {
    pub fn new(size: GridSize, lower_left: Point, cell_size: f64, nodata: i32) -> Self {
        GridHeader {
            size,
            lower_left,
            cell_size,
            nodata,
        }
    }

    /// Header with unit cells anchored at the origin, mostly useful for grids without a spatial context.
    pub fn with_size(size: GridSize, nodata: i32) -> Self {
        GridHeader::new(size, Point::new(0.0, 0.0), 1.0, nodata)
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn rows(&self) -> usize {
        self.size.rows
    }

    pub fn columns(&self) -> usize {
        self.size.cols
    }

    pub fn lower_left(&self) -> Point {
        self.lower_left
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn nodata(&self) -> i32 {
        self.nodata
    }

    pub fn copy_with_nodata(&self, nodata: i32) -> Self {
        GridHeader { nodata, ..*self }
    }

    /// True when both headers describe the same cell raster on the ground (nodata is not considered)
    pub fn is_aligned_with(&self, other: &GridHeader) -> bool {
        self.size == other.size
            && relative_eq!(self.cell_size, other.cell_size)
            && relative_eq!(self.lower_left, other.lower_left)
    }
}
