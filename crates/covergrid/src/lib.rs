#![warn(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Categorical grid compositing and gap filling.
//!
//! Two co-registered integer class grids are merged by source priority, after which every
//! remaining missing cell is replaced by the value of a nearby classified cell.

pub mod algo;
mod cell;
mod grid;
mod gridheader;
mod gridsize;
pub mod io;
mod mergefill;
#[cfg(test)]
mod testutils;

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Grid dimensions do not match ({}x{}) <-> ({}x{})", .size1.0, .size1.1, .size2.0, .size2.1)]
    DimensionMismatch {
        size1: (usize, usize),
        size2: (usize, usize),
    },
    #[error("Cell {cell} is outside of the grid {size}")]
    OutOfBounds { cell: Cell, size: GridSize },
    #[error("No classified cell found for {cell} within a search radius of {radius}")]
    NoNeighborFound { cell: Cell, radius: usize },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::InvalidNumber(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for Error {
    fn from(err: std::num::ParseFloatError) -> Self {
        Error::InvalidNumber(err.to_string())
    }
}

pub type Point<T = f64> = geo_types::Point<T>;

#[doc(inline)]
pub use algo::FillPolicy;
#[doc(inline)]
pub use algo::NumThreads;
pub use cell::Cell;
pub use cell::CellIterator;
#[doc(inline)]
pub use grid::Grid;
#[doc(inline)]
pub use gridheader::DEFAULT_NODATA;
#[doc(inline)]
pub use gridheader::GridHeader;
#[doc(inline)]
pub use gridsize::GridSize;
pub use mergefill::MergeOptions;
pub use mergefill::MergeOutput;
pub use mergefill::MergeSummary;
pub use mergefill::merge_and_fill;
