use std::ops::RangeInclusive;

use rand::distr::{Distribution, Uniform};

use crate::{Grid, GridHeader, GridSize, Point};

pub const NOD: i32 = crate::DEFAULT_NODATA;

pub fn test_header(size: GridSize) -> GridHeader {
    GridHeader::new(size, Point::new(0.0, 0.0), 30.0, NOD)
}

/// Builds a grid from row slices, all rows must have the same length
pub fn grid_from_rows(rows: &[&[i32]]) -> Grid {
    let cols = rows.first().map_or(0, |r| r.len());
    assert!(rows.iter().all(|r| r.len() == cols), "Rows differ in length");

    let size = GridSize::with_rows_cols(rows.len(), cols);
    Grid::new(test_header(size), rows.concat()).expect("Invalid test grid")
}

pub fn create_random_grid(size: GridSize, value_range: RangeInclusive<i32>) -> Grid {
    let mut rng = rand::rng();
    let uniform = Uniform::new_inclusive(*value_range.start(), *value_range.end()).expect("Failed to create uniform distribution");
    let data = (0..size.cell_count()).map(|_| uniform.sample(&mut rng)).collect();
    Grid::new(test_header(size), data).expect("Invalid test grid")
}

/// Random grid where roughly `nodata_count` cells are missing (random positions can coincide)
/// At least one cell keeps a classified value.
pub fn create_random_grid_with_nodata(size: GridSize, value_range: RangeInclusive<i32>, nodata_count: usize) -> Grid {
    let mut rng = rand::rng();
    let first_value = *value_range.start();
    let (header, mut data) = create_random_grid(size, value_range).into_raw_parts();

    let uniform = Uniform::new(0, size.cell_count()).expect("Failed to create uniform distribution");
    (0..nodata_count).for_each(|_| {
        data[uniform.sample(&mut rng)] = NOD;
    });

    if data.iter().all(|&v| v == NOD) {
        data[0] = first_value;
    }

    Grid::new(header, data).expect("Invalid test grid")
}
