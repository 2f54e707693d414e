use crate::{Grid, Result};

/// Marks every cell holding one of the given codes as missing.
/// Combined with the gap filler this replaces the masked classes by their nearest neighbours.
pub fn mask_values(grid: &Grid, codes: &[i32]) -> Result<Grid> {
    let nodata = grid.nodata();
    let data = grid
        .iter()
        .map(|v| if codes.contains(v) { nodata } else { *v })
        .collect();

    Grid::new(*grid.header(), data)
}
