use itertools::Either;

use crate::{Cell, Error, GridSize, Result};

/// The offsets on the boundary of the square with the given Chebyshev radius around a cell.
///
/// The offsets are produced in a fixed order: each axis runs through `0, -1, 1, -2, 2, .., -radius, radius`,
/// row offsets in the outer loop and column offsets in the inner loop, and only the combinations
/// on the ring boundary (`max(|dr|, |dc|) == radius`) are kept.
/// The gap filler accepts the first classified cell in this order, so the order is part of its output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingOffsets {
    radius: i32,
}

impl RingOffsets {
    /// Fails with [`Error::InvalidArgument`] for a zero radius or a radius beyond the cell coordinate range
    pub fn new(radius: usize) -> Result<Self> {
        match i32::try_from(radius) {
            Ok(radius) if radius > 0 => Ok(RingOffsets { radius }),
            _ => Err(Error::InvalidArgument(format!("Invalid ring radius: {radius}"))),
        }
    }

    pub fn radius(&self) -> usize {
        self.radius as usize
    }

    /// Number of offsets on the ring
    pub fn len(&self) -> usize {
        8 * self.radius()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The (row, column) offsets of the ring in search order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let radius = self.radius;
        axis_offsets(radius).flat_map(move |dr| {
            if dr.abs() == radius {
                // top or bottom edge of the ring: every column offset
                Either::Left(axis_offsets(radius).map(move |dc| (dr, dc)))
            } else {
                // inner row: only the left and right edge of the ring
                Either::Right([(dr, -radius), (dr, radius)].into_iter())
            }
        })
    }

    /// The cells of the ring around `center` in search order, cells outside of the grid are skipped
    pub fn cells_within(&self, center: Cell, size: GridSize) -> impl Iterator<Item = Cell> + use<> {
        self.iter()
            .map(move |(dr, dc)| center.offset(dr, dc))
            .filter(move |cell| size.contains(*cell))
    }
}

/// `0, -1, 1, -2, 2, .., -radius, radius`
fn axis_offsets(radius: i32) -> impl Iterator<Item = i32> + Clone {
    std::iter::once(0).chain((1..=radius).flat_map(|i| [-i, i]))
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;

    use super::*;

    /// The ring order as the filtered cartesian product of the axis offsets
    fn ring_by_filtering(radius: i32) -> Vec<(i32, i32)> {
        iproduct!(axis_offsets(radius), axis_offsets(radius))
            .filter(|(dr, dc)| dr.abs().max(dc.abs()) == radius)
            .collect()
    }

    #[test]
    fn radius_one_order() -> Result<()> {
        let offsets: Vec<(i32, i32)> = RingOffsets::new(1)?.iter().collect();
        assert_eq!(
            offsets,
            vec![(0, -1), (0, 1), (-1, 0), (-1, -1), (-1, 1), (1, 0), (1, -1), (1, 1)]
        );
        Ok(())
    }

    #[test]
    fn invalid_radius_is_rejected() {
        assert!(matches!(RingOffsets::new(0), Err(Error::InvalidArgument(_))));
        assert!(matches!(RingOffsets::new(usize::MAX), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn radius_two_order() -> Result<()> {
        let offsets: Vec<(i32, i32)> = RingOffsets::new(2)?.iter().collect();
        assert_eq!(&offsets[..4], &[(0, -2), (0, 2), (-1, -2), (-1, 2)]);
        assert_eq!(&offsets[6..11], &[(-2, 0), (-2, -1), (-2, 1), (-2, -2), (-2, 2)]);
        assert_eq!(offsets.len(), 16);
        Ok(())
    }

    #[test]
    fn matches_filtered_cartesian_product() -> Result<()> {
        for radius in 1..=12 {
            let ring = RingOffsets::new(radius as usize)?;
            let offsets: Vec<(i32, i32)> = ring.iter().collect();
            assert_eq!(offsets, ring_by_filtering(radius));
            assert_eq!(offsets.len(), ring.len());
        }
        Ok(())
    }

    #[test]
    fn ring_offsets_are_unique() -> Result<()> {
        let mut offsets: Vec<(i32, i32)> = RingOffsets::new(5)?.iter().collect();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 40);
        Ok(())
    }

    #[test]
    fn corner_cells_only_yield_in_bounds_coordinates() -> Result<()> {
        let size = GridSize::with_rows_cols(4, 6);
        let corners = [
            Cell::from_row_col(0, 0),
            Cell::from_row_col(0, 5),
            Cell::from_row_col(3, 0),
            Cell::from_row_col(3, 5),
        ];

        for center in corners {
            for radius in 1..=size.max_dimension() {
                for cell in RingOffsets::new(radius)?.cells_within(center, size) {
                    assert!(cell.row >= 0 && cell.col >= 0);
                    assert!((cell.row as usize) < size.rows && (cell.col as usize) < size.cols);
                    assert_eq!(center.chebyshev_distance(&cell), radius);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn top_left_corner_radius_one() -> Result<()> {
        let cells: Vec<Cell> = RingOffsets::new(1)?
            .cells_within(Cell::from_row_col(0, 0), GridSize::square(3))
            .collect();
        assert_eq!(
            cells,
            vec![Cell::from_row_col(0, 1), Cell::from_row_col(1, 0), Cell::from_row_col(1, 1)]
        );
        Ok(())
    }
}
