//! Algorithms operating on categorical grids (compositing, masking, gap filling).

mod composite;
mod gapfill;
mod mask;
mod ring;
mod threading;

pub use composite::CompositeSummary;
pub use composite::composite;
pub use composite::composite_with_summary;
pub use composite::composite_with_threads;
pub use gapfill::BreadthFirst;
pub use gapfill::FillOptions;
pub use gapfill::FillPolicy;
pub use gapfill::FillSummary;
pub use gapfill::GapFillStrategy;
pub use gapfill::LegacyRingOrder;
pub use gapfill::NearestEuclidean;
pub use gapfill::fill;
pub use gapfill::fill_with_options;
pub use gapfill::fill_with_summary;
pub use mask::mask_values;
pub use ring::RingOffsets;
pub use threading::NumThreads;

use crate::{Error, Grid, Result};

/// Fails with [`Error::DimensionMismatch`] when the grids differ in rows or columns
pub fn check_dimensions(g1: &Grid, g2: &Grid) -> Result<()> {
    if g1.size() != g2.size() {
        return Err(Error::DimensionMismatch {
            size1: (g1.rows(), g1.columns()),
            size2: (g2.rows(), g2.columns()),
        });
    }

    Ok(())
}
