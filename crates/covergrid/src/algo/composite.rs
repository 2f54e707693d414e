use crate::{Grid, Result};

use super::{NumThreads, check_dimensions};

/// Where the cells of a composite came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompositeSummary {
    pub from_primary: usize,
    pub from_secondary: usize,
    pub missing: usize,
}

/// Merges two grids by source priority.
///
/// Every cell takes the primary value when it is classified, otherwise the secondary value when it is
/// classified, otherwise it is missing. Both grids are interpreted with their own nodata sentinel,
/// the result uses the header (and therefore the sentinel) of the primary grid.
///
/// Fails with [`crate::Error::DimensionMismatch`] when the grids differ in rows or columns and with
/// [`crate::Error::InvalidArgument`] when the secondary grid uses the primary sentinel as a class code.
/// Cell size and origin are not reconciled, a mismatch is only logged.
pub fn composite(primary: &Grid, secondary: &Grid) -> Result<Grid> {
    composite_with_threads(primary, secondary, NumThreads::Count(1))
}

pub fn composite_with_threads(primary: &Grid, secondary: &Grid, num_threads: NumThreads) -> Result<Grid> {
    check_dimensions(primary, secondary)?;
    log_alignment_differences(primary, secondary);

    // express the secondary with the primary sentinel, fails when that sentinel is one of its class codes
    let normalized;
    let secondary = if secondary.nodata() != primary.nodata() {
        normalized = secondary.with_nodata(primary.nodata())?;
        &normalized
    } else {
        secondary
    };

    let nodata = primary.nodata();
    let merge = |p: i32, s: i32| -> i32 { if p != nodata { p } else { s } };

    let data = if num_threads.is_parallel() {
        composite_parallel(primary, secondary, num_threads, merge)?
    } else {
        primary
            .iter()
            .zip(secondary.iter())
            .map(|(&p, &s)| merge(p, s))
            .collect()
    };

    Grid::new(*primary.header(), data)
}

/// Same as [`composite`] but also reports where the cells originate from
pub fn composite_with_summary(primary: &Grid, secondary: &Grid, num_threads: NumThreads) -> Result<(Grid, CompositeSummary)> {
    let result = composite_with_threads(primary, secondary, num_threads)?;

    let mut summary = CompositeSummary::default();
    for (&p, &r) in primary.iter().zip(result.iter()) {
        if p != primary.nodata() {
            summary.from_primary += 1;
        } else if r != result.nodata() {
            summary.from_secondary += 1;
        } else {
            summary.missing += 1;
        }
    }

    log::debug!(
        "Composite: {} cells from primary, {} from secondary, {} missing",
        summary.from_primary,
        summary.from_secondary,
        summary.missing
    );

    Ok((result, summary))
}

fn composite_parallel<F>(primary: &Grid, secondary: &Grid, num_threads: NumThreads, merge: F) -> Result<Vec<i32>>
where
    F: Fn(i32, i32) -> i32 + Sync,
{
    cfg_if::cfg_if! {
        if #[cfg(feature = "rayon")] {
            use rayon::prelude::*;

            let cols = primary.columns();
            let mut data = vec![primary.nodata(); primary.len()];
            num_threads.thread_pool()?.install(|| {
                data.par_chunks_mut(cols)
                    .zip(primary.as_slice().par_chunks(cols))
                    .zip(secondary.as_slice().par_chunks(cols))
                    .for_each(|((out_row, p_row), s_row)| {
                        for ((out, &p), &s) in out_row.iter_mut().zip(p_row).zip(s_row) {
                            *out = merge(p, s);
                        }
                    });
            });

            Ok(data)
        } else {
            let _ = num_threads;
            Ok(primary
                .iter()
                .zip(secondary.iter())
                .map(|(&p, &s)| merge(p, s))
                .collect())
        }
    }
}

fn log_alignment_differences(primary: &Grid, secondary: &Grid) {
    let (p, s) = (primary.header(), secondary.header());
    if !p.is_aligned_with(s) {
        log::warn!(
            "Composite inputs are not aligned (cell size {} <-> {}, lower left {:?} <-> {:?}), using the primary grid georeference",
            p.cell_size(),
            s.cell_size(),
            p.lower_left().x_y(),
            s.lower_left().x_y()
        );
    }

    if p.nodata() != s.nodata() {
        log::debug!(
            "Composite inputs use different nodata values ({} <-> {}), output uses {}",
            p.nodata(),
            s.nodata(),
            p.nodata()
        );
    }
}
