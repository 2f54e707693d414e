use crate::{
    Grid, Result,
    algo::{self, CompositeSummary, FillOptions, FillSummary},
};

#[derive(Debug, Clone, Default, bon::Builder)]
pub struct MergeOptions {
    #[builder(default)]
    pub fill: FillOptions,
    /// Class codes of the composite that are replaced by their nearest neighbours
    #[builder(default)]
    pub mask_codes: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeSummary {
    pub composite: CompositeSummary,
    pub masked_cells: usize,
    pub fill: FillSummary,
}

#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// The fully classified result
    pub grid: Grid,
    /// The priority merge of the inputs before masking and gap filling
    pub composite: Grid,
    pub summary: MergeSummary,
}

/// Composites the grids by priority and fills the remaining gaps.
///
/// Either a grid without missing cells is returned or an error, no partial results are produced.
pub fn merge_and_fill(primary: &Grid, secondary: &Grid, opts: &MergeOptions) -> Result<MergeOutput> {
    let (composite, composite_summary) = algo::composite_with_summary(primary, secondary, opts.fill.num_threads)?;

    let (grid, masked_cells, fill) = if opts.mask_codes.is_empty() {
        let (grid, fill) = algo::fill_with_summary(&composite, &opts.fill)?;
        (grid, 0, fill)
    } else {
        let masked = algo::mask_values(&composite, &opts.mask_codes)?;
        let masked_cells = masked.nodata_count() - composite.nodata_count();
        log::debug!("Masked {masked_cells} cells with codes {:?}", opts.mask_codes);

        let (grid, fill) = algo::fill_with_summary(&masked, &opts.fill)?;
        (grid, masked_cells, fill)
    };

    log::info!(
        "Merged grid {}: {} cells from primary, {} from secondary, {} filled",
        grid.size(),
        composite_summary.from_primary,
        composite_summary.from_secondary,
        fill.filled_cells
    );

    Ok(MergeOutput {
        grid,
        composite,
        summary: MergeSummary {
            composite: composite_summary,
            masked_cells,
            fill,
        },
    })
}
