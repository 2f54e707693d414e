use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use covergrid::{
    FillPolicy, Grid, MergeOptions, MergeSummary, NumThreads, algo::FillOptions, io::asciigrid, merge_and_fill,
};
use strum::EnumString;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab_case")]
pub enum PolicySelection {
    Legacy,
    Euclidean,
    BreadthFirst,
}

impl From<PolicySelection> for FillPolicy {
    fn from(policy: PolicySelection) -> Self {
        match policy {
            PolicySelection::Legacy => FillPolicy::LegacyRingOrder,
            PolicySelection::Euclidean => FillPolicy::NearestEuclidean,
            PolicySelection::BreadthFirst => FillPolicy::BreadthFirst,
        }
    }
}

pub struct MergeRequest {
    pub primary: PathBuf,
    pub secondary: PathBuf,
    pub output: PathBuf,
    pub nodata: Option<i32>,
    pub policy: PolicySelection,
    pub max_radius: Option<usize>,
    pub threads: Option<usize>,
    pub mask_codes: Vec<i32>,
    pub keep_intermediate: bool,
}

/// Merges the primary and secondary grid files and writes the gap filled result.
/// The output keeps the header text of the primary input unless the nodata value was overridden.
pub fn merge_grid_files(req: &MergeRequest) -> Result<MergeSummary> {
    for input in [&req.primary, &req.secondary] {
        if !input.is_file() {
            bail!("Cannot find input grid '{}'", input.display());
        }
    }

    let primary = load_grid(&req.primary, req.nodata)?;
    let secondary = load_grid(&req.secondary, req.nodata)?;

    let fill = FillOptions::builder()
        .policy(req.policy.into())
        .maybe_max_radius(req.max_radius)
        .num_threads(req.threads.map_or(NumThreads::AllCpus, NumThreads::Count))
        .build();
    let opts = MergeOptions::builder().fill(fill).mask_codes(req.mask_codes.clone()).build();

    log::info!("Merging '{}' with '{}'", req.primary.display(), req.secondary.display());
    let output = merge_and_fill(&primary, &secondary, &opts)?;

    let header_text = match req.nodata {
        Some(_) => asciigrid::format_header(output.grid.header()),
        None => asciigrid::read_header_text(&req.primary)?,
    };

    if req.keep_intermediate {
        let path = intermediate_path(&req.output);
        asciigrid::write_with_header(&output.composite, &header_text, &path)
            .with_context(|| format!("Failed to write merged grid '{}'", path.display()))?;
        log::info!("Created intermediate merged grid '{}'", path.display());
    }

    asciigrid::write_with_header(&output.grid, &header_text, &req.output)
        .with_context(|| format!("Failed to write output grid '{}'", req.output.display()))?;

    Ok(output.summary)
}

fn load_grid(path: &Path, nodata: Option<i32>) -> Result<Grid> {
    let grid = asciigrid::read(path).with_context(|| format!("Failed to read grid '{}'", path.display()))?;

    match nodata {
        Some(nodata) => {
            let (header, data) = grid.into_raw_parts();
            Ok(Grid::new(header.copy_with_nodata(nodata), data)?)
        }
        None => Ok(grid),
    }
}

/// `texture.asc` -> `texture_mergedFile.asc`
pub fn intermediate_path(output: &Path) -> PathBuf {
    let stem = output.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let file_name = match output.extension() {
        Some(ext) => format!("{stem}_mergedFile.{}", ext.to_string_lossy()),
        None => format!("{stem}_mergedFile"),
    };

    output.with_file_name(file_name)
}
