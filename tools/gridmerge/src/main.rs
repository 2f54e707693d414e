use std::path::PathBuf;

use clap::Parser;
use env_logger::{Env, TimestampPrecision};

use crate::merge::{MergeRequest, PolicySelection, merge_grid_files};

pub type Result<T> = anyhow::Result<T>;

mod merge;

#[derive(Parser, Debug)]
#[clap(
    name = "gridmerge",
    about = "Merge a primary and secondary classification grid and fill the remaining gaps"
)]
pub struct Opt {
    #[arg(long = "primary", short = 'p')]
    pub primary: PathBuf,

    #[arg(long = "secondary", short = 's')]
    pub secondary: PathBuf,

    #[arg(long = "output", short = 'o')]
    pub output: PathBuf,

    /// Missing value of both inputs, overrides the value from the grid headers
    #[arg(long = "nodata", allow_negative_numbers = true)]
    pub nodata: Option<i32>,

    #[arg(long = "policy", value_name = "legacy|euclidean|breadth-first", default_value = "legacy")]
    pub policy: PolicySelection,

    #[arg(long = "max-radius")]
    pub max_radius: Option<usize>,

    #[arg(long = "threads", short = 't', env = "GRIDMERGE_THREADS")]
    pub threads: Option<usize>,

    /// Class codes that are replaced by their neighbours after merging
    #[arg(long = "mask-codes", value_delimiter = ',', allow_negative_numbers = true)]
    pub mask_codes: Vec<i32>,

    /// Also write the merged grid before gap filling as <output>_mergedFile
    #[arg(long = "keep-intermediate")]
    pub keep_intermediate: bool,

    #[arg(long = "verbose", short = 'v')]
    pub verbose: bool,
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(if opt.verbose { "info" } else { "warn" }))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let req = MergeRequest {
        primary: opt.primary,
        secondary: opt.secondary,
        output: opt.output,
        nodata: opt.nodata,
        policy: opt.policy,
        max_radius: opt.max_radius,
        threads: opt.threads,
        mask_codes: opt.mask_codes,
        keep_intermediate: opt.keep_intermediate,
    };

    let summary = merge_grid_files(&req)?;
    println!(
        "Created '{}': {} cells from primary, {} from secondary, {} filled (max radius {})",
        req.output.display(),
        summary.composite.from_primary,
        summary.composite.from_secondary,
        summary.fill.filled_cells,
        summary.fill.max_radius
    );

    Ok(())
}
