use std::path::Path;

use covergrid::{Cell, Error, FillPolicy, MergeOptions, Result, algo::FillOptions, io::asciigrid, merge_and_fill};
use tempfile::TempDir;

const SSURGO: &str = "ncols         4\n\
                      nrows         3\n\
                      xllcorner     545000\n\
                      yllcorner     5180000\n\
                      cellsize      30\n\
                      NODATA_value  -9999\n\
                      3 3 -9999 -9999\n\
                      3 -9999 -9999 -9999\n\
                      -9999 -9999 -9999 5\n";

const STATSGO: &str = "ncols 4\n\
                       nrows 3\n\
                       xllcorner 545000\n\
                       yllcorner 5180000\n\
                       cellsize 30\n\
                       NODATA_value -9999\n\
                       8 8 8 -9999\n\
                       -9999 -9999 -9999 -9999\n\
                       -9999 -9999 -9999 -9999\n";

fn write_input(dir: &Path, name: &str, contents: &str) -> Result<std::path::PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[test_log::test]
fn merge_soil_grids_from_disk() -> Result<()> {
    let tmp_dir = TempDir::new()?;
    let ssurgo = write_input(tmp_dir.path(), "ssurgo.asc", SSURGO)?;
    let statsgo = write_input(tmp_dir.path(), "statsgo.asc", STATSGO)?;
    let output_path = tmp_dir.path().join("out").join("texture.asc");

    let primary = asciigrid::read(&ssurgo)?;
    let secondary = asciigrid::read(&statsgo)?;
    let output = merge_and_fill(&primary, &secondary, &MergeOptions::default())?;

    #[rustfmt::skip]
    let expected_composite = [
        3,     3,     8,     -9999,
        3,     -9999, -9999, -9999,
        -9999, -9999, -9999, 5,
    ];

    #[rustfmt::skip]
    let expected = [
        3, 3, 8, 8,
        3, 3, 8, 8,
        3, 3, 5, 5,
    ];

    assert_eq!(output.composite.as_slice(), &expected_composite);
    assert_eq!(output.grid.as_slice(), &expected);

    let header_text = asciigrid::read_header_text(&ssurgo)?;
    asciigrid::write_with_header(&output.grid, &header_text, &output_path)?;

    let written = std::fs::read_to_string(&output_path)?;
    assert!(written.starts_with("ncols         4\nnrows         3\n"));
    assert!(written.ends_with("3 3 8 8\n3 3 8 8\n3 3 5 5\n"));

    let reread = asciigrid::read(&output_path)?;
    assert_eq!(reread, output.grid);
    assert_eq!(reread.nodata_count(), 0);

    Ok(())
}

#[test_log::test]
fn filled_output_fills_to_itself() -> Result<()> {
    let primary = asciigrid::read_from(SSURGO.as_bytes())?;
    let secondary = asciigrid::read_from(STATSGO.as_bytes())?;

    for policy in [FillPolicy::LegacyRingOrder, FillPolicy::NearestEuclidean, FillPolicy::BreadthFirst] {
        let opts = MergeOptions::builder()
            .fill(FillOptions::builder().policy(policy).build())
            .build();

        let output = merge_and_fill(&primary, &secondary, &opts)?;
        assert_eq!(output.grid.nodata_count(), 0);
        assert_eq!(covergrid::algo::fill(&output.grid)?, output.grid);
    }

    Ok(())
}

#[test_log::test]
fn mismatched_grids_produce_no_output() -> Result<()> {
    let primary = asciigrid::read_from(SSURGO.as_bytes())?;
    let secondary = asciigrid::read_from("ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 30\n1 2\n3 4\n".as_bytes())?;

    match merge_and_fill(&primary, &secondary, &MergeOptions::default()) {
        Err(Error::DimensionMismatch { size1, size2 }) => {
            assert_eq!(size1, (3, 4));
            assert_eq!(size2, (2, 2));
        }
        other => panic!("Expected a dimension mismatch, got {other:?}"),
    }

    Ok(())
}

#[test_log::test]
fn grid_without_classified_cells_reports_the_cell() -> Result<()> {
    let empty = asciigrid::read_from("ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 30\n-9999 -9999\n-9999 -9999\n".as_bytes())?;

    match merge_and_fill(&empty, &empty, &MergeOptions::default()) {
        Err(Error::NoNeighborFound { cell, radius }) => {
            assert_eq!(cell, Cell::from_row_col(0, 0));
            assert_eq!(radius, 2);
        }
        other => panic!("Expected no neighbour error, got {other:?}"),
    }

    Ok(())
}
