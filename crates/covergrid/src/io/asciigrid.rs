//! ESRI ASCII grid reading and writing.
//!
//! The format consists of a small header with one `key value` pair per line followed by
//! the cell values, one line per grid row starting at the top row:
//!
//! ```text
//! ncols        3
//! nrows        2
//! xllcorner    22000
//! yllcorner    153000
//! cellsize     100
//! NODATA_value -9999
//! 1 2 3
//! 4 -9999 6
//! ```
//!
//! Only integer class codes are supported, values written as integral floats (`12.0`) are accepted on read.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use itertools::Itertools;

use crate::{DEFAULT_NODATA, Error, Grid, GridHeader, GridSize, Point, Result, grid::checked_cell_count};

use super::create_directory_for_file;

/// Reads the grid stored at the given path
pub fn read(path: &Path) -> Result<Grid> {
    let grid = read_from(open(path)?)?;
    log::debug!("Read grid {} from {}", grid.size(), path.display());
    Ok(grid)
}

pub fn read_from<R: BufRead>(mut reader: R) -> Result<Grid> {
    let mut fields = HeaderFields::default();
    let mut data = Vec::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        if !is_header_line(&line) {
            parse_values(&line, &mut data)?;
            break;
        }

        fields.parse_line(&line)?;
    }

    // no preallocation from the header dimensions, corrupt dimensions fail on the value count
    let header = fields.into_header()?;
    let cell_count = checked_cell_count(header.size())?;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        parse_values(&line, &mut data)?;
    }

    if data.len() != cell_count {
        return Err(Error::InvalidArgument(format!(
            "Expected {} grid values for grid {} but found {}",
            cell_count,
            header.size(),
            data.len()
        )));
    }

    Grid::new(header, data)
}

/// Returns the header lines of the grid file exactly as they are stored
pub fn read_header_text(path: &Path) -> Result<String> {
    let mut reader = open(path)?;
    let mut header = String::new();
    let mut line = String::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 || !is_header_line(&line) {
            break;
        }

        header.push_str(&line);
    }

    Ok(header)
}

/// Parses header text as returned by [`read_header_text`]
pub fn parse_header(header_text: &str) -> Result<GridHeader> {
    let mut fields = HeaderFields::default();
    for line in header_text.lines().filter(|line| !line.trim().is_empty()) {
        fields.parse_line(line)?;
    }

    fields.into_header()
}

/// The header text the writer produces for the grid header
pub fn format_header(header: &GridHeader) -> String {
    format!(
        "ncols {}\nnrows {}\nxllcorner {}\nyllcorner {}\ncellsize {}\nNODATA_value {}\n",
        header.columns(),
        header.rows(),
        header.lower_left().x(),
        header.lower_left().y(),
        header.cell_size(),
        header.nodata()
    )
}

/// Writes the grid to disk, the parent directories of the path are created when needed
pub fn write(grid: &Grid, path: &Path) -> Result {
    write_with_header(grid, &format_header(grid.header()), path)
}

/// Writes the grid values below the provided header text, which is written unchanged.
/// This keeps the header of an input file byte for byte, the dimensions of the header must match the grid.
pub fn write_with_header(grid: &Grid, header_text: &str, path: &Path) -> Result {
    let header = parse_header(header_text)?;
    if header.size() != grid.size() {
        return Err(Error::DimensionMismatch {
            size1: (header.rows(), header.columns()),
            size2: (grid.rows(), grid.columns()),
        });
    }

    create_directory_for_file(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_to(grid, header_text, &mut writer)?;
    writer.flush()?;

    log::debug!("Wrote grid {} to {}", grid.size(), path.display());
    Ok(())
}

pub fn write_to<W: Write>(grid: &Grid, header_text: &str, writer: &mut W) -> Result {
    writer.write_all(header_text.as_bytes())?;
    if !header_text.is_empty() && !header_text.ends_with('\n') {
        writeln!(writer)?;
    }

    for row in grid.rows_iter() {
        writeln!(writer, "{}", row.iter().join(" "))?;
    }

    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    if !path.is_file() {
        return Err(Error::InvalidPath(path.to_path_buf()));
    }

    Ok(BufReader::new(File::open(path)?))
}

fn is_header_line(line: &str) -> bool {
    line.trim_start().starts_with(|c: char| c.is_ascii_alphabetic())
}

fn parse_values(line: &str, data: &mut Vec<i32>) -> Result {
    for token in line.split_whitespace() {
        data.push(parse_code(token)?);
    }

    Ok(())
}

fn parse_code(token: &str) -> Result<i32> {
    if let Ok(val) = token.parse::<i32>() {
        return Ok(val);
    }

    let val = token.parse::<f64>()?;
    if val.fract() != 0.0 || val < i32::MIN as f64 || val > i32::MAX as f64 {
        return Err(Error::InvalidNumber(format!("'{token}' is not an integer class code")));
    }

    Ok(val as i32)
}

#[derive(Default)]
struct HeaderFields {
    cols: Option<usize>,
    rows: Option<usize>,
    x: Option<(f64, bool)>,
    y: Option<(f64, bool)>,
    cell_size: Option<f64>,
    nodata: Option<i32>,
}

impl HeaderFields {
    fn parse_line(&mut self, line: &str) -> Result {
        let mut tokens = line.split_whitespace();
        let (Some(key), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(Error::InvalidArgument(format!("Invalid grid header line '{}'", line.trim())));
        };

        match key.to_ascii_lowercase().as_str() {
            "ncols" => self.cols = Some(value.parse()?),
            "nrows" => self.rows = Some(value.parse()?),
            "xllcorner" => self.x = Some((value.parse()?, false)),
            "xllcenter" => self.x = Some((value.parse()?, true)),
            "yllcorner" => self.y = Some((value.parse()?, false)),
            "yllcenter" => self.y = Some((value.parse()?, true)),
            "cellsize" => self.cell_size = Some(value.parse()?),
            "nodata_value" => self.nodata = Some(parse_code(value)?),
            _ => return Err(Error::InvalidArgument(format!("Unknown grid header key '{key}'"))),
        }

        Ok(())
    }

    fn into_header(self) -> Result<GridHeader> {
        let cols = self.cols.ok_or_else(|| missing_key("ncols"))?;
        let rows = self.rows.ok_or_else(|| missing_key("nrows"))?;
        let (x, x_is_center) = self.x.ok_or_else(|| missing_key("xllcorner"))?;
        let (y, y_is_center) = self.y.ok_or_else(|| missing_key("yllcorner"))?;
        let cell_size = self.cell_size.ok_or_else(|| missing_key("cellsize"))?;

        if cell_size.is_nan() || cell_size <= 0.0 {
            return Err(Error::InvalidArgument(format!("Invalid cell size: {cell_size}")));
        }

        // the grid origin is the lower left corner of the lower left cell
        let half_cell = cell_size / 2.0;
        let lower_left = Point::new(
            if x_is_center { x - half_cell } else { x },
            if y_is_center { y - half_cell } else { y },
        );

        Ok(GridHeader::new(
            GridSize::with_rows_cols(rows, cols),
            lower_left,
            cell_size,
            self.nodata.unwrap_or(DEFAULT_NODATA),
        ))
    }
}

fn missing_key(key: &str) -> Error {
    Error::InvalidArgument(format!("Grid header is missing the '{key}' field"))
}
