use std::collections::VecDeque;

use crate::{Cell, Error, Grid, GridSize, Result};

use super::{NumThreads, RingOffsets};

/// Decides which classified cell provides the value for a missing cell.
///
/// All policies resolve a missing cell from the classified cells at the smallest Chebyshev distance,
/// they only differ in how a tie within that distance is broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillPolicy {
    /// First classified cell in [`RingOffsets`] order, compatible with historical outputs
    #[default]
    LegacyRingOrder,
    /// Smallest Euclidean distance within the first ring that contains a classified cell,
    /// remaining ties are resolved in row-major order
    NearestEuclidean,
    /// Multi-source flood fill from all classified cells, linear in the number of cells
    BreadthFirst,
}

#[derive(Debug, Clone, Copy, Default, bon::Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillOptions {
    #[builder(default)]
    pub policy: FillPolicy,
    /// Upper bound for the search radius, never exceeds the largest grid dimension
    pub max_radius: Option<usize>,
    #[builder(default)]
    pub num_threads: NumThreads,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillSummary {
    pub filled_cells: usize,
    /// Largest Chebyshev radius that was needed to resolve a missing cell
    pub max_radius: usize,
}

/// A gap filling algorithm
pub trait GapFillStrategy {
    const POLICY: FillPolicy;

    /// Returns the filled cell buffer of the grid and the largest radius that was needed.
    /// Every lookup is made against the original grid, filled cells never act as a source.
    /// The grid contains at least one missing and one classified cell.
    fn fill_data(grid: &Grid, ceiling: usize, num_threads: NumThreads) -> Result<(Vec<i32>, usize)>;
}

pub struct LegacyRingOrder;
pub struct NearestEuclidean;
pub struct BreadthFirst;

/// Fills the missing cells of the grid using the default options
pub fn fill(grid: &Grid) -> Result<Grid> {
    fill_with_options(grid, &FillOptions::default())
}

pub fn fill_with_options(grid: &Grid, opts: &FillOptions) -> Result<Grid> {
    Ok(fill_with_summary(grid, opts)?.0)
}

/// Returns a new grid in which every missing cell holds the value of a nearby classified cell.
///
/// Classified cells are copied unchanged, a grid without missing cells fills to itself.
/// Fails with [`Error::NoNeighborFound`] when a missing cell has no classified cell within the search radius,
/// which is always the case for a grid without classified cells.
pub fn fill_with_summary(grid: &Grid, opts: &FillOptions) -> Result<(Grid, FillSummary)> {
    let ceiling = search_ceiling(grid.size(), opts.max_radius)?;

    let missing = grid.nodata_count();
    if missing == 0 {
        return Ok((grid.clone(), FillSummary::default()));
    }

    if !grid.contains_data() {
        return Err(Error::NoNeighborFound {
            cell: Cell::from_row_col(0, 0),
            radius: ceiling,
        });
    }

    let (data, max_radius) = match opts.policy {
        FillPolicy::LegacyRingOrder => LegacyRingOrder::fill_data(grid, ceiling, opts.num_threads)?,
        FillPolicy::NearestEuclidean => NearestEuclidean::fill_data(grid, ceiling, opts.num_threads)?,
        FillPolicy::BreadthFirst => BreadthFirst::fill_data(grid, ceiling, opts.num_threads)?,
    };

    let summary = FillSummary {
        filled_cells: missing,
        max_radius,
    };

    log::debug!(
        "Filled {} cells using {:?} (max search radius {})",
        summary.filled_cells,
        opts.policy,
        summary.max_radius
    );

    Ok((Grid::new(*grid.header(), data)?, summary))
}

fn search_ceiling(size: GridSize, max_radius: Option<usize>) -> Result<usize> {
    // no cell of the grid lies beyond this radius
    let grid_ceiling = size.max_dimension();

    match max_radius {
        Some(0) => Err(Error::InvalidArgument("The maximum search radius must be positive".into())),
        Some(radius) => Ok(radius.min(grid_ceiling)),
        None => Ok(grid_ceiling),
    }
}

/// Selection of the source cell within a single ring
trait RingSelection {
    fn select(grid: &Grid, center: Cell, ring: RingOffsets) -> Option<i32>;
}

impl RingSelection for LegacyRingOrder {
    fn select(grid: &Grid, center: Cell, ring: RingOffsets) -> Option<i32> {
        ring.cells_within(center, grid.size()).find_map(|cell| grid.value(cell))
    }
}

impl RingSelection for NearestEuclidean {
    fn select(grid: &Grid, center: Cell, ring: RingOffsets) -> Option<i32> {
        ring.cells_within(center, grid.size())
            .filter_map(|cell| grid.value(cell).map(|val| (cell, val)))
            .min_by_key(|(cell, _)| (center.squared_distance(cell), *cell))
            .map(|(_, val)| val)
    }
}

impl GapFillStrategy for LegacyRingOrder {
    const POLICY: FillPolicy = FillPolicy::LegacyRingOrder;

    fn fill_data(grid: &Grid, ceiling: usize, num_threads: NumThreads) -> Result<(Vec<i32>, usize)> {
        fill_by_ring_search::<Self>(grid, ceiling, num_threads)
    }
}

impl GapFillStrategy for NearestEuclidean {
    const POLICY: FillPolicy = FillPolicy::NearestEuclidean;

    fn fill_data(grid: &Grid, ceiling: usize, num_threads: NumThreads) -> Result<(Vec<i32>, usize)> {
        fill_by_ring_search::<Self>(grid, ceiling, num_threads)
    }
}

enum SearchState {
    Probing { radius: usize },
    Found { value: i32, radius: usize },
    Exhausted { radius: usize },
}

/// Expanding ring search around a missing cell, bounded by the ceiling radius
fn search_nearest<S: RingSelection>(grid: &Grid, center: Cell, ceiling: usize) -> Result<(i32, usize)> {
    let mut state = SearchState::Probing { radius: 1 };

    loop {
        state = match state {
            SearchState::Probing { radius } if radius > ceiling => SearchState::Exhausted { radius: ceiling },
            SearchState::Probing { radius } => match S::select(grid, center, RingOffsets::new(radius)?) {
                Some(value) => SearchState::Found { value, radius },
                None => SearchState::Probing { radius: radius + 1 },
            },
            SearchState::Found { value, radius } => return Ok((value, radius)),
            SearchState::Exhausted { radius } => return Err(Error::NoNeighborFound { cell: center, radius }),
        };
    }
}

fn fill_row<S: RingSelection>(grid: &Grid, row: usize, row_data: &mut [i32], ceiling: usize) -> Result<usize> {
    let nodata = grid.nodata();
    let mut max_radius = 0;

    for (col, val) in row_data.iter_mut().enumerate() {
        if *val != nodata {
            continue;
        }

        let (found, radius) = search_nearest::<S>(grid, Cell::from_row_col(row as i32, col as i32), ceiling)?;
        *val = found;
        max_radius = max_radius.max(radius);
    }

    Ok(max_radius)
}

fn fill_by_ring_search<S: RingSelection>(grid: &Grid, ceiling: usize, num_threads: NumThreads) -> Result<(Vec<i32>, usize)> {
    let mut data = grid.as_slice().to_vec();

    let max_radius = if num_threads.is_parallel() {
        fill_rows_parallel::<S>(grid, &mut data, ceiling, num_threads)?
    } else {
        fill_rows::<S>(grid, &mut data, ceiling)?
    };

    Ok((data, max_radius))
}

fn fill_rows<S: RingSelection>(grid: &Grid, data: &mut [i32], ceiling: usize) -> Result<usize> {
    let mut max_radius = 0;
    for (row, row_data) in data.chunks_mut(grid.columns()).enumerate() {
        max_radius = max_radius.max(fill_row::<S>(grid, row, row_data, ceiling)?);
    }

    Ok(max_radius)
}

#[cfg(feature = "rayon")]
fn fill_rows_parallel<S: RingSelection>(grid: &Grid, data: &mut [i32], ceiling: usize, num_threads: NumThreads) -> Result<usize> {
    use rayon::prelude::*;

    // every row writes to its own slice of the output and only reads the original grid
    num_threads.thread_pool()?.install(|| {
        data.par_chunks_mut(grid.columns())
            .enumerate()
            .map(|(row, row_data)| fill_row::<S>(grid, row, row_data, ceiling))
            .try_reduce(|| 0, |a, b| Ok(a.max(b)))
    })
}

#[cfg(not(feature = "rayon"))]
fn fill_rows_parallel<S: RingSelection>(grid: &Grid, data: &mut [i32], ceiling: usize, _num_threads: NumThreads) -> Result<usize> {
    fill_rows::<S>(grid, data, ceiling)
}

impl GapFillStrategy for BreadthFirst {
    const POLICY: FillPolicy = FillPolicy::BreadthFirst;

    /// Flood fill from all classified cells at once using 8-connectivity, so the flood distance
    /// of a cell equals its Chebyshev distance to the nearest classified cell.
    /// Sources are seeded in row-major order and neighbours are visited in radius one ring order.
    /// The flood is sequential, the thread count is ignored.
    fn fill_data(grid: &Grid, ceiling: usize, _num_threads: NumThreads) -> Result<(Vec<i32>, usize)> {
        let size = grid.size();
        let mut data = grid.as_slice().to_vec();
        let mut distance = vec![usize::MAX; data.len()];
        let mut queue = VecDeque::with_capacity(data.len());

        for index in 0..data.len() {
            if !grid.index_is_nodata(index) {
                distance[index] = 0;
                queue.push_back(index);
            }
        }

        let neighbours = RingOffsets::new(1)?;
        let mut max_radius = 0;
        while let Some(index) = queue.pop_front() {
            let next_distance = distance[index] + 1;
            if next_distance > ceiling {
                continue;
            }

            for neighbour in neighbours.cells_within(size.cell_at_index(index), size) {
                if let Some(neighbour_index) = size.index_of(neighbour) {
                    if distance[neighbour_index] == usize::MAX {
                        distance[neighbour_index] = next_distance;
                        data[neighbour_index] = data[index];
                        max_radius = next_distance;
                        queue.push_back(neighbour_index);
                    }
                }
            }
        }

        if let Some(index) = distance.iter().position(|&d| d == usize::MAX) {
            return Err(Error::NoNeighborFound {
                cell: size.cell_at_index(index),
                radius: ceiling,
            });
        }

        Ok((data, max_radius))
    }
}


#[cfg(test)]
fn sequential_options<S: GapFillStrategy>() -> FillOptions {
    FillOptions::builder()
        .policy(S::POLICY)
        .num_threads(NumThreads::Count(1))
        .build()
}
