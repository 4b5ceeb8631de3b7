use std::fmt;

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::error::LifeError;
use crate::grid::{Cells, EdgePolicy, Grid};
use crate::rng::{Rng, entropy_seed};

const ALIVE_CODE_POINT: char = '\u{25FC}'; // BLACK MEDIUM SQUARE
const DEAD_CODE_POINT: char = '\u{25FB}'; // WHITE MEDIUM SQUARE

/// A cell position, column first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub column: u32,
    pub row: u32,
}

impl Coord {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl From<(u32, u32)> for Coord {
    fn from((column, row): (u32, u32)) -> Self {
        Self { column, row }
    }
}

/// B3/S23: survive on 2 or 3, birth on exactly 3.
#[inline]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Game of Life engine. Owns its grid exclusively and advances it one
/// generation per [`Universe::tick`].
///
/// Not internally synchronized: a [`Cells`] view borrowed from
/// [`Universe::cells`] must be dropped before the next mutating call, which
/// the borrow checker enforces for safe callers.
#[derive(Clone, Debug)]
pub struct Universe {
    grid: Grid,
    // Next-generation buffer, swapped with the grid's on every tick.
    scratch: Vec<u8>,
    edges: EdgePolicy,
    generation: u64,
}

impl Universe {
    /// All-dead toroidal universe.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_edges(width, height, EdgePolicy::Toroidal)
    }

    /// All-dead universe with the given edge policy.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    pub fn with_edges(width: u32, height: u32, edges: EdgePolicy) -> Self {
        let grid = Grid::new(width, height);
        let scratch = vec![0u8; grid.snapshot().as_bytes().len()];
        debug!(width, height, ?edges, "created universe");
        Self {
            grid,
            scratch,
            edges,
            generation: 0,
        }
    }

    /// Toroidal universe with every cell alive with probability 0.5.
    /// Deterministic when `seed` is given.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    pub fn random(width: u32, height: u32, seed: Option<u64>) -> Self {
        let mut universe = Self::new(width, height);
        universe.randomize_state(seed);
        universe
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn edges(&self) -> EdgePolicy {
        self.edges
    }

    /// Generations advanced since construction or the last full overwrite.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.grid.live_count()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Packed row-major state, valid until the next mutating call.
    pub fn cells(&self) -> Cells<'_> {
        self.grid.snapshot()
    }

    pub fn is_alive(&self, coord: Coord) -> Result<bool, LifeError> {
        self.validate(coord)?;
        self.grid.get(coord.row, coord.column)
    }

    /// Advance one generation.
    pub fn tick(&mut self) {
        let grid = &self.grid;
        let edges = self.edges;
        let width = grid.width() as usize;
        let len = grid.len();

        self.scratch
            .par_iter_mut()
            .enumerate()
            .for_each(|(byte, out)| {
                let mut next = 0u8;
                for bit in 0..8 {
                    let n = byte * 8 + bit;
                    if n >= len {
                        break;
                    }
                    let row = (n / width) as u32;
                    let col = (n % width) as u32;
                    let live_neighbors = grid.live_neighbor_count(row, col, edges);
                    if next_state(grid.bit(n), live_neighbors) {
                        next |= 1 << bit;
                    }
                }
                *out = next;
            });

        if tracing::enabled!(tracing::Level::TRACE) {
            let changed: u32 = grid
                .snapshot()
                .as_bytes()
                .iter()
                .zip(&self.scratch)
                .map(|(a, b)| (a ^ b).count_ones())
                .sum();
            trace!(generation = self.generation + 1, changed, "tick");
        }

        self.grid.swap_bytes(&mut self.scratch);
        self.generation += 1;
    }

    /// Flip the cell at `coord`.
    pub fn toggle_cell(&mut self, coord: Coord) -> Result<(), LifeError> {
        self.validate(coord)?;
        self.grid.toggle(coord.row, coord.column)
    }

    /// Overwrite every cell with an independent fair coin flip. Without a
    /// seed a fresh one is drawn from entropy and logged.
    pub fn randomize_state(&mut self, seed: Option<u64>) {
        let seed = seed.unwrap_or_else(entropy_seed);
        debug!(seed, "randomizing universe");
        Rng::new(seed).fill_bytes(self.grid.bytes_mut());
        self.grid.clear_padding();
        self.generation = 0;
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        debug!("clearing universe");
        self.grid.fill(false);
        self.generation = 0;
    }

    /// Bring every listed cell to life. `coords` alternates column, row.
    ///
    /// All-or-nothing: on error no cell is changed.
    pub fn set_cells_by_coords(&mut self, coords: &[u32]) -> Result<(), LifeError> {
        if coords.len() % 2 != 0 {
            warn!(len = coords.len(), "rejected odd-length coordinate list");
            return Err(LifeError::MalformedInput { len: coords.len() });
        }
        let indices = coords
            .chunks_exact(2)
            .map(|pair| self.index_of(Coord::new(pair[0], pair[1])))
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_alive(&indices);
        Ok(())
    }

    /// Typed form of [`Universe::set_cells_by_coords`], same all-or-nothing rule.
    pub fn set_cells(&mut self, coords: &[Coord]) -> Result<(), LifeError> {
        let indices = coords
            .iter()
            .map(|&c| self.index_of(c))
            .collect::<Result<Vec<_>, _>>()?;
        self.apply_alive(&indices);
        Ok(())
    }

    fn apply_alive(&mut self, indices: &[usize]) {
        for &n in indices {
            self.grid.put(n, true);
        }
        debug!(cells = indices.len(), "set cells alive");
    }

    fn validate(&self, coord: Coord) -> Result<(), LifeError> {
        if self.grid.contains(coord.row, coord.column) {
            Ok(())
        } else {
            warn!(column = coord.column, row = coord.row, "rejected coordinate");
            Err(LifeError::InvalidCoordinate {
                column: coord.column,
                row: coord.row,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    fn index_of(&self, coord: Coord) -> Result<usize, LifeError> {
        self.validate(coord)?;
        Ok(self.grid.idx(coord.row, coord.column))
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells = self.cells();
        for row in 0..self.height() {
            for col in 0..self.width() {
                let symbol = if cells.get(row, col) == Some(true) {
                    ALIVE_CODE_POINT
                } else {
                    DEAD_CODE_POINT
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
