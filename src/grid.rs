use serde::{Deserialize, Serialize};

use crate::error::LifeError;

/// Bytes needed to pack `cells` bits, 8 per byte.
#[inline]
pub fn packed_len(cells: usize) -> usize {
    cells.div_ceil(8)
}

/// How neighbor lookups behave at the grid boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Opposite edges are adjacent. On a dimension of 1 or 2 the same
    /// physical cell can be counted more than once.
    #[default]
    Toroidal,
    /// Off-grid positions are permanently dead.
    Dead,
}

impl EdgePolicy {
    /// Row or column deltas to visit along an axis of length `dim`. Toroidal
    /// deltas are unsigned and wrapped with `% dim`, so `dim - 1` stands for
    /// -1; on a 1-long axis it collapses onto 0 and is skipped with it.
    #[inline]
    fn deltas(self, dim: u32) -> [i64; 3] {
        match self {
            EdgePolicy::Toroidal => [dim as i64 - 1, 0, 1],
            EdgePolicy::Dead => [-1, 0, 1],
        }
    }

    /// Move `i` by `delta` along an axis of length `dim`. Returns None if
    /// the position falls off a dead edge.
    #[inline]
    pub fn step(self, i: u32, delta: i64, dim: u32) -> Option<u32> {
        let moved = i as i64 + delta;
        match self {
            EdgePolicy::Toroidal => Some(moved.rem_euclid(dim as i64) as u32),
            EdgePolicy::Dead => (0..dim as i64).contains(&moved).then_some(moved as u32),
        }
    }
}

/// Row-major bit-packed liveness grid. Bit `n` lives at byte `n / 8`,
/// mask `1 << (n % 8)`, where `n = row * width + column`.
///
/// Padding bits past `width * height` in the last byte are always zero.
#[allow(clippy::len_without_is_empty)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl Grid {
    /// All-dead grid.
    ///
    /// # Panics
    /// If `width` or `height` is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            bits: vec![0u8; packed_len(cells)],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells, `width * height`.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn contains(&self, row: u32, column: u32) -> bool {
        row < self.height && column < self.width
    }

    #[inline]
    pub fn idx(&self, row: u32, column: u32) -> usize {
        debug_assert!(self.contains(row, column));
        row as usize * self.width as usize + column as usize
    }

    #[inline]
    pub(crate) fn bit(&self, n: usize) -> bool {
        self.bits[n / 8] & (1 << (n % 8)) != 0
    }

    #[inline]
    pub(crate) fn put(&mut self, n: usize, alive: bool) {
        let mask = 1u8 << (n % 8);
        if alive {
            self.bits[n / 8] |= mask;
        } else {
            self.bits[n / 8] &= !mask;
        }
    }

    #[inline]
    pub(crate) fn flip(&mut self, n: usize) {
        self.bits[n / 8] ^= 1 << (n % 8);
    }

    fn check(&self, row: u32, column: u32) -> Result<usize, LifeError> {
        if self.contains(row, column) {
            Ok(self.idx(row, column))
        } else {
            Err(LifeError::OutOfBounds {
                row,
                column,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, row: u32, column: u32) -> Result<bool, LifeError> {
        let n = self.check(row, column)?;
        Ok(self.bit(n))
    }

    pub fn set(&mut self, row: u32, column: u32, alive: bool) -> Result<(), LifeError> {
        let n = self.check(row, column)?;
        self.put(n, alive);
        Ok(())
    }

    pub fn toggle(&mut self, row: u32, column: u32) -> Result<(), LifeError> {
        let n = self.check(row, column)?;
        self.flip(n);
        Ok(())
    }

    /// Set every cell to `alive`.
    pub fn fill(&mut self, alive: bool) {
        self.bits.fill(if alive { 0xFF } else { 0 });
        self.clear_padding();
    }

    /// Zero the unused high bits of the last byte.
    pub(crate) fn clear_padding(&mut self) {
        let used = self.len() % 8;
        if used != 0 {
            if let Some(last) = self.bits.last_mut() {
                *last &= (1u8 << used) - 1;
            }
        }
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bits
    }

    /// Replace the packed buffer with `next`, handing the old one back in `next`.
    pub(crate) fn swap_bytes(&mut self, next: &mut Vec<u8>) {
        debug_assert_eq!(self.bits.len(), next.len());
        std::mem::swap(&mut self.bits, next);
    }

    pub fn live_count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Live cells among the 8 Moore neighbors of `(row, column)`.
    ///
    /// Pairs where both deltas are 0 are skipped, so on a toroidal 1-long
    /// axis the cell still reaches itself through the other axis's deltas.
    pub fn live_neighbor_count(&self, row: u32, column: u32, edges: EdgePolicy) -> u8 {
        let mut count = 0;
        for delta_row in edges.deltas(self.height) {
            for delta_col in edges.deltas(self.width) {
                if delta_row == 0 && delta_col == 0 {
                    continue;
                }
                let Some(r) = edges.step(row, delta_row, self.height) else {
                    continue;
                };
                if let Some(c) = edges.step(column, delta_col, self.width) {
                    count += self.bit(self.idx(r, c)) as u8;
                }
            }
        }
        count
    }

    /// Read-only view of the packed buffer.
    pub fn snapshot(&self) -> Cells<'_> {
        Cells {
            width: self.width,
            height: self.height,
            bytes: &self.bits,
        }
    }
}

/// Borrowed view of a grid's packed state.
///
/// Holding a `Cells` keeps the owning grid immutably borrowed, so the view
/// cannot outlive the next mutating call.
#[allow(clippy::len_without_is_empty)]
#[derive(Clone, Copy, Debug)]
pub struct Cells<'a> {
    width: u32,
    height: u32,
    bytes: &'a [u8],
}

impl<'a> Cells<'a> {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The packed bytes, `ceil(width * height / 8)` long.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Liveness of bit `n`, or None past the last cell.
    pub fn bit(&self, n: usize) -> Option<bool> {
        (n < self.len()).then(|| self.bytes[n / 8] & (1 << (n % 8)) != 0)
    }

    pub fn get(&self, row: u32, column: u32) -> Option<bool> {
        if row < self.height && column < self.width {
            self.bit(row as usize * self.width as usize + column as usize)
        } else {
            None
        }
    }

    /// Cells in row-major order.
    pub fn iter(self) -> impl Iterator<Item = bool> + 'a {
        let bytes = self.bytes;
        (0..self.len()).map(move |n| bytes[n / 8] & (1 << (n % 8)) != 0)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_packed_len() {
        assert_eq!(packed_len(0), 0);
        assert_eq!(packed_len(1), 1);
        assert_eq!(packed_len(8), 1);
        assert_eq!(packed_len(9), 2);
        assert_eq!(packed_len(64 * 64), 512);
    }

    #[test]
    fn test_bit_layout() {
        let mut grid = Grid::new(5, 3);
        grid.set(1, 3, true).unwrap();
        // n = 1 * 5 + 3 = 8 -> byte 1, mask 1
        assert_eq!(grid.snapshot().as_bytes(), &[0, 1]);
        grid.set(0, 2, true).unwrap();
        assert_eq!(grid.snapshot().as_bytes(), &[0b100, 1]);
        assert_eq!(grid.snapshot().bit(8), Some(true));
        assert_eq!(grid.snapshot().bit(15), None);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 2);
        assert_eq!(
            grid.get(2, 0),
            Err(LifeError::OutOfBounds {
                row: 2,
                column: 0,
                width: 4,
                height: 2
            })
        );
        assert!(grid.set(0, 4, true).is_err());
        assert!(grid.toggle(9, 9).is_err());
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_set_touches_one_bit() {
        let mut grid = Grid::new(3, 3);
        grid.fill(true);
        grid.set(1, 1, false).unwrap();
        assert_eq!(grid.live_count(), 8);
        assert_eq!(grid.get(1, 1), Ok(false));
        assert_eq!(grid.get(1, 2), Ok(true));
    }

    #[test]
    fn test_fill_keeps_padding_clear() {
        let mut grid = Grid::new(3, 3);
        grid.fill(true);
        assert_eq!(grid.snapshot().as_bytes(), &[0xFF, 0x01]);
        assert_eq!(grid.live_count(), 9);
        grid.fill(false);
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_edge_step() {
        assert_eq!(EdgePolicy::Toroidal.step(0, 4, 5), Some(4));
        assert_eq!(EdgePolicy::Toroidal.step(4, 1, 5), Some(0));
        assert_eq!(EdgePolicy::Toroidal.step(0, 1, 1), Some(0));
        assert_eq!(EdgePolicy::Dead.step(0, -1, 5), None);
        assert_eq!(EdgePolicy::Dead.step(4, 1, 5), None);
        assert_eq!(EdgePolicy::Dead.step(2, 1, 5), Some(3));
    }

    #[test]
    fn test_edge_deltas() {
        assert_eq!(EdgePolicy::Toroidal.deltas(5), [4, 0, 1]);
        assert_eq!(EdgePolicy::Toroidal.deltas(1), [0, 0, 1]);
        assert_eq!(EdgePolicy::Dead.deltas(1), [-1, 0, 1]);
    }

    #[test]
    fn test_neighbors_wrap_corner() {
        let mut grid = Grid::new(4, 4);
        grid.set(3, 3, true).unwrap();
        grid.set(0, 3, true).unwrap();
        grid.set(3, 0, true).unwrap();
        assert_eq!(grid.live_neighbor_count(0, 0, EdgePolicy::Toroidal), 3);
        assert_eq!(grid.live_neighbor_count(0, 0, EdgePolicy::Dead), 0);
    }

    #[test]
    fn test_neighbors_on_one_by_one() {
        // Row deltas [0, 0, 1] x column deltas [0, 0, 1]: four (0, 0) pairs
        // are skipped, the other five all land on the cell itself.
        let mut grid = Grid::new(1, 1);
        grid.set(0, 0, true).unwrap();
        assert_eq!(grid.live_neighbor_count(0, 0, EdgePolicy::Toroidal), 5);
        assert_eq!(grid.live_neighbor_count(0, 0, EdgePolicy::Dead), 0);
    }

    #[test]
    fn test_neighbors_on_single_row() {
        // A lone cell on a 5x1 torus reaches itself once, via the +1 row delta.
        let mut grid = Grid::new(5, 1);
        grid.set(0, 2, true).unwrap();
        assert_eq!(grid.live_neighbor_count(0, 2, EdgePolicy::Toroidal), 1);
        assert_eq!(grid.live_neighbor_count(0, 1, EdgePolicy::Toroidal), 3);

        // 2x1: the other column is reached twice per row delta.
        let mut grid = Grid::new(2, 1);
        grid.set(0, 1, true).unwrap();
        assert_eq!(grid.live_neighbor_count(0, 0, EdgePolicy::Toroidal), 6);
    }

    #[test]
    fn test_neighbors_on_single_column() {
        let mut grid = Grid::new(1, 5);
        grid.set(2, 0, true).unwrap();
        assert_eq!(grid.live_neighbor_count(2, 0, EdgePolicy::Toroidal), 1);
        assert_eq!(grid.live_neighbor_count(3, 0, EdgePolicy::Toroidal), 3);
    }

    #[test]
    fn test_snapshot_iter() {
        let mut grid = Grid::new(3, 2);
        grid.set(0, 1, true).unwrap();
        grid.set(1, 2, true).unwrap();
        let cells: Vec<bool> = grid.snapshot().iter().collect();
        assert_eq!(cells, vec![false, true, false, false, false, true]);
        assert_eq!(grid.snapshot().get(1, 2), Some(true));
        assert_eq!(grid.snapshot().get(2, 0), None);
    }
}
