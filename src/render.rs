use rayon::prelude::*;

use crate::grid::Cells;

const GRID_COLOR: [u8; 4] = [0xCC, 0xCC, 0xCC, 255];
const DEAD_COLOR: [u8; 4] = [0xFF, 0xFF, 0xFF, 255];
const ALIVE_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 255];

/// Cell geometry and palette for RGBA output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    /// Side of one cell in pixels, not counting the 1px grid line.
    pub cell_size: u32,
    pub grid: [u8; 4],
    pub dead: [u8; 4],
    pub alive: [u8; 4],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            cell_size: 8,
            grid: GRID_COLOR,
            dead: DEAD_COLOR,
            alive: ALIVE_COLOR,
        }
    }
}

impl Style {
    /// Canvas size in pixels: every cell plus a 1px border around each.
    /// None if either side does not fit in a `u32`.
    pub fn canvas_size(&self, cells: &Cells) -> Option<(u32, u32)> {
        let pitch = self.cell_size.checked_add(1)?;
        let side = |cells: u32| pitch.checked_mul(cells)?.checked_add(1);
        Some((side(cells.width())?, side(cells.height())?))
    }
}

/// Draw the grid overlay and one filled square per cell. None if the
/// canvas would be too large to address.
pub fn render_cells(cells: &Cells, style: &Style) -> Option<Vec<u8>> {
    let (w, h) = style.canvas_size(cells)?;
    let (w, h) = (w as usize, h as usize);
    let pitch = style.cell_size as usize + 1;
    let mut rgba = vec![0u8; w * h * 4];

    rgba.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, line)| {
            let on_row_line = y % pitch == 0;
            let row = (y / pitch) as u32;
            for x in 0..w {
                let color = if on_row_line || x % pitch == 0 {
                    style.grid
                } else if cells.get(row, (x / pitch) as u32) == Some(true) {
                    style.alive
                } else {
                    style.dead
                };
                line[x * 4..x * 4 + 4].copy_from_slice(&color);
            }
        });

    Some(rgba)
}
