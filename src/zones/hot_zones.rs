//! Top-K densest cells of a season's density grid

use serde::{Deserialize, Serialize};

use super::grid::{DensityGrid, GridSpec};

/// One of a season's densest cells, with bounds from the shared grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotZone {
    /// 1 is the densest cell
    pub rank: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub cell_x: usize,
    pub cell_y: usize,
    pub count: u32,
}

impl HotZone {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }
}

/// Select the `k` highest-count cells.
///
/// Cells are ranked by descending count, ties broken by ascending flat index.
/// Zero-count cells are eligible, so the result always holds
/// `min(k, cell_count)` zones.
pub fn top_k_zones(grid: &DensityGrid, spec: &GridSpec, k: usize) -> Vec<HotZone> {
    let counts = grid.counts();
    let mut order: Vec<usize> = (0..counts.len()).collect();
    // Stable sort keeps ascending index order among equal counts
    order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));

    order
        .into_iter()
        .take(k)
        .enumerate()
        .map(|(pos, idx)| {
            let (cell_x, cell_y) = grid.cell(idx);
            let (x_min, x_max, y_min, y_max) = spec.cell_bounds(cell_x, cell_y);
            HotZone {
                rank: pos + 1,
                x_min,
                x_max,
                y_min,
                y_max,
                cell_x,
                cell_y,
                count: counts[idx],
            }
        })
        .collect()
}
