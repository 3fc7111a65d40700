//! Shared grid edges and per-season shot density grids

use serde::{Deserialize, Serialize};

use crate::constants::DEGENERATE_AXIS_PAD;
use crate::data::PlotShot;

/// Bin edges shared by every season so cell bounds stay comparable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
}

impl GridSpec {
    pub fn bins_x(&self) -> usize {
        self.x_edges.len() - 1
    }

    pub fn bins_y(&self) -> usize {
        self.y_edges.len() - 1
    }

    pub fn cell_count(&self) -> usize {
        self.bins_x() * self.bins_y()
    }

    /// Build edges from every shot of every season
    pub fn from_shots(shots: &[PlotShot], bins_x: usize, bins_y: usize) -> Option<Self> {
        let xs: Vec<f64> = shots.iter().map(|s| s.plot_x).collect();
        let ys: Vec<f64> = shots.iter().map(|s| s.plot_y).collect();
        build_grid_edges(&xs, &ys, bins_x, bins_y)
    }

    /// Cell containing the point, or None when it falls outside the edges
    pub fn locate(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        Some((bin_index(&self.x_edges, x)?, bin_index(&self.y_edges, y)?))
    }

    /// (x_min, x_max, y_min, y_max) of a cell
    pub fn cell_bounds(&self, cx: usize, cy: usize) -> (f64, f64, f64, f64) {
        (
            self.x_edges[cx],
            self.x_edges[cx + 1],
            self.y_edges[cy],
            self.y_edges[cy + 1],
        )
    }
}

/// Equal-width edges spanning the observed range of each axis.
///
/// Returns None when there are no finite coordinates or a bin count is zero.
pub fn build_grid_edges(
    all_plot_x: &[f64],
    all_plot_y: &[f64],
    bins_x: usize,
    bins_y: usize,
) -> Option<GridSpec> {
    if bins_x == 0 || bins_y == 0 {
        return None;
    }
    Some(GridSpec {
        x_edges: axis_edges(all_plot_x, bins_x)?,
        y_edges: axis_edges(all_plot_y, bins_y)?,
    })
}

fn axis_edges(values: &[f64], bins: usize) -> Option<Vec<f64>> {
    let (mut min, mut max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if min == max {
        let pad = if min == 0.0 {
            DEGENERATE_AXIS_PAD
        } else {
            DEGENERATE_AXIS_PAD * min.abs()
        };
        min -= pad;
        max += pad;
    }

    let width = max - min;
    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| min + width * i as f64 / bins as f64)
        .collect();
    edges[bins] = max;
    Some(edges)
}

/// Half-open bins, except the last which also takes its right edge
fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    let first = *edges.first()?;
    let last = *edges.last()?;
    if !value.is_finite() || value < first || value > last {
        return None;
    }
    let bins = edges.len() - 1;
    if value == last {
        return Some(bins - 1);
    }
    Some(edges.partition_point(|e| *e <= value) - 1)
}

/// Counts of non-layup shots per cell, flattened x-major
/// (`index = cx * bins_y + cy`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityGrid {
    bins_x: usize,
    bins_y: usize,
    counts: Vec<u32>,
}

impl DensityGrid {
    pub fn new(bins_x: usize, bins_y: usize) -> Self {
        Self {
            bins_x,
            bins_y,
            counts: vec![0; bins_x * bins_y],
        }
    }

    pub fn index(&self, cx: usize, cy: usize) -> usize {
        cx * self.bins_y + cy
    }

    /// Inverse of [`DensityGrid::index`]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        (index / self.bins_y, index % self.bins_y)
    }

    pub fn get(&self, cx: usize, cy: usize) -> u32 {
        self.counts[self.index(cx, cy)]
    }

    pub fn increment(&mut self, cx: usize, cy: usize) {
        let idx = self.index(cx, cy);
        self.counts[idx] += 1;
    }

    pub fn bins_x(&self) -> usize {
        self.bins_x
    }

    pub fn bins_y(&self) -> usize {
        self.bins_y
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn nonzero_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }
}

/// 2D histogram of the outside-layup shots in `shots`
pub fn histogram<'a>(shots: impl IntoIterator<Item = &'a PlotShot>, spec: &GridSpec) -> DensityGrid {
    let mut grid = DensityGrid::new(spec.bins_x(), spec.bins_y());
    for shot in shots.into_iter().filter(|s| s.outside_layup) {
        if let Some((cx, cy)) = spec.locate(shot.plot_x, shot.plot_y) {
            grid.increment(cx, cy);
        }
    }
    grid
}
