//! Spatial binning and hot-zone selection

pub mod grid;
pub mod hot_zones;

pub use grid::{DensityGrid, GridSpec, build_grid_edges, histogram};
pub use hot_zones::{HotZone, top_k_zones};
