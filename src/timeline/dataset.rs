//! Precomputed per-season grids and samples

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::frame::SeasonFrame;
use super::state::season_title;
use crate::constants::*;
use crate::data::{PlotShot, Season, ShotRecord, ShotType};
use crate::sampling::sample_season;
use crate::zones::{DensityGrid, GridSpec, HotZone, histogram, top_k_zones};

/// Binning and sampling knobs for [`SeasonDataset::build`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatasetOptions {
    pub bins_x: usize,
    pub bins_y: usize,
    pub top_k: usize,
    pub sample_fraction: f64,
    pub sample_seed: u64,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            bins_x: DEFAULT_BINS_X,
            bins_y: DEFAULT_BINS_Y,
            top_k: DEFAULT_TOP_K,
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            sample_seed: DEFAULT_SAMPLE_SEED,
        }
    }
}

/// One season's binned shots and display sample
#[derive(Debug, Clone)]
pub struct SeasonBins {
    pub season: Season,
    pub shot_count: usize,
    pub outside_layup_count: usize,
    pub density: DensityGrid,
    pub sample: Vec<PlotShot>,
}

/// All seasons, binned on one shared grid
#[derive(Resource, Debug, Clone, Default)]
pub struct SeasonDataset {
    grid: Option<GridSpec>,
    seasons: Vec<SeasonBins>,
    top_k: usize,
}

impl SeasonDataset {
    /// Normalize, filter, bin and sample every season.
    ///
    /// Edges come from all shots of all seasons, layups included. Density
    /// grids use each season's full outside-layup set; only the scatter
    /// sample is thinned. Without any finite coordinate there is no grid and
    /// the dataset has no seasons.
    pub fn build(records: &[ShotRecord], options: &DatasetOptions) -> Self {
        let shots: Vec<PlotShot> = records.iter().map(PlotShot::from_record).collect();
        let Some(grid) = GridSpec::from_shots(&shots, options.bins_x, options.bins_y) else {
            warn!("No shot coordinates to bin; timeline is empty");
            return Self {
                grid: None,
                seasons: Vec::new(),
                top_k: options.top_k,
            };
        };

        let mut by_season: BTreeMap<Season, Vec<PlotShot>> = BTreeMap::new();
        for shot in shots {
            by_season.entry(shot.season.clone()).or_default().push(shot);
        }

        let seasons = by_season
            .into_iter()
            .map(|(season, season_shots)| {
                let density = histogram(&season_shots, &grid);
                SeasonBins {
                    outside_layup_count: season_shots.iter().filter(|s| s.outside_layup).count(),
                    shot_count: season_shots.len(),
                    sample: sample_season(&season_shots, options.sample_fraction, options.sample_seed),
                    density,
                    season,
                }
            })
            .collect::<Vec<_>>();

        info!(
            "Binned {} seasons on a {}x{} grid",
            seasons.len(),
            grid.bins_x(),
            grid.bins_y()
        );

        Self {
            grid: Some(grid),
            seasons,
            top_k: options.top_k,
        }
    }

    pub fn grid(&self) -> Option<&GridSpec> {
        self.grid.as_ref()
    }

    pub fn seasons(&self) -> Vec<Season> {
        self.seasons.iter().map(|b| b.season.clone()).collect()
    }

    pub fn season_bins(&self) -> &[SeasonBins] {
        &self.seasons
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn bins(&self, index: usize) -> Option<&SeasonBins> {
        self.seasons.get(index)
    }

    pub fn hot_zones(&self, index: usize) -> Option<Vec<HotZone>> {
        let grid = self.grid.as_ref()?;
        let bins = self.seasons.get(index)?;
        Some(top_k_zones(&bins.density, grid, self.top_k))
    }

    /// Assemble the payload for a timeline index
    pub fn frame(&self, index: usize) -> Option<SeasonFrame> {
        let bins = self.seasons.get(index)?;
        let hot_zones = self.hot_zones(index)?;

        let (two_pt_points, three_pt_points) = bins.sample.iter().fold(
            (Vec::new(), Vec::new()),
            |(mut twos, mut threes), shot| {
                match shot.shot_type {
                    ShotType::TwoPt => twos.push(shot.point()),
                    ShotType::ThreePt => threes.push(shot.point()),
                }
                (twos, threes)
            },
        );

        Some(SeasonFrame {
            season_label: bins.season.label().to_string(),
            title: season_title(&bins.season),
            two_pt_points,
            three_pt_points,
            hot_zones,
        })
    }
}
