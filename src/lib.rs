//! Shotzones - NBA shot-location hot-zone dashboard built with Bevy
//!
//! This crate provides the data loading, binning, hot-zone selection and
//! season timeline behind the dashboard, organized into modules.

// Core modules
pub mod app_builder;
pub mod constants;
pub mod court;
pub mod data;
pub mod sampling;
pub mod settings;
pub mod testing;
pub mod timeline;
pub mod zones;

// Offline output
pub mod export;
pub mod report;

// Re-export commonly used types for convenience
pub use app_builder::{DashboardAppBuilder, dashboard_resources};
pub use court::{CourtPoint, is_outside_layup, normalize};
pub use data::{
    DataError, DataResult, GameScoreRow, Loaded, PlotShot, Season, SeasonAttempts,
    SeasonAveragePoints, ShotRecord, ShotType, ShotTypeSplit, attempt_trend, attempts_from_shots,
    average_points_by_season, average_points_from_games, load_attempts, load_average_points,
    load_game_scores, load_shots, missing_seasons, ordered_seasons, rounded_average_points,
    season_range, shot_type_split, tick_indices,
};
pub use sampling::{sample_season, sample_size};
pub use settings::{DashboardSettings, SETTINGS_FILE};
pub use timeline::{
    DatasetOptions, PlaybackState, SeasonBins, SeasonDataset, SeasonFrame, SeasonTimeline,
    SeasonView, add_timeline_systems, advance_timeline, refresh_season_view, season_title,
    timeline_input_handler,
};
pub use zones::{DensityGrid, GridSpec, HotZone, build_grid_edges, histogram, top_k_zones};
