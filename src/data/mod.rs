//! Tabular inputs: season keys, shot records, loaders and season summaries

pub mod error;
pub mod loader;
pub mod records;
pub mod season;
pub mod summary;

pub use error::{DataError, DataResult};
pub use loader::{
    Loaded, load_attempts, load_average_points, load_game_scores, load_shots, parse_attempts,
    parse_average_points, parse_game_scores, parse_shots,
};
pub use records::{
    GameScoreRow, PlotShot, SeasonAttempts, SeasonAveragePoints, ShotRecord, ShotType,
    parse_game_date,
};
pub use season::{Season, ordered_seasons, season_range};
pub use summary::{
    ShotTypeSplit, attempt_trend, attempts_from_shots, average_points_by_season,
    average_points_from_games, missing_seasons, rounded_average_points, shot_type_split,
    tick_indices,
};
