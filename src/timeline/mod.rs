//! Season timeline: the single index every dashboard view follows.
//!
//! [`SeasonTimeline`] owns the index and playback state, [`SeasonDataset`]
//! holds the precomputed grids, and the systems turn each index change into a
//! fresh [`SeasonFrame`].

mod dataset;
mod frame;
mod state;
mod systems;

pub use dataset::{DatasetOptions, SeasonBins, SeasonDataset};
pub use frame::SeasonFrame;
pub use state::{PlaybackState, SeasonTimeline, season_title};
pub use systems::{
    SeasonView, add_timeline_systems, advance_timeline, refresh_season_view,
    timeline_input_handler,
};
