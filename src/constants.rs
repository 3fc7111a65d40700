//! Tunable constants for shotzones
//!
//! Court geometry, binning resolution and playback timing live here.

// =============================================================================
// COURT SCALING (raw stats-API units -> court feet)
// =============================================================================

/// Raw LOC_X half-width (tenths of a foot) mapped onto the 25 ft half-court width
pub const RAW_X_SPAN: f64 = 250.0;
pub const COURT_HALF_WIDTH: f64 = 25.0;
/// Raw LOC_Y span mapped onto the 47 ft half-court length
pub const RAW_Y_SPAN: f64 = 422.0;
pub const COURT_LENGTH: f64 = 47.0;
/// Baseline-to-rim offset added after scaling
pub const PLOT_Y_OFFSET: f64 = 2.0;

// =============================================================================
// LAYUP ZONE
// =============================================================================

/// Rim center in plot space
pub const LAYUP_CENTER: (f64, f64) = (0.0, 5.25);
/// Shots within this radius of the rim never count toward hot zones
pub const LAYUP_RADIUS: f64 = 5.0;

// =============================================================================
// BINNING / HOT ZONES
// =============================================================================

pub const DEFAULT_BINS_X: usize = 16;
pub const DEFAULT_BINS_Y: usize = 16;
pub const DEFAULT_TOP_K: usize = 5;

/// Relative widening applied to a zero-width axis before splitting it
pub const DEGENERATE_AXIS_PAD: f64 = 0.001;

// =============================================================================
// SAMPLING
// =============================================================================

pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.1;
pub const DEFAULT_SAMPLE_SEED: u64 = 42;

// =============================================================================
// PLAYBACK
// =============================================================================

/// Seconds each season stays on screen while playing
pub const PLAY_STEP_SECS: f32 = 0.5;

// =============================================================================
// SUMMARIES
// =============================================================================

/// Period compared in the "game on the line" shot-type split
pub const CLUTCH_PERIOD: u8 = 4;
pub const CLUTCH_BASELINE_SEASON: &str = "2008-09";
pub const CLUTCH_RECENT_SEASON: &str = "2023-24";
/// Trend axes label roughly this many seasons
pub const TREND_TICK_TARGET: usize = 5;

// =============================================================================
// FILES
// =============================================================================

pub const SHOTS_FILE: &str = "data/all_made_shots_with_quater.csv";
pub const ATTEMPTS_FILE: &str = "data/field_goal_attempts_by_season.csv";
pub const AVERAGE_POINTS_FILE: &str = "data/average_points_by_season.csv";
