//! Persistent dashboard settings
//!
//! Saves and loads data paths, binning resolution, sampling and playback
//! options to/from a dashboard.json file in the config directory.

use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::timeline::DatasetOptions;

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/dashboard.json";

/// Settings that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Made shots (LOC_X, LOC_Y, SHOT_TYPE, SEASON, PERIOD, ...)
    pub shots_file: PathBuf,
    /// Per-season 2PT/3PT attempt totals
    pub attempts_file: PathBuf,
    /// Per-season average total points per game
    pub average_points_file: PathBuf,
    pub bins_x: usize,
    pub bins_y: usize,
    pub top_k: usize,
    /// Share of each season's shots drawn in the scatter (0..=1)
    pub sample_fraction: f64,
    pub sample_seed: u64,
    /// Seconds per season while playing
    pub play_step_secs: f32,
    pub comparison_period: u8,
    pub baseline_season: String,
    pub recent_season: String,
    /// Season shown at startup (empty = first season). Never saved from a
    /// session; set it here or pass `--season` for one run.
    pub initial_season: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            shots_file: PathBuf::from(SHOTS_FILE),
            attempts_file: PathBuf::from(ATTEMPTS_FILE),
            average_points_file: PathBuf::from(AVERAGE_POINTS_FILE),
            bins_x: DEFAULT_BINS_X,
            bins_y: DEFAULT_BINS_Y,
            top_k: DEFAULT_TOP_K,
            sample_fraction: DEFAULT_SAMPLE_FRACTION,
            sample_seed: DEFAULT_SAMPLE_SEED,
            play_step_secs: PLAY_STEP_SECS,
            comparison_period: CLUTCH_PERIOD,
            baseline_season: CLUTCH_BASELINE_SEASON.to_string(),
            recent_season: CLUTCH_RECENT_SEASON.to_string(),
            initial_season: String::new(),
        }
    }
}

impl DashboardSettings {
    /// Load settings from the default file, or defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No {} found, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Self>(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings.sanitized()
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(Path::new(SETTINGS_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.bins_x == 0 || self.bins_y == 0 {
            warn!("Grid bins must be positive, using {}x{}", defaults.bins_x, defaults.bins_y);
            self.bins_x = defaults.bins_x;
            self.bins_y = defaults.bins_y;
        }
        if !self.sample_fraction.is_finite() || !(0.0..=1.0).contains(&self.sample_fraction) {
            warn!(
                "sample_fraction {} outside 0..=1, using {}",
                self.sample_fraction, defaults.sample_fraction
            );
            self.sample_fraction = defaults.sample_fraction;
        }
        if !self.play_step_secs.is_finite() || self.play_step_secs <= 0.0 {
            warn!(
                "play_step_secs {} must be positive, using {}",
                self.play_step_secs, defaults.play_step_secs
            );
            self.play_step_secs = defaults.play_step_secs;
        }
        self
    }

    pub fn dataset_options(&self) -> DatasetOptions {
        DatasetOptions {
            bins_x: self.bins_x,
            bins_y: self.bins_y,
            top_k: self.top_k,
            sample_fraction: self.sample_fraction,
            sample_seed: self.sample_seed,
        }
    }

    /// Apply the viewer's command-line overrides for this run:
    /// `--shots PATH --season LABEL`. The trend tables are read by
    /// `season_report`, so their flags are rejected here.
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), String> {
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| format!("{} requires a value", flag))
            };
            match arg.as_str() {
                "--shots" => self.shots_file = PathBuf::from(value("--shots")?),
                "--attempts" | "--points" => {
                    return Err(format!("{} is only read by season_report", arg));
                }
                "--season" => self.initial_season = value("--season")?,
                other => return Err(format!("Unknown argument: {}", other)),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_file_gives_defaults() {
        let settings = DashboardSettings::load_from(Path::new("no/such/dashboard.json"));
        assert_eq!(settings, DashboardSettings::default());
        assert_eq!(settings.bins_x, 16);
        assert_eq!(settings.sample_seed, 42);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{ "top_k": 3, "initial_season": "2015-16" }"#).unwrap();
        assert_eq!(settings.top_k, 3);
        assert_eq!(settings.initial_season, "2015-16");
        assert_eq!(settings.bins_y, DEFAULT_BINS_Y);
        assert_eq!(settings.baseline_season, "2008-09");
    }

    #[test]
    fn invalid_values_are_sanitized() {
        let settings = DashboardSettings {
            bins_x: 0,
            sample_fraction: 1.5,
            play_step_secs: -1.0,
            ..DashboardSettings::default()
        }
        .sanitized();
        assert_eq!(settings.bins_x, DEFAULT_BINS_X);
        assert_eq!(settings.sample_fraction, DEFAULT_SAMPLE_FRACTION);
        assert_eq!(settings.play_step_secs, PLAY_STEP_SECS);
    }

    #[test]
    fn save_then_load_from_temp_dir() {
        let dir = std::env::temp_dir().join(format!("shotzones-settings-{}", std::process::id()));
        let path = dir.join("dashboard.json");
        let settings = DashboardSettings {
            top_k: 7,
            ..DashboardSettings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(DashboardSettings::load_from(&path), settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn cli_overrides_paths_and_season() {
        let mut settings = DashboardSettings::default();
        settings
            .apply_args(&args(&["--shots", "a.csv", "--season", "2019-20"]))
            .unwrap();
        assert_eq!(settings.shots_file, PathBuf::from("a.csv"));
        assert_eq!(settings.initial_season, "2019-20");

        assert!(settings.apply_args(&args(&["--season"])).is_err());
        assert!(settings.apply_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn viewer_rejects_trend_table_flags() {
        let mut settings = DashboardSettings::default();
        let err = settings
            .apply_args(&args(&["--points", "avg.csv"]))
            .unwrap_err();
        assert!(err.contains("season_report"));
        assert!(settings.apply_args(&args(&["--attempts", "fga.csv"])).is_err());
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn cli_overrides_are_not_written_back() {
        let dir = std::env::temp_dir().join(format!("shotzones-overrides-{}", std::process::id()));
        let path = dir.join("dashboard.json");
        DashboardSettings::default().save_to(&path).unwrap();

        let mut settings = DashboardSettings::load_from(&path);
        settings
            .apply_args(&args(&["--shots", "/tmp/oneoff.csv", "--season", "2015-16"]))
            .unwrap();
        assert_eq!(settings.initial_season, "2015-16");

        let reloaded = DashboardSettings::load_from(&path);
        assert_eq!(reloaded, DashboardSettings::default());
        assert!(reloaded.initial_season.is_empty());
        let _ = fs::remove_dir_all(&dir);
    }
}
