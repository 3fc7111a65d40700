//! Headless App Builder
//!
//! Builds headless Bevy apps running the season timeline over a dataset.
//! Used by the scenario runner and by tests; the windowed viewer shares
//! [`dashboard_resources`].

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::constants::PLAY_STEP_SECS;
use crate::data::ShotRecord;
use crate::settings::DashboardSettings;
use crate::timeline::{DatasetOptions, SeasonDataset, SeasonTimeline, add_timeline_systems};

/// Bin the records and build a timeline over the binned seasons.
///
/// `initial_season` picks the starting season when it is on the timeline.
pub fn dashboard_resources(
    records: &[ShotRecord],
    options: &DatasetOptions,
    step_secs: f32,
    initial_season: Option<&str>,
) -> (SeasonDataset, SeasonTimeline) {
    let dataset = SeasonDataset::build(records, options);
    let mut timeline = SeasonTimeline::with_step(dataset.seasons(), step_secs);

    if let Some(label) = initial_season.filter(|l| !l.is_empty()) {
        match timeline.position_of(label) {
            Some(index) => timeline = timeline.starting_at(index),
            None => warn!("Season {} not in data, starting at the first season", label),
        }
    }
    (dataset, timeline)
}

/// Builder for headless dashboard apps
pub struct DashboardAppBuilder {
    records: Vec<ShotRecord>,
    options: DatasetOptions,
    step_secs: f32,
    initial_season: Option<String>,
    fps: f32,
    manual_frame: Option<Duration>,
    minimal_threads: bool,
}

impl Default for DashboardAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardAppBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            options: DatasetOptions::default(),
            step_secs: PLAY_STEP_SECS,
            initial_season: None,
            fps: 60.0,
            manual_frame: None,
            minimal_threads: false,
        }
    }

    pub fn with_records(mut self, records: Vec<ShotRecord>) -> Self {
        self.records = records;
        self
    }

    /// Take binning, sampling, playback and start season from settings
    pub fn with_settings(mut self, settings: &DashboardSettings) -> Self {
        self.options = settings.dataset_options();
        self.step_secs = settings.play_step_secs;
        self.initial_season = Some(settings.initial_season.clone());
        self
    }

    pub fn with_options(mut self, options: DatasetOptions) -> Self {
        self.options = options;
        self
    }

    /// Seconds each season stays up while playing
    pub fn with_step_secs(mut self, step_secs: f32) -> Self {
        self.step_secs = step_secs;
        self
    }

    pub fn with_initial_season(mut self, label: &str) -> Self {
        self.initial_season = Some(label.to_string());
        self
    }

    /// Set the target FPS (default: 60)
    pub fn with_fps(mut self, fps: f32) -> Self {
        self.fps = fps;
        self
    }

    /// Advance time by a fixed amount per update instead of wall-clock time.
    ///
    /// Bevy reports a zero delta on the very first update.
    pub fn with_manual_frame(mut self, frame: Duration) -> Self {
        self.manual_frame = Some(frame);
        self
    }

    /// Enable minimal thread mode (task pools = 1)
    ///
    /// Use this when running many apps in parallel to avoid hitting OS thread limits.
    pub fn with_minimal_threads(mut self) -> Self {
        self.minimal_threads = true;
        self
    }

    /// Build the app with minimal plugins, the dataset, the timeline and the
    /// timeline systems (without keyboard input)
    pub fn build(self) -> App {
        let mut app = App::new();

        let runner = ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(1.0 / self.fps.max(1.0)));
        if self.minimal_threads {
            app.add_plugins(MinimalPlugins.set(runner).set(TaskPoolPlugin {
                task_pool_options: TaskPoolOptions::with_num_threads(1),
            }));
        } else {
            app.add_plugins(MinimalPlugins.set(runner));
        }

        if let Some(frame) = self.manual_frame {
            app.insert_resource(TimeUpdateStrategy::ManualDuration(frame));
        }

        let (dataset, timeline) = dashboard_resources(
            &self.records,
            &self.options,
            self.step_secs,
            self.initial_season.as_deref(),
        );
        app.insert_resource(dataset);
        app.insert_resource(timeline);
        add_timeline_systems(&mut app, false);

        app
    }
}
