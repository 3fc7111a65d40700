//! Season timeline playback state

use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::PLAY_STEP_SECS;
use crate::data::{Season, ordered_seasons};

/// Title shown above the court for a season
pub fn season_title(season: &Season) -> String {
    format!("NBA Shooting Trends: 2 PTS vs 3 PTS ({})", season)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    #[default]
    Idle,
    Scrubbing,
    Playing,
    Stopped,
}

impl PlaybackState {
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Scrubbing => "scrubbing",
            PlaybackState::Playing => "playing",
            PlaybackState::Stopped => "stopped",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "idle" => Some(PlaybackState::Idle),
            "scrubbing" => Some(PlaybackState::Scrubbing),
            "playing" => Some(PlaybackState::Playing),
            "stopped" => Some(PlaybackState::Stopped),
            _ => None,
        }
    }
}

/// The single time index every view follows.
///
/// Playback is a state machine advanced by [`SeasonTimeline::tick`] once per
/// frame; it never blocks. Every change of the visible season raises a refresh
/// flag that the view systems consume with [`SeasonTimeline::take_refresh`].
#[derive(Resource, Debug, Clone)]
pub struct SeasonTimeline {
    seasons: Vec<Season>,
    current_index: usize,
    /// Next position of a play sweep; scrubs don't move it
    sweep_index: usize,
    state: PlaybackState,
    step: Duration,
    elapsed: Duration,
    needs_refresh: bool,
}

impl Default for SeasonTimeline {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl SeasonTimeline {
    pub fn new(seasons: Vec<Season>) -> Self {
        Self::with_step(seasons, PLAY_STEP_SECS)
    }

    /// Seasons are sorted chronologically and deduplicated
    pub fn with_step(seasons: Vec<Season>, step_secs: f32) -> Self {
        let step = Duration::try_from_secs_f32(step_secs.max(0.0))
            .unwrap_or(Duration::from_secs_f32(PLAY_STEP_SECS));
        Self {
            seasons: ordered_seasons(seasons.iter()),
            current_index: 0,
            sweep_index: 0,
            state: PlaybackState::Idle,
            step,
            elapsed: Duration::ZERO,
            // Initial display
            needs_refresh: true,
        }
    }

    /// Start on `index` instead of the first season, if it exists
    pub fn starting_at(mut self, index: usize) -> Self {
        if index < self.seasons.len() {
            self.current_index = index;
        }
        self
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_season(&self) -> Option<&Season> {
        self.seasons.get(self.current_index)
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    pub fn title(&self) -> Option<String> {
        self.current_season().map(season_title)
    }

    /// Index of a season label, if it is on the timeline
    pub fn position_of(&self, label: &str) -> Option<usize> {
        self.seasons.iter().position(|s| s.label() == label)
    }

    /// User scrub. Out-of-range indices are ignored.
    ///
    /// While playing, the scrubbed season shows until the next step, then the
    /// sweep carries on from its own position.
    pub fn set_index(&mut self, index: usize) -> bool {
        if index >= self.seasons.len() {
            return false;
        }
        if self.state != PlaybackState::Playing {
            self.state = PlaybackState::Scrubbing;
        }
        self.current_index = index;
        self.needs_refresh = true;
        true
    }

    pub fn step_forward(&mut self) -> bool {
        self.set_index(self.current_index + 1)
    }

    pub fn step_backward(&mut self) -> bool {
        match self.current_index.checked_sub(1) {
            Some(index) => self.set_index(index),
            None => false,
        }
    }

    pub fn jump_to_start(&mut self) -> bool {
        self.set_index(0)
    }

    pub fn jump_to_end(&mut self) -> bool {
        match self.seasons.len().checked_sub(1) {
            Some(last) => self.set_index(last),
            None => false,
        }
    }

    /// Play from the first season, or stop a sweep in progress
    pub fn toggle_play(&mut self) {
        if self.seasons.is_empty() {
            return;
        }
        match self.state {
            PlaybackState::Playing => {
                self.state = PlaybackState::Stopped;
                info!("Playback stopped at {}", self.seasons[self.current_index]);
            }
            _ => {
                self.state = PlaybackState::Playing;
                self.current_index = 0;
                self.sweep_index = 0;
                self.elapsed = Duration::ZERO;
                self.needs_refresh = true;
                info!("Playback started ({} seasons)", self.seasons.len());
            }
        }
    }

    /// Advance the sweep by elapsed frame time.
    ///
    /// Returns the new index when a step happened. The last season stays up
    /// for one full interval before playback stops.
    pub fn tick(&mut self, delta: Duration) -> Option<usize> {
        if self.state != PlaybackState::Playing {
            return None;
        }
        self.elapsed += delta;
        if self.elapsed < self.step {
            return None;
        }
        // At most one step per frame; the remainder carries into the next interval
        self.elapsed = interval_remainder(self.elapsed, self.step);

        if self.sweep_index + 1 < self.seasons.len() {
            self.sweep_index += 1;
            self.current_index = self.sweep_index;
            self.needs_refresh = true;
            Some(self.current_index)
        } else {
            self.state = PlaybackState::Stopped;
            info!("Playback finished at {}", self.seasons[self.current_index]);
            None
        }
    }

    /// Abort playback after a failed step
    pub fn halt(&mut self, reason: &str) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
        error!("Timeline step failed at index {}: {}", self.current_index, reason);
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    /// Consume the refresh flag, yielding the index to display
    pub fn take_refresh(&mut self) -> Option<usize> {
        if !self.needs_refresh {
            return None;
        }
        self.needs_refresh = false;
        if self.seasons.is_empty() {
            None
        } else {
            Some(self.current_index)
        }
    }
}

fn interval_remainder(elapsed: Duration, step: Duration) -> Duration {
    if step.is_zero() {
        return Duration::ZERO;
    }
    let nanos = elapsed.as_nanos() % step.as_nanos();
    Duration::from_nanos(nanos as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(n: u16) -> SeasonTimeline {
        let seasons = (0..n).map(|i| Season::from_start_year(2008 + i)).collect();
        SeasonTimeline::new(seasons)
    }

    fn half_step() -> Duration {
        Duration::from_millis(250)
    }

    #[test]
    fn starts_idle_with_pending_refresh() {
        let mut tl = timeline(3);
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.take_refresh(), Some(0));
        assert_eq!(tl.take_refresh(), None);
        assert_eq!(
            tl.title().as_deref(),
            Some("NBA Shooting Trends: 2 PTS vs 3 PTS (2008-09)")
        );
    }

    #[test]
    fn seasons_are_sorted_and_deduplicated() {
        let tl = SeasonTimeline::new(vec![
            Season::from_start_year(2012),
            Season::from_start_year(2009),
            Season::from_start_year(2012),
        ]);
        let labels: Vec<&str> = tl.seasons().iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["2009-10", "2012-13"]);
        assert_eq!(tl.position_of("2012-13"), Some(1));
    }

    #[test]
    fn starting_index_stays_idle() {
        let mut tl = timeline(3).starting_at(2);
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.take_refresh(), Some(2));
        assert_eq!(timeline(3).starting_at(9).current_index(), 0);
    }

    #[test]
    fn out_of_range_scrub_is_ignored() {
        let mut tl = timeline(3);
        tl.take_refresh();
        assert!(!tl.set_index(3));
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert_eq!(tl.current_index(), 0);
        assert!(!tl.needs_refresh());
    }

    #[test]
    fn scrub_is_repeatable() {
        let mut tl = timeline(3);
        tl.take_refresh();
        assert!(tl.set_index(2));
        assert_eq!(tl.state(), PlaybackState::Scrubbing);
        assert_eq!(tl.take_refresh(), Some(2));
        assert!(tl.set_index(2));
        assert_eq!(tl.take_refresh(), Some(2));
    }

    #[test]
    fn play_visits_every_season_then_stops() {
        let mut tl = timeline(3);
        tl.take_refresh();
        tl.set_index(2);
        tl.take_refresh();

        tl.toggle_play();
        assert!(tl.is_playing());
        let mut visited = vec![tl.take_refresh().unwrap()];
        let mut titles = vec![tl.title().unwrap()];

        for _ in 0..20 {
            tl.tick(half_step());
            if let Some(idx) = tl.take_refresh() {
                visited.push(idx);
                titles.push(tl.title().unwrap());
            }
        }

        assert_eq!(visited, vec![0, 1, 2]);
        titles.dedup();
        assert_eq!(titles.len(), 3);
        assert_eq!(tl.state(), PlaybackState::Stopped);
        assert_eq!(tl.current_index(), 2);
    }

    #[test]
    fn last_season_is_held_for_one_interval() {
        let mut tl = timeline(2);
        tl.toggle_play();
        assert_eq!(tl.tick(tl.step()), Some(1));
        assert!(tl.is_playing());
        assert_eq!(tl.tick(half_step()), None);
        assert!(tl.is_playing());
        tl.tick(half_step());
        assert_eq!(tl.state(), PlaybackState::Stopped);
    }

    #[test]
    fn toggle_aborts_a_sweep() {
        let mut tl = timeline(5);
        tl.toggle_play();
        tl.tick(tl.step());
        assert_eq!(tl.current_index(), 1);

        tl.toggle_play();
        assert_eq!(tl.state(), PlaybackState::Stopped);
        assert_eq!(tl.tick(tl.step()), None);
        assert_eq!(tl.current_index(), 1);

        // Playing again restarts from the first season
        tl.toggle_play();
        assert_eq!(tl.current_index(), 0);
    }

    #[test]
    fn scrub_while_playing_keeps_the_sweep_in_order() {
        let mut tl = timeline(5);
        tl.toggle_play();
        let mut visited = vec![tl.take_refresh().unwrap()];

        tl.tick(half_step());
        assert!(tl.set_index(3));
        assert!(tl.is_playing());
        visited.push(tl.take_refresh().unwrap());

        // Interval keeps running through the scrub
        assert_eq!(tl.tick(half_step()), Some(1));
        visited.push(tl.take_refresh().unwrap());
        for _ in 0..20 {
            tl.tick(half_step());
            if let Some(idx) = tl.take_refresh() {
                visited.push(idx);
            }
        }

        assert_eq!(visited, vec![0, 3, 1, 2, 3, 4]);
        assert_eq!(tl.state(), PlaybackState::Stopped);
    }

    #[test]
    fn uneven_frames_carry_leftover_time() {
        let mut tl = timeline(5);
        tl.toggle_play();
        let frame = Duration::from_millis(400);
        assert_eq!(tl.tick(frame), None);
        assert_eq!(tl.tick(frame), Some(1));
        // 300ms carried over, so the next 400ms frame completes the interval
        assert_eq!(tl.tick(frame), Some(2));
    }

    #[test]
    fn long_frame_advances_one_season() {
        let mut tl = timeline(5);
        tl.toggle_play();
        assert_eq!(tl.tick(Duration::from_millis(1600)), Some(1));
        // Whole intervals beyond the first are dropped, 100ms remains
        assert_eq!(tl.tick(Duration::from_millis(300)), None);
        assert_eq!(tl.tick(Duration::from_millis(100)), Some(2));
    }

    #[test]
    fn empty_timeline_ignores_everything() {
        let mut tl = SeasonTimeline::default();
        tl.toggle_play();
        assert_eq!(tl.state(), PlaybackState::Idle);
        assert!(!tl.set_index(0));
        assert!(!tl.jump_to_end());
        assert_eq!(tl.take_refresh(), None);
        assert!(tl.title().is_none());
    }

    #[test]
    fn halt_stops_playback() {
        let mut tl = timeline(3);
        tl.toggle_play();
        tl.halt("frame missing");
        assert_eq!(tl.state(), PlaybackState::Stopped);
    }

    #[test]
    fn state_labels_parse_back() {
        for state in [
            PlaybackState::Idle,
            PlaybackState::Scrubbing,
            PlaybackState::Playing,
            PlaybackState::Stopped,
        ] {
            assert_eq!(PlaybackState::parse(state.label()), Some(state));
        }
        assert_eq!(PlaybackState::parse("paused"), None);
    }
}
