//! Timeline systems: playback ticking, keyboard control and view refresh

use bevy::prelude::*;

use super::dataset::SeasonDataset;
use super::frame::SeasonFrame;
use super::state::SeasonTimeline;

/// The frame currently on screen
#[derive(Resource, Debug, Clone, Default)]
pub struct SeasonView {
    pub index: Option<usize>,
    pub frame: Option<SeasonFrame>,
    /// Bumped on every refresh, including repeats of the same season
    pub revision: u64,
}

/// Advance playback by this frame's delta
pub fn advance_timeline(time: Res<Time>, mut timeline: ResMut<SeasonTimeline>) {
    timeline.tick(time.delta());
}

/// Keyboard controls for the season timeline
pub fn timeline_input_handler(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut timeline: ResMut<SeasonTimeline>,
) {
    // Space: play / stop
    if keyboard.just_pressed(KeyCode::Space) {
        timeline.toggle_play();
    }

    // Left/Right arrows: scrub one season
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        timeline.step_forward();
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        timeline.step_backward();
    }

    if keyboard.just_pressed(KeyCode::Home) {
        timeline.jump_to_start();
    }
    if keyboard.just_pressed(KeyCode::End) {
        timeline.jump_to_end();
    }
}

/// Rebuild the view when the timeline flags a change.
///
/// The previous frame is replaced entirely, never patched.
pub fn refresh_season_view(
    dataset: Res<SeasonDataset>,
    mut timeline: ResMut<SeasonTimeline>,
    mut view: ResMut<SeasonView>,
) {
    let Some(index) = timeline.take_refresh() else {
        return;
    };

    match dataset.frame(index) {
        Some(frame) => {
            debug!(
                "Showing {} ({} points, {} zones)",
                frame.season_label,
                frame.point_count(),
                frame.hot_zones.len()
            );
            view.index = Some(index);
            view.frame = Some(frame);
            view.revision += 1;
        }
        None => {
            timeline.halt(&format!("no frame for season index {}", index));
        }
    }
}

/// Timeline resources and systems, in order: tick, input, refresh
pub fn add_timeline_systems(app: &mut App, with_keyboard: bool) {
    app.init_resource::<SeasonView>();
    if with_keyboard {
        app.add_systems(
            Update,
            (advance_timeline, timeline_input_handler, refresh_season_view).chain(),
        );
    } else {
        app.add_systems(Update, (advance_timeline, refresh_season_view).chain());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Season;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn app_with(dataset: SeasonDataset, timeline: SeasonTimeline) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.insert_resource(dataset);
        app.insert_resource(timeline);
        add_timeline_systems(&mut app, false);
        app
    }

    #[test]
    fn missing_frame_halts_playback() {
        // Timeline knows seasons the dataset never binned
        let timeline = SeasonTimeline::new(vec![
            Season::from_start_year(2010),
            Season::from_start_year(2011),
        ]);
        let mut app = app_with(SeasonDataset::default(), timeline);
        app.world_mut()
            .resource_mut::<SeasonTimeline>()
            .toggle_play();
        app.update();

        let timeline = app.world().resource::<SeasonTimeline>();
        assert!(!timeline.is_playing());
        assert!(app.world().resource::<SeasonView>().frame.is_none());
    }

    #[test]
    fn empty_timeline_never_refreshes() {
        let mut app = app_with(SeasonDataset::default(), SeasonTimeline::default());
        app.update();
        app.update();
        assert_eq!(app.world().resource::<SeasonView>().revision, 0);
    }
}
