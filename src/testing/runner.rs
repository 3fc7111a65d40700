//! Scenario execution engine

use bevy::prelude::*;
use std::time::Duration;

use crate::app_builder::DashboardAppBuilder;
use crate::data::{Season, ShotRecord, ShotType, load_shots};
use crate::timeline::{DatasetOptions, SeasonTimeline, SeasonView, advance_timeline, refresh_season_view};

use super::assertions::{
    AssertionError, CapturedRefresh, DashboardState, check_sequence, check_state, check_visited,
};
use super::input::{ScriptedInputs, input_injection};
use super::parser::{ScenarioDefinition, ScenarioSetup};

/// Result of running a scenario. `shown` lists every view refresh in order.
#[derive(Debug)]
pub enum TestResult {
    Pass {
        frames: u64,
        shown: Vec<CapturedRefresh>,
    },
    Fail {
        error: AssertionError,
        /// Frame of a failing state check; `None` for end-of-run checks
        at_frame: Option<u64>,
        shown: Vec<CapturedRefresh>,
    },
    Error {
        message: String,
    },
}

/// Compact `season@frame` trail of the refreshes a run produced
pub fn format_shown(shown: &[CapturedRefresh]) -> String {
    if shown.is_empty() {
        return "(nothing shown)".to_string();
    }
    shown
        .iter()
        .map(|r| format!("{}@{}", r.season, r.frame))
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Resource to capture refreshes during a scenario
#[derive(Resource, Default)]
struct RefreshCapture {
    refreshes: Vec<CapturedRefresh>,
    last_revision: u64,
}

/// Deterministic shots spread over the half court, shifting each season so
/// hot zones move over time
pub fn synthetic_records(seasons: u16, start_year: u16, shots_per_season: usize) -> Vec<ShotRecord> {
    let mut records = Vec::with_capacity(seasons as usize * shots_per_season);
    for s in 0..seasons {
        let season = Season::from_start_year(start_year + s);
        for n in 0..shots_per_season {
            let n = n as i64;
            let s = s as i64;
            let raw_x = ((n * 37 + s * 11) % 500 - 250) as f64;
            let raw_y = ((n * 53 + s * 17) % 400 + 10) as f64;
            records.push(ShotRecord {
                raw_x,
                raw_y,
                shot_type: if n % 3 == 0 { ShotType::ThreePt } else { ShotType::TwoPt },
                season: season.clone(),
                period: (n % 4 + 1) as u8,
                game_id: format!("{:010}", s * 1000 + n / 20),
                game_date: None,
            });
        }
    }
    records
}

fn scenario_records(setup: &ScenarioSetup) -> Result<Vec<ShotRecord>, String> {
    match &setup.shots_file {
        Some(path) => load_shots(path)
            .map(|loaded| loaded.records)
            .map_err(|e| e.to_string()),
        None => Ok(synthetic_records(
            setup.seasons,
            setup.start_year,
            setup.shots_per_season,
        )),
    }
}

/// Run a single scenario and return the result
pub fn run_scenario(test: &ScenarioDefinition) -> TestResult {
    let records = match scenario_records(&test.setup) {
        Ok(records) => records,
        Err(message) => return TestResult::Error { message },
    };

    let defaults = DatasetOptions::default();
    let options = DatasetOptions {
        top_k: test.setup.top_k.unwrap_or(defaults.top_k),
        sample_fraction: test.setup.sample_fraction.unwrap_or(defaults.sample_fraction),
        ..defaults
    };

    let mut builder = DashboardAppBuilder::new()
        .with_records(records)
        .with_options(options)
        .with_step_secs(test.setup.step_secs)
        .with_manual_frame(Duration::from_millis(test.setup.frame_ms));
    if let Some(season) = &test.setup.initial_season {
        builder = builder.with_initial_season(season);
    }
    let mut app = builder.build();

    // Scripted inputs land after the tick and before the view refresh
    let mut scripted = ScriptedInputs::from_inputs(&test.input);
    for state in &test.expect.state {
        scripted.set_max_frame(state.after_frame);
    }
    for refresh in &test.expect.sequence {
        if let Some(max) = refresh.frame_max {
            scripted.set_max_frame(max);
        }
    }
    // Ensure we run at least some frames
    if scripted.max_frame == 0 {
        scripted.max_frame = 60;
    }
    let max_frame = scripted.max_frame;

    app.insert_resource(scripted);
    app.init_resource::<RefreshCapture>();
    app.add_systems(
        Update,
        (
            input_injection
                .after(advance_timeline)
                .before(refresh_season_view),
            refresh_capture.after(refresh_season_view),
        ),
    );

    for frame in 0..=max_frame {
        app.world_mut().resource_mut::<ScriptedInputs>().current_frame = frame;
        app.update();

        let due: Vec<_> = test
            .expect
            .state
            .iter()
            .filter(|a| a.after_frame == frame)
            .collect();
        if due.is_empty() {
            continue;
        }
        let state = extract_state(app.world());
        for assertion in due {
            if let Err(error) = check_state(assertion, &state) {
                return TestResult::Fail {
                    error,
                    at_frame: Some(frame),
                    shown: captured_refreshes(&mut app),
                };
            }
        }
    }

    let shown = captured_refreshes(&mut app);
    let checked = match &test.expect.visited {
        Some(expected) => check_visited(expected, &shown),
        None => Ok(()),
    }
    .and_then(|()| check_sequence(&test.expect.sequence, &shown));
    match checked {
        Ok(()) => TestResult::Pass {
            frames: max_frame + 1,
            shown,
        },
        Err(error) => TestResult::Fail {
            error,
            at_frame: None,
            shown,
        },
    }
}

fn captured_refreshes(app: &mut App) -> Vec<CapturedRefresh> {
    std::mem::take(&mut app.world_mut().resource_mut::<RefreshCapture>().refreshes)
}

/// Record every view refresh with the frame it happened on
fn refresh_capture(
    inputs: Res<ScriptedInputs>,
    view: Res<SeasonView>,
    mut capture: ResMut<RefreshCapture>,
) {
    if view.revision == capture.last_revision {
        return;
    }
    capture.last_revision = view.revision;
    if let (Some(index), Some(frame)) = (view.index, view.frame.as_ref()) {
        capture.refreshes.push(CapturedRefresh {
            frame: inputs.current_frame,
            index,
            season: frame.season_label.clone(),
            title: frame.title.clone(),
        });
    }
}

fn extract_state(world: &World) -> DashboardState {
    let timeline = world.resource::<SeasonTimeline>();
    let view = world.resource::<SeasonView>();
    let frame = view.frame.as_ref();

    DashboardState {
        playback: timeline.state(),
        index: timeline.current_index(),
        season: timeline.current_season().map(|s| s.to_string()),
        view_season: frame.map(|f| f.season_label.clone()),
        view_title: frame.map(|f| f.title.clone()),
        zones: frame.map(|f| f.hot_zones.len()).unwrap_or(0),
        top_zone_count: frame
            .and_then(|f| f.hot_zones.first())
            .map(|z| z.count)
            .unwrap_or(0),
        points: frame.map(|f| f.point_count()).unwrap_or(0),
        revision: view.revision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::parser::{FrameInput, ScenarioExpectations, StateAssertion, TimelineAction};

    fn setup(seasons: u16) -> ScenarioSetup {
        ScenarioSetup {
            seasons,
            start_year: 2008,
            shots_per_season: 60,
            shots_file: None,
            frame_ms: 100,
            step_secs: 0.5,
            initial_season: None,
            top_k: None,
            sample_fraction: None,
        }
    }

    #[test]
    fn synthetic_records_are_stable() {
        let a = synthetic_records(2, 2010, 30);
        let b = synthetic_records(2, 2010, 30);
        assert_eq!(a, b);
        assert_eq!(a.len(), 60);
        assert!(a.iter().all(|r| (-250.0..250.0).contains(&r.raw_x)));
    }

    #[test]
    fn play_sweep_visits_each_season_once() {
        let scenario = ScenarioDefinition {
            name: "play".to_string(),
            description: None,
            setup: setup(3),
            input: vec![FrameInput {
                frame: 1,
                action: TimelineAction::TogglePlay,
            }],
            expect: ScenarioExpectations {
                // initial display, then the sweep
                visited: Some(vec![0, 0, 1, 2]),
                sequence: Vec::new(),
                state: vec![
                    StateAssertion {
                        after_frame: 15,
                        checks: vec!["timeline.state = playing".to_string()],
                    },
                    StateAssertion {
                        after_frame: 16,
                        checks: vec![
                            "timeline.state = stopped".to_string(),
                            "view.season = 2010-11".to_string(),
                            "view.zones = 5".to_string(),
                        ],
                    },
                ],
            },
        };
        match run_scenario(&scenario) {
            TestResult::Pass { frames, shown } => {
                assert_eq!(frames, 17);
                assert_eq!(
                    format_shown(&shown),
                    "2008-09@0 -> 2008-09@1 -> 2009-10@6 -> 2010-11@11"
                );
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn failing_state_check_reports_its_frame() {
        let scenario = ScenarioDefinition {
            name: "wrong".to_string(),
            description: None,
            setup: setup(3),
            input: vec![FrameInput {
                frame: 1,
                action: TimelineAction::TogglePlay,
            }],
            expect: ScenarioExpectations {
                visited: None,
                sequence: Vec::new(),
                state: vec![StateAssertion {
                    after_frame: 6,
                    checks: vec!["timeline.index = 2".to_string()],
                }],
            },
        };
        match run_scenario(&scenario) {
            TestResult::Fail {
                error,
                at_frame,
                shown,
            } => {
                assert_eq!(at_frame, Some(6));
                assert_eq!(error.actual, "1");
                assert_eq!(shown.len(), 3);
            }
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn missing_shots_file_is_an_error() {
        let mut broken = setup(1);
        broken.shots_file = Some("no/such/shots.csv".into());
        let scenario = ScenarioDefinition {
            name: "broken".to_string(),
            description: None,
            setup: broken,
            input: Vec::new(),
            expect: ScenarioExpectations::default(),
        };
        assert!(matches!(run_scenario(&scenario), TestResult::Error { .. }));
    }
}
