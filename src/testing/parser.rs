//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Complete scenario definition from a TOML file
#[derive(Debug, Deserialize)]
pub struct ScenarioDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: ScenarioSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    #[serde(default)]
    pub expect: ScenarioExpectations,
}

/// Dataset and clock configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioSetup {
    /// Number of synthetic seasons (ignored when `shots_file` is set)
    #[serde(default = "default_seasons")]
    pub seasons: u16,
    #[serde(default = "default_start_year")]
    pub start_year: u16,
    #[serde(default = "default_shots_per_season")]
    pub shots_per_season: usize,
    /// Real shot table to load instead of synthetic shots
    pub shots_file: Option<PathBuf>,
    /// Simulated milliseconds per frame
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    #[serde(default = "default_step_secs")]
    pub step_secs: f32,
    pub initial_season: Option<String>,
    pub top_k: Option<usize>,
    pub sample_fraction: Option<f64>,
}

fn default_seasons() -> u16 {
    3
}

fn default_start_year() -> u16 {
    2008
}

fn default_shots_per_season() -> usize {
    60
}

fn default_frame_ms() -> u64 {
    100
}

fn default_step_secs() -> f32 {
    crate::constants::PLAY_STEP_SECS
}

/// Timeline action applied at a specific frame
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    #[serde(flatten)]
    pub action: TimelineAction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TimelineAction {
    TogglePlay,
    Scrub { index: usize },
    StepForward,
    StepBackward,
    JumpStart,
    JumpEnd,
}

/// Expected scenario outcomes
#[derive(Debug, Default, Deserialize)]
pub struct ScenarioExpectations {
    /// Exact list of indices shown, one entry per refresh
    pub visited: Option<Vec<usize>>,
    /// Refreshes that must appear in order
    #[serde(default)]
    pub sequence: Vec<ExpectedRefresh>,
    /// State assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// Expected refresh in sequence
#[derive(Debug, Deserialize)]
pub struct ExpectedRefresh {
    pub index: Option<usize>,
    pub season: Option<String>,
    pub frame_min: Option<u64>,
    pub frame_max: Option<u64>,
}

/// State assertion after a given frame
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

/// Parse a scenario file from path
pub fn parse_scenario_file(path: &Path) -> Result<ScenarioDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let toml = r#"
name = "Play"
[setup]
seasons = 4
frame_ms = 50

[[input]]
frame = 2
action = "toggle_play"

[[input]]
frame = 5
action = "scrub"
index = 3

[expect]
visited = [0, 0, 3]

[[expect.state]]
after_frame = 10
checks = ["timeline.state = playing"]
"#;
        let def: ScenarioDefinition = toml::from_str(toml).unwrap();
        assert_eq!(def.name, "Play");
        assert_eq!(def.setup.seasons, 4);
        assert_eq!(def.setup.shots_per_season, 60);
        assert_eq!(def.input.len(), 2);
        assert_eq!(def.input[0].action, TimelineAction::TogglePlay);
        assert_eq!(def.input[1].action, TimelineAction::Scrub { index: 3 });
        assert_eq!(def.expect.visited, Some(vec![0, 0, 3]));
        assert_eq!(def.expect.state[0].after_frame, 10);
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let toml = r#"
name = "Bad"
[setup]
[[input]]
frame = 0
action = "rewind"
"#;
        assert!(toml::from_str::<ScenarioDefinition>(toml).is_err());
    }
}
