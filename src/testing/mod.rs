//! Scenario testing for the season timeline
//!
//! Runs scripted timeline inputs against a headless dashboard app with a
//! manual clock and checks which seasons were shown and when.

pub mod assertions;
pub mod input;
pub mod parser;
pub mod runner;

pub use assertions::{AssertionError, CapturedRefresh, DashboardState, check_sequence, check_state, check_visited};
pub use input::{ScriptedInputs, apply_action};
pub use parser::{
    ExpectedRefresh, FrameInput, ScenarioDefinition, ScenarioExpectations, ScenarioSetup,
    StateAssertion, TimelineAction, parse_scenario_file,
};
pub use runner::{TestResult, format_shown, run_scenario, synthetic_records};

use std::fs;
use std::path::{Path, PathBuf};

/// Default path for scenario files
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// Scenario files under `dir`, sorted. `filter` keeps paths containing it.
pub fn discover_scenarios(dir: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        let Ok(entries) = fs::read_dir(&current) else {
            continue;
        };
        for path in entries.flatten().map(|e| e.path()) {
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|e| e == "toml")
                && filter.is_none_or(|f| {
                    let relative = path.strip_prefix(dir).unwrap_or(&path);
                    relative.to_string_lossy().contains(f)
                })
            {
                found.push(path);
            }
        }
    }
    found.sort();
    found
}

/// Parse and run one scenario file
pub fn run_scenario_file(path: &Path) -> (Option<ScenarioDefinition>, TestResult) {
    match parse_scenario_file(path) {
        Ok(scenario) => {
            let result = run_scenario(&scenario);
            (Some(scenario), result)
        }
        Err(message) => (None, TestResult::Error { message }),
    }
}
