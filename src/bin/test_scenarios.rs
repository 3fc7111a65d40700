//! Timeline scenario runner CLI
//!
//! Runs every scenario under tests/scenarios and prints, per scenario, the
//! seasons the view showed and the frame each one appeared on.
//!
//! Usage:
//!   cargo run --bin test-scenarios                  # Run all scenarios
//!   cargo run --bin test-scenarios -- scrub         # Paths containing "scrub"
//!   cargo run --bin test-scenarios -- --verbose     # Trail for passing runs too

use std::path::Path;

use shotzones::testing::{
    SCENARIOS_DIR, TestResult, discover_scenarios, format_shown, run_scenario_file,
};

fn main() {
    let mut verbose = false;
    let mut filter: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--verbose" | "-v" => verbose = true,
            _ if !arg.starts_with('-') => filter = Some(arg),
            _ => {}
        }
    }

    let dir = Path::new(SCENARIOS_DIR);
    let paths = discover_scenarios(dir, filter.as_deref());
    if paths.is_empty() {
        println!("No timeline scenarios in {} (filter: {:?})", SCENARIOS_DIR, filter);
        std::process::exit(1);
    }

    let mut failures = 0;
    for path in &paths {
        let label = path.strip_prefix(dir).unwrap_or(path).display().to_string();
        let (scenario, result) = run_scenario_file(path);
        let title = scenario.as_ref().map(|s| s.name.as_str()).unwrap_or("");

        match result {
            TestResult::Pass { frames, shown } => {
                println!("ok    {} ({} refreshes over {} frames)", label, shown.len(), frames);
                if verbose {
                    println!("      {}", title);
                    println!("      shown: {}", format_shown(&shown));
                }
            }
            TestResult::Fail {
                error,
                at_frame,
                shown,
            } => {
                failures += 1;
                match at_frame {
                    Some(frame) => println!("FAIL  {} at frame {}: {}", label, frame, title),
                    None => println!("FAIL  {} after the run: {}", label, title),
                }
                println!("      {}", error.to_string().replace('\n', "\n      "));
                println!("      shown: {}", format_shown(&shown));
            }
            TestResult::Error { message } => {
                failures += 1;
                println!("ERROR {}: {}", label, message);
            }
        }
    }

    println!(
        "\n{} of {} timeline scenarios passed",
        paths.len() - failures,
        paths.len()
    );
    if failures > 0 {
        std::process::exit(1);
    }
}
