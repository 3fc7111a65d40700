//! Season Report - Print the dashboard's season summaries as text
//!
//! Reads the shot, attempt and average-point tables, then prints the attempt
//! trend, rounded average points, the 4th-quarter shot-type split between two
//! seasons and the top hot zones of every season.
//!
//! Usage:
//!   cargo run --bin season_report
//!   cargo run --bin season_report -- --shots data/all_made_shots_with_quater.csv
//!   cargo run --bin season_report -- --baseline 2010-11 --recent 2022-23 --period 4
//!   cargo run --bin season_report -- --games data/team_games.csv
//!   cargo run --bin season_report -- --output report.txt

use std::path::{Path, PathBuf};

use shotzones::report::{
    format_attempt_trend, format_average_points, format_hot_zones, format_shot_type_split,
};
use shotzones::{
    DashboardSettings, Season, SeasonAttempts, SeasonAveragePoints, SeasonDataset, ShotRecord,
    attempt_trend, attempts_from_shots, average_points_by_season, load_attempts,
    load_average_points, load_game_scores, load_shots, missing_seasons, ordered_seasons,
    rounded_average_points, season_range, shot_type_split,
};

/// Configuration for the report tool
struct ReportConfig {
    settings: DashboardSettings,
    /// Per-team game scores; averages are derived from these when given
    games_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    show_help: bool,
}

impl ReportConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut config = Self {
            settings: DashboardSettings::load(),
            games_file: None,
            output_file: None,
            show_help: false,
        };

        let mut i = 1;
        while i < args.len() {
            let value = || {
                args.get(i + 1)
                    .cloned()
                    .ok_or_else(|| format!("{} requires a value", args[i]))
            };
            match args[i].as_str() {
                "--shots" => config.settings.shots_file = PathBuf::from(value()?),
                "--attempts" => config.settings.attempts_file = PathBuf::from(value()?),
                "--points" => config.settings.average_points_file = PathBuf::from(value()?),
                "--games" => config.games_file = Some(PathBuf::from(value()?)),
                "--baseline" => config.settings.baseline_season = value()?,
                "--recent" => config.settings.recent_season = value()?,
                "--period" => {
                    config.settings.comparison_period = value()?
                        .parse()
                        .map_err(|e| format!("Invalid --period: {}", e))?;
                }
                "--output" | "-o" => config.output_file = Some(PathBuf::from(value()?)),
                "--help" | "-h" => {
                    config.show_help = true;
                    i += 1;
                    continue;
                }
                other => return Err(format!("Unknown argument: {}", other)),
            }
            i += 2;
        }

        Ok(config)
    }
}

fn main() {
    let config = match ReportConfig::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            print_help();
            std::process::exit(2);
        }
    };
    if config.show_help {
        print_help();
        return;
    }
    let settings = &config.settings;

    let shots = match load_shots(&settings.shots_file) {
        Ok(loaded) => loaded.records,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!("Loaded {} shots from {}", shots.len(), settings.shots_file.display());

    let report = build_report(settings, config.games_file.as_deref(), &shots);
    println!("{}", report);

    if let Some(output_path) = &config.output_file {
        let stamped = format!(
            "Generated {}\n{}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            report
        );
        if let Err(e) = std::fs::write(output_path, stamped) {
            eprintln!("Failed to write report: {}", e);
            std::process::exit(1);
        }
        println!("\nReport written to {}", output_path.display());
    }
}

/// Attempt totals from the attempts table, or counted from shot rows when
/// the table can't be read
fn attempts(settings: &DashboardSettings, shots: &[ShotRecord]) -> Vec<SeasonAttempts> {
    match load_attempts(&settings.attempts_file) {
        Ok(loaded) => attempt_trend(&loaded.records),
        Err(e) => {
            println!("Warning: {}; counting attempts from shot rows", e);
            attempts_from_shots(shots)
        }
    }
}

/// Every season from the first to the last one with shots
fn covered_range(shots: &[ShotRecord]) -> Vec<Season> {
    let seasons = ordered_seasons(shots.iter().map(|shot| &shot.season));
    match (seasons.first(), seasons.last()) {
        (Some(first), Some(last)) => season_range(first.start_year(), last.start_year()),
        _ => Vec::new(),
    }
}

/// Average points from the games table when given, else the averages table
fn average_points(
    settings: &DashboardSettings,
    games_file: Option<&Path>,
    range: &[Season],
) -> Vec<SeasonAveragePoints> {
    let loaded = match games_file {
        Some(path) => {
            load_game_scores(path).map(|games| average_points_by_season(&games.records, range))
        }
        None => load_average_points(&settings.average_points_file).map(|loaded| loaded.records),
    };
    loaded.unwrap_or_else(|e| {
        println!("Warning: {}", e);
        Vec::new()
    })
}

fn build_report(
    settings: &DashboardSettings,
    games_file: Option<&Path>,
    shots: &[ShotRecord],
) -> String {
    let mut report = String::new();
    report.push_str("============================================================\n");
    report.push_str("NBA SHOOTING TRENDS\n");
    report.push_str("============================================================\n");

    report.push_str(&format_attempt_trend(&attempts(settings, shots)));

    let range = covered_range(shots);
    let series = average_points(settings, games_file, &range);
    report.push_str(&format_average_points(
        &rounded_average_points(&series),
        &missing_seasons(&series, &range),
    ));

    match (
        Season::parse(&settings.baseline_season),
        Season::parse(&settings.recent_season),
    ) {
        (Some(baseline), Some(recent)) => {
            let period = settings.comparison_period;
            report.push_str(&format_shot_type_split(
                &shot_type_split(shots, &baseline, period),
                &shot_type_split(shots, &recent, period),
            ));
        }
        _ => println!(
            "Warning: invalid comparison seasons {:?} / {:?}",
            settings.baseline_season, settings.recent_season
        ),
    }

    let dataset = SeasonDataset::build(shots, &settings.dataset_options());
    report.push_str(&format_hot_zones(&dataset));
    report
}

fn print_help() {
    println!(
        r#"Season Report - NBA shooting trend summaries

USAGE:
    cargo run --bin season_report -- [OPTIONS]

OPTIONS:
    --shots <FILE>       Made shots table (default from config/dashboard.json)
    --attempts <FILE>    Per-season attempt totals
    --points <FILE>      Per-season average points
    --games <FILE>       Per-team game scores (SEASON, GAME_ID, PTS); overrides --points
    --baseline <SEASON>  First season of the shot-type comparison (e.g. 2008-09)
    --recent <SEASON>    Second season of the shot-type comparison
    --period <N>         Period compared (default 4)
    --output, -o <FILE>  Also write the report to a file
    --help, -h           Show this help
"#
    );
}
