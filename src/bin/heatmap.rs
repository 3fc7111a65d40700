//! Per-season shot density heatmaps
//!
//! Bins every season's outside-layup shots on the shared grid and writes, per
//! season, the raw counts and a PNG with the top zones outlined.
//!
//! Usage:
//!   cargo run --bin heatmap
//!   cargo run --bin heatmap -- --season 2015-16 --season 2023-24
//!   cargo run --bin heatmap -- --shots data/all_made_shots_with_quater.csv
//!   cargo run --bin heatmap -- --out showcase/heatmaps --threads 4
//!
//! Outputs land in showcase/heatmaps as:
//!   heatmap_density_<season>.png
//!   heatmap_density_<season>.txt (x,y,count)
//! A combined sheet is written to showcase/heatmap_density_all.png and a
//! run summary is appended to showcase/heatmaps/heatmap_stats.txt.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use shotzones::export::{combine_sheets, grid_to_text, render_density};
use shotzones::{DashboardSettings, SeasonDataset, load_shots};

const OUTPUT_DIR: &str = "showcase/heatmaps";
const SHEET_FILE: &str = "showcase/heatmap_density_all.png";
const SHEET_COLUMNS: u32 = 4;

struct HeatmapConfig {
    shots_file: PathBuf,
    seasons: Vec<String>,
    output_dir: PathBuf,
    threads: usize,
}

fn parse_args(settings: &DashboardSettings) -> Result<HeatmapConfig, String> {
    let mut config = HeatmapConfig {
        shots_file: settings.shots_file.clone(),
        seasons: Vec::new(),
        output_dir: PathBuf::from(OUTPUT_DIR),
        threads: 0,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| format!("{} requires a value", flag));
        match arg.as_str() {
            "--shots" => config.shots_file = PathBuf::from(value("--shots")?),
            "--season" => config.seasons.push(value("--season")?),
            "--out" => config.output_dir = PathBuf::from(value("--out")?),
            "--threads" => {
                config.threads = value("--threads")?
                    .parse()
                    .map_err(|e| format!("Invalid --threads: {}", e))?;
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(config)
}

fn main() {
    let settings = DashboardSettings::load();
    let config = match parse_args(&settings) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if config.threads > 0
        && let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
    {
        eprintln!("Failed to initialize Rayon thread pool: {}", e);
    }

    let loaded = match load_shots(&config.shots_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Loaded {} shots from {} ({} rows skipped)",
        loaded.records.len(),
        config.shots_file.display(),
        loaded.skipped
    );

    let dataset = SeasonDataset::build(&loaded.records, &settings.dataset_options());
    let Some(spec) = dataset.grid() else {
        println!("No shot coordinates to bin.");
        return;
    };

    let selected: Vec<usize> = (0..dataset.len())
        .filter(|&i| {
            config.seasons.is_empty()
                || dataset
                    .bins(i)
                    .is_some_and(|b| config.seasons.iter().any(|s| s == b.season.label()))
        })
        .collect();
    if selected.is_empty() {
        println!("No matching seasons. Filter: {:?}", config.seasons);
        std::process::exit(1);
    }

    if let Err(e) = fs::create_dir_all(&config.output_dir) {
        eprintln!("Failed to create {}: {}", config.output_dir.display(), e);
        std::process::exit(1);
    }

    let results: Vec<Result<(String, image::RgbImage), String>> = selected
        .par_iter()
        .map(|&index| {
            let bins = dataset
                .bins(index)
                .ok_or_else(|| format!("Season index {} missing", index))?;
            let zones = dataset.hot_zones(index).unwrap_or_default();
            let base = config
                .output_dir
                .join(format!("heatmap_density_{}", bins.season.label()));

            let img = render_density(&bins.density, spec, &zones);
            let image_path = base.with_extension("png");
            let data_path = base.with_extension("txt");
            img.save(&image_path)
                .map_err(|e| format!("Failed to save {}: {}", image_path.display(), e))?;
            fs::write(&data_path, grid_to_text(&bins.density, spec))
                .map_err(|e| format!("Failed to write {}: {}", data_path.display(), e))?;

            println!("Saved {} and {}", image_path.display(), data_path.display());
            Ok((bins.season.label().to_string(), img))
        })
        .collect();

    let mut images = Vec::with_capacity(results.len());
    let mut failures = 0;
    for result in results {
        match result {
            Ok((_, img)) => images.push(img),
            Err(e) => {
                eprintln!("{}", e);
                failures += 1;
            }
        }
    }

    if let Some(sheet) = combine_sheets(&images, SHEET_COLUMNS) {
        match sheet.save(SHEET_FILE) {
            Ok(()) => println!("Saved combined heatmap {}", SHEET_FILE),
            Err(e) => eprintln!("Failed to write combined heatmap {}: {}", SHEET_FILE, e),
        }
    }

    write_stats_line(&config.output_dir, &dataset, &selected);

    if failures > 0 {
        std::process::exit(1);
    }
}

/// Append a one-line run summary
fn write_stats_line(output_dir: &Path, dataset: &SeasonDataset, selected: &[usize]) {
    let shots: usize = selected
        .iter()
        .filter_map(|&i| dataset.bins(i))
        .map(|b| b.outside_layup_count)
        .sum();
    let line = format!(
        "{} seasons={} binned_shots={} top_k={}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        selected.len(),
        shots,
        dataset.top_k()
    );
    println!("{}", line);

    let path = output_dir.join("heatmap_stats.txt");
    let written = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut file| writeln!(file, "{}", line));
    if let Err(err) = written {
        println!("Failed to write heatmap stats: {}", err);
    }
}
