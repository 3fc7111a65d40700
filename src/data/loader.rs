//! Comma-separated table loading for shots, attempts and average points
//!
//! Files carry a header row; columns are located by name. Rows that fail to
//! parse are skipped and counted rather than aborting the load.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};

use super::error::{DataError, DataResult};
use super::records::{
    GameScoreRow, SeasonAttempts, SeasonAveragePoints, ShotRecord, ShotType, parse_game_date,
};
use super::season::Season;

/// Parsed rows plus a count of the ones that were rejected
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

impl<T> Loaded<T> {
    fn log_summary(&self, what: &str, path: &Path) {
        if self.skipped > 0 {
            warn!(
                "Loaded {} {} from {} ({} malformed rows skipped)",
                self.records.len(),
                what,
                path.display(),
                self.skipped
            );
        } else {
            info!("Loaded {} {} from {}", self.records.len(), what, path.display());
        }
    }
}

/// Column lookup built from a header line
struct Header {
    path: PathBuf,
    columns: HashMap<String, usize>,
    width: usize,
}

impl Header {
    fn parse(line: &str, path: &Path) -> Self {
        let names = split_fields(line);
        let width = names.len();
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), idx))
            .collect();
        Self {
            path: path.to_path_buf(),
            columns,
            width,
        }
    }

    /// Data rows must have exactly one field per header column
    fn fits(&self, fields: &[&str]) -> bool {
        fields.len() == self.width
    }

    fn require(&self, column: &str) -> DataResult<usize> {
        self.columns
            .get(column)
            .copied()
            .ok_or_else(|| DataError::MissingColumn {
                path: self.path.clone(),
                column: column.to_string(),
            })
    }

    fn optional(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }
}

/// Split on commas outside double quotes
fn split_fields(line: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(clean_field(&line[start..idx]));
                start = idx + 1;
            }
            _ => {}
        }
    }
    fields.push(clean_field(&line[start..]));
    fields
}

fn clean_field(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

fn read_file(path: &Path) -> DataResult<String> {
    fs::read_to_string(path).map_err(|e| DataError::io(path, e))
}

/// Split content into header + data lines, skipping blank lines
fn header_and_rows<'a>(
    content: &'a str,
    path: &Path,
) -> DataResult<(Header, impl Iterator<Item = &'a str>)> {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let Some(first) = lines.next() else {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    };
    Ok((Header::parse(first, path), lines))
}

fn parse_f64(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer columns may come through as "4" or "4.0"
fn parse_count(raw: &str) -> Option<u64> {
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    let v = parse_f64(raw)?;
    if v >= 0.0 && v.fract() == 0.0 {
        Some(v as u64)
    } else {
        None
    }
}

/// Missing-value spellings written for failed fetches
fn is_missing(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw == "None" || raw == "null"
}

// =============================================================================
// SHOTS
// =============================================================================

pub fn load_shots(path: impl AsRef<Path>) -> DataResult<Loaded<ShotRecord>> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let loaded = parse_shots(&content, path)?;
    loaded.log_summary("shots", path);
    Ok(loaded)
}

pub fn parse_shots(content: &str, path: &Path) -> DataResult<Loaded<ShotRecord>> {
    let (header, rows) = header_and_rows(content, path)?;
    let loc_x = header.require("LOC_X")?;
    let loc_y = header.require("LOC_Y")?;
    let shot_type = header.require("SHOT_TYPE")?;
    let season = header.require("SEASON")?;
    let period = header.require("PERIOD")?;
    let game_id = header.optional("GAME_ID");
    let game_date = header.optional("GAME_DATE");

    let mut loaded = Loaded::default();
    for line in rows {
        let fields = split_fields(line);
        if !header.fits(&fields) {
            loaded.skipped += 1;
            continue;
        }
        let field = |idx: usize| fields.get(idx).copied();

        let (Some(x), Some(y), Some(kind), Some(season_key), Some(period_raw)) = (
            field(loc_x).and_then(parse_f64),
            field(loc_y).and_then(parse_f64),
            field(shot_type),
            field(season).and_then(Season::parse),
            field(period).and_then(parse_count),
        ) else {
            loaded.skipped += 1;
            continue;
        };
        let Ok(period_num) = u8::try_from(period_raw) else {
            loaded.skipped += 1;
            continue;
        };

        loaded.records.push(ShotRecord {
            raw_x: x,
            raw_y: y,
            shot_type: ShotType::classify(kind),
            season: season_key,
            period: period_num,
            game_id: game_id.and_then(field).unwrap_or_default().to_string(),
            game_date: game_date.and_then(field).and_then(parse_game_date),
        });
    }
    Ok(loaded)
}

// =============================================================================
// FIELD GOAL ATTEMPTS
// =============================================================================

pub fn load_attempts(path: impl AsRef<Path>) -> DataResult<Loaded<SeasonAttempts>> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let loaded = parse_attempts(&content, path)?;
    loaded.log_summary("attempt rows", path);
    Ok(loaded)
}

pub fn parse_attempts(content: &str, path: &Path) -> DataResult<Loaded<SeasonAttempts>> {
    let (header, rows) = header_and_rows(content, path)?;
    let season = header.require("season")?;
    let twos = header.require("2pts_attempted")?;
    let threes = header.require("3pts_attempted")?;

    let mut loaded = Loaded::default();
    for line in rows {
        let fields = split_fields(line);
        if !header.fits(&fields) {
            loaded.skipped += 1;
            continue;
        }
        let field = |idx: usize| fields.get(idx).copied();
        let (Some(season_key), Some(two_pt), Some(three_pt)) = (
            field(season).and_then(Season::parse),
            field(twos).and_then(parse_count),
            field(threes).and_then(parse_count),
        ) else {
            loaded.skipped += 1;
            continue;
        };
        loaded.records.push(SeasonAttempts {
            season: season_key,
            two_pt_attempted: two_pt,
            three_pt_attempted: three_pt,
        });
    }
    Ok(loaded)
}

// =============================================================================
// AVERAGE POINTS
// =============================================================================

pub fn load_average_points(path: impl AsRef<Path>) -> DataResult<Loaded<SeasonAveragePoints>> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let loaded = parse_average_points(&content, path)?;
    loaded.log_summary("average point rows", path);
    Ok(loaded)
}

pub fn parse_average_points(
    content: &str,
    path: &Path,
) -> DataResult<Loaded<SeasonAveragePoints>> {
    let (header, rows) = header_and_rows(content, path)?;
    let season = header.require("season")?;
    let average = header.require("average_points")?;

    let mut loaded = Loaded::default();
    for line in rows {
        let fields = split_fields(line);
        if !header.fits(&fields) {
            loaded.skipped += 1;
            continue;
        }
        let Some(season_key) = fields.get(season).copied().and_then(Season::parse) else {
            loaded.skipped += 1;
            continue;
        };
        let raw = fields.get(average).copied().unwrap_or_default();
        let average_points = if is_missing(raw) {
            None
        } else {
            match parse_f64(raw) {
                Some(v) => Some(v),
                None => {
                    loaded.skipped += 1;
                    continue;
                }
            }
        };
        loaded.records.push(SeasonAveragePoints {
            season: season_key,
            average_points,
        });
    }
    Ok(loaded)
}

// =============================================================================
// GAME SCORES
// =============================================================================

/// Per-team game lines (SEASON, GAME_ID, PTS), two per game
pub fn load_game_scores(path: impl AsRef<Path>) -> DataResult<Loaded<GameScoreRow>> {
    let path = path.as_ref();
    let content = read_file(path)?;
    let loaded = parse_game_scores(&content, path)?;
    loaded.log_summary("team game rows", path);
    Ok(loaded)
}

pub fn parse_game_scores(content: &str, path: &Path) -> DataResult<Loaded<GameScoreRow>> {
    let (header, rows) = header_and_rows(content, path)?;
    let season = header.require("SEASON")?;
    let game_id = header.require("GAME_ID")?;
    let points = header.require("PTS")?;

    let mut loaded = Loaded::default();
    for line in rows {
        let fields = split_fields(line);
        if !header.fits(&fields) {
            loaded.skipped += 1;
            continue;
        }
        let field = |idx: usize| fields.get(idx).copied();
        let (Some(season_key), Some(id), Some(pts)) = (
            field(season).and_then(Season::parse),
            field(game_id).filter(|id| !id.is_empty()),
            field(points).and_then(parse_count).and_then(|p| u32::try_from(p).ok()),
        ) else {
            loaded.skipped += 1;
            continue;
        };
        loaded.records.push(GameScoreRow {
            season: season_key,
            game_id: id.to_string(),
            points: pts,
        });
    }
    Ok(loaded)
}
