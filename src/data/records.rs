//! Tabular records consumed by the dashboard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::season::Season;
use crate::court::{CourtPoint, is_outside_layup, normalize};

/// Field goal type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    #[serde(rename = "2PT")]
    TwoPt,
    #[serde(rename = "3PT")]
    ThreePt,
}

impl ShotType {
    /// Classify a raw label. Anything mentioning "3PT" ("3PT Field Goal",
    /// "3PT") is a three; everything else is a two.
    pub fn classify(raw: &str) -> Self {
        if raw.contains("3PT") {
            ShotType::ThreePt
        } else {
            ShotType::TwoPt
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShotType::TwoPt => "2PT",
            ShotType::ThreePt => "3PT",
        }
    }
}

/// One made shot as delivered by the loader. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotRecord {
    pub raw_x: f64,
    pub raw_y: f64,
    pub shot_type: ShotType,
    pub season: Season,
    pub period: u8,
    pub game_id: String,
    pub game_date: Option<NaiveDate>,
}

impl ShotRecord {
    pub fn plot_position(&self) -> CourtPoint {
        CourtPoint::from_raw(self.raw_x, self.raw_y)
    }
}

/// A shot with its derived plot-space fields
#[derive(Debug, Clone, PartialEq)]
pub struct PlotShot {
    pub plot_x: f64,
    pub plot_y: f64,
    pub outside_layup: bool,
    pub shot_type: ShotType,
    pub season: Season,
    pub period: u8,
}

impl PlotShot {
    pub fn from_record(record: &ShotRecord) -> Self {
        let (plot_x, plot_y) = normalize(record.raw_x, record.raw_y);
        Self {
            plot_x,
            plot_y,
            outside_layup: is_outside_layup(plot_x, plot_y),
            shot_type: record.shot_type,
            season: record.season.clone(),
            period: record.period,
        }
    }

    pub fn point(&self) -> CourtPoint {
        CourtPoint::new(self.plot_x, self.plot_y)
    }
}

/// Per-season field goal attempt totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAttempts {
    pub season: Season,
    pub two_pt_attempted: u64,
    pub three_pt_attempted: u64,
}

/// Per-season average total points per game.
/// `None` marks a season whose fetch failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAveragePoints {
    pub season: Season,
    pub average_points: Option<f64>,
}

/// One team's line from a game, as returned by the game finder endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct GameScoreRow {
    pub season: Season,
    pub game_id: String,
    pub points: u32,
}

/// Accepts the stats API's `YYYYMMDD` as well as ISO dates
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
