//! Season-level summaries behind the trend and comparison charts

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::records::{GameScoreRow, SeasonAttempts, SeasonAveragePoints, ShotRecord, ShotType};
use super::season::Season;
use crate::constants::TREND_TICK_TARGET;

/// Attempt totals sorted chronologically
pub fn attempt_trend(attempts: &[SeasonAttempts]) -> Vec<SeasonAttempts> {
    let mut trend = attempts.to_vec();
    trend.sort_by(|a, b| a.season.cmp(&b.season));
    trend
}

/// Count two- and three-point rows per season
pub fn attempts_from_shots(records: &[ShotRecord]) -> Vec<SeasonAttempts> {
    let mut counts: BTreeMap<Season, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = counts.entry(record.season.clone()).or_default();
        match record.shot_type {
            ShotType::TwoPt => entry.0 += 1,
            ShotType::ThreePt => entry.1 += 1,
        }
    }
    counts
        .into_iter()
        .map(|(season, (two_pt, three_pt))| SeasonAttempts {
            season,
            two_pt_attempted: two_pt,
            three_pt_attempted: three_pt,
        })
        .collect()
}

/// Mean combined score per game. Each game appears once per team, so team
/// points are summed by game id before averaging. `None` when there are no
/// games.
pub fn average_points_from_games(rows: &[GameScoreRow]) -> Option<f64> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for row in rows {
        *totals.entry(row.game_id.as_str()).or_default() += row.points as u64;
    }
    if totals.is_empty() {
        return None;
    }
    let sum: u64 = totals.values().sum();
    Some(sum as f64 / totals.len() as f64)
}

/// Average points for every season in `seasons`, from per-team game rows.
/// A season without rows comes out missing, like a failed fetch.
pub fn average_points_by_season(
    rows: &[GameScoreRow],
    seasons: &[Season],
) -> Vec<SeasonAveragePoints> {
    let mut by_season: HashMap<&Season, Vec<GameScoreRow>> = HashMap::new();
    for row in rows {
        by_season.entry(&row.season).or_default().push(row.clone());
    }
    seasons
        .iter()
        .map(|season| SeasonAveragePoints {
            season: season.clone(),
            average_points: by_season
                .get(season)
                .and_then(|games| average_points_from_games(games)),
        })
        .collect()
}

/// Seasons of `expected` with no usable average in `series`
pub fn missing_seasons(series: &[SeasonAveragePoints], expected: &[Season]) -> Vec<Season> {
    expected
        .iter()
        .filter(|season| {
            !series
                .iter()
                .any(|entry| &entry.season == *season && entry.average_points.is_some())
        })
        .cloned()
        .collect()
}

/// Integer-rounded averages (ties to even), chronological, seasons without a
/// value dropped
pub fn rounded_average_points(series: &[SeasonAveragePoints]) -> Vec<(Season, i64)> {
    let mut rounded: Vec<(Season, i64)> = series
        .iter()
        .filter_map(|entry| {
            entry
                .average_points
                .map(|avg| (entry.season.clone(), avg.round_ties_even() as i64))
        })
        .collect();
    rounded.sort_by(|a, b| a.0.cmp(&b.0));
    rounded
}

/// Indices of trend points that get an axis label
pub fn tick_indices(len: usize) -> Vec<usize> {
    let step = (len / TREND_TICK_TARGET).max(1);
    (0..len).step_by(step).collect()
}

/// Two- vs three-point makes for one season and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotTypeSplit {
    pub season: Season,
    pub period: u8,
    pub two_pt: u64,
    pub three_pt: u64,
}

impl ShotTypeSplit {
    pub fn total(&self) -> u64 {
        self.two_pt + self.three_pt
    }

    pub fn two_pt_pct(&self) -> f64 {
        percent(self.two_pt, self.total())
    }

    pub fn three_pt_pct(&self) -> f64 {
        percent(self.three_pt, self.total())
    }
}

fn percent(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

pub fn shot_type_split(records: &[ShotRecord], season: &Season, period: u8) -> ShotTypeSplit {
    let mut split = ShotTypeSplit {
        season: season.clone(),
        period,
        two_pt: 0,
        three_pt: 0,
    };
    for record in records
        .iter()
        .filter(|r| r.period == period && &r.season == season)
    {
        match record.shot_type {
            ShotType::TwoPt => split.two_pt += 1,
            ShotType::ThreePt => split.three_pt += 1,
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::season::season_range;

    fn shot(season: &str, period: u8, shot_type: ShotType) -> ShotRecord {
        ShotRecord {
            raw_x: 0.0,
            raw_y: 100.0,
            shot_type,
            season: Season::parse(season).unwrap(),
            period,
            game_id: String::new(),
            game_date: None,
        }
    }

    #[test]
    fn attempts_are_counted_per_season_in_order() {
        let records = vec![
            shot("2010-11", 1, ShotType::TwoPt),
            shot("2009-10", 1, ShotType::ThreePt),
            shot("2010-11", 2, ShotType::ThreePt),
            shot("2010-11", 3, ShotType::TwoPt),
        ];
        let attempts = attempts_from_shots(&records);
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].season.label(), "2009-10");
        assert_eq!(attempts[0].three_pt_attempted, 1);
        assert_eq!(attempts[1].two_pt_attempted, 2);
        assert_eq!(attempts[1].three_pt_attempted, 1);
    }

    #[test]
    fn game_points_are_summed_before_averaging() {
        let rows = vec![
            game("2008-09", "g1", 100),
            game("2008-09", "g1", 90),
            game("2008-09", "g2", 110),
            game("2008-09", "g2", 120),
        ];
        assert_eq!(average_points_from_games(&rows), Some(210.0));
        assert_eq!(average_points_from_games(&[]), None);
    }

    fn game(season: &str, game_id: &str, points: u32) -> GameScoreRow {
        GameScoreRow {
            season: Season::parse(season).unwrap(),
            game_id: game_id.to_string(),
            points,
        }
    }

    #[test]
    fn seasons_without_games_are_missing() {
        let rows = vec![
            game("2008-09", "g1", 100),
            game("2008-09", "g1", 95),
            game("2010-11", "g7", 110),
            game("2010-11", "g7", 104),
            game("2010-11", "g8", 99),
            game("2010-11", "g8", 97),
        ];
        let range = season_range(2008, 2010);
        let series = average_points_by_season(&rows, &range);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].average_points, Some(195.0));
        assert_eq!(series[1].average_points, None);
        assert_eq!(series[2].average_points, Some(205.0));

        let missing = missing_seasons(&series, &range);
        assert_eq!(missing, vec![Season::from_start_year(2009)]);
        assert_eq!(missing_seasons(&[], &range).len(), 3);
    }

    #[test]
    fn rounding_drops_missing_seasons() {
        let series = vec![
            SeasonAveragePoints {
                season: Season::from_start_year(2010),
                average_points: Some(200.5),
            },
            SeasonAveragePoints {
                season: Season::from_start_year(2008),
                average_points: Some(199.6),
            },
            SeasonAveragePoints {
                season: Season::from_start_year(2009),
                average_points: None,
            },
        ];
        let rounded = rounded_average_points(&series);
        assert_eq!(rounded.len(), 2);
        assert_eq!(rounded[0], (Season::from_start_year(2008), 200));
        // ties go to even
        assert_eq!(rounded[1], (Season::from_start_year(2010), 200));
    }

    #[test]
    fn ticks_label_about_five_points() {
        assert_eq!(tick_indices(16), vec![0, 3, 6, 9, 12, 15]);
        assert_eq!(tick_indices(3), vec![0, 1, 2]);
        assert!(tick_indices(0).is_empty());
    }

    #[test]
    fn split_filters_season_and_period() {
        let records = vec![
            shot("2008-09", 4, ShotType::TwoPt),
            shot("2008-09", 4, ShotType::TwoPt),
            shot("2008-09", 4, ShotType::ThreePt),
            shot("2008-09", 3, ShotType::ThreePt),
            shot("2023-24", 4, ShotType::ThreePt),
        ];
        let season = Season::parse("2008-09").unwrap();
        let split = shot_type_split(&records, &season, 4);
        assert_eq!(split.two_pt, 2);
        assert_eq!(split.three_pt, 1);
        assert!((split.two_pt_pct() - 66.666).abs() < 0.01);

        let empty = shot_type_split(&records, &Season::from_start_year(2015), 4);
        assert_eq!(empty.total(), 0);
        assert_eq!(empty.three_pt_pct(), 0.0);
    }
}
