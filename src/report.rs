//! Plain-text season reports

use crate::data::{Season, SeasonAttempts, ShotTypeSplit, tick_indices};
use crate::timeline::SeasonDataset;

/// Two- vs three-point attempts per season. Rows that would carry an axis
/// label on the trend chart are marked with `*`.
pub fn format_attempt_trend(trend: &[SeasonAttempts]) -> String {
    let mut output = String::new();
    output.push_str("\nFIELD GOAL ATTEMPTS BY SEASON:\n");
    if trend.is_empty() {
        output.push_str("  (no attempt data)\n");
        return output;
    }
    output.push_str("  Season      2PT FGA     3PT FGA   3PT share\n");
    output.push_str("  ────────────────────────────────────────────\n");

    let ticks = tick_indices(trend.len());
    for (i, row) in trend.iter().enumerate() {
        let total = row.two_pt_attempted + row.three_pt_attempted;
        let share = if total == 0 {
            0.0
        } else {
            row.three_pt_attempted as f64 * 100.0 / total as f64
        };
        let marker = if ticks.contains(&i) { '*' } else { ' ' };
        output.push_str(&format!(
            "{} {:<9} {:>9}   {:>9}     {:>5.1}%\n",
            marker, row.season, row.two_pt_attempted, row.three_pt_attempted, share
        ));
    }
    output
}

/// Integer average total points per game, then any seasons with no value
pub fn format_average_points(rounded: &[(Season, i64)], missing: &[Season]) -> String {
    let mut output = String::new();
    output.push_str("\nAVERAGE POINTS PER GAME:\n");
    if !missing.is_empty() {
        let labels: Vec<&str> = missing.iter().map(|s| s.label()).collect();
        output.push_str(&format!("  missing: {}\n", labels.join(", ")));
    }
    if rounded.is_empty() {
        output.push_str("  (no average point data)\n");
        return output;
    }

    let ticks = tick_indices(rounded.len());
    for (i, (season, points)) in rounded.iter().enumerate() {
        let marker = if ticks.contains(&i) { '*' } else { ' ' };
        output.push_str(&format!("{} {:<9} {:>4}\n", marker, season, points));
    }
    output
}

/// Side-by-side shot-type split for two seasons
pub fn format_shot_type_split(baseline: &ShotTypeSplit, recent: &ShotTypeSplit) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\nSHOT TYPES IN PERIOD {}: {} vs {}\n",
        baseline.period, baseline.season, recent.season
    ));
    for split in [baseline, recent] {
        if split.total() == 0 {
            output.push_str(&format!("  {:<9} no made shots\n", split.season));
            continue;
        }
        output.push_str(&format!(
            "  {:<9} 2PT {:>5.1}%  3PT {:>5.1}%  ({} shots)\n",
            split.season,
            split.two_pt_pct(),
            split.three_pt_pct(),
            split.total()
        ));
    }
    output
}

/// Hot zones of every binned season
pub fn format_hot_zones(dataset: &SeasonDataset) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\nTOP {} SHOOTING ZONES (excluding layups):\n",
        dataset.top_k()
    ));
    if dataset.is_empty() {
        output.push_str("  (no shots)\n");
        return output;
    }

    for (index, bins) in dataset.season_bins().iter().enumerate() {
        output.push_str(&format!(
            "  {} ({} shots, {} outside layup range)\n",
            bins.season, bins.shot_count, bins.outside_layup_count
        ));
        for zone in dataset.hot_zones(index).unwrap_or_default() {
            output.push_str(&format!(
                "    #{} x {:>6.1}..{:>6.1}  y {:>5.1}..{:>5.1}  {:>5} shots\n",
                zone.rank, zone.x_min, zone.x_max, zone.y_min, zone.y_max, zone.count
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{ShotRecord, ShotType};
    use crate::timeline::DatasetOptions;

    #[test]
    fn attempt_trend_marks_ticks() {
        let trend: Vec<SeasonAttempts> = (0..12)
            .map(|i| SeasonAttempts {
                season: Season::from_start_year(2008 + i),
                two_pt_attempted: 100,
                three_pt_attempted: 50,
            })
            .collect();
        let text = format_attempt_trend(&trend);
        assert!(text.contains("* 2008-09"));
        assert!(text.contains("  2009-10"));
        assert!(text.contains("33.3%"));
    }

    #[test]
    fn empty_sections_say_so() {
        assert!(format_attempt_trend(&[]).contains("no attempt data"));
        assert!(format_average_points(&[], &[]).contains("no average point data"));
        assert!(format_hot_zones(&SeasonDataset::default()).contains("no shots"));
    }

    #[test]
    fn missing_average_seasons_are_listed() {
        let rounded = vec![(Season::from_start_year(2008), 196)];
        let missing = vec![Season::from_start_year(2009), Season::from_start_year(2011)];
        let text = format_average_points(&rounded, &missing);
        assert!(text.contains("missing: 2009-10, 2011-12"));
        assert!(text.contains("2008-09    196"));
    }

    #[test]
    fn split_shows_both_seasons() {
        let baseline = ShotTypeSplit {
            season: Season::from_start_year(2008),
            period: 4,
            two_pt: 3,
            three_pt: 1,
        };
        let recent = ShotTypeSplit {
            season: Season::from_start_year(2023),
            period: 4,
            two_pt: 0,
            three_pt: 0,
        };
        let text = format_shot_type_split(&baseline, &recent);
        assert!(text.contains("PERIOD 4: 2008-09 vs 2023-24"));
        assert!(text.contains("75.0%"));
        assert!(text.contains("2023-24   no made shots"));
    }

    #[test]
    fn hot_zone_listing_has_one_line_per_zone() {
        let records: Vec<ShotRecord> = (0..30)
            .map(|n| ShotRecord {
                raw_x: -200.0 + n as f64 * 13.0,
                raw_y: 100.0 + n as f64 * 5.0,
                shot_type: ShotType::TwoPt,
                season: Season::from_start_year(2019),
                period: 1,
                game_id: String::new(),
                game_date: None,
            })
            .collect();
        let dataset = SeasonDataset::build(&records, &DatasetOptions::default());
        let text = format_hot_zones(&dataset);
        assert!(text.contains("2019-20 (30 shots"));
        assert_eq!(text.matches("    #").count(), 5);
    }
}
