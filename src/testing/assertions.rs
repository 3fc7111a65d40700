//! Assertion checking for scenario expectations

use super::parser::{ExpectedRefresh, StateAssertion};
use crate::timeline::PlaybackState;

/// Error when an assertion fails
#[derive(Debug, Clone)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// A view refresh observed during the run
#[derive(Debug, Clone)]
pub struct CapturedRefresh {
    pub frame: u64,
    pub index: usize,
    pub season: String,
    pub title: String,
}

/// Check the exact list of shown indices
pub fn check_visited(expected: &[usize], captured: &[CapturedRefresh]) -> Result<(), AssertionError> {
    let actual: Vec<usize> = captured.iter().map(|r| r.index).collect();
    if actual != expected {
        return Err(AssertionError {
            message: "Visited seasons differ".to_string(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
        });
    }
    Ok(())
}

/// Check that expected refreshes appear in order
pub fn check_sequence(expected: &[ExpectedRefresh], captured: &[CapturedRefresh]) -> Result<(), AssertionError> {
    let mut captured_idx = 0;

    for (i, exp) in expected.iter().enumerate() {
        let found = captured[captured_idx..].iter().enumerate().find(|(_, cap)| {
            exp.index.is_none_or(|idx| cap.index == idx)
                && exp.season.as_ref().is_none_or(|season| &cap.season == season)
        });

        match found {
            Some((offset, cap)) => {
                if let Some(min) = exp.frame_min
                    && cap.frame < min
                {
                    return Err(AssertionError {
                        message: format!("Refresh #{} ({}) happened too early", i + 1, cap.season),
                        expected: format!("frame >= {}", min),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                if let Some(max) = exp.frame_max
                    && cap.frame > max
                {
                    return Err(AssertionError {
                        message: format!("Refresh #{} ({}) happened too late", i + 1, cap.season),
                        expected: format!("frame <= {}", max),
                        actual: format!("frame {}", cap.frame),
                    });
                }
                captured_idx += offset + 1;
            }
            None => {
                return Err(AssertionError {
                    message: format!("Refresh #{} not found", i + 1),
                    expected: format!("index {:?} season {:?}", exp.index, exp.season),
                    actual: format!(
                        "refreshes after position {}: {:?}",
                        captured_idx,
                        captured[captured_idx..]
                            .iter()
                            .map(|r| r.season.as_str())
                            .collect::<Vec<_>>()
                    ),
                });
            }
        }
    }

    Ok(())
}

/// Timeline and view state for assertions
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub playback: PlaybackState,
    pub index: usize,
    pub season: Option<String>,
    pub view_season: Option<String>,
    pub view_title: Option<String>,
    pub zones: usize,
    pub top_zone_count: u32,
    pub points: usize,
    pub revision: u64,
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, op, value));
        }
    }
    None
}

/// Check state assertions against the dashboard state
pub fn check_state(assertion: &StateAssertion, state: &DashboardState) -> Result<(), AssertionError> {
    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'timeline.index = 2' or 'view.zones >= 1'".to_string(),
            actual: check.clone(),
        })?;

        match path {
            "timeline.state" => {
                let expected = PlaybackState::parse(expected_value.trim_matches('"')).ok_or_else(|| {
                    AssertionError {
                        message: format!("Unknown playback state in: {}", check),
                        expected: "idle, scrubbing, playing or stopped".to_string(),
                        actual: expected_value.to_string(),
                    }
                })?;
                check_text(check, state.playback.label(), operator, expected.label())?;
            }
            "timeline.index" => check_int_comparison(path, state.index as u64, operator, expected_value)?,
            "timeline.season" => check_text(check, state.season.as_deref().unwrap_or(""), operator, expected_value)?,
            "view.season" => check_text(check, state.view_season.as_deref().unwrap_or(""), operator, expected_value)?,
            "view.title" => check_text(check, state.view_title.as_deref().unwrap_or(""), operator, expected_value)?,
            "view.zones" => check_int_comparison(path, state.zones as u64, operator, expected_value)?,
            "view.top_count" => check_int_comparison(path, state.top_zone_count as u64, operator, expected_value)?,
            "view.points" => check_int_comparison(path, state.points as u64, operator, expected_value)?,
            "view.revision" => check_int_comparison(path, state.revision, operator, expected_value)?,
            _ => {
                return Err(AssertionError {
                    message: format!("Unknown check path: {}", path),
                    expected: "timeline.{state,index,season} or view.{season,title,zones,top_count,points,revision}".to_string(),
                    actual: path.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// String equality / inequality
fn check_text(check: &str, actual: &str, operator: &str, expected: &str) -> Result<(), AssertionError> {
    let expected = expected.trim_matches('"');
    let pass = match operator {
        "=" => actual == expected,
        "!=" => actual != expected,
        _ => {
            return Err(AssertionError {
                message: format!("Operator {} not supported for text: {}", operator, check),
                expected: "= or !=".to_string(),
                actual: operator.to_string(),
            });
        }
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check integer comparison with operator
fn check_int_comparison(path: &str, actual: u64, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: u64 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "non-negative integer".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => actual == value,
        "!=" => actual != value,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: actual.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DashboardState {
        DashboardState {
            playback: PlaybackState::Stopped,
            index: 2,
            season: Some("2010-11".to_string()),
            view_season: Some("2010-11".to_string()),
            view_title: Some("NBA Shooting Trends: 2 PTS vs 3 PTS (2010-11)".to_string()),
            zones: 5,
            top_zone_count: 4,
            points: 6,
            revision: 4,
        }
    }

    fn assertion(checks: &[&str]) -> StateAssertion {
        StateAssertion {
            after_frame: 0,
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn refresh(frame: u64, index: usize) -> CapturedRefresh {
        CapturedRefresh {
            frame,
            index,
            season: format!("{}-{:02}", 2008 + index, 9 + index),
            title: String::new(),
        }
    }

    #[test]
    fn passing_checks() {
        let checks = assertion(&[
            "timeline.state = stopped",
            "timeline.index = 2",
            "view.season = \"2010-11\"",
            "view.zones >= 5",
            "view.revision != 3",
        ]);
        assert!(check_state(&checks, &state()).is_ok());
    }

    #[test]
    fn failing_checks_report_actual() {
        let err = check_state(&assertion(&["timeline.index < 2"]), &state()).unwrap_err();
        assert_eq!(err.actual, "2");

        let err = check_state(&assertion(&["timeline.state = playing"]), &state()).unwrap_err();
        assert_eq!(err.actual, "stopped");

        assert!(check_state(&assertion(&["view.colour = red"]), &state()).is_err());
        assert!(check_state(&assertion(&["view.season > 2009"]), &state()).is_err());
    }

    #[test]
    fn visited_must_match_exactly() {
        let captured = vec![refresh(0, 0), refresh(1, 0), refresh(6, 1)];
        assert!(check_visited(&[0, 0, 1], &captured).is_ok());
        assert!(check_visited(&[0, 1], &captured).is_err());
    }

    #[test]
    fn sequence_respects_order_and_frames() {
        let captured = vec![refresh(0, 0), refresh(5, 1), refresh(10, 2)];
        let expected = vec![
            ExpectedRefresh {
                index: Some(1),
                season: None,
                frame_min: Some(5),
                frame_max: Some(5),
            },
            ExpectedRefresh {
                index: None,
                season: Some("2010-11".to_string()),
                frame_min: None,
                frame_max: None,
            },
        ];
        assert!(check_sequence(&expected, &captured).is_ok());

        let late = vec![ExpectedRefresh {
            index: Some(2),
            season: None,
            frame_min: None,
            frame_max: Some(8),
        }];
        assert!(check_sequence(&late, &captured).is_err());

        let reversed = vec![
            ExpectedRefresh {
                index: Some(2),
                season: None,
                frame_min: None,
                frame_max: None,
            },
            ExpectedRefresh {
                index: Some(1),
                season: None,
                frame_min: None,
                frame_max: None,
            },
        ];
        assert!(check_sequence(&reversed, &captured).is_err());
    }
}
