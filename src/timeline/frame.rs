//! Per-step display payload

use serde::{Deserialize, Serialize};

use crate::court::CourtPoint;
use crate::zones::HotZone;

/// Everything the views need for one season. Replaced wholesale on every
/// timeline change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonFrame {
    pub season_label: String,
    pub title: String,
    pub two_pt_points: Vec<CourtPoint>,
    pub three_pt_points: Vec<CourtPoint>,
    pub hot_zones: Vec<HotZone>,
}

impl SeasonFrame {
    pub fn point_count(&self) -> usize {
        self.two_pt_points.len() + self.three_pt_points.len()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize frame: {}", e))
    }
}
