//! Court geometry: raw coordinate normalization and the layup exclusion zone

use serde::{Deserialize, Serialize};

use crate::constants::{
    COURT_HALF_WIDTH, COURT_LENGTH, LAYUP_CENTER, LAYUP_RADIUS, PLOT_Y_OFFSET, RAW_X_SPAN,
    RAW_Y_SPAN,
};

/// A shot position in plot space (court feet, rim at (0, 5.25))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtPoint {
    pub x: f64,
    pub y: f64,
}

impl CourtPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale raw stats-API coordinates into plot space
    pub fn from_raw(raw_x: f64, raw_y: f64) -> Self {
        let (x, y) = normalize(raw_x, raw_y);
        Self { x, y }
    }

    pub fn is_outside_layup(&self) -> bool {
        is_outside_layup(self.x, self.y)
    }
}

/// Map raw LOC_X/LOC_Y onto the half court.
///
/// x spans -25..25 ft, y runs from the baseline toward half court with the
/// rim near 5.25 ft.
pub fn normalize(raw_x: f64, raw_y: f64) -> (f64, f64) {
    let plot_x = raw_x / RAW_X_SPAN * COURT_HALF_WIDTH;
    let plot_y = raw_y / RAW_Y_SPAN * COURT_LENGTH + PLOT_Y_OFFSET;
    (plot_x, plot_y)
}

/// True iff the point lies strictly outside the layup circle.
/// Points exactly on the circle count as inside.
pub fn is_outside_layup(plot_x: f64, plot_y: f64) -> bool {
    let dx = plot_x - LAYUP_CENTER.0;
    let dy = plot_y - LAYUP_CENTER.1;
    dx * dx + dy * dy > LAYUP_RADIUS * LAYUP_RADIUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_scales_both_axes() {
        let (x, y) = normalize(250.0, 422.0);
        assert!((x - 25.0).abs() < 1e-9);
        assert!((y - 49.0).abs() < 1e-9);

        let (x, y) = normalize(-250.0, 0.0);
        assert!((x + 25.0).abs() < 1e-9);
        assert!((y - 2.0).abs() < 1e-9);
    }

    #[test]
    fn layup_boundary_is_inside() {
        // Exactly 5.0 ft straight up from the rim
        assert!(!is_outside_layup(0.0, 10.25));
        assert!(!is_outside_layup(5.0, 5.25));
        assert!(is_outside_layup(0.0, 10.2501));
        assert!(is_outside_layup(5.0001, 5.25));
    }

    #[test]
    fn short_shots_are_layups() {
        // 4.75 ft from the rim
        assert!(!is_outside_layup(0.0, 10.0));
        assert!(!CourtPoint::new(1.0, 6.0).is_outside_layup());
    }

    #[test]
    fn mid_range_shot_is_outside() {
        // distance² = 100 + 216.5625
        assert!(is_outside_layup(10.0, 20.0));
        assert!(CourtPoint::from_raw(100.0, 300.0).is_outside_layup());
    }
}
