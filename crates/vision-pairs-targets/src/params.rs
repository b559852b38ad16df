use serde::{Deserialize, Serialize};

/// Thresholds that decide when a contour's lean is too weak to classify.
///
/// Anything that fails a threshold becomes [`Side::Unknown`](crate::Side::Unknown);
/// none of them is ever an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierParams {
    /// Minimal enclosed area in px². Smaller contours are degenerate.
    pub min_area: f64,
    /// Minimal major/minor standard-deviation ratio. Rounder shapes have no
    /// meaningful axis.
    pub min_elongation: f64,
    /// Minimal tilt of the major axis from vertical, degrees.
    pub min_skew_deg: f64,
    /// Maximal tilt of the major axis from vertical, degrees. Strips lying
    /// flatter than this are not half of a target.
    pub max_skew_deg: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            min_area: 1.0,
            min_elongation: 1.5,
            min_skew_deg: 3.0,
            max_skew_deg: 60.0,
        }
    }
}
