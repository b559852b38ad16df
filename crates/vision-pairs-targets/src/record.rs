//! Flat telemetry form of targets and pairs.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::target::{Side, Target};

/// Identifying data of one target inside a published pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRecord {
    pub side: Side,
    pub center_x: f64,
    pub center_y: f64,
    pub min_x: f64,
    pub min_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_deg: Option<f64>,
}

impl TargetRecord {
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.center_x, self.center_y)
    }
}

impl From<&Target> for TargetRecord {
    fn from(t: &Target) -> Self {
        Self {
            side: t.side(),
            center_x: t.center().x,
            center_y: t.center().y,
            min_x: t.min_x().x,
            min_y: t.min_x().y,
            skew_deg: t.skew_deg(),
        }
    }
}

/// One candidate pair as published under the pair-list telemetry key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPairRecord {
    pub center_x: f64,
    pub center_y: f64,
    pub left: TargetRecord,
    pub right: TargetRecord,
}

impl TargetPairRecord {
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.center_x, self.center_y)
    }

    /// Compact JSON string, one per array element in telemetry.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a record previously produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TargetPair;
    use vision_pairs_core::Contour;

    fn strip(x: f64, lean: f64) -> Target {
        Target::new(
            Contour::from_xy(&[
                (x, 100.3),
                (x + 6.1, 100.0),
                (x + 6.0 + lean, 140.7),
                (x + lean, 141.0),
            ]),
            false,
        )
    }

    #[test]
    fn json_round_trip_preserves_center_exactly() {
        let left = strip(100.17, -10.0);
        let right = strip(133.9, 10.3);
        let pair = TargetPair::new(&left, &right).expect("pair");
        let record = pair.to_record();

        let json = record.to_json().expect("serialize");
        let back = TargetPairRecord::from_json(&json).expect("parse");

        assert_eq!(back.center_x.to_bits(), pair.center().x.to_bits());
        assert_eq!(back.center_y.to_bits(), pair.center().y.to_bits());
        assert_eq!(back, record);
    }

    #[test]
    fn uses_camel_case_keys_and_uppercase_sides() {
        let left = strip(100.0, -10.0);
        let right = strip(130.0, 10.0);
        let json = TargetPair::new(&left, &right)
            .expect("pair")
            .to_record()
            .to_json()
            .expect("serialize");
        assert!(json.contains("\"centerX\""));
        assert!(json.contains("\"side\":\"LEFT\""));
        assert!(json.contains("\"side\":\"RIGHT\""));
    }
}
