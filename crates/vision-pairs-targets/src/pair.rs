use nalgebra::Point2;

use crate::record::{TargetPairRecord, TargetRecord};
use crate::target::{Side, Target};

/// A `LEFT` target and the `RIGHT` target judged to belong with it.
///
/// Borrows both targets from the frame's target list; a pair never
/// outlives the frame it was formed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPair<'a> {
    left: &'a Target,
    right: &'a Target,
    center: Point2<f64>,
    formation_index: usize,
}

impl<'a> TargetPair<'a> {
    /// Pair `left` with `right`, or `None` unless their sides are
    /// `LEFT` and `RIGHT` respectively.
    pub fn new(left: &'a Target, right: &'a Target) -> Option<Self> {
        if left.side() != Side::Left || right.side() != Side::Right {
            return None;
        }
        let center = nalgebra::center(&left.center(), &right.center());
        Some(Self {
            left,
            right,
            center,
            formation_index: 0,
        })
    }

    pub(crate) fn with_formation_index(mut self, index: usize) -> Self {
        self.formation_index = index;
        self
    }

    #[inline]
    pub fn left(&self) -> &'a Target {
        self.left
    }

    #[inline]
    pub fn right(&self) -> &'a Target {
        self.right
    }

    /// Midpoint of the two targets' centers.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Position of this pair in scan order when it was formed.
    #[inline]
    pub fn formation_index(&self) -> usize {
        self.formation_index
    }

    /// Horizontal distance between the pair center and `image_center_x`.
    #[inline]
    pub fn horizontal_offset(&self, image_center_x: f64) -> f64 {
        (self.center.x - image_center_x).abs()
    }

    /// Flat, owned form published as telemetry.
    pub fn to_record(&self) -> TargetPairRecord {
        TargetPairRecord {
            center_x: self.center.x,
            center_y: self.center.y,
            left: TargetRecord::from(self.left),
            right: TargetRecord::from(self.right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vision_pairs_core::Contour;

    fn strip(x: f64, lean: f64) -> Target {
        Target::new(
            Contour::from_xy(&[
                (x, 100.0),
                (x + 6.0, 100.0),
                (x + 6.0 + lean, 140.0),
                (x + lean, 140.0),
            ]),
            false,
        )
    }

    #[test]
    fn center_is_midpoint_of_target_centers() {
        let left = strip(100.0, -10.0);
        let right = strip(130.0, 10.0);
        let pair = TargetPair::new(&left, &right).expect("valid pair");
        assert!((pair.center().x - 118.0).abs() < 1e-9);
        assert!((pair.center().y - 120.0).abs() < 1e-9);
        assert!((pair.horizontal_offset(160.0) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn refuses_wrong_sides() {
        let left = strip(100.0, -10.0);
        let right = strip(130.0, 10.0);
        let unknown = strip(160.0, 0.0);
        assert!(TargetPair::new(&right, &left).is_none());
        assert!(TargetPair::new(&left, &left).is_none());
        assert!(TargetPair::new(&left, &unknown).is_none());
    }
}
