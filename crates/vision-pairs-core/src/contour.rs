use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::moments::PolygonMoments;

/// Ordered polygon approximation of a detected bright region.
///
/// Vertices are image pixels (x to the right, y downward). A contour is
/// normally convex and does not repeat its first vertex at the end, but
/// nothing here relies on either property.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contour {
    points: Vec<Point2<f64>>,
}

impl Contour {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Build a contour from `(x, y)` tuples.
    pub fn from_xy(points: &[(f64, f64)]) -> Self {
        Self::new(points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
    }

    #[inline]
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `true` when every vertex coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Leftmost vertex. Among equal x, the earliest vertex wins.
    pub fn min_x_point(&self) -> Option<Point2<f64>> {
        self.points
            .iter()
            .copied()
            .reduce(|best, p| if p.x < best.x { p } else { best })
    }

    /// Rightmost vertex. Among equal x, the earliest vertex wins.
    pub fn max_x_point(&self) -> Option<Point2<f64>> {
        self.points
            .iter()
            .copied()
            .reduce(|best, p| if p.x > best.x { p } else { best })
    }

    /// Arithmetic mean of the vertices.
    pub fn vertex_mean(&self) -> Option<Point2<f64>> {
        if self.points.is_empty() {
            return None;
        }
        // Scale before summing so coordinates near f64::MAX do not overflow.
        let n = self.points.len() as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x / n, sy + p.y / n));
        Some(Point2::new(sx, sy))
    }

    /// Polygon moments of the closed outline.
    pub fn moments(&self) -> PolygonMoments {
        PolygonMoments::from_points(&self.points)
    }

    /// Vertices with consecutive duplicates and a repeated closing vertex removed.
    pub fn distinct_points(&self) -> Vec<Point2<f64>> {
        let mut out: Vec<Point2<f64>> = Vec::with_capacity(self.points.len());
        for &p in &self.points {
            if out.last() != Some(&p) {
                out.push(p);
            }
        }
        while out.len() > 1 && out.first() == out.last() {
            out.pop();
        }
        out
    }
}

impl From<Vec<Point2<f64>>> for Contour {
    fn from(points: Vec<Point2<f64>>) -> Self {
        Self::new(points)
    }
}
