//! Polygon moments.
//!
//! Moments are integrated over the polygon interior with Green's theorem,
//! which is what OpenCV reports for a contour. Raw moments carry the sign
//! of the vertex winding; every derived quantity divides by `m00`, so the
//! winding cancels out.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Raw spatial moments up to second order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMoments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub m20: f64,
    pub m11: f64,
    pub m02: f64,
}

impl PolygonMoments {
    /// Integrate the closed polygon through `points` (last vertex joins the first).
    pub fn from_points(points: &[Point2<f64>]) -> Self {
        let n = points.len();
        if n < 3 {
            return Self::default();
        }

        let mut m = Self::default();
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            let a = p.x * q.y - q.x * p.y;

            m.m00 += a;
            m.m10 += (p.x + q.x) * a;
            m.m01 += (p.y + q.y) * a;
            m.m20 += (p.x * p.x + p.x * q.x + q.x * q.x) * a;
            m.m02 += (p.y * p.y + p.y * q.y + q.y * q.y) * a;
            m.m11 += (p.x * q.y + 2.0 * p.x * p.y + 2.0 * q.x * q.y + q.x * p.y) * a;
        }

        m.m00 /= 2.0;
        m.m10 /= 6.0;
        m.m01 /= 6.0;
        m.m20 /= 12.0;
        m.m02 /= 12.0;
        m.m11 /= 24.0;
        m
    }

    /// Unsigned enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.m00.abs()
    }

    /// `false` when the integration overflowed.
    pub fn is_finite(&self) -> bool {
        [self.m00, self.m10, self.m01, self.m20, self.m11, self.m02]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Area centroid, `None` for a zero-area or overflowed polygon.
    pub fn centroid(&self) -> Option<Point2<f64>> {
        if self.m00 == 0.0 || !self.is_finite() {
            return None;
        }
        let c = Point2::new(self.m10 / self.m00, self.m01 / self.m00);
        (c.x.is_finite() && c.y.is_finite()).then_some(c)
    }

    /// Second central moments normalised by area (the shape covariance).
    pub fn central(&self) -> Option<CentralMoments> {
        let c = self.centroid()?;
        let central = CentralMoments {
            mu20: self.m20 / self.m00 - c.x * c.x,
            mu11: self.m11 / self.m00 - c.x * c.y,
            mu02: self.m02 / self.m00 - c.y * c.y,
        };
        central.is_finite().then_some(central)
    }
}

/// Area-normalised second central moments.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CentralMoments {
    pub mu20: f64,
    pub mu11: f64,
    pub mu02: f64,
}

impl CentralMoments {
    pub fn is_finite(&self) -> bool {
        self.mu20.is_finite() && self.mu11.is_finite() && self.mu02.is_finite()
    }

    /// Eigenvalues of the covariance as `(major, minor)`.
    pub fn eigenvalues(&self) -> (f64, f64) {
        let mean = 0.5 * (self.mu20 + self.mu02);
        let half_diff = 0.5 * (self.mu20 - self.mu02);
        let r = (half_diff * half_diff + self.mu11 * self.mu11).sqrt();
        (mean + r, mean - r)
    }

    /// Ratio of the major to the minor standard deviation.
    ///
    /// Infinite when the minor variance vanishes (all mass on a line).
    pub fn elongation(&self) -> f64 {
        let (major, minor) = self.eigenvalues();
        if minor <= f64::EPSILON * major.abs().max(1.0) {
            return f64::INFINITY;
        }
        (major / minor).sqrt()
    }

    /// Angle of the major axis from the image x axis, in `(-pi/2, pi/2]`.
    pub fn major_axis_angle(&self) -> f64 {
        0.5 * (2.0 * self.mu11).atan2(self.mu20 - self.mu02)
    }

    /// Signed tilt of the major axis away from the image vertical, radians.
    ///
    /// Zero for an upright shape. Positive when the shape leans like `\`
    /// (its lower end further right), negative when it leans like `/`.
    /// The result lies in `[-pi/2, pi/2]`.
    pub fn skew_from_vertical(&self) -> f64 {
        let theta = self.major_axis_angle();
        let (mut dx, mut dy) = (theta.cos(), theta.sin());
        if dy < 0.0 {
            dx = -dx;
            dy = -dy;
        }
        dx.atan2(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Vec<Point2<f64>> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + w, y0),
            Point2::new(x0 + w, y0 + h),
            Point2::new(x0, y0 + h),
        ]
    }

    #[test]
    fn rectangle_area_and_centroid() {
        let m = PolygonMoments::from_points(&rect(10.0, 20.0, 4.0, 6.0));
        assert_relative_eq!(m.area(), 24.0);
        let c = m.centroid().expect("non-degenerate");
        assert_relative_eq!(c.x, 12.0);
        assert_relative_eq!(c.y, 23.0);
    }

    #[test]
    fn winding_does_not_change_shape_statistics() {
        let cw = rect(0.0, 0.0, 2.0, 8.0);
        let mut ccw = cw.clone();
        ccw.reverse();
        let a = PolygonMoments::from_points(&cw);
        let b = PolygonMoments::from_points(&ccw);
        assert_relative_eq!(a.m00, -b.m00);
        let (ca, cb) = (a.central().unwrap(), b.central().unwrap());
        assert_relative_eq!(ca.mu20, cb.mu20, epsilon = 1e-9);
        assert_relative_eq!(ca.mu02, cb.mu02, epsilon = 1e-9);
        assert_relative_eq!(ca.mu11, cb.mu11, epsilon = 1e-9);
    }

    #[test]
    fn rectangle_central_moments_match_closed_form() {
        let c = PolygonMoments::from_points(&rect(0.0, 0.0, 2.0, 8.0))
            .central()
            .unwrap();
        assert_relative_eq!(c.mu20, 4.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(c.mu02, 64.0 / 12.0, epsilon = 1e-9);
        assert_relative_eq!(c.mu11, 0.0, epsilon = 1e-9);
        assert_relative_eq!(c.elongation(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(c.skew_from_vertical(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn skew_sign_follows_lean_direction() {
        // Parallelogram leaning like `\`: bottom edge shifted right.
        let back = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(6.0, 10.0),
            Point2::new(4.0, 10.0),
        ];
        let skew = PolygonMoments::from_points(&back)
            .central()
            .unwrap()
            .skew_from_vertical();
        assert!(skew > 0.0, "skew {skew}");

        // Mirror image leaning like `/`.
        let fwd: Vec<_> = back.iter().map(|p| Point2::new(-p.x, p.y)).collect();
        let mirrored = PolygonMoments::from_points(&fwd)
            .central()
            .unwrap()
            .skew_from_vertical();
        assert_relative_eq!(mirrored, -skew, epsilon = 1e-9);
    }

    #[test]
    fn fewer_than_three_points_is_degenerate() {
        let m = PolygonMoments::from_points(&[Point2::new(0.0, 0.0), Point2::new(5.0, 5.0)]);
        assert_eq!(m.area(), 0.0);
        assert!(m.centroid().is_none());
    }

    #[test]
    fn overflow_yields_no_centroid_or_central_moments() {
        let huge = [
            Point2::new(0.0, 0.0),
            Point2::new(6e155, 0.0),
            Point2::new(16e155, 40e155),
            Point2::new(10e155, 40e155),
        ];
        let m = PolygonMoments::from_points(&huge);
        assert!(!m.is_finite());
        assert!(m.centroid().is_none());
        assert!(m.central().is_none());
    }
}
