use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use vision_pairs_core::Contour;

use crate::params::ClassifierParams;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Which half of a target pair a contour represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Left,
    Right,
    Unknown,
}

impl Side {
    /// Swap `Left` and `Right`; `Unknown` stays `Unknown`.
    #[inline]
    pub fn flipped(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Unknown => Side::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ambiguity {
    Degenerate,
    NonFinite,
    Symmetric,
    NearVertical,
    NearHorizontal,
}

/// One classified contour of the current frame.
///
/// Built once per contour per frame and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    contour: Contour,
    side: Side,
    min_x: Point2<f64>,
    center: Point2<f64>,
    skew_deg: Option<f64>,
    index: usize,
}

impl Target {
    /// Classify `contour` with the default thresholds.
    pub fn new(contour: Contour, inverted: bool) -> Self {
        Self::classify(contour, inverted, &ClassifierParams::default())
    }

    /// Classify `contour`.
    ///
    /// The side comes from the lean of the contour's major axis: a strip
    /// leaning like `/` is the left half of a target, one leaning like `\`
    /// is the right half. `inverted` swaps the two for a camera mounted
    /// upside down. Shapes whose lean cannot be trusted are `Unknown`.
    pub fn classify(contour: Contour, inverted: bool, params: &ClassifierParams) -> Self {
        let min_x = contour.min_x_point().unwrap_or_else(Point2::origin);
        let moments = contour.moments();
        let centroid = if moments.area() >= params.min_area {
            moments.centroid()
        } else {
            None
        };
        let center = centroid
            .into_iter()
            .chain(contour.vertex_mean())
            .chain(Some(min_x))
            .find(|c| c.x.is_finite() && c.y.is_finite())
            .unwrap_or_else(Point2::origin);

        let skew_deg = moments
            .central()
            .map(|c| c.skew_from_vertical().to_degrees())
            .filter(|s| s.is_finite());

        let side = match shape_side(&contour, params) {
            Ok(side) if inverted => side.flipped(),
            Ok(side) => side,
            Err(reason) => {
                log::trace!(
                    "contour with {} vertices classified UNKNOWN: {:?}",
                    contour.len(),
                    reason
                );
                Side::Unknown
            }
        };

        Self {
            contour,
            side,
            min_x,
            center,
            skew_deg,
            index: 0,
        }
    }

    /// Set the position of this target's contour in the frame's contour list.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn contour(&self) -> &Contour {
        &self.contour
    }

    /// Leftmost contour vertex; the sort key for ordering targets.
    #[inline]
    pub fn min_x(&self) -> Point2<f64> {
        self.min_x
    }

    /// Area centroid, or the vertex mean for a degenerate contour.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Tilt of the major axis from vertical in degrees, when measurable.
    #[inline]
    pub fn skew_deg(&self) -> Option<f64> {
        self.skew_deg
    }

    /// Position of the contour in the order the contour source delivered it.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

fn shape_side(contour: &Contour, params: &ClassifierParams) -> Result<Side, Ambiguity> {
    if !contour.is_finite() {
        return Err(Ambiguity::NonFinite);
    }
    if contour.len() < 3 {
        return Err(Ambiguity::Degenerate);
    }
    let moments = contour.moments();
    if !moments.is_finite() {
        return Err(Ambiguity::NonFinite);
    }
    if moments.area() < params.min_area {
        return Err(Ambiguity::Degenerate);
    }
    let central = moments.central().ok_or(Ambiguity::NonFinite)?;
    if central.elongation() < params.min_elongation {
        return Err(Ambiguity::Symmetric);
    }

    let skew = central.skew_from_vertical().to_degrees();
    if !skew.is_finite() {
        return Err(Ambiguity::NonFinite);
    }
    if skew.abs() < params.min_skew_deg {
        return Err(Ambiguity::NearVertical);
    }
    if skew.abs() > params.max_skew_deg {
        return Err(Ambiguity::NearHorizontal);
    }

    // y grows downward: a negative skew is a `/` lean.
    Ok(if skew < 0.0 { Side::Left } else { Side::Right })
}

/// Classify every contour of a frame, recording each one's input position.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(contours, params), fields(contours = contours.len()))
)]
pub fn classify_contours(
    contours: &[Contour],
    inverted: bool,
    params: &ClassifierParams,
) -> Vec<Target> {
    contours
        .iter()
        .enumerate()
        .map(|(i, c)| Target::classify(c.clone(), inverted, params).with_index(i))
        .collect()
}
