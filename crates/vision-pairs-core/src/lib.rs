//! Core geometry for paired vision-target tracking.
//!
//! This crate is small and purely geometric. It knows about contours
//! (ordered polygon vertices in image pixels) and the shape statistics the
//! target classifier needs, but nothing about sides, pairs, cameras or
//! telemetry.

mod contour;
mod logger;
mod moments;

pub use contour::Contour;
pub use moments::{CentralMoments, PolygonMoments};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
