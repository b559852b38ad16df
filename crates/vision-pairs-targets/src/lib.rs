//! Classification and pairing of retro-reflective vision targets.
//!
//! ## Quickstart
//!
//! ```
//! use vision_pairs_core::Contour;
//! use vision_pairs_targets::{
//!     classify_contours, form_pairs, select_best, sort_targets, validate_alternation,
//!     ClassifierParams, Side,
//! };
//!
//! // Two strips leaning toward each other: `/` on the left, `\` on the right.
//! let contours = vec![
//!     Contour::from_xy(&[(104.0, 100.0), (110.0, 100.0), (100.0, 140.0), (94.0, 140.0)]),
//!     Contour::from_xy(&[(130.0, 100.0), (136.0, 100.0), (146.0, 140.0), (140.0, 140.0)]),
//! ];
//!
//! let params = ClassifierParams::default();
//! let mut targets = classify_contours(&contours, false, &params);
//! sort_targets(&mut targets, false);
//! assert_eq!(targets[0].side(), Side::Left);
//! assert!(validate_alternation(&targets));
//!
//! let pairs = form_pairs(&targets);
//! let best = select_best(&pairs, 160.0).expect("one pair");
//! assert_eq!(best.left().side(), Side::Left);
//! ```
//!
//! Per-frame flow:
//! 1. Classify every contour into a [`Target`] (`LEFT`, `RIGHT` or `UNKNOWN`)
//!    from the lean of its major axis. A camera mounted upside down swaps
//!    `LEFT` and `RIGHT`.
//! 2. Sort targets along the image x axis (reversed for an inverted camera).
//! 3. Check that sides strictly alternate. The result is informational only.
//! 4. Greedily pair adjacent `LEFT`-then-`RIGHT` targets.
//! 5. Rank pairs by horizontal distance of their center from the image
//!    center and pick the closest.

mod ordering;
mod pair;
mod pairing;
mod params;
mod record;
mod target;

pub use ordering::{sort_targets, validate_alternation};
pub use pair::TargetPair;
pub use pairing::{form_pairs, rank_pairs, select_best};
pub use params::ClassifierParams;
pub use record::{TargetPairRecord, TargetRecord};
pub use target::{classify_contours, Side, Target};
