use std::cmp::Ordering;

use crate::target::{Side, Target};

/// Order targets along the image x axis by their leftmost vertex.
///
/// Ascending for an upright camera, descending when `inverted`, so the
/// first target is always the physical leading edge. Equal keys keep the
/// order in which the contour source delivered the contours
/// ([`Target::index`]), regardless of `inverted`.
pub fn sort_targets(targets: &mut [Target], inverted: bool) {
    targets.sort_by(|a, b| {
        let by_x = cmp_f64(a.min_x().x, b.min_x().x);
        let by_x = if inverted { by_x.reverse() } else { by_x };
        by_x.then_with(|| a.index().cmp(&b.index()))
    });
}

/// `true` when consecutive targets strictly alternate sides.
///
/// Fails as soon as a target repeats the previous side or is `Unknown`.
/// The first target's side is not checked, and lists of zero or one
/// target are trivially valid. The result is advisory: pairing runs either
/// way.
pub fn validate_alternation(targets: &[Target]) -> bool {
    let Some(first) = targets.first() else {
        return true;
    };
    let mut expected = first.side();
    for target in &targets[1..] {
        let side = target.side();
        if side == expected || side == Side::Unknown {
            return false;
        }
        expected = side;
    }
    true
}

/// Compare two floats for ascending order; NaN sorts last.
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.total_cmp(&b),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}
