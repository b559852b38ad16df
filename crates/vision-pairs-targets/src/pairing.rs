use crate::ordering::cmp_f64;
use crate::pair::TargetPair;
use crate::target::{Side, Target};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Greedily pair strictly adjacent `LEFT`-then-`RIGHT` targets.
///
/// `targets` must already be in scan order (see
/// [`sort_targets`](crate::sort_targets)). The scan walks once from the
/// front; a matched `RIGHT` is consumed with its `LEFT`, so no target is
/// used twice and at most `targets.len() / 2` pairs come out. Pairs are
/// returned in scan order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(targets), fields(targets = targets.len()))
)]
pub fn form_pairs(targets: &[Target]) -> Vec<TargetPair<'_>> {
    let mut pairs = Vec::new();
    let mut i = 0;
    while i + 1 < targets.len() {
        let current = &targets[i];
        if current.side() == Side::Left {
            if let Some(pair) = TargetPair::new(current, &targets[i + 1]) {
                pairs.push(pair.with_formation_index(pairs.len()));
                i += 2;
                continue;
            }
        }
        i += 1;
    }
    pairs
}

/// Order candidate pairs by horizontal distance from `image_center_x`,
/// closest first.
///
/// Equal distances keep scan order: the pair formed earlier comes first.
pub fn rank_pairs(mut pairs: Vec<TargetPair<'_>>, image_center_x: f64) -> Vec<TargetPair<'_>> {
    pairs.sort_by(|a, b| {
        cmp_f64(
            a.horizontal_offset(image_center_x),
            b.horizontal_offset(image_center_x),
        )
        .then_with(|| a.formation_index().cmp(&b.formation_index()))
    });
    pairs
}

/// The pair whose center is horizontally closest to `image_center_x`.
///
/// `None` when there are no candidates, which simply means no target is in
/// view. Ties go to the pair formed earlier in scan order.
pub fn select_best<'p, 'a>(
    pairs: &'p [TargetPair<'a>],
    image_center_x: f64,
) -> Option<&'p TargetPair<'a>> {
    pairs.iter().min_by(|a, b| {
        cmp_f64(
            a.horizontal_offset(image_center_x),
            b.horizontal_offset(image_center_x),
        )
        .then_with(|| a.formation_index().cmp(&b.formation_index()))
    })
}
