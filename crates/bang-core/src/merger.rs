//! Merging of bang mappings

use crate::mapping::BangMapping;

/// Merge `incoming` on top of `base`
///
/// The result holds every shortcut of both mappings. Where a shortcut appears
/// in both, the URL from `incoming` wins. Shortcuts of `base` keep their
/// position; new shortcuts from `incoming` are appended in their own order.
pub fn merge(base: &BangMapping, incoming: &BangMapping) -> BangMapping {
    let mut merged = base.clone();
    merged.extend(incoming.iter());
    merged
}
