//! Free-text filtering of delivery sets.

use crate::data::Delivery;

/// Check whether `delivery` matches an already lower-cased query.
///
/// The code is matched as its decimal string, the location and frequency
/// case-insensitively.
fn matches(delivery: &Delivery, query_lower: &str) -> bool {
    delivery.code.to_string().contains(query_lower)
        || delivery.location.to_lowercase().contains(query_lower)
        || delivery
            .delivery
            .label()
            .to_lowercase()
            .contains(query_lower)
}

/// Derive the visible subset of `source` for `query`.
///
/// An empty query returns the whole source set unchanged.
pub fn apply_filter(query: &str, source: &[Delivery]) -> Vec<Delivery> {
    if query.is_empty() {
        return source.to_vec();
    }

    let query_lower = query.to_lowercase();
    source
        .iter()
        .filter(|delivery| matches(delivery, &query_lower))
        .cloned()
        .collect()
}
