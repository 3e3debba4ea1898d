use crate::model::{Item, SortMode};

/// Order a working set for display. Stable: items with equal keys keep their
/// relative order.
pub fn sort_items(items: &mut [Item], mode: SortMode) {
    items.sort_by(|a, b| a.sort_key(mode).display_cmp(&b.sort_key(mode)));
}
