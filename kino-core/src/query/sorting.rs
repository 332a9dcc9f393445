use crate::query::types::SortKey;
use kino_model::MediaItem;
use std::cmp::Ordering;

/// Compare two media items for the given sort key.
///
/// Equal keys compare as `Equal`; ordering between them is left to the
/// (stable) sort so repeated queries never swap ties.
pub fn compare_items(a: &MediaItem, b: &MediaItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.folded().cmp(&b.title.folded()),
        // Most recent first
        SortKey::DateAdded => b.added_at.cmp(&a.added_at),
    }
}

/// Stable in-place sort of borrowed items.
pub fn sort_items(items: &mut [&MediaItem], key: SortKey) {
    match key {
        // Fold each title once instead of on every comparison.
        SortKey::Title => items.sort_by_cached_key(|item| item.title.folded()),
        SortKey::DateAdded => {
            items.sort_by(|a, b| compare_items(a, b, SortKey::DateAdded))
        }
    }
}

/// Stable in-place sort of owned items.
pub fn sort_media_slice(items: &mut [MediaItem], key: SortKey) {
    items.sort_by(|a, b| compare_items(a, b, key));
}
