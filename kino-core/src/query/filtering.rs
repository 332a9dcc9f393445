//! Predicates that translate a [`QuerySpec`] into per-item decisions.
//!
//! Three filters exist and all of them are conjunctive:
//!
//! - text: case-insensitive substring over the title *or* any genre tag,
//! - genre: exact membership of the selected genre (`"All"` disables it),
//! - content type: equality with the selector (`All` disables it).
//!
//! The helpers here also derive genre lists for selector widgets and a
//! stable hash of a spec that views use as a cache key.

use crate::query::types::QuerySpec;
use kino_model::MediaItem;
use std::collections::BTreeSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Pre-normalized filter state so per-item checks don't re-fold the search
/// text.
#[derive(Debug, Clone)]
pub struct ItemFilter<'a> {
    needle: String,
    spec: &'a QuerySpec,
}

impl<'a> ItemFilter<'a> {
    pub fn new(spec: &'a QuerySpec) -> Self {
        Self {
            needle: spec.normalized_search(),
            spec,
        }
    }

    pub fn matches_text(&self, item: &MediaItem) -> bool {
        item.matches_folded_text(&self.needle)
    }

    pub fn matches_genre(&self, item: &MediaItem) -> bool {
        self.spec.genre.matches(item)
    }

    pub fn matches_content_type(&self, item: &MediaItem) -> bool {
        self.spec.content_type.matches(item.content_type)
    }

    /// An item must pass every active filter.
    pub fn matches(&self, item: &MediaItem) -> bool {
        self.matches_text(item)
            && self.matches_genre(item)
            && self.matches_content_type(item)
    }
}

/// Filter stage of a query, preserving the catalog order.
pub fn filter_items<'a>(
    items: &'a [MediaItem],
    spec: &QuerySpec,
) -> Vec<&'a MediaItem> {
    let filter = ItemFilter::new(spec);
    items.iter().filter(|item| filter.matches(item)).collect()
}

/// Sorted, de-duplicated genre tags present in a catalog.
pub fn available_genres(items: &[MediaItem]) -> Vec<String> {
    let mut set = BTreeSet::new();
    for item in items {
        for genre in item.genres.iter().map(|g| g.trim()) {
            if !genre.is_empty() {
                set.insert(genre.to_string());
            }
        }
    }
    set.into_iter().collect()
}

/// Compute a stable hash for a query spec
pub fn hash_query_spec(spec: &QuerySpec) -> u64 {
    let mut hasher = DefaultHasher::new();
    spec.normalized_search().hash(&mut hasher);
    spec.genre.hash(&mut hasher);
    spec.content_type.hash(&mut hasher);
    spec.sort.hash(&mut hasher);
    spec.page.hash(&mut hasher);
    spec.page_size.hash(&mut hasher);
    hasher.finish()
}
