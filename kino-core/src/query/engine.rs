use kino_model::MediaItem;
use tracing::debug;

use crate::error::Result;
use crate::query::filtering::filter_items;
use crate::query::sorting::sort_items;
use crate::query::types::{Pagination, QuerySpec, ResultPage};

/// Run a catalog query: filter, sort, then slice out the requested page.
///
/// Pure function of its inputs. A page past the end yields no items but a
/// correct pagination descriptor instead of an error.
pub fn query(items: &[MediaItem], spec: &QuerySpec) -> Result<ResultPage> {
    spec.validate()?;

    let mut matched = filter_items(items, spec);
    sort_items(&mut matched, spec.sort);

    let total_results = matched.len();
    let pagination = Pagination::new(spec.page, spec.page_size, total_results);

    let start = (spec.page - 1).saturating_mul(spec.page_size);
    let page_items: Vec<MediaItem> = if start >= total_results {
        Vec::new()
    } else {
        let end = start.saturating_add(spec.page_size).min(total_results);
        matched[start..end].iter().map(|item| (*item).clone()).collect()
    };

    debug!(
        catalog = items.len(),
        matched = total_results,
        page = spec.page,
        total_pages = pagination.total_pages,
        returned = page_items.len(),
        "catalog query executed"
    );

    Ok(ResultPage {
        items: page_items,
        pagination,
    })
}

/// Stateless handle over [`query`] for call sites that prefer a value to
/// pass around. Holds no state, so concurrent queries never interfere.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogQueryEngine;

impl CatalogQueryEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn query(
        &self,
        items: &[MediaItem],
        spec: &QuerySpec,
    ) -> Result<ResultPage> {
        query(items, spec)
    }
}
