use async_trait::async_trait;
use kino_core::query::{QuerySpec, ResultPage, available_genres, query};
use kino_core::Result;
use kino_model::{MediaItem, ViewerId};
use std::collections::HashMap;
use std::fmt::Debug;

/// Anything that can hand out media lists for a viewer.
#[async_trait]
pub trait CatalogSource: Send + Sync + Debug {
    async fn fetch_catalog(&self) -> Result<Vec<MediaItem>>;

    async fn fetch_favorites(&self, viewer: &ViewerId)
    -> Result<Vec<MediaItem>>;

    async fn fetch_history(&self, viewer: &ViewerId) -> Result<Vec<MediaItem>>;
}

/// Fetch the catalog and run one query over it.
pub async fn browse(
    source: &dyn CatalogSource,
    spec: &QuerySpec,
) -> Result<ResultPage> {
    spec.validate()?;
    let catalog = source.fetch_catalog().await?;
    query(&catalog, spec)
}

/// Genres present in the current catalog.
pub async fn genres(source: &dyn CatalogSource) -> Result<Vec<String>> {
    let catalog = source.fetch_catalog().await?;
    Ok(available_genres(&catalog))
}

/// Fixed, in-process catalog. Used for offline browsing and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<MediaItem>,
    favorites: HashMap<ViewerId, Vec<MediaItem>>,
    history: HashMap<ViewerId, Vec<MediaItem>>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn with_favorites(
        mut self,
        viewer: ViewerId,
        items: Vec<MediaItem>,
    ) -> Self {
        self.favorites.insert(viewer, items);
        self
    }

    pub fn with_history(mut self, viewer: ViewerId, items: Vec<MediaItem>) -> Self {
        self.history.insert(viewer, items);
        self
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_catalog(&self) -> Result<Vec<MediaItem>> {
        Ok(self.items.clone())
    }

    async fn fetch_favorites(
        &self,
        viewer: &ViewerId,
    ) -> Result<Vec<MediaItem>> {
        Ok(self.favorites.get(viewer).cloned().unwrap_or_default())
    }

    async fn fetch_history(&self, viewer: &ViewerId) -> Result<Vec<MediaItem>> {
        Ok(self.history.get(viewer).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kino_core::{KinoError, QuerySpecBuilder};
    use kino_model::chrono::{TimeZone, Utc};
    use kino_model::url::Url;
    use kino_model::{ContentType, MediaId, MediaTitle};

    fn item(id: &str, title: &str, genre: &str) -> MediaItem {
        MediaItem::new(
            MediaId::new(id).unwrap(),
            MediaTitle::new(title).unwrap(),
            Url::parse("https://cdn.example.com/t.jpg").unwrap(),
            ContentType::Movie,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_genres([genre])
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            item("1", "Cherry", "Drama"),
            item("2", "Apple", "Drama"),
            item("3", "Banana", "Comedy"),
        ])
    }

    #[tokio::test]
    async fn browse_runs_the_query_over_fetched_items() {
        let spec = QuerySpecBuilder::new().genre("Drama").build();
        let page = browse(&catalog(), &spec).await.unwrap();
        assert_eq!(page.titles(), vec!["Apple", "Cherry"]);
    }

    #[tokio::test]
    async fn browse_rejects_invalid_spec_before_fetching() {
        let spec = QuerySpecBuilder::new().page(0).build();
        assert!(matches!(
            browse(&catalog(), &spec).await,
            Err(KinoError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn genres_are_sorted_and_unique() {
        assert_eq!(genres(&catalog()).await.unwrap(), vec!["Comedy", "Drama"]);
    }

    #[tokio::test]
    async fn viewer_lists_are_scoped() {
        let viewer = ViewerId::new("v").unwrap();
        let source = catalog()
            .with_favorites(viewer.clone(), vec![item("2", "Apple", "Drama")]);
        assert_eq!(source.fetch_favorites(&viewer).await.unwrap().len(), 1);
        let other = ViewerId::new("w").unwrap();
        assert!(source.fetch_favorites(&other).await.unwrap().is_empty());
        assert!(source.fetch_history(&other).await.unwrap().is_empty());
    }
}
