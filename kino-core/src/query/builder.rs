use super::types::*;

/// Fluent API for building catalog query specs
#[derive(Debug, Clone, Default)]
pub struct QuerySpecBuilder {
    spec: QuerySpec,
}

impl QuerySpecBuilder {
    /// Create a new builder starting from the default spec
    pub fn new() -> Self {
        Self::default()
    }

    // === Filter methods ===

    /// Add text search over titles and genre tags
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.spec.search_text = text.into();
        self
    }

    /// Filter by genre; `"All"` clears the filter
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.spec.genre = GenreSelector::from(genre.into());
        self
    }

    /// Remove any genre filter
    pub fn any_genre(mut self) -> Self {
        self.spec.genre = GenreSelector::All;
        self
    }

    /// Filter to only show movies
    pub fn movies_only(mut self) -> Self {
        self.spec.content_type = ContentTypeFilter::Movie;
        self
    }

    /// Filter to only show series
    pub fn series_only(mut self) -> Self {
        self.spec.content_type = ContentTypeFilter::Series;
        self
    }

    pub fn content_type(mut self, filter: ContentTypeFilter) -> Self {
        self.spec.content_type = filter;
        self
    }

    // === Sort methods ===

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.spec.sort = key;
        self
    }

    /// Convenience for "recently added" rows
    pub fn newest_first(self) -> Self {
        self.sort_by(SortKey::DateAdded)
    }

    // === Pagination methods ===

    /// Set the 1-based page number
    pub fn page(mut self, page: usize) -> Self {
        self.spec.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.spec.page_size = page_size;
        self
    }

    // === Build method ===

    /// Build the final query spec. Validation happens at query time.
    pub fn build(self) -> QuerySpec {
        self.spec
    }
}

// === Convenience constructors ===

impl QuerySpec {
    /// Create a simple search spec
    pub fn search(text: impl Into<String>) -> Self {
        QuerySpecBuilder::new().search(text).build()
    }

    /// Create an unfiltered browse spec for one page
    pub fn browse(page: usize, page_size: usize) -> Self {
        QuerySpecBuilder::new()
            .page(page)
            .page_size(page_size)
            .build()
    }

    /// Create a "recently added" spec for one genre
    pub fn recent_in_genre(genre: impl Into<String>, page_size: usize) -> Self {
        QuerySpecBuilder::new()
            .genre(genre)
            .newest_first()
            .page_size(page_size)
            .build()
    }
}
