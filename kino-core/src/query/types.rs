use kino_model::{ContentType, MediaItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::KinoError;

/// Sentinel genre value meaning "no genre filter".
pub const ALL_GENRES: &str = "All";

/// Page size used when a view does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Filter/sort/page state of one catalog view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Free text; empty means no text filter
    pub search_text: String,
    pub genre: GenreSelector,
    pub content_type: ContentTypeFilter,
    pub sort: SortKey,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            genre: GenreSelector::All,
            content_type: ContentTypeFilter::All,
            sort: SortKey::Title,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QuerySpec {
    /// Fail with `InvalidArgument` when the page or page size is zero.
    pub fn validate(&self) -> Result<(), KinoError> {
        if self.page == 0 {
            return Err(KinoError::invalid_argument(
                "page must be a positive integer",
            ));
        }
        if self.page_size == 0 {
            return Err(KinoError::invalid_argument(
                "page size must be a positive integer",
            ));
        }
        Ok(())
    }

    /// Case-folded search text. Whitespace is significant; only an empty
    /// string disables the text filter.
    pub fn normalized_search(&self) -> String {
        self.search_text.to_lowercase()
    }
}

/// Genre selector. The `"All"` sentinel disables the genre filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GenreSelector {
    #[default]
    All,
    Named(String),
}

impl GenreSelector {
    pub fn named(genre: impl Into<String>) -> Self {
        Self::from(genre.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            GenreSelector::All => ALL_GENRES,
            GenreSelector::Named(genre) => genre,
        }
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        match self {
            GenreSelector::All => true,
            GenreSelector::Named(genre) => item.has_genre(genre),
        }
    }
}

impl From<String> for GenreSelector {
    fn from(value: String) -> Self {
        // Blank selections come from cleared dropdowns; treat them as "All".
        if value == ALL_GENRES || value.trim().is_empty() {
            GenreSelector::All
        } else {
            GenreSelector::Named(value)
        }
    }
}

impl From<&str> for GenreSelector {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<GenreSelector> for String {
    fn from(selector: GenreSelector) -> Self {
        match selector {
            GenreSelector::All => ALL_GENRES.to_string(),
            GenreSelector::Named(genre) => genre,
        }
    }
}

impl fmt::Display for GenreSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter by content type
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentTypeFilter {
    #[default]
    All,
    Movie,
    Series,
}

impl ContentTypeFilter {
    pub fn all() -> &'static [ContentTypeFilter] {
        use ContentTypeFilter::*;
        &[All, Movie, Series]
    }

    pub fn matches(&self, content_type: ContentType) -> bool {
        match self {
            ContentTypeFilter::All => true,
            ContentTypeFilter::Movie => content_type == ContentType::Movie,
            ContentTypeFilter::Series => content_type == ContentType::Series,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentTypeFilter::All => "All",
            ContentTypeFilter::Movie => "Movie",
            ContentTypeFilter::Series => "Series",
        }
    }
}

impl From<ContentType> for ContentTypeFilter {
    fn from(value: ContentType) -> Self {
        match value {
            ContentType::Movie => ContentTypeFilter::Movie,
            ContentType::Series => ContentTypeFilter::Series,
        }
    }
}

impl FromStr for ContentTypeFilter {
    type Err = KinoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(ContentTypeFilter::All);
        }
        s.parse::<ContentType>()
            .map(ContentTypeFilter::from)
            .map_err(|_| {
                KinoError::invalid_argument(format!(
                    "unknown content type filter `{s}`"
                ))
            })
    }
}

impl fmt::Display for ContentTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fields available for sorting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Case-insensitive title, ascending
    #[default]
    Title,
    /// Added timestamp, most recent first
    DateAdded,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::DateAdded => "date_added",
        }
    }
}

impl FromStr for SortKey {
    type Err = KinoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "date_added" | "date-added" | "dateadded" | "recent" => {
                Ok(Self::DateAdded)
            }
            other => Err(KinoError::invalid_argument(format!(
                "unknown sort key `{other}`"
            ))),
        }
    }
}

/// Pagination descriptor for one result page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Build the descriptor for `current_page` of a result set.
    ///
    /// `page_size` must be non-zero; callers validate the query first.
    pub fn new(
        current_page: usize,
        page_size: usize,
        total_results: usize,
    ) -> Self {
        let total_pages = total_results.div_ceil(page_size);
        Self {
            current_page,
            total_pages,
            total_results,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }

    /// Nearest page that actually holds results, for consumers that want to
    /// jump back after requesting past the end.
    pub fn clamp_page(&self, page: usize) -> usize {
        if self.total_pages == 0 {
            1
        } else {
            page.clamp(1, self.total_pages)
        }
    }

    pub fn is_past_end(&self) -> bool {
        self.current_page > self.total_pages
    }
}

/// Output of a catalog query
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub items: Vec<MediaItem>,
    pub pagination: Pagination,
}

impl ResultPage {
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
