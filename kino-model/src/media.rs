use chrono::{DateTime, Utc};
use url::Url;

use crate::{ContentType, MediaId, MediaTitle};

/// One piece of browsable content as delivered by the remote catalog.
///
/// Items are immutable for the duration of a query; the query engine only
/// ever borrows them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    pub id: MediaId,
    pub title: MediaTitle,
    pub thumbnail: Url,
    /// Genre tags in the order the catalog lists them
    pub genres: Vec<String>,
    pub content_type: ContentType,
    /// When the item was added/uploaded; drives recency ordering
    pub added_at: DateTime<Utc>,
    pub description: Option<String>,
    pub release_year: Option<u16>,
}

impl MediaItem {
    pub fn new(
        id: MediaId,
        title: MediaTitle,
        thumbnail: Url,
        content_type: ContentType,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            thumbnail,
            genres: Vec::new(),
            content_type,
            added_at,
            description: None,
            release_year: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_release_year(mut self, year: u16) -> Self {
        self.release_year = Some(year);
        self
    }

    /// Exact (case-sensitive) genre membership.
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Case-insensitive substring match against the title or any genre tag.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_folded_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.folded().contains(needle)
            || self
                .genres
                .iter()
                .any(|g| g.to_lowercase().contains(needle))
    }
}
