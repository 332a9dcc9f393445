//! Intentional query crate surface consumed by UI/search clients.

pub use super::builder::QuerySpecBuilder;
pub use super::engine::{CatalogQueryEngine, query};
pub use super::filtering::{available_genres, hash_query_spec};
pub use super::types::{
    ALL_GENRES, ContentTypeFilter, GenreSelector, Pagination, QuerySpec,
    ResultPage, SortKey,
};
