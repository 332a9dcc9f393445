pub mod builder;
pub mod engine;
pub mod filtering;
pub mod prelude;
pub mod sorting;
pub mod types;

pub use builder::QuerySpecBuilder;
pub use engine::{CatalogQueryEngine, query};
pub use filtering::{ItemFilter, available_genres, filter_items, hash_query_spec};
pub use sorting::{compare_items, sort_items, sort_media_slice};
pub use types::*;
