//! Core data model definitions shared across Kino crates.
#![allow(missing_docs)]

pub use ::chrono;
pub use ::url;

pub mod error;
pub mod favorites;
pub mod ids;
pub mod media;
pub mod media_type;
pub mod prelude;
pub mod subscription;
pub mod titles;
pub mod watch;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use favorites::FavoriteRequest;
pub use ids::{MediaId, ViewerId};
pub use media::MediaItem;
pub use media_type::ContentType;
pub use subscription::{SubscriptionPlan, SubscriptionStatus};
pub use titles::MediaTitle;
pub use watch::ProgressReport;
