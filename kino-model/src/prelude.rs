//! Client focused snapshot of the model surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in kino-core or the client crate.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::favorites::FavoriteRequest;
pub use super::ids::{MediaId, ViewerId};
pub use super::media::MediaItem;
pub use super::media_type::ContentType;
pub use super::subscription::{SubscriptionPlan, SubscriptionStatus};
pub use super::titles::MediaTitle;
pub use super::watch::ProgressReport;
