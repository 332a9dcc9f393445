//! # Kino Core
//!
//! Client-side logic shared by every Kino front end:
//!
//! - **Catalog queries**: search, genre and content-type filtering, stable
//!   sorting and pagination over an already-fetched catalog ([`query`]).
//! - **Playback progress**: timer-driven, best-effort reporting of how far a
//!   viewer has watched, with a guaranteed flush when playback stops or the
//!   view goes away ([`playback`]).
//!
//! Both components are leaf-level and independent of each other. Network
//! access lives in `kino-client`; this crate only defines the
//! [`playback::ProgressSink`] seam it reports through.
//!
//! ## Example
//!
//! ```
//! use kino_core::query::{QuerySpecBuilder, query};
//!
//! let spec = QuerySpecBuilder::new().search("night").page_size(10).build();
//! let page = query(&[], &spec).unwrap();
//! assert_eq!(page.pagination.total_results, 0);
//! assert!(!page.pagination.has_next_page);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Error types shared across the workspace
pub mod error;

/// Playback session tracking and progress reporting
pub mod playback;

/// Catalog filtering, sorting and pagination
pub mod query;

pub use error::{KinoError, Result};
pub use kino_model as model;
pub use playback::{
    PlaybackProgressReporter, PlaybackSession, PlayerEvent, ProgressSink,
    ReporterConfig, SessionHandle, SessionState,
};
pub use query::{CatalogQueryEngine, QuerySpec, QuerySpecBuilder, ResultPage};
