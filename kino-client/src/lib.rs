//! # Kino Client
//!
//! Network side of the Kino streaming client: a typed HTTP client for the
//! remote catalog, favorites, history, subscription and progress endpoints,
//! layered configuration, and the `kino` command-line front end.
//!
//! Payloads are validated into `kino-model` types at the boundary
//! ([`contracts`]); everything past this crate works with well-formed
//! [`MediaItem`](kino_model::MediaItem)s only.

#![allow(missing_docs)]

pub mod api_client;
pub mod config;
pub mod contracts;
pub mod source;

pub use api_client::{ApiClient, normalize_base_url};
pub use config::{ClientConfig, ConfigError};
pub use source::{CatalogSource, InMemoryCatalog, browse, genres};
