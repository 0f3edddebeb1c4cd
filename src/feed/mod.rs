//! Article feed retrieval.
//!
//! This module owns the Load stage of the pipeline:
//!
//! - **Source**: interpret a URL or path as the place the feed lives
//! - **Loading**: HTTP or filesystem retrieval with size and time limits
//! - **Decoding**: strict `{ "articles": [...] }` schema validation
//!
//! # Architecture
//!
//! - [`source`] - `Source::parse` for remote URLs and local paths
//! - [`loader`] - `Loader::load` plus the `LoadError` taxonomy
//! - [`schema`] - serde decoder for the feed document
//! - [`types`] - the `Article` record and its date parsing
//!
//! # Example
//!
//! ```ignore
//! use newsdesk::feed::{Loader, Source};
//!
//! let loader = Loader::new(reqwest::Client::new(), Source::parse("articles.json")?);
//! let articles = loader.load().await?;
//! ```

mod loader;
mod schema;
mod source;
mod types;

pub use loader::{LoadError, Loader, Unavailable};
pub use schema::decode;
pub use source::{Source, SourceError};
pub(crate) use types::parse_date;
pub use types::{Article, ALL_CATEGORIES};
