//! Decoder for the `{ "articles": [...] }` feed document.
//!
//! Every field of every article is checked by serde before the collection is
//! handed to the pipeline, so rendering never sees a half-shaped article.

use super::types::Article;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
struct FeedDocument {
    articles: Vec<Article>,
}

/// Decode a feed document into its article collection.
///
/// Returns the serde error message on failure; the loader wraps it as
/// [`LoadError::DataMalformed`](super::LoadError::DataMalformed).
pub fn decode(bytes: &[u8]) -> Result<Vec<Article>, String> {
    let document: FeedDocument = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    // Titles key the detail view; duplicates still render but are worth a note.
    let mut seen = HashSet::with_capacity(document.articles.len());
    for article in &document.articles {
        if !seen.insert(article.title.as_str()) {
            tracing::warn!(title = %article.title, "Duplicate article title in feed");
        }
    }

    Ok(document.articles)
}
