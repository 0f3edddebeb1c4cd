//! The article feed pipeline.
//!
//! Each invocation runs three stages in sequence:
//!
//! 1. **Load** - [`crate::feed::Loader`] retrieves the whole collection
//! 2. **Select** - [`select`] filters by search term and category
//! 3. **Order & Present** - [`order`] sorts, [`present`] builds the [`DerivedView`]
//!
//! Stages 2 and 3 are pure and borrow the loaded collection, which is never
//! modified. Nothing is cached between invocations; callers pass the full
//! [`FeedQuery`] every time and use a [`Sequencer`] to discard stale results.

mod order;
mod present;
mod query;
mod select;
mod sequence;

pub use order::order;
pub use present::{
    present, preview, reading_time, ArticleDetail, Card, DerivedView, PresentOptions,
    CARD_PREVIEW_CHARS, DEFAULT_PLACEHOLDER_IMAGE, FEATURED_PREVIEW_CHARS, WORDS_PER_MINUTE,
};
pub use query::{FeedQuery, SortKey, Trigger};
pub use select::select;
pub use sequence::{RequestToken, Sequencer};

use crate::feed::{Article, LoadError, Loader};
use std::collections::BTreeSet;

/// Run Select, Order and Present over an already loaded collection.
pub fn derive(articles: &[Article], query: &FeedQuery, options: &PresentOptions) -> DerivedView {
    let selected = select(articles, query);
    tracing::debug!(
        total = articles.len(),
        selected = selected.len(),
        search = %query.search_term,
        category = %query.category,
        "Filtered articles"
    );

    let ordered = order(selected, query.sort_key);
    tracing::debug!(
        sort = %query.sort_key,
        first = ordered.first().map(|a| a.title.as_str()).unwrap_or(""),
        "Sorted articles"
    );

    present(&ordered, query, options)
}

/// Sorted, de-duplicated category labels present in a collection.
pub fn categories(articles: &[Article]) -> Vec<String> {
    articles
        .iter()
        .map(|a| a.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Result of one full invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub view: DerivedView,
    /// Categories of the loaded feed, for the category picker.
    pub categories: Vec<String>,
}

/// Load + derive, the entry point the UI calls on every interaction.
#[derive(Debug, Clone)]
pub struct Pipeline {
    loader: Loader,
    options: PresentOptions,
}

impl Pipeline {
    pub fn new(loader: Loader, options: PresentOptions) -> Self {
        Self { loader, options }
    }

    pub fn loader(&self) -> &Loader {
        &self.loader
    }

    /// Fetch the feed and build the view for `query`.
    ///
    /// # Errors
    ///
    /// Propagates [`LoadError`] from the Load stage; the later stages cannot fail.
    pub async fn invoke(&self, query: &FeedQuery) -> Result<Invocation, LoadError> {
        let articles = self.loader.load().await?;
        Ok(Invocation {
            view: derive(&articles, query, &self.options),
            categories: categories(&articles),
        })
    }
}
