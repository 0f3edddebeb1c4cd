use crate::feed::ALL_CATEGORIES;
use std::fmt;

/// Ordering applied by the Order stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most viewed first.
    #[default]
    Views,
    /// Most recent first.
    Date,
}

impl SortKey {
    /// Parse a key name, case-insensitively.
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "views" => Some(Self::Views),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Parse a key name, falling back to [`SortKey::Views`] for anything unknown.
    pub fn parse_or_default(s: &str) -> Self {
        Self::from_str_name(s).unwrap_or_else(|| {
            tracing::warn!(key = %s, "Unknown sort key, falling back to views");
            Self::Views
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The (sort key, search term, category) triple driving one invocation.
///
/// Built by the caller from its current UI state on every interaction and
/// never stored by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub sort_key: SortKey,
    pub search_term: String,
    pub category: String,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            sort_key: SortKey::Views,
            search_term: String::new(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}

impl FeedQuery {
    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// True when a search term or a specific category narrows the feed.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.trim().is_empty() || self.category != ALL_CATEGORIES
    }
}

/// A user action that starts a pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    SearchChanged(String),
    CategorySelected(String),
    SortChanged(SortKey),
    Reload,
}

impl Trigger {
    /// Build the query for this trigger.
    ///
    /// The trigger's own field is overridden. With `sticky` unset every other
    /// field is reset to its default; with `sticky` set the other fields are
    /// taken from `current`.
    pub fn apply(&self, current: &FeedQuery, sticky: bool) -> FeedQuery {
        let base = if sticky {
            current.clone()
        } else {
            FeedQuery::default()
        };

        match self {
            Trigger::SearchChanged(term) => base.with_search(term.clone()),
            Trigger::CategorySelected(category) => base.with_category(category.clone()),
            Trigger::SortChanged(key) => base.with_sort(*key),
            Trigger::Reload => current.clone(),
        }
    }
}
