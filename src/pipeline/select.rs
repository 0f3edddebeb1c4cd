use super::query::FeedQuery;
use crate::feed::{Article, ALL_CATEGORIES};

/// Filter stage.
///
/// Keeps articles whose lowercased title contains the lowercased search term
/// and whose category equals the query category exactly (or any category when
/// the query asks for `"all"`). Output borrows from `articles` in input order.
pub fn select<'a>(articles: &'a [Article], query: &FeedQuery) -> Vec<&'a Article> {
    let needle = query.search_term.to_lowercase();
    let any_category = query.category == ALL_CATEGORIES;

    articles
        .iter()
        .filter(|article| {
            let matches_search = needle.is_empty() || article.title.to_lowercase().contains(&needle);
            let matches_category = any_category || article.category == query.category;
            matches_search && matches_category
        })
        .collect()
}
