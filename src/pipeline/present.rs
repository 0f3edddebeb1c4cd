//! Present stage: turns the ordered articles into a render model.
//!
//! The featured highlight and the list cards share [`Card::build`]; only the
//! preview length differs.

use super::query::FeedQuery;
use crate::feed::{parse_date, Article};

/// Reading speed used for the reading-time estimate.
pub const WORDS_PER_MINUTE: u64 = 200;
/// Preview length for list cards, in characters.
pub const CARD_PREVIEW_CHARS: usize = 100;
/// Preview length for the featured highlight, in characters.
pub const FEATURED_PREVIEW_CHARS: usize = 150;
/// Image shown when an article has none.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "default.png";

const ELLIPSIS: &str = "...";

/// Estimated minutes to read `word_count` words, rounded up.
///
/// ```
/// use newsdesk::pipeline::reading_time;
///
/// assert_eq!(reading_time(0), 0);
/// assert_eq!(reading_time(200), 1);
/// assert_eq!(reading_time(201), 2);
/// ```
pub fn reading_time(word_count: u64) -> u64 {
    word_count.div_ceil(WORDS_PER_MINUTE)
}

/// First `max_chars` characters of `content` followed by `"..."`.
///
/// Counts `char`s rather than bytes so multi-byte text is never split inside a
/// code point. The ellipsis is always appended.
pub fn preview(content: &str, max_chars: usize) -> String {
    let cut = content
        .char_indices()
        .nth(max_chars)
        .map_or(content.len(), |(idx, _)| idx);
    format!("{}{}", &content[..cut], ELLIPSIS)
}

/// Rendering options that do not come from the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentOptions {
    pub placeholder_image: String,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl PresentOptions {
    fn resolve_image(&self, image: Option<&str>) -> String {
        match image.map(str::trim) {
            Some(img) if !img.is_empty() => img.to_string(),
            _ => self.placeholder_image.clone(),
        }
    }
}

/// Everything the detail view shows for one article, untruncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetail {
    pub title: String,
    pub image: String,
    pub content: String,
    pub date: String,
    pub category: String,
    pub views: u64,
    /// Empty when the feed has no additional info for the article.
    pub additional_info: String,
}

impl ArticleDetail {
    /// Publication date for display ("June 01, 2024"), or the raw value when
    /// it cannot be parsed.
    pub fn date_label(&self) -> String {
        parse_date(&self.date)
            .map(|dt| dt.format("%B %d, %Y").to_string())
            .unwrap_or_else(|| self.date.trim().to_string())
    }
}

/// One rendered article: a truncated preview plus its detail hand-off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub preview: String,
    pub reading_minutes: u64,
    pub detail: ArticleDetail,
}

impl Card {
    pub fn build(article: &Article, preview_chars: usize, options: &PresentOptions) -> Self {
        Self {
            preview: preview(&article.content, preview_chars),
            reading_minutes: reading_time(article.word_count),
            detail: ArticleDetail {
                title: article.title.clone(),
                image: options.resolve_image(article.image.as_deref()),
                content: article.content.clone(),
                date: article.date.clone(),
                category: article.category.clone(),
                views: article.views,
                additional_info: article.additional_info.clone().unwrap_or_default(),
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.detail.title
    }
}

/// The render model for one invocation.
///
/// `featured` is the top of the ordered list (longer preview); `cards` holds
/// every ordered article, the featured one included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView {
    pub query: FeedQuery,
    pub featured: Option<Card>,
    pub cards: Vec<Card>,
}

impl DerivedView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Detail hand-off for the card at `index`.
    pub fn detail(&self, index: usize) -> Option<&ArticleDetail> {
        self.cards.get(index).map(|card| &card.detail)
    }

    /// The "no results" notice, present only when nothing matched.
    pub fn empty_message(&self) -> Option<String> {
        self.is_empty().then(|| {
            format!(
                "No articles found matching \"{}\" in {} category",
                self.query.search_term, self.query.category
            )
        })
    }
}

/// Build the render model from already filtered and ordered articles.
pub fn present(ordered: &[&Article], query: &FeedQuery, options: &PresentOptions) -> DerivedView {
    let featured = ordered
        .first()
        .map(|article| Card::build(article, FEATURED_PREVIEW_CHARS, options));
    let cards = ordered
        .iter()
        .map(|article| Card::build(article, CARD_PREVIEW_CHARS, options))
        .collect();

    DerivedView {
        query: query.clone(),
        featured,
        cards,
    }
}
