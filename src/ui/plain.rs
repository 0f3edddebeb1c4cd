//! Plain-text rendering of a [`DerivedView`], used by `--print`.

use crate::pipeline::{Card, DerivedView};
use crate::util::single_line;
use std::fmt::Write;

/// Render `view` as plain text.
///
/// The featured block comes first when `show_featured` is set and the view
/// has one; then every card, or the no-results notice.
///
/// ```
/// use newsdesk::feed::decode;
/// use newsdesk::pipeline::{derive, FeedQuery, PresentOptions};
/// use newsdesk::ui::render_plain;
///
/// let feed = decode(br#"{"articles":[{"title":"Hello","content":"World","date":"2024-01-01",
///     "category":"tech","views":3,"wordCount":10}]}"#).unwrap();
/// let view = derive(&feed, &FeedQuery::default(), &PresentOptions::default());
/// assert!(render_plain(&view, true).starts_with("== Most popular =="));
/// ```
pub fn render_plain(view: &DerivedView, show_featured: bool) -> String {
    let mut out = String::new();

    if let Some(message) = view.empty_message() {
        out.push_str(&message);
        out.push('\n');
        return out;
    }

    if show_featured {
        if let Some(card) = &view.featured {
            out.push_str("== Most popular ==\n");
            write_card(&mut out, card);
            out.push('\n');
        }
    }

    // Writing to a String cannot fail
    let _ = writeln!(out, "== Articles ({}) ==", view.len());
    for card in &view.cards {
        write_card(&mut out, card);
        out.push('\n');
    }

    out
}

fn write_card(out: &mut String, card: &Card) {
    let _ = writeln!(out, "{}", single_line(card.title()));
    let _ = writeln!(out, "  {}", single_line(&card.preview));
    let _ = writeln!(
        out,
        "  Category: {} | Views: {}",
        single_line(&card.detail.category),
        card.detail.views
    );
    let _ = writeln!(out, "  Estimated reading time: {} min", card.reading_minutes);
}
