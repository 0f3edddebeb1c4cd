//! Article cards: the featured block and the card list.
//!
//! Both go through [`card_lines`] so a card looks the same wherever it is
//! shown; only the preview length (set by the presenter) and the styles differ.

use crate::app::{App, Focus};
use crate::pipeline::Card;
use crate::util::{single_line, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Height of the featured block: border, title, two preview lines, meta, border.
pub(super) const FEATURED_HEIGHT: u16 = 6;

pub(super) struct CardStyles {
    pub title: Style,
    pub preview: Style,
    pub meta: Style,
}

/// "sports · 50 views · 1 min read · June 01, 2024"
pub(super) fn meta_line(card: &Card) -> String {
    format!(
        "{} · {} views · {} min read · {}",
        card.detail.category,
        card.detail.views,
        card.reading_minutes,
        card.detail.date_label()
    )
}

/// Render one card as title, preview and meta lines.
///
/// With `width` set every line is cut to fit; without it the caller wraps.
pub(super) fn card_lines(card: &Card, width: Option<usize>, styles: &CardStyles) -> Vec<Line<'static>> {
    let fit = |s: &str| -> String {
        let s = single_line(s);
        match width {
            Some(w) => truncate_to_width(&s, w).into_owned(),
            None => s.into_owned(),
        }
    };

    vec![
        Line::from(Span::styled(fit(card.title()), styles.title)),
        Line::from(Span::styled(fit(&card.preview), styles.preview)),
        Line::from(Span::styled(fit(&meta_line(card)), styles.meta)),
    ]
}

/// Render the "most popular" block for the top-ranked card.
pub fn render_featured(f: &mut Frame, app: &App, card: &Card, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let styles = CardStyles {
        title: app.style("featured_title"),
        preview: app.style("card_preview"),
        meta: app.style("card_meta"),
    };

    let label = format!(" ★ Most popular · sorted by {} ", app.query.sort_key);
    let paragraph = Paragraph::new(card_lines(card, None, &styles))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("featured_border"))
                .title(Span::styled(label, app.style("featured_label"))),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Render the card list panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Cards;
    let inner_width = area.width.saturating_sub(2) as usize;

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let count = app.card_count();
    let title = if app.search_mode {
        format!("Search: {}_", single_line(&app.search_input))
    } else if app.query.search_term.is_empty() {
        format!("Articles ({})", count)
    } else {
        format!(
            "Articles matching \"{}\" ({})",
            single_line(&app.query.search_term),
            count
        )
    };
    let title_style = if app.search_mode {
        app.style("search_input")
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(title, title_style));

    let Some(view) = app.derived.as_ref() else {
        let text = if app.loading {
            "Loading articles..."
        } else {
            "No articles loaded"
        };
        f.render_widget(
            Paragraph::new(text).style(app.style("empty_state")).block(block),
            area,
        );
        return;
    };

    if let Some(message) = view.empty_message() {
        f.render_widget(
            Paragraph::new(message)
                .style(app.style("empty_state"))
                .wrap(Wrap { trim: true })
                .block(block),
            area,
        );
        return;
    }

    let normal = CardStyles {
        title: app.style("card_title"),
        preview: app.style("card_preview"),
        meta: app.style("card_meta"),
    };
    let selected = app.style("card_selected");

    let items: Vec<ListItem> = view
        .cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let mut lines = card_lines(card, Some(inner_width), &normal);
            lines.push(Line::from(""));
            let item = ListItem::new(lines);
            if i == app.selected_card {
                item.style(selected)
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(block);
    let mut state = ListState::default().with_selected(Some(app.selected_card));
    f.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PresentOptions;
    use crate::pipeline::test_support::article;

    fn styles() -> CardStyles {
        CardStyles {
            title: Style::default(),
            preview: Style::default(),
            meta: Style::default(),
        }
    }

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_card_lines_content() {
        let mut a = article("Beta", "sports", 50, "2024-06-01");
        a.word_count = 100;
        let card = Card::build(&a, 100, &PresentOptions::default());

        let lines = card_lines(&card, None, &styles());
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), "Beta");
        assert_eq!(text(&lines[1]), "Content of Beta...");
        assert_eq!(text(&lines[2]), "sports · 50 views · 1 min read · June 01, 2024");
    }

    #[test]
    fn test_card_lines_truncate_to_width() {
        let a = article("A rather long headline about markets", "business", 3, "2024-01-01");
        let card = Card::build(&a, 100, &PresentOptions::default());

        let lines = card_lines(&card, Some(12), &styles());
        assert_eq!(text(&lines[0]), "A rather ...");
    }

    #[test]
    fn test_card_lines_strip_escapes() {
        let a = article("\x1b[2JEvil\ntitle", "tech", 1, "2024-01-01");
        let card = Card::build(&a, 100, &PresentOptions::default());
        assert_eq!(text(&card_lines(&card, None, &styles())[0]), "Evil title");
    }
}
