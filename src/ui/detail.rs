use crate::app::App;
use crate::pipeline::Card;
use crate::theme::StyleMap;
use crate::util::{display_width, single_line, strip_control_chars};
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the full article for the card opened from the list.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title("Article");

    let Some(card) = app.detail.as_ref() else {
        f.render_widget(Paragraph::new("No article selected").block(block), area);
        return;
    };

    let lines = detail_lines(card, &app.theme);
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = wrapped_height(&lines, inner_width).saturating_sub(visible);

    // Clamp before drawing so a resize never shows an offset past the end
    app.detail_visible_lines = visible;
    app.detail_scroll = app.detail_scroll.min(max_scroll);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll as u16, 0));
    f.render_widget(paragraph, area);
}

/// Lines of the detail view: heading, metadata, image, body and extra info.
pub(super) fn detail_lines(card: &Card, theme: &StyleMap) -> Vec<Line<'static>> {
    let detail = &card.detail;
    let metadata = theme.resolve("detail_metadata");

    let mut lines = vec![
        Line::from(Span::styled(
            single_line(&detail.title).into_owned(),
            theme.resolve("detail_heading"),
        )),
        Line::from(Span::styled(
            format!("Published on: {}", single_line(&detail.date_label())),
            metadata,
        )),
        Line::from(Span::styled(
            format!(
                "Category: {}  ·  Views: {}  ·  {} min read",
                single_line(&detail.category),
                detail.views,
                card.reading_minutes
            ),
            metadata,
        )),
        Line::from(Span::styled(
            format!("[Image: {}]", single_line(&detail.image)),
            theme.resolve("detail_image"),
        )),
        Line::from(""),
    ];

    let body = theme.resolve("detail_body");
    let content = strip_control_chars(&detail.content);
    lines.extend(
        content
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), body))),
    );

    if !detail.additional_info.trim().is_empty() {
        let extra = theme.resolve("detail_extra");
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Additional information",
            theme.resolve("detail_heading"),
        )));
        let info = strip_control_chars(&detail.additional_info);
        lines.extend(
            info.lines()
                .map(|l| Line::from(Span::styled(l.to_string(), extra))),
        );
    }

    lines
}

/// Rows the lines take once wrapped to `width` columns (approximate).
fn wrapped_height(lines: &[Line], width: usize) -> usize {
    if width == 0 {
        return lines.len();
    }
    lines
        .iter()
        .map(|line| {
            let w: usize = line.spans.iter().map(|s| display_width(&s.content)).sum();
            w.div_ceil(width).max(1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::article;
    use crate::pipeline::PresentOptions;
    use crate::theme::ThemeVariant;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    fn theme() -> StyleMap {
        StyleMap::from_palette(&ThemeVariant::Dark.palette())
    }

    #[test]
    fn test_detail_shows_full_article() {
        let mut a = article("Beta", "sports", 50, "2024-06-01");
        a.content = "First paragraph.\nSecond paragraph.".into();
        a.word_count = 450;
        a.additional_info = Some("Photo by the desk".into());
        let card = crate::pipeline::Card::build(&a, 100, &PresentOptions::default());

        let out = text(&detail_lines(&card, &theme()));
        assert_eq!(out[0], "Beta");
        assert_eq!(out[1], "Published on: June 01, 2024");
        assert_eq!(out[2], "Category: sports  ·  Views: 50  ·  3 min read");
        assert_eq!(out[3], "[Image: default.png]");
        assert!(out.contains(&"Second paragraph.".to_string()));
        assert_eq!(out.last().map(String::as_str), Some("Photo by the desk"));
    }

    #[test]
    fn test_detail_omits_empty_additional_info() {
        let a = article("Alpha", "tech", 10, "2024-01-01");
        let card = crate::pipeline::Card::build(&a, 100, &PresentOptions::default());

        let out = text(&detail_lines(&card, &theme()));
        assert!(!out.iter().any(|l| l == "Additional information"));
    }

    #[test]
    fn test_unparsed_date_is_sanitized() {
        let a = article("Alpha", "tech", 10, "\x1b[31mSoon\nish");
        let card = crate::pipeline::Card::build(&a, 100, &PresentOptions::default());

        let out = text(&detail_lines(&card, &theme()));
        assert_eq!(out[1], "Published on: Soon ish");
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("x".repeat(25)), Line::from("")];
        assert_eq!(wrapped_height(&lines, 10), 4);
        assert_eq!(wrapped_height(&lines, 0), 2);
    }
}
