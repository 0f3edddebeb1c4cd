use crate::app::{App, Focus};
use crate::util::single_line;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the category sidebar.
///
/// The cursor row uses `category_selected`; the category the current query
/// filters on is marked with `category_active`.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Categories;
    let style_selected = app.style("category_selected");
    let style_active = app.style("category_active");
    let style_normal = app.style("category_normal");

    let items: Vec<ListItem> = app
        .category_items()
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let active = name == app.query.category;
            let style = if is_focused && i == app.selected_category {
                style_selected
            } else if active {
                style_active
            } else {
                style_normal
            };
            let marker = if active { "● " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(single_line(name).into_owned(), style),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Categories"),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.selected_category));
    f.render_stateful_widget(list, area, &mut state);
}
