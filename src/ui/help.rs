//! Help overlay: the keybinding table, including config overrides.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Row, Table},
    Frame,
};

/// Section order on the help screen.
const CONTEXT_ORDER: [Context; 3] = [Context::Global, Context::Browse, Context::Detail];

/// Rows typed into the search box, which bypass the registry.
const SEARCH_ROWS: [(&str, &str); 3] = [
    ("any key", "Edit search term (results update as you type)"),
    ("Enter", "Keep term and leave search"),
    ("Esc", "Clear term and leave search"),
];

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(80, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }
    f.render_widget(Clear, overlay);

    let heading = app.style("detail_heading");
    let section = |label: &str| {
        Row::new(vec![
            Line::from(Span::styled(
                format!("-- {} --", label),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ])
        .style(heading)
    };

    let bindings = app.keybindings.help_rows();
    let mut rows: Vec<Row> = Vec::new();

    for ctx in CONTEXT_ORDER {
        let mut group = bindings.iter().filter(|(c, _, _)| *c == ctx).peekable();
        if group.peek().is_none() {
            continue;
        }
        rows.push(section(ctx.label()));
        for (_, keys, description) in group {
            rows.push(Row::new(vec![format!("  {}", keys), description.to_string()]));
        }
        rows.push(Row::new(vec![String::new(), String::new()]));
    }

    rows.push(section("Search box"));
    for (keys, description) in SEARCH_ROWS {
        rows.push(Row::new(vec![format!("  {}", keys), description.to_string()]));
    }

    let visible_height = overlay.height.saturating_sub(3) as usize;
    let max_scroll = rows.len().saturating_sub(visible_height);
    let scroll = app.help_scroll.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(" Help ({}/{}) j/k scroll ", scroll + 1, max_scroll + 1)
    } else {
        " Help (? to close) ".to_string()
    };

    let table = Table::new(visible_rows, [Constraint::Length(18), Constraint::Min(20)])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("detail_body"));

    f.render_widget(table, overlay);
}

/// Create a centered rectangle with the given percentage of the parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
