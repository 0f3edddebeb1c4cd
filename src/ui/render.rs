//! Render functions for the TUI.
//!
//! Dispatches to the browse or detail layout and draws overlays on top.

use crate::app::{App, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{cards, detail, help, sidebar, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Sidebar width in columns.
const SIDEBAR_WIDTH: u16 = 22;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match app.view {
        View::Browse => render_browse(f, app, chunks[0]),
        View::Detail => detail::render(f, app, chunks[0]),
    }
    status::render(f, app, chunks[1]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Sidebar on the left; featured block above the card list on the right.
fn render_browse(f: &mut Frame, app: &App, area: Rect) {
    let content = if app.show_sidebar {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        sidebar::render(f, app, columns[0]);
        columns[1]
    } else {
        area
    };

    match app.featured() {
        Some(card) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(cards::FEATURED_HEIGHT), Constraint::Min(0)])
                .split(content);
            cards::render_featured(f, app, card, rows[0]);
            cards::render(f, app, rows[1]);
        }
        None => cards::render(f, app, content),
    }
}
