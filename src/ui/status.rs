use crate::app::{App, View};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Spinner glyphs cycled by the loop tick while a load is in flight.
pub(super) const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(&**msg)
    } else if app.loading {
        Cow::Owned(format!(
            "{} Loading articles...",
            SPINNER[app.spinner_frame % SPINNER.len()]
        ))
    } else {
        match app.view {
            View::Browse if app.search_mode => {
                Cow::Borrowed("Type to search | ESC clear | ENTER done")
            }
            View::Browse => Cow::Owned(format!(
                "[/]search [v]iews [d]ate [Tab]switch [c]ategories [t]heme [?]help [q]uit | sort: {}",
                app.query.sort_key
            )),
            View::Detail => Cow::Borrowed("[b]ack [j/k]scroll [PgUp/PgDn]page [t]heme [q]uit"),
        }
    };

    let style = if app.status_message.is_some() && app.status_is_error {
        app.style("status_bar").patch(app.style("error"))
    } else {
        app.style("status_bar")
    };
    f.render_widget(Paragraph::new(text).style(style), area);
}
