//! Input handling for the TUI.
//!
//! Keys are resolved through the keybinding registry, except while the search
//! box is open: then every printable key edits the term.

use crate::app::{App, AppEvent, Focus, View};
use crate::keybindings::{Action as KeyAction, Context};
use crate::pipeline::{SortKey, Trigger};
use crate::util::MAX_SEARCH_TERM_LENGTH;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::spawn_invocation;
use super::Action;

/// Lines moved by PageUp/PageDown when the viewport height is unknown.
const DEFAULT_PAGE: usize = 10;

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Raw mode swallows SIGINT, so Ctrl+C has to be handled here
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if app.show_help {
        match code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                app.help_scroll = app.help_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.help_scroll = app.help_scroll.saturating_sub(1);
            }
            _ => {}
        }
        return Action::Continue;
    }

    if app.search_mode {
        handle_search_input(app, code, modifiers, event_tx);
        return Action::Continue;
    }

    match app.view {
        View::Browse => handle_browse_input(app, code, modifiers, event_tx),
        View::Detail => handle_detail_input(app, code, modifiers),
    }
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, Context::Browse)
    else {
        return Action::Continue;
    };

    match action {
        KeyAction::Quit => return Action::Quit,
        KeyAction::NavDown => app.nav_down(),
        KeyAction::NavUp => app.nav_up(),
        KeyAction::CycleFocus => app.cycle_focus(),
        KeyAction::Select => match app.focus {
            Focus::Categories => {
                let category = app.selected_category_name().map(str::to_string);
                if let Some(category) = category {
                    spawn_invocation(app, Trigger::CategorySelected(category), event_tx);
                    app.focus = Focus::Cards;
                }
            }
            Focus::Cards => {
                if !app.open_detail() {
                    app.set_status("No article selected");
                }
            }
        },
        KeyAction::EnterSearch => {
            app.search_mode = true;
            app.search_input = app.query.search_term.clone();
        }
        KeyAction::SortByViews => {
            spawn_invocation(app, Trigger::SortChanged(SortKey::Views), event_tx);
        }
        KeyAction::SortByDate => {
            spawn_invocation(app, Trigger::SortChanged(SortKey::Date), event_tx);
        }
        KeyAction::Reload => spawn_invocation(app, Trigger::Reload, event_tx),
        KeyAction::ToggleTheme => app.toggle_theme(),
        KeyAction::ToggleSidebar => app.toggle_sidebar(),
        KeyAction::ShowHelp => app.show_help = true,
        // Detail-only actions rebound into Global by an override
        KeyAction::Back
        | KeyAction::ScrollDown
        | KeyAction::ScrollUp
        | KeyAction::PageDown
        | KeyAction::PageUp => {}
    }
    Action::Continue
}

fn handle_detail_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let Some(action) = app
        .keybindings
        .action_for_key(code, modifiers, Context::Detail)
    else {
        return Action::Continue;
    };

    let page = match app.detail_visible_lines {
        0 => DEFAULT_PAGE,
        n => n.saturating_sub(1).max(1),
    };

    match action {
        KeyAction::Quit => return Action::Quit,
        KeyAction::Back => app.close_detail(),
        KeyAction::ScrollDown => app.scroll_detail(1),
        KeyAction::ScrollUp => app.scroll_detail(-1),
        KeyAction::PageDown => app.scroll_detail(page as isize),
        KeyAction::PageUp => app.scroll_detail(-(page as isize)),
        KeyAction::ToggleTheme => app.toggle_theme(),
        KeyAction::ShowHelp => app.show_help = true,
        _ => {}
    }
    Action::Continue
}

/// Every edit of the term is its own invocation; the request token keeps
/// only the newest result.
fn handle_search_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    match code {
        KeyCode::Esc => {
            app.search_mode = false;
            let had_term = !app.search_input.is_empty() || !app.query.search_term.is_empty();
            app.search_input.clear();
            if had_term {
                spawn_invocation(app, Trigger::SearchChanged(String::new()), event_tx);
            }
        }
        KeyCode::Enter => {
            app.search_mode = false;
        }
        KeyCode::Backspace => {
            if app.search_input.pop().is_some() {
                let term = app.search_input.clone();
                spawn_invocation(app, Trigger::SearchChanged(term), event_tx);
            }
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if app.search_input.chars().count() >= MAX_SEARCH_TERM_LENGTH {
                app.set_status(format!(
                    "Search term at max length ({} chars)",
                    MAX_SEARCH_TERM_LENGTH
                ));
                return;
            }
            app.search_input.push(c);
            let term = app.search_input.clone();
            spawn_invocation(app, Trigger::SearchChanged(term), event_tx);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{invocation_for, test_app};

    fn press(app: &mut App, code: KeyCode, tx: &mpsc::Sender<AppEvent>) -> Action {
        handle_input(app, code, KeyModifiers::NONE, tx)
    }

    fn loaded_app() -> App {
        let mut app = test_app();
        let (t, q) = app.begin_invocation(&Trigger::Reload);
        app.accept_invocation(t, Ok(invocation_for(&q)));
        app
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = test_app();
        assert!(matches!(press(&mut app, KeyCode::Char('q'), &tx), Action::Quit));
        assert!(matches!(
            handle_input(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL, &tx),
            Action::Quit
        ));
    }

    #[tokio::test]
    async fn test_each_keystroke_invokes_with_current_term() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = loaded_app();

        press(&mut app, KeyCode::Char('/'), &tx);
        assert!(app.search_mode);

        press(&mut app, KeyCode::Char('a'), &tx);
        let first = app.query.clone();
        press(&mut app, KeyCode::Char('l'), &tx);

        assert_eq!(first.search_term, "a");
        assert_eq!(app.query.search_term, "al");
        assert!(app.loading);

        // Keys that are bindings elsewhere are text while searching
        press(&mut app, KeyCode::Char('q'), &tx);
        assert_eq!(app.query.search_term, "alq");

        press(&mut app, KeyCode::Backspace, &tx);
        assert_eq!(app.query.search_term, "al");

        press(&mut app, KeyCode::Enter, &tx);
        assert!(!app.search_mode);
        assert_eq!(app.search_input, "al");
    }

    #[tokio::test]
    async fn test_escape_clears_search() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = loaded_app();

        press(&mut app, KeyCode::Char('/'), &tx);
        press(&mut app, KeyCode::Char('x'), &tx);
        press(&mut app, KeyCode::Esc, &tx);

        assert!(!app.search_mode);
        assert_eq!(app.search_input, "");
        assert_eq!(app.query.search_term, "");
    }

    #[tokio::test]
    async fn test_search_term_length_limit() {
        let (tx, _rx) = mpsc::channel(512);
        let mut app = test_app();
        app.search_mode = true;
        app.search_input = "x".repeat(MAX_SEARCH_TERM_LENGTH);

        press(&mut app, KeyCode::Char('y'), &tx);
        assert_eq!(app.search_input.len(), MAX_SEARCH_TERM_LENGTH);
        assert!(app.status_message.is_some());
    }

    #[tokio::test]
    async fn test_sort_keys_trigger_invocations() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = loaded_app();

        press(&mut app, KeyCode::Char('d'), &tx);
        assert_eq!(app.query.sort_key, SortKey::Date);
        press(&mut app, KeyCode::Char('v'), &tx);
        assert_eq!(app.query.sort_key, SortKey::Views);
    }

    #[tokio::test]
    async fn test_select_category_from_sidebar() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = loaded_app();

        press(&mut app, KeyCode::Tab, &tx);
        assert_eq!(app.focus, Focus::Categories);
        press(&mut app, KeyCode::Char('j'), &tx);
        press(&mut app, KeyCode::Enter, &tx);

        assert_eq!(app.query.category, "sports");
        assert_eq!(app.focus, Focus::Cards);
    }

    #[tokio::test]
    async fn test_open_and_close_detail() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = loaded_app();

        press(&mut app, KeyCode::Enter, &tx);
        assert_eq!(app.view, View::Detail);

        press(&mut app, KeyCode::Char('j'), &tx);
        assert_eq!(app.detail_scroll, 1);

        // Sorting is not bound in the detail view
        press(&mut app, KeyCode::Char('d'), &tx);
        assert_eq!(app.query.sort_key, SortKey::Views);

        press(&mut app, KeyCode::Char('b'), &tx);
        assert_eq!(app.view, View::Browse);
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let (tx, _rx) = mpsc::channel(16);
        let mut app = loaded_app();

        press(&mut app, KeyCode::Char('?'), &tx);
        assert!(app.show_help);
        assert!(matches!(press(&mut app, KeyCode::Char('q'), &tx), Action::Continue));
        assert!(!app.show_help);
    }
}
