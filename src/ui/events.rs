//! Application event handling.
//!
//! Applies results of background pipeline invocations to the UI state.

use crate::app::{App, AppEvent};

/// Handle an event from a background task.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::FeedLoaded { token, result } => {
            if app.accept_invocation(token, result) {
                app.load_handle = None;
            }
        }
        AppEvent::TaskPanicked { token, task, error } => {
            if app.task_panicked(token, task, &error) {
                app.load_handle = None;
            }
        }
    }
}
