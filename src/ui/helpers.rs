//! Helpers for spawning pipeline invocations off the UI task.

use crate::app::{App, AppEvent};
use crate::pipeline::Trigger;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panicking task would otherwise vanish inside the runtime and leave the
/// UI waiting forever. The panic payload becomes `Err(message)`.
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic payload".to_string()
            }
        })
}

/// Start a pipeline invocation for `trigger` in the background.
///
/// The full query and a fresh request token are captured before spawning.
/// The previous in-flight task is aborted; if its result still arrives, the
/// token check in the event handler drops it.
pub(super) fn spawn_invocation(app: &mut App, trigger: Trigger, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.load_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous pipeline invocation");
    }

    let (token, query) = app.begin_invocation(&trigger);
    let pipeline = app.pipeline.clone();
    let tx = event_tx.clone();

    app.load_handle = Some(tokio::spawn(async move {
        let event = match catch_task_panic(pipeline.invoke(&query)).await {
            Ok(result) => AppEvent::FeedLoaded { token, result },
            Err(error) => AppEvent::TaskPanicked {
                token,
                task: "feed_load",
                error,
            },
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, event = "FeedLoaded", "Channel send failed (receiver dropped)");
        }
    }));
}
