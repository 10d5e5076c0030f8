//! Phase-completion alert rendering background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Background task that renders phase-completion notifications.
///
/// The timer core decides when to notify and with which text; this task is
/// the rendering collaborator, emitting each notification as a structured
/// log event for clients tailing the server output.
pub async fn alerts_task(state: Arc<AppState>) {
    info!("Starting alerts task");

    let mut notification_rx = state.subscribe_notifications();

    loop {
        match notification_rx.recv().await {
            Ok(notification) => {
                info!(
                    title = notification.title,
                    message = notification.message,
                    "Phase notification"
                );
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Alerts task lagged, missed {} notifications", missed);
            }
            Err(RecvError::Closed) => {
                debug!("Notification channel closed, stopping alerts task");
                return;
            }
        }
    }
}
