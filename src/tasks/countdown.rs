//! Countdown tick driver background task

use std::{sync::Arc, time::Duration};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that drives the timer machine one tick per second.
///
/// The interval only exists while the published snapshot reports an armed
/// countdown (`is_active` with seconds remaining). Every path out of the
/// inner loop drops the interval, so a paused, reset, or auto-completed
/// timer never keeps a stale periodic callback alive.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut snapshot_rx = state.subscribe_snapshots();

    loop {
        // Park until a command arms the countdown
        if !snapshot_rx.borrow_and_update().is_armed() {
            if snapshot_rx.changed().await.is_err() {
                debug!("Snapshot channel closed, stopping countdown task");
                return;
            }
            continue;
        }

        debug!("Countdown armed, starting 1-second interval");
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick completes immediately; consume it so the
        // machine decrements one full second after arming
        interval.tick().await;

        loop {
            tokio::select! {
                // Timer tick - advance the machine by one second
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(snapshot) => {
                            if !snapshot.is_armed() {
                                // Either a zero-crossing parked the machine
                                // in the next phase, or a racing command
                                // deactivated it
                                debug!("Countdown disarmed after tick, phase={:?}", snapshot.phase);
                                break;
                            }
                        }
                        Err(e) => {
                            error!("Failed to tick timer: {}", e);
                            break;
                        }
                    }
                }

                // Snapshot change - check whether a command disarmed us
                changed = snapshot_rx.changed() => {
                    match changed {
                        Ok(()) => {
                            if !snapshot_rx.borrow_and_update().is_armed() {
                                debug!("Command disarmed the countdown");
                                break;
                            }
                        }
                        Err(_) => {
                            debug!("Snapshot channel closed, stopping countdown task");
                            return;
                        }
                    }
                }
            }
        }
        // Interval dropped here; re-created on the next armed snapshot
    }
}
