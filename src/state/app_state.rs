//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use super::phase::DurationKind;
use super::timer_state::{PhaseNotification, TimerSnapshot, TimerState};

/// Main application state owning the timer machine and its channels.
///
/// There is exactly one instance per process, constructed by `main` and
/// handed to every consumer. All mutation funnels through the command
/// methods below, so no two transitions ever interleave.
#[derive(Debug)]
pub struct AppState {
    /// The Pomodoro phase machine
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last command tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel publishing a fresh snapshot after every mutation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Channel for phase-completion notifications
    pub notification_tx: broadcast::Sender<PhaseNotification>,
}

impl AppState {
    /// Create a new AppState around an initial timer machine
    pub fn new(port: u16, host: String, timer: TimerState) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());
        let (notification_tx, _) = broadcast::channel(100);

        Self {
            timer_state: Arc::new(Mutex::new(timer)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            notification_tx,
        }
    }

    /// Apply a command to the timer machine and publish the new snapshot
    pub fn command<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerState),
    {
        // Lock the timer state and apply the update
        let mut state = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        updater(&mut *state);
        let snapshot = state.snapshot();
        drop(state); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        // Publish the snapshot (this arms or disarms the tick driver)
        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send snapshot update: {}", e);
        }

        Ok(snapshot)
    }

    /// Start or resume the countdown
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        info!("Starting timer");
        self.command("start", |timer| timer.start())
    }

    /// Pause the countdown in place
    pub fn pause(&self) -> Result<TimerSnapshot, String> {
        info!("Pausing timer");
        self.command("pause", |timer| timer.pause())
    }

    /// Reset the whole session back to idle
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        info!("Resetting timer session");
        self.command("reset", |timer| timer.reset())
    }

    /// Skip to the next phase
    pub fn skip(&self) -> Result<TimerSnapshot, String> {
        info!("Skipping to next phase");
        self.command("skip", |timer| timer.skip())
    }

    /// Reconfigure one of the three phase durations, in minutes
    pub fn set_duration(&self, kind: DurationKind, minutes: u64) -> Result<TimerSnapshot, String> {
        info!("Setting {:?} duration to {} minutes", kind, minutes);
        self.command("update-duration", |timer| timer.update_duration(kind, minutes))
    }

    /// Reconfigure how many work sessions earn a long break
    pub fn set_long_break_interval(&self, sessions: u32) -> Result<TimerSnapshot, String> {
        info!("Setting long break interval to {} sessions", sessions);
        self.command("update-long-break-interval", |timer| {
            timer.update_long_break_interval(sessions)
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Called by the tick driver once per elapsed second while armed. A
    /// zero-crossing inside the machine yields a notification, forwarded to
    /// the broadcast channel exactly once per crossing.
    pub fn tick(&self) -> Result<TimerSnapshot, String> {
        let mut state = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let notification = state.tick();
        let snapshot = state.snapshot();
        drop(state);

        if let Some(notification) = notification {
            info!("Phase completed: {}", notification.title);
            if let Err(e) = self.notification_tx.send(notification) {
                warn!("Failed to send phase notification: {}", e);
            }
        }

        if let Err(e) = self.snapshot_tx.send(snapshot.clone()) {
            warn!("Failed to send snapshot update: {}", e);
        }

        Ok(snapshot)
    }

    /// Get the current timer snapshot
    pub fn get_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer_state.lock()
            .map(|state| state.snapshot())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Subscribe to snapshot updates (used by the tick driver)
    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to phase-completion notifications
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<PhaseNotification> {
        self.notification_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
