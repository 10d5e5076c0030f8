//! Pomodoro timer state machine
//!
//! Owns every piece of timer state and all transition logic. Commands are
//! total functions over valid inputs: range validation (positive minutes,
//! positive interval counts) is the caller's responsibility, enforced at the
//! CLI and HTTP boundaries.

use serde::Serialize;

use super::phase::{DurationKind, Phase};

/// Default work interval: 25 minutes in seconds
pub const DEFAULT_WORK_SECS: u64 = 25 * 60;
/// Default short break: 5 minutes in seconds
pub const DEFAULT_SHORT_BREAK_SECS: u64 = 5 * 60;
/// Default long break: 15 minutes in seconds
pub const DEFAULT_LONG_BREAK_SECS: u64 = 15 * 60;
/// Default number of work sessions before a long break
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

/// Timer state for the Pomodoro phase machine
#[derive(Debug, Clone)]
pub struct TimerState {
    pub seconds_remaining: u64,
    pub is_active: bool,
    pub phase: Phase,
    pub work_duration: u64,
    pub short_break_duration: u64,
    pub long_break_duration: u64,
    pub long_break_interval: u32,
    pub completed_work_intervals: u32,
    pub progress_percent: f64,
}

impl TimerState {
    /// Create a new timer with default durations, idle and paused
    pub fn new() -> Self {
        Self::with_durations(
            DEFAULT_WORK_SECS,
            DEFAULT_SHORT_BREAK_SECS,
            DEFAULT_LONG_BREAK_SECS,
            DEFAULT_LONG_BREAK_INTERVAL,
        )
    }

    /// Create a new idle timer with the given durations in seconds
    pub fn with_durations(
        work_duration: u64,
        short_break_duration: u64,
        long_break_duration: u64,
        long_break_interval: u32,
    ) -> Self {
        Self {
            seconds_remaining: work_duration,
            is_active: false,
            phase: Phase::Idle,
            work_duration,
            short_break_duration,
            long_break_duration,
            long_break_interval,
            completed_work_intervals: 0,
            progress_percent: 100.0,
        }
    }

    /// Duration in seconds for the given phase. `Idle` maps to the work
    /// duration so that resets re-base the countdown for the next session.
    pub fn duration_for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_duration,
            Phase::ShortBreak => self.short_break_duration,
            Phase::LongBreak => self.long_break_duration,
            Phase::Idle => self.work_duration,
        }
    }

    /// Re-derive the countdown and progress from the current phase's
    /// configured duration. Full reset, not a proportional rescale.
    fn rebase_current_phase(&mut self) {
        self.seconds_remaining = self.duration_for_phase(self.phase);
        self.progress_percent = 100.0;
    }

    /// Switch to `phase` and re-base the countdown for it
    fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.rebase_current_phase();
    }

    /// Start the countdown. From `Idle` this begins a fresh work session;
    /// in any other phase it resumes in place. Idempotent while active.
    pub fn start(&mut self) {
        if self.phase == Phase::Idle {
            self.enter_phase(Phase::Work);
        }
        self.is_active = true;
    }

    /// Stop counting down. Phase and remaining seconds are untouched, so a
    /// later `start` resumes where the countdown left off.
    pub fn pause(&mut self) {
        self.is_active = false;
    }

    /// Re-initialize the session: paused, idle, zero completed intervals,
    /// countdown re-based to the work duration. Configured durations are
    /// preserved.
    pub fn reset(&mut self) {
        self.pause();
        self.completed_work_intervals = 0;
        self.enter_phase(Phase::Idle);
    }

    /// Advance to the next phase on demand.
    ///
    /// Leaving `Work` counts the session; every `long_break_interval`-th
    /// completed session earns a long break, otherwise a short one. Breaks
    /// lead back to `Work`. The activity flag is left alone in every case,
    /// so skipping works without ever starting and a mid-countdown skip
    /// rolls straight into the next phase still running.
    pub fn skip(&mut self) {
        match self.phase {
            Phase::Idle | Phase::Work => {
                if self.phase == Phase::Work {
                    self.completed_work_intervals += 1;
                }
                let is_long_break = self.completed_work_intervals > 0
                    && self.completed_work_intervals % self.long_break_interval == 0;
                let next = if is_long_break {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                self.enter_phase(next);
            }
            Phase::ShortBreak | Phase::LongBreak => {
                self.enter_phase(Phase::Work);
            }
        }
    }

    /// Store a new duration for `kind`, given in minutes.
    ///
    /// If the update targets the phase the timer currently occupies (work
    /// updates also apply while idle), the countdown is immediately re-based
    /// to the new duration, even mid-countdown. Otherwise the stored value
    /// only affects future entries into that phase.
    pub fn update_duration(&mut self, kind: DurationKind, minutes: u64) {
        let seconds = minutes * 60;
        let rebase = match kind {
            DurationKind::Work => {
                self.work_duration = seconds;
                matches!(self.phase, Phase::Idle | Phase::Work)
            }
            DurationKind::ShortBreak => {
                self.short_break_duration = seconds;
                self.phase == Phase::ShortBreak
            }
            DurationKind::LongBreak => {
                self.long_break_duration = seconds;
                self.phase == Phase::LongBreak
            }
        };
        if rebase {
            self.rebase_current_phase();
        }
    }

    /// Store a new long-break threshold. Takes effect at the next work
    /// session completion; never alters the current phase or the completed
    /// counter.
    pub fn update_long_break_interval(&mut self, sessions: u32) {
        self.long_break_interval = sessions;
    }

    /// One countdown step, driven once per elapsed second while the timer
    /// is active. No-op unless `is_active` and there is time remaining.
    ///
    /// When the decrement reaches zero the machine deactivates first, then
    /// advances the phase, so the next phase sits paused awaiting an
    /// explicit `start`. Returns the completion notification exactly when
    /// that zero-crossing happened.
    pub fn tick(&mut self) -> Option<PhaseNotification> {
        if !self.is_active || self.seconds_remaining == 0 {
            return None;
        }

        self.seconds_remaining -= 1;
        self.progress_percent = self.seconds_remaining as f64
            / self.duration_for_phase(self.phase) as f64
            * 100.0;

        if self.seconds_remaining == 0 {
            // Deactivate before advancing: the phase definition moves on,
            // but the countdown stays paused until the user starts it.
            self.is_active = false;
            let notification = PhaseNotification::for_completed(self.phase);
            self.skip();
            return Some(notification);
        }

        None
    }

    /// Snapshot of the full timer state for read-only consumers
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            seconds_remaining: self.seconds_remaining,
            is_active: self.is_active,
            phase: self.phase,
            phase_label: self.phase.label(),
            clock: format_clock(self.seconds_remaining),
            work_duration: self.work_duration,
            short_break_duration: self.short_break_duration,
            long_break_duration: self.long_break_duration,
            long_break_interval: self.long_break_interval,
            completed_work_intervals: self.completed_work_intervals,
            progress_percent: self.progress_percent,
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only copy of the timer state, serialized for status responses and
/// published on the snapshot watch channel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub seconds_remaining: u64,
    pub is_active: bool,
    pub phase: Phase,
    pub phase_label: &'static str,
    pub clock: String,
    pub work_duration: u64,
    pub short_break_duration: u64,
    pub long_break_duration: u64,
    pub long_break_interval: u32,
    pub completed_work_intervals: u32,
    pub progress_percent: f64,
}

impl TimerSnapshot {
    /// Whether the tick driver should be running for this state
    pub fn is_armed(&self) -> bool {
        self.is_active && self.seconds_remaining > 0
    }
}

/// Notification emitted once per automatic zero-crossing transition. The
/// core decides when and with which text; rendering belongs to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseNotification {
    pub title: &'static str,
    pub message: &'static str,
}

impl PhaseNotification {
    /// Notification text for the phase that just finished
    pub fn for_completed(phase: Phase) -> Self {
        if phase == Phase::Work {
            Self {
                title: "Work session completed!",
                message: "Great job! Take a break.",
            }
        } else {
            Self {
                title: "Break time over!",
                message: "Time to get back to work!",
            }
        }
    }
}

/// Format seconds as a MM:SS clock string
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::{format_clock, TimerState};
    use crate::state::phase::{DurationKind, Phase};

    #[test]
    fn fresh_timer_is_idle_with_default_durations() {
        let state = TimerState::new();
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.is_active);
        assert_eq!(state.seconds_remaining, 1500);
        assert_eq!(state.work_duration, 1500);
        assert_eq!(state.short_break_duration, 300);
        assert_eq!(state.long_break_duration, 900);
        assert_eq!(state.long_break_interval, 4);
        assert_eq!(state.completed_work_intervals, 0);
        assert_eq!(state.progress_percent, 100.0);
    }

    #[test]
    fn start_from_idle_enters_work() {
        let mut state = TimerState::new();
        state.start();
        assert_eq!(state.phase, Phase::Work);
        assert!(state.is_active);
        assert_eq!(state.seconds_remaining, state.work_duration);
        assert_eq!(state.progress_percent, 100.0);
    }

    #[test]
    fn start_resumes_in_place_when_not_idle() {
        let mut state = TimerState::new();
        state.start();
        for _ in 0..10 {
            state.tick();
        }
        state.pause();
        let frozen = state.seconds_remaining;

        state.start();
        assert_eq!(state.phase, Phase::Work);
        assert!(state.is_active);
        assert_eq!(state.seconds_remaining, frozen);
    }

    #[test]
    fn pause_preserves_seconds_and_phase() {
        let mut state = TimerState::new();
        state.start();
        state.tick();
        let remaining = state.seconds_remaining;

        state.pause();
        assert!(!state.is_active);
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.seconds_remaining, remaining);

        // Paused timers ignore ticks entirely
        assert!(state.tick().is_none());
        assert_eq!(state.seconds_remaining, remaining);
    }

    #[test]
    fn reset_reinitializes_session_but_keeps_durations() {
        let mut state = TimerState::new();
        state.update_duration(DurationKind::Work, 50);
        state.start();
        state.skip();
        state.skip();
        state.tick();

        state.reset();
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.is_active);
        assert_eq!(state.completed_work_intervals, 0);
        assert_eq!(state.seconds_remaining, 50 * 60);
        assert_eq!(state.progress_percent, 100.0);
        assert_eq!(state.work_duration, 50 * 60);
    }

    #[test]
    fn skip_from_work_counts_session_and_picks_break() {
        let mut state = TimerState::new();
        state.start();
        state.skip();
        assert_eq!(state.completed_work_intervals, 1);
        assert_eq!(state.phase, Phase::ShortBreak);
        assert_eq!(state.seconds_remaining, state.short_break_duration);
        assert_eq!(state.progress_percent, 100.0);
    }

    #[test]
    fn skip_from_idle_does_not_count_a_session() {
        let mut state = TimerState::new();
        state.skip();
        assert_eq!(state.completed_work_intervals, 0);
        assert_eq!(state.phase, Phase::ShortBreak);
    }

    #[test]
    fn skip_from_break_returns_to_work() {
        let mut state = TimerState::new();
        state.start();
        state.skip();
        assert!(state.phase.is_break());

        state.skip();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.seconds_remaining, state.work_duration);
        assert_eq!(state.completed_work_intervals, 1);
    }

    #[test]
    fn every_fourth_session_earns_a_long_break() {
        let mut state = TimerState::new();
        state.start();
        for session in 1..=8u32 {
            assert_eq!(state.phase, Phase::Work);
            state.skip();
            assert_eq!(state.completed_work_intervals, session);
            if session % 4 == 0 {
                assert_eq!(state.phase, Phase::LongBreak);
            } else {
                assert_eq!(state.phase, Phase::ShortBreak);
            }
            state.skip();
        }
    }

    #[test]
    fn skip_cycles_without_ever_starting() {
        let mut state = TimerState::new();
        // idle -> shortBreak -> work -> shortBreak -> ...
        state.skip();
        assert_eq!(state.phase, Phase::ShortBreak);
        assert!(!state.is_active);

        state.skip();
        assert_eq!(state.phase, Phase::Work);

        state.skip();
        assert_eq!(state.completed_work_intervals, 1);
        assert_eq!(state.phase, Phase::ShortBreak);
        assert!(!state.is_active);
    }

    #[test]
    fn skip_leaves_activity_flag_untouched() {
        let mut state = TimerState::new();
        state.start();
        state.skip();
        assert!(state.is_active);

        state.pause();
        state.skip();
        assert!(!state.is_active);
    }

    #[test]
    fn tick_decrements_and_recomputes_progress() {
        let mut state = TimerState::with_durations(200, 60, 180, 4);
        state.start();

        assert!(state.tick().is_none());
        assert_eq!(state.seconds_remaining, 199);
        assert_eq!(state.progress_percent, 199.0 / 200.0 * 100.0);

        assert!(state.tick().is_none());
        assert_eq!(state.seconds_remaining, 198);
        assert_eq!(state.progress_percent, 99.0);
    }

    #[test]
    fn work_zero_crossing_notifies_advances_and_stays_paused() {
        let mut state = TimerState::with_durations(3, 60, 180, 4);
        state.start();

        assert!(state.tick().is_none());
        assert!(state.tick().is_none());
        let notification = state.tick().expect("zero-crossing notification");

        assert_eq!(notification.title, "Work session completed!");
        assert_eq!(notification.message, "Great job! Take a break.");
        assert!(!state.is_active);
        assert_eq!(state.phase, Phase::ShortBreak);
        assert_eq!(state.seconds_remaining, 60);
        assert_eq!(state.progress_percent, 100.0);
        assert_eq!(state.completed_work_intervals, 1);

        // Paused at the phase boundary: further ticks change nothing
        assert!(state.tick().is_none());
        assert_eq!(state.seconds_remaining, 60);
    }

    #[test]
    fn break_zero_crossing_notifies_back_to_work() {
        let mut state = TimerState::with_durations(1, 2, 180, 4);
        state.start();
        state.tick().expect("work completes");

        state.start();
        assert_eq!(state.phase, Phase::ShortBreak);
        assert!(state.tick().is_none());
        let notification = state.tick().expect("break completes");

        assert_eq!(notification.title, "Break time over!");
        assert_eq!(notification.message, "Time to get back to work!");
        assert!(!state.is_active);
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.seconds_remaining, 1);
        // Completed count unchanged by finishing a break
        assert_eq!(state.completed_work_intervals, 1);
    }

    #[test]
    fn exactly_one_notification_per_zero_crossing() {
        let mut state = TimerState::with_durations(120, 60, 180, 4);
        state.start();
        let mut notifications = 0;
        for _ in 0..500 {
            if state.tick().is_some() {
                notifications += 1;
            }
        }
        // Timer parked itself after the single crossing
        assert_eq!(notifications, 1);
        assert_eq!(state.completed_work_intervals, 1);
    }

    #[test]
    fn work_duration_update_rebases_while_idle() {
        for minutes in [1u64, 25, 60] {
            let mut state = TimerState::new();
            state.update_duration(DurationKind::Work, minutes);
            assert_eq!(state.phase, Phase::Idle);
            assert_eq!(state.seconds_remaining, minutes * 60);
            assert_eq!(state.progress_percent, 100.0);
        }
    }

    #[test]
    fn work_duration_update_rebases_mid_countdown() {
        let mut state = TimerState::new();
        state.start();
        for _ in 0..100 {
            state.tick();
        }

        state.update_duration(DurationKind::Work, 10);
        assert_eq!(state.seconds_remaining, 600);
        assert_eq!(state.progress_percent, 100.0);
        // Still counting down against the new duration
        assert!(state.is_active);
        state.tick();
        assert_eq!(state.progress_percent, 599.0 / 600.0 * 100.0);
    }

    #[test]
    fn break_duration_update_only_rebases_in_that_phase() {
        let mut state = TimerState::new();
        state.start();

        // Not in a short break: stored, no visible effect
        state.update_duration(DurationKind::ShortBreak, 10);
        assert_eq!(state.short_break_duration, 600);
        assert_eq!(state.seconds_remaining, state.work_duration);

        state.skip();
        assert_eq!(state.phase, Phase::ShortBreak);
        assert_eq!(state.seconds_remaining, 600);

        // Now it is the current phase: immediate re-base
        state.update_duration(DurationKind::ShortBreak, 3);
        assert_eq!(state.seconds_remaining, 180);
        assert_eq!(state.progress_percent, 100.0);

        // Long break update while in a short break stays invisible
        state.update_duration(DurationKind::LongBreak, 20);
        assert_eq!(state.long_break_duration, 1200);
        assert_eq!(state.seconds_remaining, 180);
    }

    #[test]
    fn interval_update_stores_without_recompute() {
        let mut state = TimerState::new();
        state.start();
        state.skip();
        state.skip();
        state.skip();
        assert_eq!(state.completed_work_intervals, 2);
        let seconds_before = state.seconds_remaining;
        let phase_before = state.phase;

        state.update_long_break_interval(2);
        assert_eq!(state.long_break_interval, 2);
        assert_eq!(state.completed_work_intervals, 2);
        assert_eq!(state.seconds_remaining, seconds_before);
        assert_eq!(state.phase, phase_before);

        // New threshold applies from the next completion on
        state.skip();
        state.skip();
        assert_eq!(state.completed_work_intervals, 3);
        assert_eq!(state.phase, Phase::ShortBreak);
        state.skip();
        state.skip();
        assert_eq!(state.completed_work_intervals, 4);
        assert_eq!(state.phase, Phase::LongBreak);
    }

    #[test]
    fn default_session_end_to_end() {
        let mut state = TimerState::new();
        state.start();
        assert_eq!(state.phase, Phase::Work);
        assert_eq!(state.seconds_remaining, 1500);

        let mut notification = None;
        for _ in 0..1500 {
            if let Some(n) = state.tick() {
                assert!(notification.is_none(), "more than one notification");
                notification = Some(n);
            }
        }

        let notification = notification.expect("work session completion");
        assert_eq!(notification.title, "Work session completed!");
        assert_eq!(state.phase, Phase::ShortBreak);
        assert_eq!(state.seconds_remaining, 300);
        assert!(!state.is_active);
        assert_eq!(state.completed_work_intervals, 1);
    }

    #[test]
    fn snapshot_mirrors_state_and_reports_armed() {
        let mut state = TimerState::new();
        let idle = state.snapshot();
        assert!(!idle.is_armed());
        assert_eq!(idle.phase_label, "Ready");
        assert_eq!(idle.clock, "25:00");

        state.start();
        state.tick();
        let running = state.snapshot();
        assert!(running.is_armed());
        assert_eq!(running.phase_label, "Focus");
        assert_eq!(running.seconds_remaining, 1499);
        assert_eq!(running.clock, "24:59");
        assert_eq!(running.progress_percent, state.progress_percent);
    }

    #[test]
    fn clock_formats_with_zero_padding() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(3600), "60:00");
    }
}
