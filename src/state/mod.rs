//! State management module
//!
//! This module contains the timer phase machine and the shared application
//! state that hosts it.

pub mod phase;
pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use phase::{DurationKind, Phase};
pub use app_state::AppState;
pub use timer_state::{PhaseNotification, TimerSnapshot, TimerState};
