//! Timer phase definitions

use serde::{Deserialize, Serialize};

/// The four modes the timer can be in. `Idle` is the rest state before a
/// session starts and after a full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Check if this phase is a break (short or long)
    pub fn is_break(&self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }

    /// Human-readable label for display layers
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Work => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

/// Names the duration field a reconfiguration command targets. `Idle` has
/// no duration of its own, so it is not a valid target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DurationKind {
    Work,
    ShortBreak,
    LongBreak,
}

#[cfg(test)]
mod tests {
    use super::{DurationKind, Phase};

    #[test]
    fn break_predicate_covers_both_breaks() {
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
        assert!(!Phase::Work.is_break());
        assert!(!Phase::Idle.is_break());
    }

    #[test]
    fn wire_names_are_camel_case() {
        assert_eq!(serde_json::to_string(&Phase::ShortBreak).unwrap(), "\"shortBreak\"");
        assert_eq!(serde_json::to_string(&Phase::Idle).unwrap(), "\"idle\"");
        let kind: DurationKind = serde_json::from_str("\"longBreak\"").unwrap();
        assert_eq!(kind, DurationKind::LongBreak);
    }
}
