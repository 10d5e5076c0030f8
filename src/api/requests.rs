//! API request bodies

use serde::{Deserialize, Serialize};

/// Body for `POST /duration/{kind}` - a new duration in whole minutes.
///
/// The settings UI constrains minutes to its slider ranges before calling;
/// the timer core performs no bounds validation of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationUpdate {
    pub minutes: u64,
}

/// Body for `POST /long-break-interval` - how many completed work sessions
/// earn a long break
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongBreakIntervalUpdate {
    pub sessions: u32,
}
