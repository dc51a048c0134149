//! The half-open `[start, end)` interval of automatic mode.

use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// Daily interval during which automatic mode commands ON.
///
/// The start is inclusive and the end exclusive. When `end < start` the window
/// wraps past midnight. When `end == start` the window is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    #[must_use]
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Whether the window spans midnight.
    #[must_use]
    pub fn wraps_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Whether the window has zero width and is therefore never active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `now` falls inside the window.
    #[must_use]
    pub fn contains(&self, now: TimeOfDay) -> bool {
        if self.is_empty() {
            false
        } else if self.wraps_midnight() {
            now >= self.start || now < self.end
        } else {
            self.start <= now && now < self.end
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
