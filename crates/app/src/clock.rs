//! System clock backed by `chrono`.

use chrono::{FixedOffset, Local, Utc};

use growbox_domain::time::{TimeOfDay, Timestamp};

use crate::ports::Clock;

/// Reads the host clock.
///
/// The time of day is taken in the host's local timezone unless a fixed UTC
/// offset was configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    /// Use the host's local timezone.
    #[must_use]
    pub fn local() -> Self {
        Self::default()
    }

    /// Use a fixed offset east of UTC, in minutes.
    ///
    /// Returns `None` when the offset is not within ±24 hours.
    #[must_use]
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self {
            offset: Some(offset),
        })
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        growbox_domain::time::now()
    }

    fn time_of_day(&self) -> TimeOfDay {
        match self.offset {
            Some(offset) => TimeOfDay::from(Utc::now().with_timezone(&offset).time()),
            None => TimeOfDay::from(Local::now().time()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_offsets_within_a_day() {
        assert!(SystemClock::with_offset_minutes(0).is_some());
        assert!(SystemClock::with_offset_minutes(120).is_some());
        assert!(SystemClock::with_offset_minutes(-300).is_some());
    }

    #[test]
    fn should_reject_offsets_beyond_a_day() {
        assert!(SystemClock::with_offset_minutes(24 * 60).is_none());
        assert!(SystemClock::with_offset_minutes(i32::MAX).is_none());
    }

    #[test]
    fn should_report_current_utc_instant() {
        let before = Utc::now();
        let observed = SystemClock::local().now();
        let after = Utc::now();
        assert!(before <= observed && observed <= after);
    }

    #[test]
    fn should_report_utc_time_of_day_with_zero_offset() {
        let clock = SystemClock::with_offset_minutes(0).unwrap();
        let before = TimeOfDay::from(Utc::now().time());
        let observed = clock.time_of_day();
        let after = TimeOfDay::from(Utc::now().time());
        // a midnight rollover between the samples breaks the ordering
        if before <= after {
            assert!(before <= observed && observed <= after);
        }
    }
}
