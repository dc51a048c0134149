//! Clock port: the source of "now" for reconciliation and ingestion.

use growbox_domain::time::{TimeOfDay, Timestamp};

/// Provides the current instant and wall-clock time of day.
pub trait Clock {
    /// Current UTC instant.
    fn now(&self) -> Timestamp;

    /// Current wall-clock time of day in the controller's timezone.
    fn time_of_day(&self) -> TimeOfDay;
}
