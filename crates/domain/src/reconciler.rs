//! Derives the effective actuator command from a control record.
//!
//! The evaluation is a pure function of the record and the time of day.

use serde::{Deserialize, Serialize};

use crate::control::{ControlState, Mode, PowerState};
use crate::time::TimeOfDay;

/// Outcome of a reconciliation at a given time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveCommand {
    pub command: PowerState,
    pub mode: Mode,
    pub evaluated_at: TimeOfDay,
}

/// Compute the ON/OFF command the actuator should apply at `now`.
///
/// Manual mode returns the stored state. Automatic mode returns ON only while
/// `now` is inside the configured window; an automatic record without a
/// complete window yields OFF.
#[must_use]
pub fn effective_command(control: &ControlState, now: TimeOfDay) -> PowerState {
    match control.mode {
        Mode::Manual => control.state,
        Mode::Automatic => match control.window() {
            Some(window) if window.contains(now) => PowerState::On,
            _ => PowerState::Off,
        },
    }
}

/// Evaluate `control` at `now` and keep the inputs alongside the result.
#[must_use]
pub fn reconcile(control: &ControlState, now: TimeOfDay) -> EffectiveCommand {
    EffectiveCommand {
        command: effective_command(control, now),
        mode: control.mode,
        evaluated_at: now,
    }
}
