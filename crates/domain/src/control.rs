//! Control state — the persisted desired-state record of the actuator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GrowboxError, ValidationError};
use crate::time::TimeOfDay;
use crate::window::TimeWindow;

/// On/off state of the actuator. Serialized as `"ON"` / `"OFF"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    On,
    #[default]
    Off,
}

impl PowerState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            other => Err(ValidationError::InvalidState(other.to_owned())),
        }
    }
}

/// How the effective command is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Honor the stored state verbatim.
    #[default]
    Manual,
    /// Honor the configured time window.
    Automatic,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Automatic => "automatic",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "automatic" => Ok(Self::Automatic),
            other => Err(ValidationError::InvalidMode(other.to_owned())),
        }
    }
}

/// The singleton control record.
///
/// Every write replaces all four fields; there is no partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControlState {
    pub state: PowerState,
    pub mode: Mode,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
}

impl ControlState {
    /// Create a builder for constructing a [`ControlState`].
    #[must_use]
    pub fn builder() -> ControlStateBuilder {
        ControlStateBuilder::default()
    }

    /// The configured window, when both bounds are set.
    #[must_use]
    pub fn window(&self) -> Option<TimeWindow> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(TimeWindow::new(start, end)),
            _ => None,
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteWindow`] when the mode is
    /// automatic and either bound is missing.
    pub fn validate(&self) -> Result<(), GrowboxError> {
        if self.mode == Mode::Automatic && self.window().is_none() {
            return Err(ValidationError::IncompleteWindow.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`ControlState`].
#[derive(Debug, Default)]
pub struct ControlStateBuilder {
    state: Option<PowerState>,
    mode: Option<Mode>,
    start_time: Option<TimeOfDay>,
    end_time: Option<TimeOfDay>,
}

impl ControlStateBuilder {
    #[must_use]
    pub fn state(mut self, state: PowerState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn start_time(mut self, start_time: TimeOfDay) -> Self {
        self.start_time = Some(start_time);
        self
    }

    #[must_use]
    pub fn end_time(mut self, end_time: TimeOfDay) -> Self {
        self.end_time = Some(end_time);
        self
    }

    #[must_use]
    pub fn window(self, window: TimeWindow) -> Self {
        self.start_time(window.start).end_time(window.end)
    }

    /// Consume the builder, validate, and return a [`ControlState`].
    ///
    /// # Errors
    ///
    /// Returns [`GrowboxError::Validation`] if automatic mode lacks a window.
    pub fn build(self) -> Result<ControlState, GrowboxError> {
        let control = ControlState {
            state: self.state.unwrap_or_default(),
            mode: self.mode.unwrap_or_default(),
            start_time: self.start_time,
            end_time: self.end_time,
        };
        control.validate()?;
        Ok(control)
    }
}

/// Unvalidated control write as submitted by a client.
///
/// Times are `HH:MM:SS` strings; an empty string counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ControlRequest {
    pub state: String,
    pub mode: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl ControlRequest {
    /// Parse and validate into a [`ControlState`].
    ///
    /// # Errors
    ///
    /// Returns [`GrowboxError::Validation`] when the state or mode is outside
    /// its closed set, a time is malformed, or automatic mode lacks a bound.
    pub fn parse(&self) -> Result<ControlState, GrowboxError> {
        let state = PowerState::from_str(&self.state)?;
        let mode = Mode::from_str(&self.mode)?;
        let start_time = parse_optional_time(self.start_time.as_deref())?;
        let end_time = parse_optional_time(self.end_time.as_deref())?;

        let mut builder = ControlState::builder().state(state).mode(mode);
        if let Some(start) = start_time {
            builder = builder.start_time(start);
        }
        if let Some(end) = end_time {
            builder = builder.end_time(end);
        }
        builder.build()
    }
}

fn parse_optional_time(value: Option<&str>) -> Result<Option<TimeOfDay>, ValidationError> {
    value
        .filter(|raw| !raw.is_empty())
        .map(TimeOfDay::parse)
        .transpose()
}
