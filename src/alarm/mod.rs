//! Alarm state model.
//!
//! Three small enums describe everything the controller decides about:
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────┐
//! │ ArmingStatus │   │  AlarmStatus  │   │  SensorEdge  │
//! ├──────────────┤   ├───────────────┤   ├──────────────┤
//! │ Disarmed     │   │ NoAlarm       │   │ Activate     │
//! │ ArmedHome    │   │ PendingAlarm  │   │ Deactivate   │
//! │ ArmedAway    │   │ Alarm         │   └──────────────┘
//! └──────────────┘   └───────────────┘
//! ```
//!
//! The transition functions live in [`rules`] and are pure: they take the
//! current statuses and return the next alarm status, if any.

pub mod rules;

use core::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Alarm status
// ---------------------------------------------------------------------------

/// Current escalation level of the alarm.
///
/// Severity grows `NoAlarm < PendingAlarm < Alarm`; the rules never compare
/// numerically, the discriminants only fix the on-disk encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AlarmStatus {
    #[default]
    NoAlarm = 0,
    PendingAlarm = 1,
    Alarm = 2,
}

impl AlarmStatus {
    pub const ALL: [AlarmStatus; 3] = [Self::NoAlarm, Self::PendingAlarm, Self::Alarm];

    /// Short human-readable description, as shown on a status panel.
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoAlarm => "Cool and Good",
            Self::PendingAlarm => "I'm in Danger...",
            Self::Alarm => "Awooga!",
        }
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAlarm => write!(f, "NO_ALARM"),
            Self::PendingAlarm => write!(f, "PENDING_ALARM"),
            Self::Alarm => write!(f, "ALARM"),
        }
    }
}

// ---------------------------------------------------------------------------
// Arming status
// ---------------------------------------------------------------------------

/// Whether the system is disarmed or armed under one of two profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ArmingStatus {
    #[default]
    Disarmed = 0,
    ArmedHome = 1,
    ArmedAway = 2,
}

impl ArmingStatus {
    pub const ALL: [ArmingStatus; 3] = [Self::Disarmed, Self::ArmedHome, Self::ArmedAway];

    /// True for both armed profiles.
    pub const fn is_armed(self) -> bool {
        !matches!(self, Self::Disarmed)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Disarmed => "Disarmed",
            Self::ArmedHome => "Armed - At Home",
            Self::ArmedAway => "Armed - Away",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disarmed => write!(f, "DISARMED"),
            Self::ArmedHome => write!(f, "ARMED_HOME"),
            Self::ArmedAway => write!(f, "ARMED_AWAY"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor edge
// ---------------------------------------------------------------------------

/// The activate/deactivate event applied to one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorEdge {
    Activate,
    Deactivate,
}

impl SensorEdge {
    /// Edge implied by a requested activation flag.
    pub const fn from_active(active: bool) -> Self {
        if active { Self::Activate } else { Self::Deactivate }
    }
}
