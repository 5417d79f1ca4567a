//! Sensor entities.
//!
//! A [`Sensor`] is identified by its name and [`SensorType`]; the
//! activation flag is state, not identity. Equality, hashing and ordering
//! therefore ignore `active`, so a set of sensors never holds two entries
//! for the same physical device.
//!
//! Names are stored in a fixed-capacity string and truncated on a
//! character boundary at [`SENSOR_NAME_CAP`] bytes.

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Maximum stored length of a sensor name, in bytes.
pub const SENSOR_NAME_CAP: usize = 32;

/// Fixed-capacity sensor name.
pub type SensorName = heapless::String<SENSOR_NAME_CAP>;

/// Kind of physical sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Door,
    Window,
    Motion,
}

impl SensorType {
    pub const ALL: [SensorType; 3] = [Self::Door, Self::Window, Self::Motion];
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Door => write!(f, "DOOR"),
            Self::Window => write!(f, "WINDOW"),
            Self::Motion => write!(f, "MOTION"),
        }
    }
}

/// A door, window or motion sensor known to the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    name: SensorName,
    sensor_type: SensorType,
    active: bool,
}

impl Sensor {
    /// A new, inactive sensor.
    pub fn new(name: &str, sensor_type: SensorType) -> Self {
        Self::restored(name, sensor_type, false)
    }

    /// Rebuild a sensor from previously persisted state.
    pub fn restored(name: &str, sensor_type: SensorType, active: bool) -> Self {
        Self {
            name: bounded_name(name),
            sensor_type,
            active,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Only the security service flips the flag.
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// True when `other` denotes the same physical sensor.
    pub fn same_identity(&self, other: &Sensor) -> bool {
        self.sensor_type == other.sensor_type && self.name == other.name
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.as_str().hash(state);
        self.sensor_type.hash(state);
    }
}

impl PartialOrd for Sensor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Sensor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .as_str()
            .cmp(other.name.as_str())
            .then(self.sensor_type.cmp(&other.sensor_type))
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {}",
            self.name,
            self.sensor_type,
            if self.active { "Active" } else { "Inactive" }
        )
    }
}

/// Truncate `name` to [`SENSOR_NAME_CAP`] bytes on a character boundary.
pub fn bounded_name(name: &str) -> SensorName {
    let mut end = name.len().min(SENSOR_NAME_CAP);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    let mut bounded = SensorName::new();
    // Cannot overflow: `end` is at most the capacity.
    let _ = bounded.push_str(&name[..end]);
    bounded
}
