//! Inbound commands to the security service.
//!
//! These represent actions requested by the outside world (control panel,
//! camera pipeline, scripted replays) that the
//! [`SecurityService`](super::service::SecurityService) interprets and acts
//! upon. Commands are serialisable so they can be replayed from a script of
//! JSON objects, one per line, tagged by a `command` field:
//!
//! ```text
//! {"command":"add_sensor","name":"front door","sensor_type":"DOOR"}
//! {"command":"set_arming","status":"ARMED_HOME"}
//! {"command":"change_sensor","name":"front door","sensor_type":"DOOR","active":true}
//! {"command":"process_image","image":{"width":256,"height":256}}
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::alarm::ArmingStatus;
use crate::image::Image;
use crate::sensors::SensorType;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AppCommand {
    /// Arm or disarm the system.
    SetArming { status: ArmingStatus },

    /// Register a new inactive sensor.
    AddSensor { name: String, sensor_type: SensorType },

    /// Forget a sensor.
    RemoveSensor { name: String, sensor_type: SensorType },

    /// Toggle a known sensor, looked up by name and type.
    ChangeSensor {
        name: String,
        sensor_type: SensorType,
        active: bool,
    },

    /// Run a camera frame through the analyzer.
    ProcessImage { image: Image },

    /// Report the current status.
    Status,
}

/// A script line that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Parse a command script. Blank lines and lines starting with `#` are skipped.
pub fn parse_script(text: &str) -> Result<Vec<AppCommand>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cmd = serde_json::from_str(line).map_err(|e| ScriptError {
            line: idx + 1,
            message: e.to_string(),
        })?;
        commands.push(cmd);
    }
    Ok(commands)
}
