//! Outbound status snapshot.
//!
//! Built on demand by [`SecurityService::status_report`](super::service::SecurityService::status_report)
//! for panels, logs and the CLI's final output.

use core::fmt;

use serde::Serialize;

use crate::alarm::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// A point-in-time view of the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub alarm_status: AlarmStatus,
    pub arming_status: ArmingStatus,
    pub subject_detected: bool,
    pub sensors: Vec<Sensor>,
}

impl StatusReport {
    pub fn active_sensor_count(&self) -> usize {
        self.sensors.iter().filter(|s| s.is_active()).count()
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "System Status: {} | {}",
            self.arming_status.description(),
            self.alarm_status.description()
        )?;
        writeln!(
            f,
            "Camera: {}",
            if self.subject_detected { "DANGER - CAT DETECTED" } else { "Cat-free" }
        )?;
        for sensor in &self.sensors {
            writeln!(f, "  {sensor}")?;
        }
        Ok(())
    }
}
