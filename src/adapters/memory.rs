//! In-memory repository adapter.
//!
//! Holds the alarm state in plain fields. Nothing survives the process;
//! use [`StoredRepository`](super::stored::StoredRepository) for that.

use std::collections::BTreeSet;

use crate::alarm::{AlarmStatus, ArmingStatus};
use crate::app::ports::{RepositoryError, SecurityRepository};
use crate::sensors::Sensor;

/// Volatile [`SecurityRepository`].
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: BTreeSet<Sensor>,
}

impl MemoryRepository {
    /// Disarmed, no alarm, no sensors.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecurityRepository for MemoryRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        self.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        self.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError> {
        Ok(self.sensors.clone())
    }

    fn add_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        // `insert` keeps the stored flag of a sensor that is already known.
        self.sensors.insert(sensor.clone());
        Ok(())
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        self.sensors.remove(sensor);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        // `replace` swaps in the new flag; plain `insert` would keep the old value.
        self.sensors.replace(sensor.clone());
        Ok(())
    }
}
