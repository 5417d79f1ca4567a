//! Storage-backed repository adapter.
//!
//! [`StoredRepository`] keeps the alarm state in memory and writes every
//! change through to a [`StoragePort`], one key per field:
//!
//! | Key       | Value (postcard)   | Absent on first boot |
//! |-----------|--------------------|----------------------|
//! | `alarm`   | `AlarmStatus`      | `NoAlarm`            |
//! | `arming`  | `ArmingStatus`     | `Disarmed`           |
//! | `sensors` | `Vec<Sensor>`      | empty                |
//!
//! A write reaches the store before the in-memory copy changes, so a
//! failed write leaves both sides at the last persisted value.

use std::collections::BTreeSet;

use log::{info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::alarm::{AlarmStatus, ArmingStatus};
use crate::app::ports::{RepositoryError, SecurityRepository, StorageError, StoragePort};
use crate::sensors::Sensor;

pub const STATE_NAMESPACE: &str = "catpoint";
pub const ALARM_KEY: &str = "alarm";
pub const ARMING_KEY: &str = "arming";
pub const SENSORS_KEY: &str = "sensors";

/// Write-through [`SecurityRepository`] over any [`StoragePort`].
pub struct StoredRepository<S> {
    store: S,
    alarm_status: AlarmStatus,
    arming_status: ArmingStatus,
    sensors: BTreeSet<Sensor>,
}

impl<S: StoragePort> StoredRepository<S> {
    /// Load the persisted state from `store`, defaulting missing keys.
    pub fn open(store: S) -> Result<Self, RepositoryError> {
        let alarm_status = read_record(&store, ALARM_KEY)?.unwrap_or_default();
        let arming_status = read_record(&store, ARMING_KEY)?.unwrap_or_default();
        let sensors: Vec<Sensor> = read_record(&store, SENSORS_KEY)?.unwrap_or_default();
        info!(
            "StoredRepository: {} / {} with {} sensor(s)",
            arming_status,
            alarm_status,
            sensors.len()
        );
        Ok(Self {
            store,
            alarm_status,
            arming_status,
            sensors: sensors.into_iter().collect(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist_sensors(&mut self, sensors: BTreeSet<Sensor>) -> Result<(), RepositoryError> {
        let list: Vec<&Sensor> = sensors.iter().collect();
        write_record(&mut self.store, SENSORS_KEY, &list)?;
        self.sensors = sensors;
        Ok(())
    }
}

fn read_record<T: DeserializeOwned>(
    store: &impl StoragePort,
    key: &'static str,
) -> Result<Option<T>, RepositoryError> {
    match store.read(STATE_NAMESPACE, key) {
        Ok(bytes) => postcard::from_bytes(&bytes).map(Some).map_err(|_| {
            warn!("StoredRepository: record '{}' failed to decode", key);
            RepositoryError::Corrupted(key)
        }),
        Err(StorageError::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_record<T: Serialize + ?Sized>(
    store: &mut impl StoragePort,
    key: &'static str,
    value: &T,
) -> Result<(), RepositoryError> {
    let bytes = postcard::to_allocvec(value).map_err(|_| RepositoryError::Corrupted(key))?;
    store.write(STATE_NAMESPACE, key, &bytes)?;
    Ok(())
}

impl<S: StoragePort> SecurityRepository for StoredRepository<S> {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError> {
        Ok(self.alarm_status)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError> {
        write_record(&mut self.store, ALARM_KEY, &status)?;
        self.alarm_status = status;
        Ok(())
    }

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError> {
        Ok(self.arming_status)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError> {
        write_record(&mut self.store, ARMING_KEY, &status)?;
        self.arming_status = status;
        Ok(())
    }

    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError> {
        Ok(self.sensors.clone())
    }

    fn add_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        if self.sensors.contains(sensor) {
            return Ok(());
        }
        let mut next = self.sensors.clone();
        next.insert(sensor.clone());
        self.persist_sensors(next)
    }

    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        let mut next = self.sensors.clone();
        if !next.remove(sensor) {
            return Ok(());
        }
        self.persist_sensors(next)
    }

    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError> {
        let mut next = self.sensors.clone();
        next.replace(sensor.clone());
        self.persist_sensors(next)
    }
}
