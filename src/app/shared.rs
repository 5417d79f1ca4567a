//! Thread-safe handle around a [`SecurityService`].
//!
//! The sensor rules read the sensor set and then write the alarm status;
//! those steps are not atomic against a concurrent toggle. Every operation
//! therefore runs under one mutex that covers repository reads, rule
//! evaluation, writes and listener fan-out. Cloning the handle shares the
//! same service.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::alarm::{AlarmStatus, ArmingStatus};
use crate::error::Result;
use crate::image::Image;
use crate::sensors::Sensor;

use super::commands::AppCommand;
use super::listeners::{BoxedListener, ListenerId};
use super::ports::{ImageAnalyzer, SecurityRepository};
use super::report::StatusReport;
use super::service::SecurityService;

/// Cloneable, lock-serialised access to one service.
pub struct SharedSecurityService<R, A> {
    inner: Arc<Mutex<SecurityService<R, A>>>,
}

impl<R, A> Clone for SharedSecurityService<R, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: SecurityRepository, A: ImageAnalyzer> SharedSecurityService<R, A> {
    pub fn new(service: SecurityService<R, A>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(service)),
        }
    }

    /// Run `f` with exclusive access to the service.
    ///
    /// A panic in an earlier holder leaves the service usable: all durable
    /// state lives in the repository, which was written call by call.
    pub fn with<T>(&self, f: impl FnOnce(&mut SecurityService<R, A>) -> T) -> T {
        f(&mut self.lock())
    }

    pub fn set_arming_status(&self, arming: ArmingStatus) -> Result<()> {
        self.lock().set_arming_status(arming)
    }

    pub fn change_sensor_activation_status(&self, sensor: &mut Sensor, active: bool) -> Result<()> {
        self.lock().change_sensor_activation_status(sensor, active)
    }

    pub fn process_image(&self, image: &Image) -> Result<bool> {
        self.lock().process_image(image)
    }

    pub fn add_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.lock().add_sensor(sensor)
    }

    pub fn remove_sensor(&self, sensor: &Sensor) -> Result<()> {
        self.lock().remove_sensor(sensor)
    }

    pub fn handle_command(&self, cmd: AppCommand) -> Result<()> {
        self.lock().handle_command(cmd)
    }

    pub fn add_status_listener(&self, listener: BoxedListener) -> ListenerId {
        self.lock().add_status_listener(listener)
    }

    pub fn remove_status_listener(&self, id: ListenerId) -> Option<BoxedListener> {
        self.lock().remove_status_listener(id)
    }

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.lock().alarm_status()
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.lock().arming_status()
    }

    pub fn sensors(&self) -> Result<BTreeSet<Sensor>> {
        self.lock().sensors()
    }

    pub fn status_report(&self) -> Result<StatusReport> {
        self.lock().status_report()
    }

    fn lock(&self) -> MutexGuard<'_, SecurityService<R, A>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
