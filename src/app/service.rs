//! Security service: the hexagonal core.
//!
//! [`SecurityService`] owns the repository and image analyzer it was built
//! with, plus the listener registry. Each public operation reads the current
//! statuses from the repository, runs the pure rules in
//! [`alarm::rules`](crate::alarm::rules), writes the outcome back and fans
//! out notifications.
//!
//! ```text
//!  sensor edge ──▶ ┌────────────────────────┐ ──▶ SecurityRepository
//!  camera frame ─▶ │    SecurityService     │
//!  arming cmd ───▶ │  rules · listeners     │ ──▶ StatusListener(s)
//!                  └────────────────────────┘
//!                           │
//!                           ▼
//!                     ImageAnalyzer
//! ```
//!
//! The only state kept between calls is whether the last frame showed the
//! subject. Every operation takes `&mut self`, so one call always runs to
//! completion before the next; see [`SharedSecurityService`](super::shared::SharedSecurityService)
//! for multi-threaded callers.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::alarm::{AlarmStatus, ArmingStatus, SensorEdge, rules};
use crate::config::{DEFAULT_SENSITIVITY_THRESHOLD, SystemConfig};
use crate::error::{Error, Result};
use crate::image::Image;
use crate::sensors::{Sensor, SensorType, bounded_name};

use super::commands::AppCommand;
use super::listeners::{BoxedListener, ListenerId, ListenerRegistry};
use super::ports::{ImageAnalyzer, SecurityRepository};
use super::report::StatusReport;

// ───────────────────────────────────────────────────────────────
// SecurityService
// ───────────────────────────────────────────────────────────────

/// The security service applies the alarm rules to incoming events.
pub struct SecurityService<R, A> {
    repository: R,
    analyzer: A,
    listeners: ListenerRegistry,
    /// Confidence threshold handed to the analyzer.
    sensitivity_threshold: f32,
    /// Whether the last processed frame contained the subject.
    subject_detected: bool,
}

impl<R: SecurityRepository, A: ImageAnalyzer> SecurityService<R, A> {
    /// Build a service with the default sensitivity threshold.
    pub fn new(repository: R, analyzer: A) -> Self {
        Self {
            repository,
            analyzer,
            listeners: ListenerRegistry::new(),
            sensitivity_threshold: DEFAULT_SENSITIVITY_THRESHOLD,
            subject_detected: false,
        }
    }

    /// Build a service using the camera settings from `config`.
    pub fn with_config(repository: R, analyzer: A, config: &SystemConfig) -> Self {
        let mut service = Self::new(repository, analyzer);
        service.sensitivity_threshold = config.sensitivity_threshold;
        service
    }

    // ── Arming ────────────────────────────────────────────────

    /// Record a new arming status.
    ///
    /// Disarming always clears the alarm. Arming resets every known sensor
    /// to inactive first, and arming at home while the camera still sees the
    /// subject raises the alarm. The arming status itself is written last.
    pub fn set_arming_status(&mut self, arming: ArmingStatus) -> Result<()> {
        if arming.is_armed() {
            let sensors = self.repository.sensors()?;
            let had_sensors = !sensors.is_empty();
            for mut sensor in sensors {
                sensor.set_active(false);
                self.repository.update_sensor(&sensor)?;
            }
            if had_sensors {
                self.listeners.sensors_changed();
            }
        }

        if let Some(next) = rules::on_arming(arming, self.subject_detected) {
            self.write_alarm_status(next)?;
        }

        self.repository.set_arming_status(arming)?;
        info!("Arming status set to {}", arming);
        Ok(())
    }

    // ── Sensors ───────────────────────────────────────────────

    /// Overwrite a sensor's activation flag and apply the sensor rules.
    ///
    /// The requested edge drives the rules even when the flag already had
    /// that value: re-activating an active sensor while pending escalates.
    pub fn change_sensor_activation_status(
        &mut self,
        sensor: &mut Sensor,
        active: bool,
    ) -> Result<()> {
        let edge = SensorEdge::from_active(active);
        sensor.set_active(active);
        self.repository.update_sensor(sensor)?;

        let current = self.repository.alarm_status()?;
        let arming = self.repository.arming_status()?;
        let all_inactive = self.repository.sensors()?.iter().all(|s| !s.is_active());
        debug!(
            "Sensor '{}' {:?}: alarm={} arming={} all_inactive={}",
            sensor.name(),
            edge,
            current,
            arming,
            all_inactive
        );

        if let Some(next) = rules::on_sensor_edge(current, arming, edge, all_inactive) {
            self.write_alarm_status(next)?;
        }
        self.listeners.sensors_changed();
        Ok(())
    }

    pub fn add_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        self.repository.add_sensor(sensor)?;
        info!("Sensor added: {}", sensor);
        self.listeners.sensors_changed();
        Ok(())
    }

    pub fn remove_sensor(&mut self, sensor: &Sensor) -> Result<()> {
        self.repository.remove_sensor(sensor)?;
        info!("Sensor removed: {} ({})", sensor.name(), sensor.sensor_type());
        self.listeners.sensors_changed();
        Ok(())
    }

    // ── Camera ────────────────────────────────────────────────

    /// Run a frame through the analyzer and apply the camera rules.
    ///
    /// Returns whether the subject was detected. The analyzer's answer is
    /// kept even if applying the rules fails afterwards. Listeners hear about
    /// the detection only when it differs from the previous frame's, after
    /// the rules have run.
    pub fn process_image(&mut self, image: &Image) -> Result<bool> {
        let detected = self
            .analyzer
            .detect_subject(image, self.sensitivity_threshold)?;
        let changed = detected != self.subject_detected;
        self.subject_detected = detected;

        let arming = self.repository.arming_status()?;
        let any_active = self.repository.sensors()?.iter().any(Sensor::is_active);
        if let Some(next) = rules::on_image(arming, detected, any_active) {
            self.write_alarm_status(next)?;
        }

        if changed {
            info!("Subject detected: {}", detected);
            self.listeners.subject_detected_changed(detected);
        }
        Ok(detected)
    }

    // ── Listeners ─────────────────────────────────────────────

    pub fn add_status_listener(&mut self, listener: BoxedListener) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Returns the listener if the handle was registered.
    pub fn remove_status_listener(&mut self, id: ListenerId) -> Option<BoxedListener> {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (panel, camera pipeline, script replay).
    pub fn handle_command(&mut self, cmd: AppCommand) -> Result<()> {
        match cmd {
            AppCommand::SetArming { status } => self.set_arming_status(status),
            AppCommand::AddSensor { name, sensor_type } => {
                self.add_sensor(&Sensor::new(&name, sensor_type))
            }
            AppCommand::RemoveSensor { name, sensor_type } => {
                self.remove_sensor(&Sensor::new(&name, sensor_type))
            }
            AppCommand::ChangeSensor {
                name,
                sensor_type,
                active,
            } => {
                let mut sensor = self.find_sensor(&name, sensor_type)?;
                self.change_sensor_activation_status(&mut sensor, active)
            }
            AppCommand::ProcessImage { image } => self.process_image(&image).map(|_| ()),
            AppCommand::Status => {
                // Reporting is up to the caller; nothing changes here.
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.repository.alarm_status()?)
    }

    pub fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.repository.arming_status()?)
    }

    pub fn sensors(&self) -> Result<BTreeSet<Sensor>> {
        Ok(self.repository.sensors()?)
    }

    /// Whether the last processed frame contained the subject.
    pub fn subject_detected(&self) -> bool {
        self.subject_detected
    }

    pub fn sensitivity_threshold(&self) -> f32 {
        self.sensitivity_threshold
    }

    pub fn status_report(&self) -> Result<StatusReport> {
        Ok(StatusReport {
            alarm_status: self.repository.alarm_status()?,
            arming_status: self.repository.arming_status()?,
            subject_detected: self.subject_detected,
            sensors: self.repository.sensors()?.into_iter().collect(),
        })
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut R {
        &mut self.repository
    }

    pub fn analyzer_mut(&mut self) -> &mut A {
        &mut self.analyzer
    }

    // ── Internal ──────────────────────────────────────────────

    /// Persist an alarm status and tell every listener.
    fn write_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.repository.set_alarm_status(status)?;
        info!("Alarm status -> {}", status);
        self.listeners.alarm_status_changed(status);
        Ok(())
    }

    /// Look up the stored sensor with this identity, flag included.
    fn find_sensor(&self, name: &str, sensor_type: SensorType) -> Result<Sensor> {
        let wanted = Sensor::new(name, sensor_type);
        self.repository
            .sensors()?
            .take(&wanted)
            .ok_or_else(|| Error::UnknownSensor(bounded_name(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryRepository;
    use crate::app::ports::AnalyzerError;

    struct Fixed(bool);

    impl ImageAnalyzer for Fixed {
        fn detect_subject(&mut self, _image: &Image, _threshold: f32) -> core::result::Result<bool, AnalyzerError> {
            Ok(self.0)
        }
    }

    fn armed_service(sensors: &[&str]) -> SecurityService<MemoryRepository, Fixed> {
        let mut repo = MemoryRepository::new();
        for name in sensors {
            repo.add_sensor(&Sensor::new(name, SensorType::Door)).unwrap();
        }
        let mut svc = SecurityService::new(repo, Fixed(false));
        svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        svc
    }

    #[test]
    fn threshold_comes_from_config() {
        let cfg = SystemConfig {
            sensitivity_threshold: 80.0,
            ..Default::default()
        };
        let svc = SecurityService::with_config(MemoryRepository::new(), Fixed(false), &cfg);
        assert!((svc.sensitivity_threshold() - 80.0).abs() < f32::EPSILON);
    }

    #[test]
    fn change_sensor_command_resolves_by_name() {
        let mut svc = armed_service(&["door"]);
        svc.handle_command(AppCommand::ChangeSensor {
            name: "door".into(),
            sensor_type: SensorType::Door,
            active: true,
        })
        .unwrap();
        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
        assert!(svc.sensors().unwrap().iter().all(Sensor::is_active));
    }

    #[test]
    fn change_sensor_command_rejects_unknown_name() {
        let mut svc = armed_service(&["door"]);
        let err = svc
            .handle_command(AppCommand::ChangeSensor {
                name: "attic".into(),
                sensor_type: SensorType::Door,
                active: true,
            })
            .unwrap_err();
        assert!(matches!(err, Error::UnknownSensor(ref n) if n.as_str() == "attic"));
        assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    }

    #[test]
    fn change_sensor_command_matches_type_as_well_as_name() {
        let mut svc = armed_service(&["kitchen"]);
        svc.add_sensor(&Sensor::new("kitchen", SensorType::Window))
            .unwrap();

        svc.handle_command(AppCommand::ChangeSensor {
            name: "kitchen".into(),
            sensor_type: SensorType::Window,
            active: true,
        })
        .unwrap();
        let states: Vec<_> = svc
            .sensors()
            .unwrap()
            .iter()
            .map(|s| (s.sensor_type(), s.is_active()))
            .collect();
        assert_eq!(
            states,
            vec![(SensorType::Door, false), (SensorType::Window, true)]
        );

        let err = svc
            .handle_command(AppCommand::ChangeSensor {
                name: "kitchen".into(),
                sensor_type: SensorType::Motion,
                active: true,
            })
            .unwrap_err();
        assert!(matches!(err, Error::UnknownSensor(_)));
    }

    #[test]
    fn status_command_changes_nothing() {
        let mut svc = armed_service(&["door"]);
        let before = svc.status_report().unwrap();
        svc.handle_command(AppCommand::Status).unwrap();
        assert_eq!(svc.status_report().unwrap(), before);
    }

    #[test]
    fn report_reflects_repository() {
        let mut svc = armed_service(&["a", "b"]);
        let mut a = Sensor::new("a", SensorType::Door);
        svc.change_sensor_activation_status(&mut a, true).unwrap();
        let report = svc.status_report().unwrap();
        assert_eq!(report.arming_status, ArmingStatus::ArmedAway);
        assert_eq!(report.alarm_status, AlarmStatus::PendingAlarm);
        assert_eq!(report.active_sensor_count(), 1);
        assert!(!report.subject_detected);
    }
}
