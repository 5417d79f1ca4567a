//! Alarm state persisted through a directory store survives a restart.

use catpoint::adapters::label_analyzer::LabelAnalyzer;
use catpoint::adapters::store::DirectoryStore;
use catpoint::adapters::stored::{ALARM_KEY, STATE_NAMESPACE, StoredRepository};
use catpoint::alarm::{AlarmStatus, ArmingStatus};
use catpoint::app::ports::{ConfigPort, RepositoryError, StoragePort};
use catpoint::app::service::SecurityService;
use catpoint::config::SystemConfig;
use catpoint::image::Image;
use catpoint::sensors::{Sensor, SensorType};

use super::mocks::RecordingListener;

type Service = SecurityService<StoredRepository<DirectoryStore>, LabelAnalyzer>;

fn boot(dir: &std::path::Path) -> Service {
    let store = DirectoryStore::open(dir).unwrap();
    let config = store.load().unwrap();
    let repo = StoredRepository::open(store).unwrap();
    SecurityService::with_config(repo, LabelAnalyzer::from_config(&config), &config)
}

#[test]
fn first_boot_is_disarmed_and_quiet() {
    let dir = tempfile::tempdir().unwrap();
    let svc = boot(dir.path());
    assert_eq!(svc.arming_status().unwrap(), ArmingStatus::Disarmed);
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    assert!(svc.sensors().unwrap().is_empty());
}

#[test]
fn pending_alarm_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut svc = boot(dir.path());
        svc.add_sensor(&Sensor::new("front door", SensorType::Door))
            .unwrap();
        svc.add_sensor(&Sensor::new("hall", SensorType::Motion))
            .unwrap();
        svc.set_arming_status(ArmingStatus::ArmedAway).unwrap();
        let mut door = Sensor::new("front door", SensorType::Door);
        svc.change_sensor_activation_status(&mut door, true)
            .unwrap();
    }

    let mut svc = boot(dir.path());
    assert_eq!(svc.arming_status().unwrap(), ArmingStatus::ArmedAway);
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    assert_eq!(svc.status_report().unwrap().active_sensor_count(), 1);

    // A second trip after restart escalates as if nothing happened.
    let mut hall = Sensor::new("hall", SensorType::Motion);
    svc.change_sensor_activation_status(&mut hall, true)
        .unwrap();
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
}

#[test]
fn camera_settings_come_from_stored_config() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = DirectoryStore::open(dir.path()).unwrap();
        store
            .save(&SystemConfig {
                sensitivity_threshold: 90.0,
                subject_label: "dog".into(),
            })
            .unwrap();
    }

    let mut svc = boot(dir.path());
    svc.set_arming_status(ArmingStatus::ArmedHome).unwrap();
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    let weak_dog = Image::blank(64, 64).with_label("dog", 80.0);
    assert!(!svc.process_image(&weak_dog).unwrap());

    let cat = Image::blank(64, 64).with_label("cat", 99.0);
    assert!(!svc.process_image(&cat).unwrap());

    let dog = Image::blank(64, 64).with_label("Dog", 95.0);
    assert!(svc.process_image(&dog).unwrap());
    assert_eq!(listener.last_alarm(), Some(AlarmStatus::Alarm));
    assert_eq!(listener.subject_changes(), vec![true]);
}

#[test]
fn corrupted_state_refuses_to_boot() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = DirectoryStore::open(dir.path()).unwrap();
    store.write(STATE_NAMESPACE, ALARM_KEY, &[0x09]).unwrap();

    let err = StoredRepository::open(store).err().unwrap();
    assert_eq!(err, RepositoryError::Corrupted(ALARM_KEY));
}
