//! Command scripts replayed through the service, single- and multi-threaded.

use std::thread;

use catpoint::Error;
use catpoint::adapters::label_analyzer::LabelAnalyzer;
use catpoint::adapters::memory::MemoryRepository;
use catpoint::alarm::{AlarmStatus, ArmingStatus};
use catpoint::app::commands::{AppCommand, parse_script};
use catpoint::app::service::SecurityService;
use catpoint::app::shared::SharedSecurityService;
use catpoint::sensors::SensorType;

use super::mocks::RecordingListener;

fn service() -> SecurityService<MemoryRepository, LabelAnalyzer> {
    SecurityService::new(MemoryRepository::new(), LabelAnalyzer::new("cat"))
}

fn replay(svc: &mut SecurityService<MemoryRepository, LabelAnalyzer>, script: &str) {
    for cmd in parse_script(script).unwrap() {
        svc.handle_command(cmd).unwrap();
    }
}

#[test]
fn intrusion_then_disarm() {
    let mut svc = service();
    let listener = RecordingListener::new();
    svc.add_status_listener(Box::new(listener.clone()));

    replay(
        &mut svc,
        r#"
# a door and a window, armed while away
{"command":"add_sensor","name":"front door","sensor_type":"DOOR"}
{"command":"add_sensor","name":"kitchen","sensor_type":"WINDOW"}
{"command":"set_arming","status":"ARMED_AWAY"}
{"command":"change_sensor","name":"front door","sensor_type":"DOOR","active":true}
{"command":"change_sensor","name":"kitchen","sensor_type":"WINDOW","active":true}
"#,
    );
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);

    replay(
        &mut svc,
        r#"{"command":"set_arming","status":"DISARMED"}"#,
    );
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::NoAlarm);
    assert_eq!(
        *listener.alarms.lock().unwrap(),
        vec![
            AlarmStatus::PendingAlarm,
            AlarmStatus::Alarm,
            AlarmStatus::NoAlarm
        ]
    );
}

#[test]
fn cat_at_home_from_script() {
    let mut svc = service();
    replay(
        &mut svc,
        r#"
{"command":"set_arming","status":"ARMED_HOME"}
{"command":"process_image","image":{"width":256,"height":256,"labels":[{"name":"Cat","confidence":50.0}]}}
{"command":"status"}
"#,
    );
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert!(svc.subject_detected());
}

#[test]
fn same_name_sensors_are_toggled_by_type() {
    let mut svc = service();
    replay(
        &mut svc,
        r#"
{"command":"add_sensor","name":"kitchen","sensor_type":"DOOR"}
{"command":"add_sensor","name":"kitchen","sensor_type":"WINDOW"}
{"command":"set_arming","status":"ARMED_AWAY"}
{"command":"change_sensor","name":"kitchen","sensor_type":"WINDOW","active":true}
{"command":"change_sensor","name":"kitchen","sensor_type":"WINDOW","active":false}
{"command":"change_sensor","name":"kitchen","sensor_type":"DOOR","active":true}
"#,
    );
    let states: Vec<_> = svc
        .sensors()
        .unwrap()
        .iter()
        .map(|s| (s.sensor_type(), s.is_active()))
        .collect();
    assert_eq!(
        states,
        vec![(SensorType::Door, true), (SensorType::Window, false)]
    );
    // Window trip staged PENDING and its release cleared it; the door re-staged it.
    assert_eq!(svc.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
}

#[test]
fn unknown_sensor_is_an_error() {
    let mut svc = service();
    let cmd = AppCommand::ChangeSensor {
        name: "garage".into(),
        sensor_type: SensorType::Door,
        active: true,
    };
    assert!(matches!(
        svc.handle_command(cmd),
        Err(Error::UnknownSensor(_))
    ));
}

#[test]
fn shared_service_serialises_commands_from_threads() {
    let shared = SharedSecurityService::new(service());
    let listener = RecordingListener::new();
    shared.add_status_listener(Box::new(listener.clone()));

    for name in ["a", "b", "c", "d"] {
        shared
            .handle_command(AppCommand::AddSensor {
                name: name.into(),
                sensor_type: SensorType::Motion,
            })
            .unwrap();
    }
    shared.set_arming_status(ArmingStatus::ArmedAway).unwrap();

    let handles: Vec<_> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| {
            let svc = shared.clone();
            thread::spawn(move || {
                svc.handle_command(AppCommand::ChangeSensor {
                    name: name.into(),
                    sensor_type: SensorType::Motion,
                    active: true,
                })
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    // First trip stages PENDING, the second escalates; ALARM then sticks.
    assert_eq!(shared.alarm_status().unwrap(), AlarmStatus::Alarm);
    assert_eq!(listener.alarm_count(), 2);
    assert_eq!(shared.status_report().unwrap().active_sensor_count(), 4);
}
