//! Alarm transition rules.
//!
//! Every function here is a total match over its inputs and returns
//! `Some(next)` when the alarm status must be written, or `None` to leave
//! it untouched. No I/O, no state: the [`SecurityService`] reads the inputs
//! from the repository and applies the result.
//!
//! | Trigger        | Inputs                                   | Function          |
//! |----------------|------------------------------------------|-------------------|
//! | Sensor toggled | alarm, arming, edge, all sensors idle    | [`on_sensor_edge`]|
//! | Image analysed | arming, subject seen, any sensor active  | [`on_image`]      |
//! | Arming changed | new arming, subject seen                 | [`on_arming`]     |
//!
//! [`SecurityService`]: crate::app::service::SecurityService

use super::{AlarmStatus, ArmingStatus, SensorEdge};

/// Next alarm status after a sensor edge.
///
/// `all_inactive` is the state of the sensor set *after* the edge has been
/// persisted. Precedence, first match wins:
///
/// 1. Disarmed systems ignore sensors.
/// 2. `Alarm` is sticky against sensor edges.
/// 3. Activation escalates one level.
/// 4. Deactivation clears a pending alarm once every sensor is idle.
pub fn on_sensor_edge(
    current: AlarmStatus,
    arming: ArmingStatus,
    edge: SensorEdge,
    all_inactive: bool,
) -> Option<AlarmStatus> {
    match (arming, current, edge) {
        (ArmingStatus::Disarmed, _, _) => None,
        (_, AlarmStatus::Alarm, _) => None,
        (_, AlarmStatus::NoAlarm, SensorEdge::Activate) => Some(AlarmStatus::PendingAlarm),
        (_, AlarmStatus::PendingAlarm, SensorEdge::Activate) => Some(AlarmStatus::Alarm),
        (_, AlarmStatus::PendingAlarm, SensorEdge::Deactivate) if all_inactive => {
            Some(AlarmStatus::NoAlarm)
        }
        (_, AlarmStatus::PendingAlarm, SensorEdge::Deactivate) => None,
        (_, AlarmStatus::NoAlarm, SensorEdge::Deactivate) => None,
    }
}

/// Next alarm status after the camera reported on a frame.
///
/// Only `ArmedHome` lets the camera raise the alarm. A frame without the
/// subject clears the alarm when no sensor is active, whatever the arming.
pub fn on_image(
    arming: ArmingStatus,
    subject_detected: bool,
    any_sensor_active: bool,
) -> Option<AlarmStatus> {
    match (arming, subject_detected, any_sensor_active) {
        (ArmingStatus::ArmedHome, true, _) => Some(AlarmStatus::Alarm),
        (ArmingStatus::Disarmed | ArmingStatus::ArmedAway, true, _) => None,
        (_, false, false) => Some(AlarmStatus::NoAlarm),
        (_, false, true) => None,
    }
}

/// Alarm status implied by an arming command.
pub fn on_arming(new_arming: ArmingStatus, subject_detected: bool) -> Option<AlarmStatus> {
    match (new_arming, subject_detected) {
        (ArmingStatus::Disarmed, _) => Some(AlarmStatus::NoAlarm),
        (ArmingStatus::ArmedHome, true) => Some(AlarmStatus::Alarm),
        (ArmingStatus::ArmedHome | ArmingStatus::ArmedAway, _) => None,
    }
}
