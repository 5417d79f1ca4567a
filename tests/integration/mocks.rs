//! Shared fakes for integration tests.

use std::sync::{Arc, Mutex};

use catpoint::alarm::AlarmStatus;
use catpoint::app::ports::StatusListener;

/// Listener that records every notification into a shared log.
#[derive(Clone, Default)]
pub struct RecordingListener {
    pub alarms: Arc<Mutex<Vec<AlarmStatus>>>,
    pub subject: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_alarm(&self) -> Option<AlarmStatus> {
        self.alarms.lock().unwrap().last().copied()
    }

    pub fn alarm_count(&self) -> usize {
        self.alarms.lock().unwrap().len()
    }

    pub fn subject_changes(&self) -> Vec<bool> {
        self.subject.lock().unwrap().clone()
    }
}

impl StatusListener for RecordingListener {
    fn alarm_status_changed(&mut self, status: AlarmStatus) {
        self.alarms.lock().unwrap().push(status);
    }

    fn subject_detected_changed(&mut self, detected: bool) {
        self.subject.lock().unwrap().push(detected);
    }
}
