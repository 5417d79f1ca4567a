//! Log-based status listener adapter.
//!
//! Implements [`StatusListener`] by writing every notification to the
//! `log` facade. A panel or push-notification adapter would implement the
//! same trait.

use log::{info, warn};

use crate::alarm::AlarmStatus;
use crate::app::ports::StatusListener;

/// Adapter that logs every notification.
#[derive(Debug, Default)]
pub struct LogStatusListener;

impl LogStatusListener {
    pub fn new() -> Self {
        Self
    }
}

impl StatusListener for LogStatusListener {
    fn alarm_status_changed(&mut self, status: AlarmStatus) {
        match status {
            AlarmStatus::Alarm => warn!("ALARM | {} ({})", status, status.description()),
            _ => info!("ALARM | {} ({})", status, status.description()),
        }
    }

    fn subject_detected_changed(&mut self, detected: bool) {
        if detected {
            warn!("CAMERA | subject detected");
        } else {
            info!("CAMERA | subject gone");
        }
    }

    fn sensors_changed(&mut self) {
        info!("SENSORS | changed");
    }
}
