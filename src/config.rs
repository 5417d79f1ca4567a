//! System configuration parameters
//!
//! Tunables for the alarm controller. Values can be overridden through the
//! [`ConfigPort`](crate::app::ports::ConfigPort) or the command line.

use serde::{Deserialize, Serialize};

/// Sensitivity passed to the image analyzer when nothing else is configured.
pub const DEFAULT_SENSITIVITY_THRESHOLD: f32 = 50.0;

/// Longest accepted subject label, in bytes.
pub const MAX_SUBJECT_LABEL_LEN: usize = 32;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Camera ---
    /// Minimum classifier confidence (0-100%) for a subject detection
    pub sensitivity_threshold: f32,
    /// Label the camera must report for the subject (case-insensitive)
    pub subject_label: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            sensitivity_threshold: DEFAULT_SENSITIVITY_THRESHOLD,
            subject_label: String::from("cat"),
        }
    }
}

impl SystemConfig {
    /// Range-check every field. Stores call this before persisting.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..=100.0).contains(&self.sensitivity_threshold) {
            return Err("sensitivity_threshold must be 0.0–100.0");
        }
        if self.subject_label.trim().is_empty() {
            return Err("subject_label must not be empty");
        }
        if self.subject_label.len() > MAX_SUBJECT_LABEL_LEN {
            return Err("subject_label must be at most 32 bytes");
        }
        Ok(())
    }
}
