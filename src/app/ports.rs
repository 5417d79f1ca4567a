//! Port traits: the hexagonal boundary between the alarm rules and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SecurityService (domain)
//! ```
//!
//! Driven adapters (repository, camera analyzer, listeners, storage)
//! implement these traits. The [`SecurityService`](super::service::SecurityService)
//! owns its repository and analyzer through generics and holds listeners as
//! trait objects, so the domain core never touches storage or a camera
//! directly.
//!
//! All port errors are typed; the service propagates them untouched.

use std::collections::BTreeSet;

use crate::alarm::{AlarmStatus, ArmingStatus};
use crate::config::SystemConfig;
use crate::image::Image;
use crate::sensors::Sensor;

// ───────────────────────────────────────────────────────────────
// Repository port (driven adapter: domain ↔ persisted alarm state)
// ───────────────────────────────────────────────────────────────

/// Single source of truth for alarm status, arming status and sensors.
///
/// The service re-reads through this port before every decision and never
/// caches what it gets back.
pub trait SecurityRepository {
    fn alarm_status(&self) -> Result<AlarmStatus, RepositoryError>;

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<(), RepositoryError>;

    fn arming_status(&self) -> Result<ArmingStatus, RepositoryError>;

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<(), RepositoryError>;

    /// Every known sensor, ordered by identity.
    fn sensors(&self) -> Result<BTreeSet<Sensor>, RepositoryError>;

    /// Insert a sensor. A sensor with the same identity is left as stored,
    /// activation flag included.
    fn add_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;

    /// Remove the sensor with the same identity. Absent sensors are ignored.
    fn remove_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;

    /// Persist a sensor's activation flag (upsert by identity).
    fn update_sensor(&mut self, sensor: &Sensor) -> Result<(), RepositoryError>;
}

// ───────────────────────────────────────────────────────────────
// Image analyzer port (driven adapter: domain → recognition backend)
// ───────────────────────────────────────────────────────────────

/// Recognition backend deciding whether a frame shows the monitored subject.
pub trait ImageAnalyzer {
    /// `threshold` is the minimum confidence in percent (0-100).
    fn detect_subject(&mut self, image: &Image, threshold: f32) -> Result<bool, AnalyzerError>;
}

// ───────────────────────────────────────────────────────────────
// Status listener port (driven adapter: domain → panels / telemetry)
// ───────────────────────────────────────────────────────────────

/// Observer notified synchronously by the service.
pub trait StatusListener {
    /// The service wrote a new alarm status.
    fn alarm_status_changed(&mut self, status: AlarmStatus);

    /// The camera started or stopped seeing the subject.
    fn subject_detected_changed(&mut self, detected: bool);

    /// A sensor was added, removed or toggled.
    fn sensors_changed(&mut self) {}
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting and
/// reject invalid ranges with [`ConfigError::ValidationFailed`] instead of
/// clamping them.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&mut self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ key/value blobs)
// ───────────────────────────────────────────────────────────────

/// Namespaced key/value blob storage.
///
/// - Keys are namespaced to prevent collisions between subsystems.
/// - A write either stores the whole blob or fails; readers never see a
///   partial value.
pub trait StoragePort {
    /// Read a value.
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`SecurityRepository`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store could not be reached.
    Unavailable,
    /// A stored record failed to decode. Carries the record key.
    Corrupted(&'static str),
    /// The backing storage port failed.
    Storage(StorageError),
}

/// Errors from [`ImageAnalyzer`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerError {
    /// Recognition backend unreachable.
    Unavailable,
    /// The backend gave up waiting for a result.
    Timeout,
    /// The frame could not be processed (e.g. zero-sized).
    InvalidImage,
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// The underlying storage failed.
    Storage(StorageError),
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Namespace or key contains characters the backend cannot store.
    InvalidKey,
    /// Storage is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "repository unavailable"),
            Self::Corrupted(key) => write!(f, "stored record '{}' is corrupted", key),
            Self::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl core::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "image analyzer unavailable"),
            Self::Timeout => write!(f, "image analyzer timed out"),
            Self::InvalidImage => write!(f, "invalid image"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::InvalidKey => write!(f, "invalid namespace or key"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for RepositoryError {}
impl std::error::Error for AnalyzerError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StorageError {}

impl From<StorageError> for RepositoryError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
