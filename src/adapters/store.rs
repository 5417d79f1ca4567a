//! Key/value storage adapters.
//!
//! Implements both [`StoragePort`] and [`ConfigPort`] for two backends:
//!
//! - [`MemoryStore`]: a `HashMap`, for tests and throwaway runs.
//! - [`DirectoryStore`]: one file per key under `<root>/<namespace>/`.
//!   Writes go to a temporary file that is then renamed over the target,
//!   so a reader sees the old blob or the new one, never half of either.
//!
//! Configuration lives under namespace `catpoint`, key `syscfg`, encoded
//! with `postcard`. Every field is range-checked before it is persisted.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort, StorageError, StoragePort};
use crate::config::SystemConfig;

pub const CONFIG_NAMESPACE: &str = "catpoint";
const CONFIG_KEY: &str = "syscfg";

/// Namespaces and keys become path components, so keep them tame.
fn validate_key(part: &str) -> Result<(), StorageError> {
    let ok = !part.is_empty()
        && part.len() <= 64
        && part
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if ok { Ok(()) } else { Err(StorageError::InvalidKey) }
}

fn load_config(store: &impl StoragePort) -> Result<SystemConfig, ConfigError> {
    match store.read(CONFIG_NAMESPACE, CONFIG_KEY) {
        Ok(bytes) => {
            let cfg: SystemConfig =
                postcard::from_bytes(&bytes).map_err(|_| ConfigError::Corrupted)?;
            info!("Store: loaded config ({} bytes)", bytes.len());
            Ok(cfg)
        }
        Err(StorageError::NotFound) => {
            info!("Store: no stored config, using defaults");
            Ok(SystemConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn save_config(store: &mut impl StoragePort, config: &SystemConfig) -> Result<(), ConfigError> {
    config.validate().map_err(ConfigError::ValidationFailed)?;
    let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::Corrupted)?;
    store.write(CONFIG_NAMESPACE, CONFIG_KEY, &bytes)?;
    info!("Store: config saved");
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// MemoryStore
// ───────────────────────────────────────────────────────────────

/// Volatile key/value store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn composite_key(namespace: &str, key: &str) -> Result<String, StorageError> {
        validate_key(namespace)?;
        validate_key(key)?;
        Ok(format!("{}::{}", namespace, key))
    }
}

impl StoragePort for MemoryStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let k = Self::composite_key(namespace, key)?;
        self.entries.get(&k).cloned().ok_or(StorageError::NotFound)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let k = Self::composite_key(namespace, key)?;
        self.entries.insert(k, data.to_vec());
        Ok(())
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let k = Self::composite_key(namespace, key)?;
        self.entries.remove(&k);
        Ok(())
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        Self::composite_key(namespace, key).is_ok_and(|k| self.entries.contains_key(&k))
    }
}

impl ConfigPort for MemoryStore {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        load_config(self)
    }

    fn save(&mut self, config: &SystemConfig) -> Result<(), ConfigError> {
        save_config(self, config)
    }
}

// ───────────────────────────────────────────────────────────────
// DirectoryStore
// ───────────────────────────────────────────────────────────────

/// File-backed key/value store rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Open (and create if needed) the store at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            warn!("Store: cannot create {}: {}", root.display(), e);
            StorageError::IoError
        })?;
        info!("Store: directory backend at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, namespace: &str, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(namespace)?;
        validate_key(key)?;
        Ok(self.root.join(namespace).join(key))
    }
}

fn map_io(e: &std::io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::NotFound => StorageError::NotFound,
        ErrorKind::StorageFull => StorageError::Full,
        _ => StorageError::IoError,
    }
}

impl StoragePort for DirectoryStore {
    fn read(&self, namespace: &str, key: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path(namespace, key)?;
        fs::read(&path).map_err(|e| map_io(&e))
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path(namespace, key)?;
        let dir = self.root.join(namespace);
        fs::create_dir_all(&dir).map_err(|e| map_io(&e))?;

        let tmp = dir.join(format!(".{key}.tmp"));
        fs::write(&tmp, data).map_err(|e| {
            warn!("Store: write {} failed: {}", tmp.display(), e);
            map_io(&e)
        })?;
        fs::rename(&tmp, &path).map_err(|e| {
            warn!("Store: commit {} failed: {}", path.display(), e);
            map_io(&e)
        })
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        let path = self.path(namespace, key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(&e)),
        }
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.path(namespace, key).is_ok_and(|p| p.is_file())
    }
}

impl ConfigPort for DirectoryStore {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        load_config(self)
    }

    fn save(&mut self, config: &SystemConfig) -> Result<(), ConfigError> {
        save_config(self, config)
    }
}
