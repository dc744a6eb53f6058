//! Configuration file
//!
//! A single JSON document; every field has a default, so `{}` is a valid
//! config and a missing file means "all defaults".
//!
//! ```json
//! {
//!   "server": { "host": "127.0.0.1", "port": 8080, "cors_origins": [] },
//!   "storage": { "backend": "file", "data_dir": "./data", "key": "zippy-packages" }
//! }
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::package::{BlobPackageStore, PackageStore, DEFAULT_STORAGE_KEY};
use crate::storage::{check_key, LocalBlobStore, MemoryBlobStore};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Listen address and browser access for `zippy serve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins the package form may be served from. Empty allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origins() -> Vec<String> {
    ["http://localhost:3000", "http://127.0.0.1:3000"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured origins as header values, `None` when any origin is allowed
    pub fn allowed_origins(&self) -> Result<Option<Vec<HeaderValue>>, ConfigError> {
        if self.cors_origins.is_empty() {
            return Ok(None);
        }
        self.cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ConfigError::Invalid(format!("server.cors_origins: bad origin {:?}", origin))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Where packages are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// `<data_dir>/<key>.json`
    #[default]
    File,
    /// Process memory, lost on exit
    Memory,
}

/// Package storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,

    /// Directory for the file backend (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Blob key holding the collection (default: "zippy-packages")
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::default(),
            data_dir: default_data_dir(),
            key: default_key(),
        }
    }
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self {
            backend: StorageBackendKind::Memory,
            ..Default::default()
        }
    }

    /// Construct the process-wide package store.
    pub fn open_store(&self) -> Arc<dyn PackageStore> {
        match self.backend {
            StorageBackendKind::File => Arc::new(BlobPackageStore::with_key(
                LocalBlobStore::new(&self.data_dir),
                self.key.clone(),
            )),
            StorageBackendKind::Memory => Arc::new(BlobPackageStore::with_key(
                MemoryBlobStore::new(),
                self.key.clone(),
            )),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load and validate a config file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        };

        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.backend == StorageBackendKind::File && self.storage.data_dir.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.data_dir must not be empty for the file backend".to_string(),
            ));
        }

        check_key(&self.storage.key)
            .map_err(|e| ConfigError::Invalid(format!("storage.key: {}", e)))?;

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".to_string()));
        }
        self.server.allowed_origins()?;

        Ok(())
    }
}
