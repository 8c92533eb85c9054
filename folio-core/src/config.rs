//! Backend selection: which remote store a session talks to.
//!
//! Resolution order, highest first:
//! 1. explicit overrides (CLI flags)
//! 2. environment: `FOLIO_ENDPOINT` (+ `FOLIO_API_KEY`), `FOLIO_STORE`
//! 3. `<home>/.folio/config.yaml`
//! 4. default: file backend at `<home>/.folio/projects.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, StorageError};
use crate::store::{default_store_path_at, ensure_dir, folio_root, home, write_atomic};

pub const ENV_ENDPOINT: &str = "FOLIO_ENDPOINT";
pub const ENV_API_KEY: &str = "FOLIO_API_KEY";
pub const ENV_STORE: &str = "FOLIO_STORE";

/// Where project records live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Backend {
    /// REST endpoint exposing the `projects` resource.
    Http {
        endpoint: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        api_key: Option<String>,
    },
    /// Local YAML project file.
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub backend: Backend,
}

impl Config {
    /// The configuration used when no `config.yaml` exists.
    pub fn default_at(home: &Path) -> Self {
        Self {
            backend: Backend::File {
                path: default_store_path_at(home),
            },
        }
    }

    /// Apply environment overrides. `lookup` is `std::env::var(..).ok()` in
    /// production; tests pass a closure over a map.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(endpoint) = non_empty(ENV_ENDPOINT) {
            self.backend = Backend::Http {
                endpoint,
                api_key: non_empty(ENV_API_KEY),
            };
        } else if let Some(path) = non_empty(ENV_STORE) {
            self.backend = Backend::File {
                path: PathBuf::from(path),
            };
        }
        self
    }
}

/// `<home>/.folio/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    folio_root(home).join("config.yaml")
}

/// Load `config.yaml`, falling back to [`Config::default_at`] when absent.
pub fn load_at(home: &Path) -> Result<Config, StorageError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default_at(home));
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| StorageError::Parse { path, source: e })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, StorageError> {
    load_at(&home()?)
}

/// Atomically write `config.yaml` (dir 0700, file 0600).
pub fn save_at(home: &Path, config: &Config) -> Result<PathBuf, StorageError> {
    ensure_dir(&folio_root(home))?;
    let path = config_path_at(home);
    let yaml = serde_yaml::to_string(config)?;
    write_atomic(&path, yaml.as_bytes())?;
    Ok(path)
}

/// `save_at` convenience wrapper.
pub fn save(config: &Config) -> Result<PathBuf, StorageError> {
    save_at(&home()?, config)
}
