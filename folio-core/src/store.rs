//! Single-file YAML project store.
//!
//! # Storage layout
//!
//! ```text
//! ~/.folio/
//!   config.yaml      (backend selection: mode 0600)
//!   projects.yaml    (default project file: mode 0600)
//! ```
//!
//! The project file holds the whole catalog as one YAML document. Every write
//! replaces it atomically: serialize → `.tmp` sibling → `chmod 0600` → `rename`.
//! A missing file reads as an empty catalog.
//!
//! # API pattern
//!
//! Functions take the project file path explicitly. [`default_store_path_at`]
//! derives the default location from a home directory (tests pass a `TempDir`);
//! [`default_store_path`] uses `dirs::home_dir()`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{io_err, StorageError};
use crate::types::{Project, ProjectFields, ProjectId};

pub const STORE_VERSION: u32 = 1;

/// Root document of the project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: u32,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            projects: vec![],
        }
    }
}

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.folio/`
pub fn folio_root(home: &Path) -> PathBuf {
    home.join(".folio")
}

/// `<home>/.folio/projects.yaml`: pure, no I/O.
pub fn default_store_path_at(home: &Path) -> PathBuf {
    folio_root(home).join("projects.yaml")
}

/// `default_store_path_at` convenience wrapper.
pub fn default_store_path() -> Result<PathBuf, StorageError> {
    Ok(default_store_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 2. Load / save
// ---------------------------------------------------------------------------

/// Read the whole project file. Missing file ⇒ empty catalog.
pub fn load(path: &Path) -> Result<ProjectFile, StorageError> {
    if !path.exists() {
        return Ok(ProjectFile::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|e| StorageError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically replace the project file.
pub fn save(path: &Path, file: &ProjectFile) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let yaml = serde_yaml::to_string(file)?;
    write_atomic(path, yaml.as_bytes())
}

// ---------------------------------------------------------------------------
// 3. Record operations
// ---------------------------------------------------------------------------

/// All records, in stored order.
pub fn list(path: &Path) -> Result<Vec<Project>, StorageError> {
    Ok(load(path)?.projects)
}

/// Append a new record with a fresh UUID v4 identity and `created_at = now`.
pub fn insert(path: &Path, fields: ProjectFields) -> Result<Project, StorageError> {
    let mut file = load(path)?;
    let project = Project {
        id: ProjectId::from(Uuid::new_v4().to_string()),
        fields,
        created_at: Some(Utc::now()),
    };
    file.projects.push(project.clone());
    save(path, &file)?;
    Ok(project)
}

/// Replace every mutable field of the record with identity `id`.
///
/// Returns `StorageError::RecordNotFound` when no such record exists.
pub fn replace(path: &Path, id: &ProjectId, fields: ProjectFields) -> Result<Project, StorageError> {
    let mut file = load(path)?;
    let Some(record) = file.projects.iter_mut().find(|p| &p.id == id) else {
        return Err(not_found(path, id));
    };
    record.fields = fields;
    let updated = record.clone();
    save(path, &file)?;
    Ok(updated)
}

/// Remove the record with identity `id`.
///
/// Returns `StorageError::RecordNotFound` when no such record exists.
pub fn remove(path: &Path, id: &ProjectId) -> Result<(), StorageError> {
    let mut file = load(path)?;
    let before = file.projects.len();
    file.projects.retain(|p| &p.id != id);
    if file.projects.len() == before {
        return Err(not_found(path, id));
    }
    save(path, &file)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn not_found(path: &Path, id: &ProjectId) -> StorageError {
    StorageError::RecordNotFound {
        id: id.clone(),
        path: path.to_path_buf(),
    }
}

pub(crate) fn home() -> Result<PathBuf, StorageError> {
    dirs::home_dir().ok_or(StorageError::HomeNotFound)
}

/// Create `dir` (mode `0700`) if it does not yet exist.
pub(crate) fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    set_dir_permissions(dir)
}

/// `.tmp` sibling in the same directory as the target, so `rename` never crosses filesystems.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    std::fs::write(&tmp_path, bytes).map_err(|e| io_err(&tmp_path, e))?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path).map_err(|e| io_err(path, e))?;
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), StorageError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .map_err(|e| io_err(path, e))
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), StorageError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
