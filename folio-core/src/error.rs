//! Error types for folio-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ProjectId;

/// Errors from on-disk state: the YAML project file and `config.yaml`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure (permission denied, disk full, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML serialization error (write path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load, with the offending file.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// No record with this identity exists in the project file.
    #[error("project {id} not found in {path}")]
    RecordNotFound { id: ProjectId, path: PathBuf },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.into(),
        source,
    }
}

/// A required field was empty. Raised locally; never reaches a remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("description is required")]
    MissingDescription,
}

/// A list/create/update/delete request that did not succeed.
///
/// The session layer treats every variant the same way (one error
/// notification, no retry); the variants exist for logs and callers that care.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    /// The store has no record with this identity.
    #[error("project {0} does not exist on the remote store")]
    NotFound(ProjectId),

    /// The store answered with a non-success status.
    #[error("remote store rejected the request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never got an answer (connection refused, timeout, I/O).
    #[error("transport error: {0}")]
    Transport(String),

    /// The store answered, but the body was not what the contract promises.
    #[error("malformed response from remote store: {0}")]
    Decode(String),
}

impl RemoteFailure {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteFailure::NotFound(_))
    }
}

impl From<StorageError> for RemoteFailure {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::RecordNotFound { id, .. } => RemoteFailure::NotFound(id),
            other => RemoteFailure::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_remote_not_found() {
        let err = StorageError::RecordNotFound {
            id: ProjectId::from("p-1"),
            path: PathBuf::from("/tmp/projects.yaml"),
        };
        let failure = RemoteFailure::from(err);
        assert_eq!(failure, RemoteFailure::NotFound(ProjectId::from("p-1")));
        assert!(failure.is_not_found());
    }

    #[test]
    fn other_storage_errors_map_to_transport() {
        let failure = RemoteFailure::from(StorageError::HomeNotFound);
        assert!(matches!(failure, RemoteFailure::Transport(ref m) if m.contains("home directory")));
    }
}
