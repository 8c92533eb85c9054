//! Folio core library: project records, validation, errors, config and the
//! on-disk project file.
//!
//! Public API surface:
//! - [`types`]: [`ProjectId`], [`ProjectFields`], [`Project`]
//! - [`error`]: [`StorageError`], [`ValidationError`], [`RemoteFailure`]
//! - [`config`]: backend selection, `~/.folio/config.yaml`
//! - [`store`]: atomic YAML project file

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::{Backend, Config};
pub use error::{RemoteFailure, StorageError, ValidationError};
pub use types::{normalize_tag, Project, ProjectFields, ProjectId};
