//! The remote store capability and its adapters.
//!
//! The session layer only ever sees `Arc<dyn RemoteStore>`; which adapter sits
//! behind it is decided once, from [`folio_core::Backend`].

mod file;
mod http;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use folio_core::{Backend, Project, ProjectFields, ProjectId, RemoteFailure};

pub use file::FileRemote;
pub use http::HttpRemote;
pub use memory::MemoryRemote;

pub type RemoteResult<T> = std::result::Result<T, RemoteFailure>;

/// Operations on the `projects` resource.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Every record, in the store's order.
    async fn list(&self) -> RemoteResult<Vec<Project>>;

    /// Persist a new record; the store assigns its identity.
    async fn create(&self, fields: ProjectFields) -> RemoteResult<Project>;

    /// Replace every mutable field. Fails with `NotFound` if `id` is absent.
    async fn update(&self, id: &ProjectId, fields: ProjectFields) -> RemoteResult<()>;

    /// Fails with `NotFound` if `id` is absent.
    async fn delete(&self, id: &ProjectId) -> RemoteResult<()>;
}

/// Build the adapter for a configured backend.
pub fn connect(backend: &Backend) -> Arc<dyn RemoteStore> {
    match backend {
        Backend::Http { endpoint, api_key } => {
            Arc::new(HttpRemote::new(endpoint.clone(), api_key.clone()))
        }
        Backend::File { path } => Arc::new(FileRemote::new(path.clone())),
    }
}

/// Run a blocking adapter call off the async executor.
pub(crate) async fn blocking<T, F>(label: &'static str, f: F) -> RemoteResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RemoteResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| RemoteFailure::Transport(format!("{label} task join error: {err}")))?
}
