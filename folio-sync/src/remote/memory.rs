use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use folio_core::{Project, ProjectFields, ProjectId, RemoteFailure};

use super::{RemoteResult, RemoteStore};

/// In-process store. Counts every request it receives and can be switched
/// offline, in which case every call fails with a transport failure.
#[derive(Debug, Default)]
pub struct MemoryRemote {
    records: Mutex<Vec<Project>>,
    next_id: AtomicU64,
    requests: AtomicUsize,
    offline: AtomicBool,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `projects` already stored.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        let store = Self::new();
        store.next_id.store(projects.len() as u64, Ordering::SeqCst);
        *store.records() = projects;
        store
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of list/create/update/delete calls received so far, including failed ones.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Project> {
        self.records().clone()
    }

    fn records(&self) -> MutexGuard<'_, Vec<Project>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> RemoteResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteFailure::Transport("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryRemote {
    async fn list(&self) -> RemoteResult<Vec<Project>> {
        self.begin()?;
        Ok(self.snapshot())
    }

    async fn create(&self, fields: ProjectFields) -> RemoteResult<Project> {
        self.begin()?;
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let project = Project::new(format!("mem-{n}"), fields);
        self.records().push(project.clone());
        Ok(project)
    }

    async fn update(&self, id: &ProjectId, fields: ProjectFields) -> RemoteResult<()> {
        self.begin()?;
        let mut records = self.records();
        let record = records
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| RemoteFailure::NotFound(id.clone()))?;
        record.fields = fields;
        Ok(())
    }

    async fn delete(&self, id: &ProjectId) -> RemoteResult<()> {
        self.begin()?;
        let mut records = self.records();
        let before = records.len();
        records.retain(|p| &p.id != id);
        if records.len() == before {
            return Err(RemoteFailure::NotFound(id.clone()));
        }
        Ok(())
    }
}
