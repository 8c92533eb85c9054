//! The session's authoritative, ordered sequence of project records.
//!
//! State lives in a `watch` channel: renderers either read the latest
//! [`CatalogSnapshot`] or subscribe to changes. The record sequence is only
//! ever replaced whole, so a reader sees either the old list or the new one.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use folio_core::{Project, ProjectId, RemoteFailure};

use crate::notification::NotificationChannel;
use crate::remote::RemoteStore;

pub const LOAD_FAILED: &str = "Failed to load projects";

/// What a surface renders from.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub records: Arc<[Project]>,
    /// True from the start of a load until it settles.
    pub loading: bool,
}

impl CatalogSnapshot {
    pub fn find(&self, id: &ProjectId) -> Option<&Project> {
        self.records.iter().find(|p| &p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct CatalogStore {
    remote: Arc<dyn RemoteStore>,
    notifications: NotificationChannel,
    state: Arc<watch::Sender<CatalogSnapshot>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("CatalogStore")
            .field("records", &state.records.len())
            .field("loading", &state.loading)
            .finish()
    }
}

impl CatalogStore {
    pub fn new(remote: Arc<dyn RemoteStore>, notifications: NotificationChannel) -> Self {
        let (state, _) = watch::channel(CatalogSnapshot::default());
        Self {
            remote,
            notifications,
            state: Arc::new(state),
        }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn find(&self, id: &ProjectId) -> Option<Project> {
        self.state.borrow().find(id).cloned()
    }

    /// Fetch every record and replace the sequence in one assignment.
    ///
    /// On failure the previous sequence stays and an error notification is
    /// posted. Returns the number of records now held.
    pub async fn load(&self) -> Result<usize, RemoteFailure> {
        self.state.send_modify(|s| s.loading = true);

        match self.remote.list().await {
            Ok(records) => {
                let records = unique_by_identity(records);
                let count = records.len();
                self.state.send_modify(|s| {
                    s.records = records.into();
                    s.loading = false;
                });
                tracing::debug!(count, "catalog loaded");
                Ok(count)
            }
            Err(err) => {
                self.state.send_modify(|s| s.loading = false);
                tracing::warn!(error = %err, "catalog load failed");
                self.notifications.error(LOAD_FAILED);
                Err(err)
            }
        }
    }

    /// Same as [`load`](Self::load); called after every successful mutation.
    pub async fn refresh(&self) -> Result<usize, RemoteFailure> {
        tracing::debug!("refreshing catalog from remote store");
        self.load().await
    }
}

/// Keep the first record for each identity, preserving order.
fn unique_by_identity(records: Vec<Project>) -> Vec<Project> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                tracing::warn!(id = %p.id, "dropping duplicate record from remote list");
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryRemote;
    use folio_core::ProjectFields;

    fn project(id: &str, title: &str) -> Project {
        Project::new(
            id,
            ProjectFields {
                title: title.to_string(),
                description: "d".to_string(),
                ..ProjectFields::default()
            },
        )
    }

    fn store_over(remote: Arc<MemoryRemote>) -> CatalogStore {
        CatalogStore::new(remote, NotificationChannel::new())
    }

    #[tokio::test]
    async fn load_replaces_sequence_and_clears_loading() {
        let remote = Arc::new(MemoryRemote::with_projects(vec![
            project("1", "a"),
            project("2", "b"),
        ]));
        let catalog = store_over(remote);
        assert_eq!(catalog.load().await, Ok(2));
        let snap = catalog.snapshot();
        assert!(!snap.loading);
        assert_eq!(snap.records.len(), 2);
        assert_eq!(catalog.find(&ProjectId::from("2")).map(|p| p.fields.title), Some("b".into()));
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_records_and_notifies() {
        let remote = Arc::new(MemoryRemote::with_projects(vec![project("1", "a")]));
        let notifications = NotificationChannel::new();
        let catalog = CatalogStore::new(remote.clone(), notifications.clone());
        catalog.load().await.expect("first load");

        remote.set_offline(true);
        assert!(catalog.load().await.is_err());

        let snap = catalog.snapshot();
        assert!(!snap.loading);
        assert_eq!(snap.records.len(), 1);
        let shown = notifications.current().expect("error shown");
        assert_eq!(shown.message, LOAD_FAILED);
        assert!(shown.is_error());
    }

    #[tokio::test]
    async fn subscribers_never_see_a_partial_list() {
        let remote = Arc::new(MemoryRemote::with_projects(vec![
            project("1", "a"),
            project("2", "b"),
            project("3", "c"),
        ]));
        let catalog = store_over(remote);
        let mut rx = catalog.subscribe();

        catalog.load().await.expect("load");
        assert!(rx.has_changed().expect("sender alive"));
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.records.len(), 3);
    }

    #[test]
    fn duplicate_identities_are_dropped() {
        let records = unique_by_identity(vec![
            project("1", "first"),
            project("2", "b"),
            project("1", "second"),
        ]);
        let titles: Vec<_> = records.iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["first", "b"]);
    }
}
