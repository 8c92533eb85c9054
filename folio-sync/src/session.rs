//! One operator session: the state holders the edit surface renders, wired to
//! a single remote store and a single notification channel.

use std::sync::Arc;

use folio_core::{Backend, ProjectId};

use crate::catalog::CatalogStore;
use crate::draft::DraftEditor;
use crate::error::MutationError;
use crate::mutation::{ConfirmationGate, DeleteOutcome, MutationCoordinator, Saved};
use crate::notification::NotificationChannel;
use crate::remote::{self, RemoteStore};

#[derive(Debug)]
pub struct EditSession {
    pub notifications: NotificationChannel,
    pub catalog: CatalogStore,
    pub editor: DraftEditor,
    pub coordinator: MutationCoordinator,
}

impl EditSession {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        let notifications = NotificationChannel::new();
        let catalog = CatalogStore::new(remote.clone(), notifications.clone());
        let coordinator = MutationCoordinator::new(remote, catalog.clone(), notifications.clone());
        Self {
            notifications,
            catalog,
            editor: DraftEditor::new(),
            coordinator,
        }
    }

    pub fn connect(backend: &Backend) -> Self {
        Self::new(remote::connect(backend))
    }

    /// Save the open draft.
    pub async fn save(&mut self) -> Result<Saved, MutationError> {
        self.coordinator.save(&mut self.editor).await
    }

    pub async fn delete(
        &self,
        id: &ProjectId,
        gate: &dyn ConfirmationGate,
    ) -> Result<DeleteOutcome, MutationError> {
        self.coordinator.delete(id, gate).await
    }

    /// Open the catalog record `id` in the editor. Returns `false` when the
    /// catalog does not hold it.
    pub fn edit(&mut self, id: &ProjectId) -> bool {
        match self.catalog.find(id) {
            Some(project) => {
                self.editor.open_for_edit(&project);
                true
            }
            None => false,
        }
    }
}
