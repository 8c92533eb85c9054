//! Save and delete, sequenced against the remote store and reconciled with the
//! catalog afterward.
//!
//! `save`: validate → create/update → success notification → refresh → reset.
//! `delete`: confirm → delete → success notification → refresh.
//!
//! Every failure posts one error notification and stops; nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use folio_core::ProjectId;

use crate::catalog::CatalogStore;
use crate::draft::{DraftEditor, DraftMode};
use crate::error::MutationError;
use crate::notification::NotificationChannel;
use crate::remote::RemoteStore;

pub const REQUIRED_FIELDS: &str = "Title and description are required";
pub const ADDED: &str = "Project added successfully!";
pub const UPDATED: &str = "Project updated successfully!";
pub const DELETED: &str = "Project deleted successfully!";
pub const SAVE_FAILED: &str = "Failed to save project";
pub const DELETE_FAILED: &str = "Failed to delete project";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this project?";

/// Out-of-band yes/no decision taken before any delete request.
pub trait ConfirmationGate {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// A save the remote store acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Created(ProjectId),
    Updated(ProjectId),
}

impl Saved {
    pub fn id(&self) -> &ProjectId {
        match self {
            Saved::Created(id) | Saved::Updated(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The gate said no; no request was sent.
    Declined,
}

#[derive(Clone)]
pub struct MutationCoordinator {
    remote: Arc<dyn RemoteStore>,
    catalog: CatalogStore,
    notifications: NotificationChannel,
    saving: Arc<AtomicBool>,
}

impl std::fmt::Debug for MutationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutationCoordinator")
            .field("saving", &self.is_saving())
            .finish()
    }
}

impl MutationCoordinator {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        catalog: CatalogStore,
        notifications: NotificationChannel,
    ) -> Self {
        Self {
            remote,
            catalog,
            notifications,
            saving: Arc::new(AtomicBool::new(false)),
        }
    }

    /// True while a save is in flight; the submit control is disabled meanwhile.
    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::SeqCst)
    }

    /// Persist the editor's open draft.
    ///
    /// On success the catalog is refreshed and the editor reset. On any
    /// failure the editor and the catalog are left exactly as they were.
    pub async fn save(&self, editor: &mut DraftEditor) -> Result<Saved, MutationError> {
        let draft = editor.draft().ok_or(MutationError::NoDraft)?;
        let _saving = SavingGuard::acquire(&self.saving)?;

        if let Err(err) = draft.validate() {
            tracing::debug!(error = %err, "draft rejected before save");
            self.notifications.error(REQUIRED_FIELDS);
            return Err(err.into());
        }

        let mode = draft.mode.clone();
        let fields = draft.to_fields();

        let result = match &mode {
            DraftMode::Create => self
                .remote
                .create(fields)
                .await
                .map(|created| Saved::Created(created.id)),
            DraftMode::Editing(id) => self
                .remote
                .update(id, fields)
                .await
                .map(|()| Saved::Updated(id.clone())),
        };

        match result {
            Ok(saved) => {
                tracing::info!(id = %saved.id(), "project saved");
                self.notifications.success(match saved {
                    Saved::Created(_) => ADDED,
                    Saved::Updated(_) => UPDATED,
                });
                // A failed refresh posts its own notification; the save itself stands.
                let _ = self.catalog.refresh().await;
                editor.reset();
                Ok(saved)
            }
            Err(err) => {
                tracing::error!(error = %err, edit_target = ?mode.edit_target(), "save failed");
                self.notifications.error(SAVE_FAILED);
                Err(err.into())
            }
        }
    }

    /// Delete `id` once `gate` agrees.
    ///
    /// The catalog is refreshed only after a successful delete.
    pub async fn delete(
        &self,
        id: &ProjectId,
        gate: &dyn ConfirmationGate,
    ) -> Result<DeleteOutcome, MutationError> {
        if !gate.confirm(DELETE_PROMPT) {
            tracing::debug!(%id, "delete declined");
            return Ok(DeleteOutcome::Declined);
        }

        match self.remote.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "project deleted");
                self.notifications.success(DELETED);
                let _ = self.catalog.refresh().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => {
                tracing::error!(%id, error = %err, not_found = err.is_not_found(), "delete failed");
                self.notifications.error(DELETE_FAILED);
                Err(err.into())
            }
        }
    }
}

/// Holds the `saving` flag for the lifetime of one save.
struct SavingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SavingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, MutationError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| MutationError::SaveInFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for SavingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}
