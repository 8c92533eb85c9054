//! Error types for folio-sync.

use thiserror::Error;

use folio_core::{RemoteFailure, ValidationError};

/// Why a save or delete did not go through.
///
/// By the time a caller sees one of these, the matching error notification has
/// already been posted (except for [`MutationError::NoDraft`] and
/// [`MutationError::SaveInFlight`], which are refused before anything happens).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    #[error("invalid draft: {0}")]
    Validation(#[from] ValidationError),

    #[error("remote store request failed: {0}")]
    Remote(#[from] RemoteFailure),

    #[error("no project is open in the editor")]
    NoDraft,

    #[error("a save is already in progress")]
    SaveInFlight,
}
