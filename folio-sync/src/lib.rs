//! # folio-sync
//!
//! Session state shared by the read and edit surfaces, kept consistent with a
//! remote project store.
//!
//! Leaves first:
//! - [`notification`]: single-slot status message with a cancellable expiry
//! - [`catalog`]: the in-memory record sequence, replaced wholesale on load
//! - [`draft`]: the one in-progress record and its tag input buffer
//! - [`mutation`]: save / delete sequencing and reconciliation
//! - [`remote`]: the [`RemoteStore`] capability and its adapters
//! - [`session`]: [`EditSession`], everything the edit surface needs

pub mod catalog;
pub mod draft;
pub mod error;
pub mod mutation;
pub mod notification;
pub mod remote;
pub mod session;

pub use catalog::{CatalogSnapshot, CatalogStore};
pub use draft::{Draft, DraftEditor, DraftField, DraftMode};
pub use error::MutationError;
pub use mutation::{ConfirmationGate, DeleteOutcome, MutationCoordinator, Saved};
pub use notification::{Notification, NotificationChannel, NotificationKind, NOTIFICATION_TTL};
pub use remote::RemoteStore;
pub use session::EditSession;
