//! Single-slot status message with automatic expiry.
//!
//! Each [`NotificationChannel::notify`] replaces the visible message and
//! schedules a clear [`NOTIFICATION_TTL`] later on the current tokio runtime.
//! Scheduling a new clear aborts the previous one, and every clear is tagged
//! with the generation it was scheduled for, so a timer that already fired can
//! never wipe a newer message.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::time::Duration;

use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    current: Option<Notification>,
}

struct Shared {
    slot: watch::Sender<Slot>,
    expiry: Mutex<Option<JoinHandle<()>>>,
    ttl: Duration,
}

impl Drop for Shared {
    fn drop(&mut self) {
        let expiry = self.expiry.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = expiry.take() {
            pending.abort();
        }
    }
}

/// Cheap to clone; clones share the same slot.
#[derive(Clone)]
pub struct NotificationChannel {
    shared: Arc<Shared>,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("current", &self.current())
            .field("ttl", &self.shared.ttl)
            .finish()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let (slot, _) = watch::channel(Slot::default());
        Self {
            shared: Arc::new(Shared {
                slot,
                expiry: Mutex::new(None),
                ttl,
            }),
        }
    }

    /// Replace whatever is shown and restart the countdown from now.
    ///
    /// Outside a tokio runtime the message is shown but never expires on its
    /// own; [`clear`](Self::clear) or the next `notify` removes it.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        let mut generation = 0;
        let mut superseded = None;
        self.shared.slot.send_modify(|slot| {
            slot.generation += 1;
            generation = slot.generation;
            superseded = slot.current.replace(notification);
        });
        if let Some(previous) = superseded {
            tracing::debug!(previous = %previous.message, "notification superseded");
        }
        self.schedule_clear(generation);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Error);
    }

    /// Empty the slot now and drop any pending countdown.
    pub fn clear(&self) {
        self.cancel_pending();
        self.shared.slot.send_if_modified(|slot| slot.current.take().is_some());
    }

    /// The message currently visible, if any.
    pub fn current(&self) -> Option<Notification> {
        self.shared.slot.borrow().current.clone()
    }

    fn cancel_pending(&self) {
        let mut expiry = self.shared.expiry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = expiry.take() {
            pending.abort();
        }
    }

    fn schedule_clear(&self, generation: u64) {
        let mut expiry = self.shared.expiry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = expiry.take() {
            pending.abort();
        }

        let Ok(runtime) = Handle::try_current() else {
            tracing::debug!("no tokio runtime; notification will not expire on its own");
            return;
        };

        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        let ttl = self.shared.ttl;
        *expiry = Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(shared) = shared.upgrade() {
                clear_generation(&shared.slot, generation);
            }
        }));
    }
}

/// Clear only if the slot still holds the message scheduled as `generation`.
fn clear_generation(slot: &watch::Sender<Slot>, generation: u64) {
    slot.send_if_modified(|slot| {
        if slot.generation == generation && slot.current.is_some() {
            slot.current = None;
            true
        } else {
            false
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const JUST_BEFORE: Duration = Duration::from_millis(2_999);
    const JUST_AFTER: Duration = Duration::from_millis(3_001);

    #[tokio::test(start_paused = true)]
    async fn notification_expires_after_ttl() {
        let channel = NotificationChannel::new();
        channel.success("Project added successfully!");

        sleep(JUST_BEFORE).await;
        assert_eq!(
            channel.current().map(|n| n.message),
            Some("Project added successfully!".to_string())
        );

        sleep(Duration::from_millis(2)).await;
        assert_eq!(channel.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_notification_supersedes_and_restarts_countdown() {
        let channel = NotificationChannel::new();
        channel.success("A");
        sleep(Duration::from_secs(2)).await;
        channel.error("B");

        let shown = channel.current().expect("B visible");
        assert_eq!(shown.message, "B");
        assert_eq!(shown.kind, NotificationKind::Error);

        // A's countdown would have ended here; B must survive it.
        sleep(Duration::from_millis(1_500)).await;
        assert_eq!(channel.current().map(|n| n.message), Some("B".to_string()));

        sleep(Duration::from_millis(1_600)).await;
        assert_eq!(channel.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_generation_never_clears_newer_message() {
        let channel = NotificationChannel::new();
        channel.success("A");
        let stale = channel.shared.slot.borrow().generation;
        channel.error("B");

        clear_generation(&channel.shared.slot, stale);
        assert_eq!(channel.current().map(|n| n.message), Some("B".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_cancels_pending_countdown() {
        let channel = NotificationChannel::new();
        channel.success("A");
        channel.clear();
        assert_eq!(channel.current(), None);

        channel.error("B");
        sleep(JUST_BEFORE).await;
        assert!(channel.current().is_some());
        sleep(JUST_AFTER - JUST_BEFORE).await;
        assert!(channel.current().is_none());
    }

    #[test]
    fn notify_outside_runtime_keeps_message() {
        let channel = NotificationChannel::new();
        channel.error("Failed to load projects");
        let shown = channel.current().expect("visible");
        assert!(shown.is_error());
        channel.clear();
        assert_eq!(channel.current(), None);
    }
}
