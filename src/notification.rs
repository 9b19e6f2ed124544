use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::constants::NOTIFICATION_TTL_SECS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Error,
    Info,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub message_type: MessageType,
}

#[derive(Default)]
struct Slot {
    current: Option<Notification>,
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

impl Slot {
    fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.cancel_expiry();
    }
}

/// Single-slot, self-expiring user message.
///
/// Handles are cheap clones over one shared slot. Every `notify` bumps a
/// generation counter and the expiry task only clears the generation it was
/// started for.
#[derive(Clone)]
pub struct NotificationChannel {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(NOTIFICATION_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn notify(&self, message: impl Into<String>, message_type: MessageType) {
        let message = message.into();
        debug!(?message_type, %message, "notify");

        let mut slot = self.lock();
        slot.cancel_expiry();
        slot.generation += 1;
        slot.current = Some(Notification {
            message,
            message_type,
        });
        slot.expiry = self.schedule_expiry(slot.generation);
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notify(message, MessageType::Success);
    }

    pub fn dismiss(&self) {
        let mut slot = self.lock();
        slot.cancel_expiry();
        slot.generation += 1;
        slot.current = None;
    }

    /// Release the pending timer. Used when the view goes away.
    pub fn close(&self) {
        self.dismiss();
    }

    pub fn current(&self) -> Option<Notification> {
        self.lock().current.clone()
    }

    fn schedule_expiry(&self, generation: u64) -> Option<JoinHandle<()>> {
        let Ok(handle) = Handle::try_current() else {
            warn!("no runtime available, notification will not expire");
            return None;
        };

        let weak: Weak<Mutex<Slot>> = Arc::downgrade(&self.slot);
        let ttl = self.ttl;
        Some(handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            let Some(slot) = weak.upgrade() else {
                return;
            };
            let mut slot = slot.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.generation == generation {
                slot.current = None;
                // this task is finishing, nothing to abort
                slot.expiry = None;
            }
        }))
    }
}
