//! Short-lived status messages for the presentation layer.
//!
//! The store and the session report every outcome through a [`Notifier`].
//! Only one message is live at a time: a new message replaces the previous
//! one and restarts the expiry delay.
//!
//! Expiry is tracked two ways. A deadline is stored with the message, so
//! [`Notifier::current`] never returns a stale message. When a Tokio runtime
//! is available, a timer task also clears the message and publishes `None`
//! to [`Notifier::subscribe`] receivers; notifying again aborts that task.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

/// How long a message stays live unless configured otherwise.
pub const DEFAULT_NOTIFICATION_DELAY: Duration = Duration::from_millis(3000);

/// Whether a message reports success or a rejected operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// The operation completed.
    Success,
    /// The operation was rejected.
    Error,
}

/// A human-readable status message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// The message text.
    pub message: String,
    /// Success or error.
    pub kind: NotificationKind,
    /// When the message was issued.
    pub issued_at: DateTime<Utc>,
}

struct Live {
    notification: Notification,
    deadline: Instant,
}

#[derive(Default)]
struct NotifierState {
    live: Option<Live>,
    expiry: Option<JoinHandle<()>>,
    generation: u64,
}

/// Holds the latest status message and expires it after a delay.
///
/// Cloning a `Notifier` yields another handle to the same message slot.
#[derive(Clone)]
pub struct Notifier {
    state: Arc<Mutex<NotifierState>>,
    sender: Arc<watch::Sender<Option<Notification>>>,
    delay: Duration,
}

impl Notifier {
    /// Creates a notifier whose messages expire after `delay`.
    pub fn new(delay: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            state: Arc::new(Mutex::new(NotifierState::default())),
            sender: Arc::new(sender),
            delay,
        }
    }

    /// The expiry delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Publishes a success message.
    pub fn success(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Success, message);
    }

    /// Publishes an error message.
    pub fn error(&self, message: impl Into<String>) {
        self.notify(NotificationKind::Error, message);
    }

    /// Publishes `message`, replacing the live one and cancelling its expiry.
    pub fn notify(&self, kind: NotificationKind, message: impl Into<String>) {
        let notification = Notification {
            message: message.into(),
            kind,
            issued_at: Utc::now(),
        };
        debug!(kind = ?kind, message = %notification.message, "Notification issued");

        let mut state = self.lock();
        state.generation += 1;
        if let Some(expiry) = state.expiry.take() {
            expiry.abort();
        }
        state.live = Some(Live {
            notification: notification.clone(),
            deadline: Instant::now() + self.delay,
        });
        self.sender.send_replace(Some(notification));

        if let Ok(runtime) = Handle::try_current() {
            let generation = state.generation;
            let shared = Arc::clone(&self.state);
            let sender = Arc::clone(&self.sender);
            let delay = self.delay;
            state.expiry = Some(runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                expire(&shared, &sender, generation);
            }));
        }
    }

    /// The live message, if one has been issued and has not expired.
    pub fn current(&self) -> Option<Notification> {
        let state = self.lock();
        state
            .live
            .as_ref()
            .filter(|live| Instant::now() < live.deadline)
            .map(|live| live.notification.clone())
    }

    /// The live message text, if any.
    pub fn current_message(&self) -> Option<String> {
        self.current().map(|n| n.message)
    }

    /// Dismisses the live message immediately.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.generation += 1;
        if let Some(expiry) = state.expiry.take() {
            expiry.abort();
        }
        state.live = None;
        self.sender.send_replace(None);
    }

    /// Subscribes to message changes, including expiry.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.sender.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, NotifierState> {
        lock_state(&self.state)
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DELAY)
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("delay", &self.delay)
            .field("current", &self.current())
            .finish()
    }
}

fn lock_state(state: &Mutex<NotifierState>) -> MutexGuard<'_, NotifierState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn expire(
    state: &Mutex<NotifierState>,
    sender: &watch::Sender<Option<Notification>>,
    generation: u64,
) {
    let mut state = lock_state(state);
    // A newer message owns the slot.
    if state.generation != generation {
        return;
    }
    state.live = None;
    state.expiry = None;
    sender.send_replace(None);
}
