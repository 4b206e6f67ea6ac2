//! Toast Notifications

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// How long a toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient user-facing message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// FIFO of notifications waiting to be shown
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Mutex<VecDeque<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, notification: Notification) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.push_back(notification);
    }

    /// Take everything queued so far
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A notification on screen, keyed by an id that survives removals
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Toasts currently displayed, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastList {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a notification; returns the id to dismiss it with
    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, notification });
        id
    }

    /// Remove a toast. Unknown or already dismissed ids are ignored.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let queue = NotificationQueue::new();
        queue.push(Notification::success("one"));
        queue.push(Notification::error("two"));

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].message, "one");
        assert!(drained[1].is_error());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_toast_ids_survive_dismissal() {
        let mut list = ToastList::new();
        let first = list.push(Notification::error("same"));
        let second = list.push(Notification::error("same"));
        let third = list.push(Notification::success("other"));
        assert_ne!(first, second);

        assert!(list.dismiss(first));
        let ids: Vec<u64> = list.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![second, third]);

        // ids are never reused
        let fourth = list.push(Notification::error("same"));
        assert!(fourth > third);
    }

    #[test]
    fn test_dismiss_twice_is_noop() {
        let mut list = ToastList::new();
        let id = list.push(Notification::success("saved"));
        assert!(list.dismiss(id));
        assert!(!list.dismiss(id));
        assert!(list.is_empty());
    }
}
