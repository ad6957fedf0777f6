//! Outbound events: user-facing notifications and parent form updates

use crate::state::{AdditionalField, FieldSnapshot, SelectedItem, StandardFieldId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast-style message for the author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
            created_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Receiver for author-facing notifications
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Update pushed to the owning question after every mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldChange {
    /// The Selection Set of a repository or metadata-standard selector changed
    Selection {
        field: StandardFieldId,
        items: Vec<SelectedItem>,
    },
    /// A standard field's enablement, value or configuration changed
    Field(FieldSnapshot),
    /// The additional free-text fields changed
    AdditionalFields { fields: Vec<AdditionalField> },
}

/// Receiver for parent form state updates
#[cfg_attr(test, mockall::automock)]
pub trait ChangeSink: Send + Sync {
    fn on_change(&self, change: FieldChange);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Notification sink that keeps every message for later display
#[derive(Debug, Default)]
pub struct NotificationQueue {
    items: Mutex<Vec<Notification>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<Notification> {
        lock(&self.items).last().cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.items).is_empty()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *lock(&self.items))
    }

    /// Messages currently queued, oldest first
    pub fn messages(&self) -> Vec<String> {
        lock(&self.items).iter().map(|n| n.message.clone()).collect()
    }
}

impl NotificationSink for NotificationQueue {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::debug!("notify: {}", notification.message),
            NotificationKind::Error => tracing::warn!("notify: {}", notification.message),
        }
        lock(&self.items).push(notification);
    }
}

/// Change sink that records every update in order
#[derive(Debug, Default)]
pub struct ChangeLog {
    changes: Mutex<Vec<FieldChange>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<FieldChange> {
        lock(&self.changes).last().cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.changes).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.changes).is_empty()
    }

    pub fn drain(&self) -> Vec<FieldChange> {
        std::mem::take(&mut *lock(&self.changes))
    }
}

impl ChangeSink for ChangeLog {
    fn on_change(&self, change: FieldChange) {
        lock(&self.changes).push(change);
    }
}
