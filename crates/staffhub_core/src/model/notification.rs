//! Notification records and unread statistics.

use crate::model::{DomainRecord, RecordStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub read: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Notification {
    /// Creates an unread `info` notification.
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: String::new(),
            kind: NotificationKind::Info,
            read: false,
            created_at,
        }
    }
}

/// Partial notification update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationPatch {
    pub read: Option<bool>,
}

impl DomainRecord for Notification {
    type Patch = NotificationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn patched(&self, patch: &NotificationPatch) -> Self {
        let mut next = self.clone();
        if let Some(read) = patch.read {
            next.read = read;
        }
        next
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total: usize,
    pub unread: usize,
}

impl RecordStats<Notification> for NotificationStats {
    fn from_records(records: &[Notification]) -> Self {
        Self {
            total: records.len(),
            unread: records.iter().filter(|item| !item.read).count(),
        }
    }
}
