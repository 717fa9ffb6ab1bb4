//! Notification inbox store.

use crate::model::notification::{Notification, NotificationPatch, NotificationStats};
use crate::store::domain_store::DomainStore;

pub type NotificationStore = DomainStore<Notification, NotificationStats>;

impl NotificationStore {
    pub fn notifications() -> Self {
        Self::new("notifications")
    }

    pub fn mark_read(&mut self, id: &str) -> bool {
        self.update_record(id, &NotificationPatch { read: Some(true) })
    }

    /// Marks every notification read. Returns how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let unread = self.stats().unread;
        if unread == 0 {
            return 0;
        }
        let records = self
            .records()
            .iter()
            .map(|item| {
                let mut item = item.clone();
                item.read = true;
                item
            })
            .collect();
        self.set_records(records);
        unread
    }

    pub fn unread_count(&self) -> usize {
        self.stats().unread
    }
}
