//! Manager alert store.

use crate::model::alert::{Alert, AlertPatch, AlertSeverity, AlertStats, AlertStatus};
use crate::store::domain_store::DomainStore;

pub type AlertStore = DomainStore<Alert, AlertStats>;

impl AlertStore {
    pub fn alerts() -> Self {
        Self::new("alerts")
    }

    /// Acknowledges an active alert. Resolved alerts stay resolved.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        match self.get(id).map(|alert| alert.status) {
            Some(AlertStatus::Active) => self.update_record(
                id,
                &AlertPatch {
                    status: Some(AlertStatus::Acknowledged),
                    ..AlertPatch::default()
                },
            ),
            _ => false,
        }
    }

    pub fn resolve(&mut self, id: &str) -> bool {
        self.update_record(
            id,
            &AlertPatch {
                status: Some(AlertStatus::Resolved),
                ..AlertPatch::default()
            },
        )
    }

    /// Unresolved alerts at or above `severity`, most severe first.
    pub fn open_at_least(&self, severity: AlertSeverity) -> Vec<&Alert> {
        let mut open: Vec<&Alert> = self
            .records()
            .iter()
            .filter(|alert| alert.status != AlertStatus::Resolved && alert.severity >= severity)
            .collect();
        open.sort_by(|a, b| b.severity.cmp(&a.severity).then(a.created_at.cmp(&b.created_at)));
        open
    }
}

#[cfg(test)]
mod tests {
    use super::AlertStore;
    use crate::model::alert::{Alert, AlertSeverity, AlertStatus};

    fn store() -> AlertStore {
        let mut store = AlertStore::alerts();
        store.set_records(vec![
            Alert::new("a-1", "Late arrival", AlertSeverity::Medium, 10),
            Alert::new("a-2", "Missing certification", AlertSeverity::Critical, 20),
            Alert::new("a-3", "Overtime", AlertSeverity::High, 5),
        ]);
        store
    }

    #[test]
    fn acknowledge_then_resolve_updates_stats() {
        let mut store = store();
        assert!(store.acknowledge("a-2"));
        assert_eq!(store.stats().acknowledged, 1);
        assert_eq!(store.stats().critical, 1);

        assert!(store.resolve("a-2"));
        assert_eq!(store.stats().resolved, 1);
        assert_eq!(store.stats().critical, 0);
        assert!(!store.acknowledge("a-2"));
        assert_eq!(store.get("a-2").map(|a| a.status), Some(AlertStatus::Resolved));
    }

    #[test]
    fn open_alerts_are_ordered_by_severity() {
        let store = store();
        let ids: Vec<&str> = store
            .open_at_least(AlertSeverity::Medium)
            .iter()
            .map(|alert| alert.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a-2", "a-3", "a-1"]);
    }
}
