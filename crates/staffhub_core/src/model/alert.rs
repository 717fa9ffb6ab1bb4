//! Attendance/compliance alerts raised for managers.

use crate::model::{DomainRecord, RecordStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub status: AlertStatus,
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Alert {
    /// Creates an `active` alert.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        severity: AlertSeverity,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            message: String::new(),
            severity,
            status: AlertStatus::Active,
            employee_id: None,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertPatch {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
}

impl DomainRecord for Alert {
    type Patch = AlertPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn patched(&self, patch: &AlertPatch) -> Self {
        let mut next = self.clone();
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(severity) = patch.severity {
            next.severity = severity;
        }
        next
    }
}

/// Alert totals. `critical` counts unresolved critical alerts only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStats {
    pub total: usize,
    pub active: usize,
    pub acknowledged: usize,
    pub resolved: usize,
    pub critical: usize,
}

impl RecordStats<Alert> for AlertStats {
    fn from_records(records: &[Alert]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        for alert in records {
            match alert.status {
                AlertStatus::Active => stats.active += 1,
                AlertStatus::Acknowledged => stats.acknowledged += 1,
                AlertStatus::Resolved => stats.resolved += 1,
            }
            if alert.severity == AlertSeverity::Critical && alert.status != AlertStatus::Resolved {
                stats.critical += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::{Alert, AlertSeverity, AlertStats, AlertStatus};
    use crate::model::RecordStats;

    #[test]
    fn resolved_critical_alerts_are_not_counted_as_critical() {
        let mut resolved = Alert::new("a-1", "Missed clock-in", AlertSeverity::Critical, 10);
        resolved.status = AlertStatus::Resolved;
        let open = Alert::new("a-2", "Overtime limit", AlertSeverity::Critical, 20);
        let minor = Alert::new("a-3", "Late break", AlertSeverity::Low, 30);

        let stats = AlertStats::from_records(&[resolved, open, minor]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.critical, 1);
    }
}
