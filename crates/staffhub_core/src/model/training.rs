//! Training sessions offered to employees.

use crate::model::{DomainRecord, RecordStats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TrainingStatus,
    /// Unix epoch milliseconds.
    pub starts_at: i64,
    pub duration_minutes: u32,
    pub enrolled: u32,
    pub capacity: u32,
}

impl TrainingSession {
    /// Creates an empty `scheduled` session.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        starts_at: i64,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TrainingStatus::Scheduled,
            starts_at,
            duration_minutes: 60,
            enrolled: 0,
            capacity,
        }
    }

    pub fn has_open_seat(&self) -> bool {
        self.enrolled < self.capacity
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingPatch {
    pub status: Option<TrainingStatus>,
    pub enrolled: Option<u32>,
}

impl DomainRecord for TrainingSession {
    type Patch = TrainingPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn patched(&self, patch: &TrainingPatch) -> Self {
        let mut next = self.clone();
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(enrolled) = patch.enrolled {
            next.enrolled = enrolled;
        }
        next
    }
}

/// Training totals. `completion_rate` is completed / non-cancelled, 0.0 when empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingStats {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub total_enrolled: u64,
    pub completion_rate: f64,
}

impl RecordStats<TrainingSession> for TrainingStats {
    fn from_records(records: &[TrainingSession]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        for session in records {
            match session.status {
                TrainingStatus::Scheduled => stats.scheduled += 1,
                TrainingStatus::InProgress => stats.in_progress += 1,
                TrainingStatus::Completed => stats.completed += 1,
                TrainingStatus::Cancelled => stats.cancelled += 1,
            }
            stats.total_enrolled += u64::from(session.enrolled);
        }

        let countable = stats.total - stats.cancelled;
        if countable > 0 {
            stats.completion_rate = stats.completed as f64 / countable as f64;
        }
        stats
    }
}
