//! Task records and task statistics.

use crate::model::{DomainRecord, RecordStats};
use serde::{Deserialize, Serialize};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Task assigned to an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub assignee_id: Option<String>,
}

impl Task {
    /// Creates a `todo` task with `medium` priority.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            due_date: None,
            assignee_id: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial task update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<i64>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl DomainRecord for Task {
    type Patch = TaskPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn patched(&self, patch: &TaskPatch) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(priority) = patch.priority {
            next.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }
        next
    }
}

/// Task totals by status. `pending` counts `todo` tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
}

impl RecordStats<Task> for TaskStats {
    fn from_records(records: &[Task]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut stats, task| {
                match task.status {
                    TaskStatus::Todo => stats.pending += 1,
                    TaskStatus::InProgress => stats.in_progress += 1,
                    TaskStatus::Completed => stats.completed += 1,
                }
                stats
            },
        )
    }
}
