//! Task store used by the employee app and manager dashboard.

use crate::model::task::{Task, TaskPatch, TaskStats, TaskStatus};
use crate::store::domain_store::DomainStore;

pub type TaskStore = DomainStore<Task, TaskStats>;

impl TaskStore {
    pub fn tasks() -> Self {
        Self::new("tasks")
    }

    /// Moves one task to `status`. No-op when the task is gone.
    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> bool {
        self.update_record(id, &TaskPatch::status(status))
    }

    /// Tasks assigned to `assignee_id`, in store order.
    pub fn assigned_to(&self, assignee_id: &str) -> Vec<&Task> {
        self.records()
            .iter()
            .filter(|task| task.assignee_id.as_deref() == Some(assignee_id))
            .collect()
    }
}
