//! Employee directory records.

use crate::model::role::Role;
use crate::model::{DomainRecord, RecordStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    OnLeave,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
    pub status: EmployeeStatus,
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeePatch {
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl DomainRecord for Employee {
    type Patch = EmployeePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn patched(&self, patch: &EmployeePatch) -> Self {
        let mut next = self.clone();
        if let Some(department) = &patch.department {
            next.department = department.clone();
        }
        if let Some(position) = &patch.position {
            next.position = position.clone();
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        next
    }
}

/// Headcount by status plus the number of distinct departments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStats {
    pub total: usize,
    pub active: usize,
    pub on_leave: usize,
    pub inactive: usize,
    pub departments: usize,
}

impl RecordStats<Employee> for EmployeeStats {
    fn from_records(records: &[Employee]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };
        let mut departments = BTreeSet::new();
        for employee in records {
            match employee.status {
                EmployeeStatus::Active => stats.active += 1,
                EmployeeStatus::OnLeave => stats.on_leave += 1,
                EmployeeStatus::Inactive => stats.inactive += 1,
            }
            departments.insert(employee.department.as_str());
        }
        stats.departments = departments.len();
        stats
    }
}
