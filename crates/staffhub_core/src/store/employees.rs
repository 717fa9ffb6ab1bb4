//! Employee directory store for manager and owner dashboards.

use crate::model::employee::{Employee, EmployeePatch, EmployeeStats, EmployeeStatus};
use crate::store::domain_store::DomainStore;

pub type EmployeeStore = DomainStore<Employee, EmployeeStats>;

impl EmployeeStore {
    pub fn employees() -> Self {
        Self::new("employees")
    }

    pub fn update_employee_status(&mut self, id: &str, status: EmployeeStatus) -> bool {
        self.update_record(
            id,
            &EmployeePatch {
                status: Some(status),
                ..EmployeePatch::default()
            },
        )
    }

    /// Employees in `department`, compared exactly.
    pub fn by_department(&self, department: &str) -> Vec<&Employee> {
        self.records()
            .iter()
            .filter(|employee| employee.department == department)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EmployeeStore;
    use crate::model::employee::{Employee, EmployeeStatus};
    use crate::model::role::Role;

    fn employee(id: &str, department: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Employee {id}"),
            email: format!("{id}@example.com"),
            department: department.to_string(),
            position: "Associate".to_string(),
            status: EmployeeStatus::Active,
            role: Role::Employee,
        }
    }

    #[test]
    fn status_change_moves_headcount() {
        let mut store = EmployeeStore::employees();
        store.set_records(vec![employee("e1", "Ops"), employee("e2", "Sales")]);
        assert_eq!(store.stats().active, 2);
        assert_eq!(store.stats().departments, 2);

        assert!(store.update_employee_status("e1", EmployeeStatus::OnLeave));
        assert_eq!(store.stats().active, 1);
        assert_eq!(store.stats().on_leave, 1);
        assert_eq!(store.by_department("Ops").len(), 1);
        assert!(store.by_department("ops").is_empty());
    }
}
