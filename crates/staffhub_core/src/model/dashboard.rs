//! Server-computed dashboard summary.

use serde::{Deserialize, Serialize};

/// Company-level figures computed by the API and stored as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_employees: u32,
    pub active_employees: u32,
    pub pending_tasks: u32,
    pub open_alerts: u32,
    /// Ratio in `0.0..=1.0`.
    pub attendance_rate: f64,
}
