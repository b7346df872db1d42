use chrono::{DateTime, Utc};

use crate::domain::Employee;

/// Active employee count for one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleCount {
    pub role_id: i32,
    pub role_name: String,
    pub employee_count: u64,
}

/// All employees holding one role, ordered by name
#[derive(Debug, Clone)]
pub struct RoleGroup {
    pub role_id: i32,
    pub role_name: String,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone)]
pub struct DirectorySummary {
    /// Sum of the active counts in `role_breakdown`
    pub total_employees: u64,
    pub role_breakdown: Vec<RoleCount>,
    pub generated_at: DateTime<Utc>,
}

impl DirectorySummary {
    pub fn from_counts(role_breakdown: Vec<RoleCount>) -> Self {
        Self {
            total_employees: role_breakdown.iter().map(|r| r.employee_count).sum(),
            role_breakdown,
            generated_at: Utc::now(),
        }
    }
}
