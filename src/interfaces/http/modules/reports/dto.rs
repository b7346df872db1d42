use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::{DirectorySummary, RoleCount, RoleGroup};
use crate::interfaces::http::modules::employees::EmployeeDto;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleCountDto {
    pub role_id: i32,
    pub role_name: String,
    /// Active employees holding the role
    pub employee_count: u64,
}

impl From<RoleCount> for RoleCountDto {
    fn from(c: RoleCount) -> Self {
        Self {
            role_id: c.role_id,
            role_name: c.role_name,
            employee_count: c.employee_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleGroupDto {
    pub role_id: i32,
    pub role_name: String,
    pub employees: Vec<EmployeeDto>,
}

impl From<RoleGroup> for RoleGroupDto {
    fn from(g: RoleGroup) -> Self {
        Self {
            role_id: g.role_id,
            role_name: g.role_name,
            employees: g.employees.into_iter().map(EmployeeDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub total_employees: u64,
    pub role_breakdown: Vec<RoleCountDto>,
    pub generated_at: DateTime<Utc>,
}

impl From<DirectorySummary> for SummaryDto {
    fn from(s: DirectorySummary) -> Self {
        Self {
            total_employees: s.total_employees,
            role_breakdown: s.role_breakdown.into_iter().map(RoleCountDto::from).collect(),
            generated_at: s.generated_at,
        }
    }
}
