//! Employee DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateEmployeeDto, Employee, RoleName, UpdateEmployeeDto};

/// Employee API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub address: Option<String>,
    pub cell_number: Option<String>,
    pub role_id: i32,
    pub role_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeDto {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id,
            email: e.email,
            name: e.name,
            address: e.address,
            cell_number: e.cell_number,
            role_id: e.role_id,
            role_name: e
                .role_name
                .unwrap_or_else(|| RoleName::Employee.as_str().to_string()),
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Create employee request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    #[serde(default)]
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Invalid email format")
    )]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "crate::shared::validations::validate_name"))]
    pub name: String,
    #[validate(length(max = 255, message = "Address cannot exceed 255 characters"))]
    pub address: Option<String>,
    #[validate(custom(function = "crate::shared::validations::validate_phone"))]
    pub cell_number: Option<String>,
    #[serde(default)]
    #[validate(range(min = 1, message = "Role ID is required"))]
    pub role_id: i32,
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

impl From<CreateEmployeeRequest> for CreateEmployeeDto {
    fn from(r: CreateEmployeeRequest) -> Self {
        Self {
            email: r.email.trim().to_string(),
            name: r.name.trim().to_string(),
            address: r.address,
            cell_number: r.cell_number,
            role_id: r.role_id,
            password: r.password,
        }
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    #[validate(custom(function = "crate::shared::validations::validate_name_change"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Address cannot exceed 255 characters"))]
    pub address: Option<String>,
    #[validate(custom(function = "crate::shared::validations::validate_phone"))]
    pub cell_number: Option<String>,
    #[validate(range(min = 1, message = "Role ID must be positive"))]
    pub role_id: Option<i32>,
    pub is_active: Option<bool>,
}

impl From<UpdateEmployeeRequest> for UpdateEmployeeDto {
    fn from(r: UpdateEmployeeRequest) -> Self {
        Self {
            name: r.name.map(|n| n.trim().to_string()),
            address: r.address,
            cell_number: r.cell_number,
            role_id: r.role_id,
            is_active: r.is_active,
        }
    }
}
