//! Employee API handlers
//!
//! Policies are enforced by route layers and again inside `DirectoryService`.

use std::sync::Arc;

use axum::extract::State;

use super::dto::{CreateEmployeeRequest, EmployeeDto, UpdateEmployeeRequest};
use crate::application::DirectoryService;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, ErrorResponse, ValidatedJson, DEFAULT_SUCCESS_MESSAGE,
};
use crate::interfaces::http::middleware::{AuthenticatedUser, EmployeeId};

/// State shared by the employee and report handlers
#[derive(Clone)]
pub struct DirectoryState {
    pub directory: Arc<DirectoryService>,
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee found", body = ApiResponse<EmployeeDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not HR and not the owner", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn get_employee(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
    EmployeeId(id): EmployeeId,
) -> ApiResult<ApiResponse<EmployeeDto>> {
    let employee = state.directory.get_by_id(id, &user.caller).await?;
    Ok(ApiResponse::success(
        employee.into(),
        "Employee retrieved successfully",
    ))
}

#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All employees ordered by name", body = ApiResponse<Vec<EmployeeDto>>),
        (status = 403, description = "HR role required", body = ErrorResponse)
    )
)]
pub async fn list_employees(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
) -> ApiResult<ApiResponse<Vec<EmployeeDto>>> {
    let items: Vec<EmployeeDto> = state
        .directory
        .get_all(&user.caller)
        .await?
        .into_iter()
        .map(EmployeeDto::from)
        .collect();

    let message = format!("{} employees retrieved successfully", items.len());
    Ok(ApiResponse::success(items, message))
}

#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = ApiResponse<EmployeeDto>),
        (status = 400, description = "Validation error or unknown role", body = ErrorResponse),
        (status = 403, description = "HR role required", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse)
    )
)]
pub async fn create_employee(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateEmployeeRequest>,
) -> ApiResult<ApiResponse<EmployeeDto>> {
    let created = state
        .directory
        .create(request.into(), &user.caller)
        .await?;
    Ok(ApiResponse::created(
        created.into(),
        "Employee created successfully",
    ))
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = ApiResponse<EmployeeDto>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Not HR and not the owner", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn update_employee(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
    EmployeeId(id): EmployeeId,
    ValidatedJson(request): ValidatedJson<UpdateEmployeeRequest>,
) -> ApiResult<ApiResponse<EmployeeDto>> {
    let updated = state
        .directory
        .update(id, request.into(), &user.caller)
        .await?;
    Ok(ApiResponse::success(
        updated.into(),
        "Employee updated successfully",
    ))
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee deleted", body = ApiResponse<String>),
        (status = 403, description = "HR role required", body = ErrorResponse),
        (status = 404, description = "Employee not found", body = ErrorResponse)
    )
)]
pub async fn delete_employee(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
    EmployeeId(id): EmployeeId,
) -> ApiResult<ApiResponse<String>> {
    state.directory.delete(id, &user.caller).await?;
    Ok(ApiResponse::success(
        format!("Employee with ID {id} deleted successfully"),
        DEFAULT_SUCCESS_MESSAGE,
    ))
}
