//! Report API handlers (HR only)

use axum::extract::State;

use super::dto::{RoleCountDto, RoleGroupDto, SummaryDto};
use crate::interfaces::http::common::{ApiResponse, ApiResult, ErrorResponse};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::employees::DirectoryState;

#[utoipa::path(
    get,
    path = "/api/reports/role-counts",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active employee count per role", body = ApiResponse<Vec<RoleCountDto>>),
        (status = 403, description = "HR role required", body = ErrorResponse)
    )
)]
pub async fn role_counts(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
) -> ApiResult<ApiResponse<Vec<RoleCountDto>>> {
    let counts = state.directory.role_counts(&user.caller).await?;
    Ok(ApiResponse::success(
        counts.into_iter().map(RoleCountDto::from).collect(),
        "Role counts retrieved successfully",
    ))
}

#[utoipa::path(
    get,
    path = "/api/reports/employees-by-role",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Employees grouped by role", body = ApiResponse<Vec<RoleGroupDto>>),
        (status = 403, description = "HR role required", body = ErrorResponse)
    )
)]
pub async fn employees_by_role(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
) -> ApiResult<ApiResponse<Vec<RoleGroupDto>>> {
    let groups = state.directory.employees_by_role(&user.caller).await?;
    Ok(ApiResponse::success(
        groups.into_iter().map(RoleGroupDto::from).collect(),
        "Employees by role retrieved successfully",
    ))
}

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Directory summary", body = ApiResponse<SummaryDto>),
        (status = 403, description = "HR role required", body = ErrorResponse)
    )
)]
pub async fn summary(
    State(state): State<DirectoryState>,
    user: AuthenticatedUser,
) -> ApiResult<ApiResponse<SummaryDto>> {
    let summary = state.directory.summary(&user.caller).await?;
    Ok(ApiResponse::success(
        summary.into(),
        "Summary statistics retrieved successfully",
    ))
}
