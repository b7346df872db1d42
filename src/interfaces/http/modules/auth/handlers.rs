//! Authentication API handlers

use std::sync::Arc;

use axum::extract::State;

use super::dto::{ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::application::AuthService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ErrorResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::modules::employees::EmployeeDto;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account inactive", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<LoginResponse>> {
    let result = state
        .auth
        .login(request.email.trim(), &request.password)
        .await?;
    Ok(ApiResponse::success(result.into(), "Login successful"))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = ApiResponse<EmployeeDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn get_current_user(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
) -> ApiResult<ApiResponse<EmployeeDto>> {
    let employee = state.auth.current_user(&user.caller).await?;
    Ok(ApiResponse::success(
        employee.into(),
        "Current user retrieved successfully",
    ))
}

#[utoipa::path(
    put,
    path = "/api/auth/change-password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Current password is wrong", body = ErrorResponse)
    )
)]
pub async fn change_password(
    State(state): State<AuthHandlerState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<ApiResponse<()>> {
    state
        .auth
        .change_password(&user.caller, &request.current_password, &request.new_password)
        .await?;
    Ok(ApiResponse::message("Password changed successfully"))
}
