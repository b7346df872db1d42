//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AuthService, DirectoryService};
use crate::domain::{CommonErrorCode, Policy, RepositoryProvider};
use crate::infrastructure::crypto::jwt::TokenIssuer;
use crate::interfaces::http::common::{ApiError, ErrorResponse};
use crate::interfaces::http::middleware::{auth_middleware, guarded, require_policy, AuthState};
use crate::interfaces::http::modules::request_id::request_id_middleware;

use super::modules::{auth, employees, health, reports};

/// Everything the route groups need. Handlers extract their own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<DirectoryService>,
    pub auth_service: Arc<AuthService>,
    pub auth: AuthState,
    /// Pinged by `/health`; `None` for in-memory storage
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

impl AppState {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        tokens: Arc<TokenIssuer>,
        db: Option<DatabaseConnection>,
    ) -> Self {
        Self {
            directory: Arc::new(DirectoryService::new(repos.clone())),
            auth_service: Arc::new(AuthService::new(repos, tokens.clone())),
            auth: AuthState { tokens },
            db,
            started_at: Arc::new(Instant::now()),
        }
    }
}

// -- FromRef implementations so each handler keeps its own State<T> extractor --

impl FromRef<AppState> for employees::DirectoryState {
    fn from_ref(s: &AppState) -> Self {
        employees::DirectoryState {
            directory: Arc::clone(&s.directory),
        }
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            auth: Arc::clone(&s.auth_service),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            db: s.db.clone(),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Application API",
        description = "Employee directory with role-based access control"
    ),
    paths(
        // Health
        health::index,
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        auth::change_password,
        // Employees
        employees::list_employees,
        employees::get_employee,
        employees::create_employee,
        employees::update_employee,
        employees::delete_employee,
        // Reports
        reports::role_counts,
        reports::employees_by_role,
        reports::summary,
    ),
    components(schemas(
        ErrorResponse,
        health::HealthResponse,
        health::ComponentHealth,
        health::ServiceIndex,
        auth::LoginRequest,
        auth::LoginResponse,
        auth::ChangePasswordRequest,
        employees::EmployeeDto,
        employees::CreateEmployeeRequest,
        employees::UpdateEmployeeRequest,
        reports::RoleCountDto,
        reports::RoleGroupDto,
        reports::SummaryDto,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service index and health check"),
        (name = "Authentication", description = "Login, current user, password change"),
        (name = "Employees", description = "Employee directory CRUD"),
        (name = "Reports", description = "Role statistics (HR only)"),
    )
)]
pub struct ApiDoc;

async fn route_not_found() -> ApiError {
    ApiError(CommonErrorCode::ResourceNotFound.into())
}

/// Create the API router with Swagger UI
pub fn create_api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let auth_layer = middleware::from_fn_with_state(state.auth.clone(), auth_middleware);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(auth_layer.clone())
        .with_state(state.clone());

    // Employee routes, one policy per method
    let employee_routes = Router::new()
        .route(
            "/",
            guarded(
                get(employees::list_employees).post(employees::create_employee),
                Policy::HrOnly,
            ),
        )
        .route(
            "/{id}",
            guarded(
                get(employees::get_employee).put(employees::update_employee),
                Policy::SameUserOrHr,
            )
            .merge(guarded(delete(employees::delete_employee), Policy::HrOnly)),
        )
        .layer(auth_layer.clone())
        .with_state(state.clone());

    // Report routes (HR only)
    let report_routes = Router::new()
        .route("/role-counts", get(reports::role_counts))
        .route("/employees-by-role", get(reports::employees_by_role))
        .route("/summary", get(reports::summary))
        .route_layer(middleware::from_fn_with_state(
            Policy::HrOnly,
            require_policy,
        ))
        .layer(auth_layer)
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/", get(health::index))
        .route("/health", get(health::health_check))
        .with_state(state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Index + health
        .merge(health_routes)
        // Auth
        .nest("/api/auth", auth_routes)
        .nest("/api/auth", auth_protected_routes)
        // Employees
        .nest("/api/employees", employee_routes)
        // Reports
        .nest("/api/reports", report_routes)
        .fallback(route_not_found)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
