//! Health check and index handlers

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use utoipa::ToSchema;

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    /// `None` when the service runs on in-memory storage
    pub db: Option<DatabaseConnection>,
    pub started_at: Arc<Instant>,
}

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: ComponentHealth,
}

/// Component health status
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComponentHealth {
    pub status: String,
    pub latency_ms: Option<u64>,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is degraded", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<HealthState>,
) -> (StatusCode, Json<HealthResponse>) {
    let uptime = state.started_at.elapsed().as_secs();

    let database = match &state.db {
        Some(db) => ping(db).await,
        None => ComponentHealth {
            status: "in-memory".to_string(),
            latency_ms: None,
        },
    };

    let (status, http_status) = if database.status == "error" {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    } else {
        ("ok", StatusCode::OK)
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            database,
        }),
    )
}

async fn ping(db: &DatabaseConnection) -> ComponentHealth {
    let started = Instant::now();
    let result = db
        .execute(Statement::from_string(
            db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await;

    match result {
        Ok(_) => ComponentHealth {
            status: "ok".to_string(),
            latency_ms: Some(started.elapsed().as_millis() as u64),
        },
        Err(e) => {
            tracing::error!(error = %e, "Database ping failed");
            ComponentHealth {
                status: "error".to_string(),
                latency_ms: None,
            }
        }
    }
}

/// Welcome message and endpoint map
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceIndex {
    pub message: String,
    pub version: String,
    pub documentation: String,
    pub endpoints: BTreeMap<String, Vec<String>>,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service index", body = ServiceIndex))
)]
pub async fn index() -> Json<ServiceIndex> {
    let group = |routes: &[&str]| routes.iter().map(|r| r.to_string()).collect::<Vec<_>>();

    let endpoints = BTreeMap::from([
        (
            "authentication".to_string(),
            group(&[
                "POST /api/auth/login",
                "GET /api/auth/me",
                "PUT /api/auth/change-password",
            ]),
        ),
        (
            "employees".to_string(),
            group(&[
                "GET /api/employees",
                "GET /api/employees/{id}",
                "POST /api/employees",
                "PUT /api/employees/{id}",
                "DELETE /api/employees/{id}",
            ]),
        ),
        (
            "reports".to_string(),
            group(&[
                "GET /api/reports/role-counts",
                "GET /api/reports/employees-by-role",
                "GET /api/reports/summary",
            ]),
        ),
        ("health".to_string(), group(&["GET /health"])),
    ]);

    Json(ServiceIndex {
        message: "Welcome to the HR Application API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        documentation: "/docs".to_string(),
        endpoints,
    })
}
