//! HTTP REST API interfaces
//!
//! - `common`: response envelopes and the validated JSON extractor
//! - `middleware`: bearer authentication and policy enforcement
//! - `modules`: route groups (auth, employees, reports, health)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, AppState};
