//! # HR Directory
//!
//! Employee directory REST API with bearer-token authentication and two
//! roles: HR staff manage every record, employees see and edit their own.
//!
//! ## Architecture
//!
//! - **domain**: entities, error taxonomy, repository traits, authorization policies
//! - **application**: directory and identity services
//! - **infrastructure**: password hashing, tokens, SeaORM persistence, in-memory storage
//! - **interfaces**: axum router, middleware and handlers
//! - **server**: process lifecycle (database, migrations, serve, shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use infrastructure::storage::InMemoryStorage;

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
