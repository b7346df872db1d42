//! Health module: liveness check and service index

pub mod handlers;

pub use handlers::*;
