//! Reports module: role statistics for HR

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
