//! Identity module: login, current user and password changes

pub mod service;

pub use service::{AuthResult, AuthService};
