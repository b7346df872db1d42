//! Employee directory: CRUD and role reports over employee records

pub mod reports;
pub mod service;

pub use reports::{DirectorySummary, RoleCount, RoleGroup};
pub use service::DirectoryService;
