//! Application layer: use-case orchestration over the domain repositories

pub mod directory;
pub mod identity;

pub use directory::{DirectoryService, DirectorySummary, RoleCount, RoleGroup};
pub use identity::{AuthResult, AuthService};
