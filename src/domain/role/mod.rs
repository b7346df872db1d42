//! Role aggregate
//!
//! Static reference data: `HR` and `Employee`.

pub mod model;
pub mod repository;

pub use model::{Role, RoleName};
pub use repository::RoleRepositoryInterface;
