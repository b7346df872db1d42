//! Database entities module

pub mod employee;
pub mod role;
pub mod user_password;

pub use employee::Entity as Employee;
pub use role::Entity as Role;
pub use user_password::Entity as UserPassword;
