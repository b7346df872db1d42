//! Employee aggregate
//!
//! The employee record doubles as the login identity: its id is the token
//! subject and its role decides what the caller may do.

pub mod model;
pub mod repository;

mod dto_create;
mod dto_update;

pub use model::{Employee, NewEmployee};

pub use dto_create::CreateEmployeeDto;
pub use dto_update::UpdateEmployeeDto;

pub use repository::EmployeeRepositoryInterface;
