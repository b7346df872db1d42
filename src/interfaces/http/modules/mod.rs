pub mod auth;
pub mod employees;
pub mod health;
pub mod reports;
pub mod request_id;
