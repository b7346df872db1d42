//! Credential aggregate: one password record per employee

pub mod model;
pub mod repository;

pub use model::{Credential, NewCredential};
pub use repository::CredentialRepositoryInterface;
