//! Access control
//!
//! A closed set of policies evaluated against the caller identity taken from
//! the bearer token. The HTTP route layer and the directory service both go
//! through [`authorize`].

mod policy;

pub use policy::{authorize, evaluate, Caller, Policy};
