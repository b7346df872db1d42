pub mod shutdown;
pub mod validations;

pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
