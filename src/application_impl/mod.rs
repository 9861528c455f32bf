mod navigator_fake;
mod role_transport_fake;
mod session_orchestrator;
mod token_store;

pub use navigator_fake::*;
pub use role_transport_fake::*;
pub use session_orchestrator::*;
pub use token_store::*;
