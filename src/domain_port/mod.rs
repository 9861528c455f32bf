// collaborators consumed by the session core

mod client_storage;
mod navigator;
mod role_transport;

pub use client_storage::*;
pub use navigator::*;
pub use role_transport::*;
