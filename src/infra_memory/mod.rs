mod client_storage_memory;

pub use client_storage_memory::*;
