mod client_storage_fs;

pub use client_storage_fs::*;
