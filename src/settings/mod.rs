//! The `settings` module is a simple utility that requires manual verification.
//! See `bin/session_demo.rs` for a binary demonstrating its usage.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
