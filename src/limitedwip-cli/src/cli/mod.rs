//! Argument parsing and command dispatch.

pub mod args;
pub mod handlers;

pub use args::{Cli, Commands, LogLevel, OutputArgs};
pub use handlers::dispatch_command;
