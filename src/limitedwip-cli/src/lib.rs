//! Library side of the `limitedwip` binary.
//!
//! - `cli/` - argument parsing and dispatch
//! - `logging` - tracing subscriber setup
//! - `*_cmd.rs` - individual commands

pub mod cli;
pub mod config_cmd;
pub mod logging;
pub mod replay_cmd;
pub mod run_cmd;
