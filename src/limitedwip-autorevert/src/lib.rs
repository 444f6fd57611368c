//! Auto-revert for the limited WIP tools.
//!
//! Once the change list becomes non-empty a countdown starts. When it runs
//! out the change list is rolled back, unless the user commits first. The
//! countdown is driven by one [`AutoRevert::on_timer`] call per second.

mod auto_revert;
mod ide;
mod settings;

pub use auto_revert::AutoRevert;
pub use ide::AutoRevertIde;
pub use settings::AutoRevertSettings;
